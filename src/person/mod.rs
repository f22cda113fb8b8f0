//! Person records and input validation

mod data;
mod loader;

pub use data::{Person, Sex, ValidationError, MAX_ACCRUED_POINTS, MAX_SUPPLEMENTARY_PENSION};
pub use loader::{load_persons, load_persons_from_reader};
