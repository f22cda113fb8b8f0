//! Economic and legal parameters for one validity year

mod loader;
mod params;

pub use loader::{load_parameters, load_parameters_from_reader};
pub use params::{PensionParameters, RetirementChoice};
