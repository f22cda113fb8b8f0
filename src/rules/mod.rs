//! Statutory retirement rules: legal constants and birth-year threshold tables

mod constants;
mod thresholds;

pub use constants::{
    DEDUCTION_PER_MONTH, EXTRA_LONG_TERM_INSURANCE_YEARS, LONG_TERM_INSURANCE_YEARS,
    MAX_DEDUCTION, MAX_DEDUCTION_MONTHS, MIN_INSURANCE_YEARS,
};
pub use thresholds::{
    earliest_deduction_free_date, earliest_deduction_free_start, severe_disability_retirement_age,
    severe_disability_retirement_date, standard_retirement_age, standard_retirement_date,
    womens_early_retirement_age, womens_early_retirement_date, AgeOffset, EarlyStartRule,
};
