//! Legislated constants that do not vary by calendar year

/// Permanent benefit reduction per month of early retirement (0.3%).
pub const DEDUCTION_PER_MONTH: f64 = 0.003;

/// Maximum number of months that incur a deduction.
pub const MAX_DEDUCTION_MONTHS: u32 = 48;

/// Maximum total deduction (14.4%, i.e. 48 months at 0.3%).
pub const MAX_DEDUCTION: f64 = 0.144;

/// General waiting period in insured years.
pub const MIN_INSURANCE_YEARS: u32 = 5;

/// Waiting period for the long-term insured early pension.
pub const LONG_TERM_INSURANCE_YEARS: u32 = 35;

/// Waiting period qualifying for the deduction-free early pension.
pub const EXTRA_LONG_TERM_INSURANCE_YEARS: u32 = 45;
