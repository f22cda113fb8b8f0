//! Person data structures and the recoverable validation taxonomy

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar;
use crate::config::{PensionParameters, RetirementChoice};

/// Plausibility ceiling for accrued pension points.
pub const MAX_ACCRUED_POINTS: f64 = 200.0;

/// Plausibility ceiling for each supplementary pension (monthly).
pub const MAX_SUPPLEMENTARY_PENSION: f64 = 5_000.0;

/// Earliest age at which a retirement start is accepted at all.
const MIN_RETIREMENT_START_AGE: u32 = 60;

/// Sex of the person.
///
/// Only the historical women's early-retirement rule (cohorts born 1951 or
/// earlier) depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// A person's inputs for one benefit calculation.
///
/// One record persists across a session and is edited in place by the caller;
/// the engine never creates or mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique record identifier
    pub id: u64,

    /// Sex (relevant for the women's early-retirement rule only)
    pub sex: Sex,

    /// Birth date, a plain civil date
    pub birth_date: NaiveDate,

    /// Current monthly gross income
    pub monthly_gross_income: f64,

    /// Pension points accrued so far
    pub accrued_points: f64,

    /// Already-granted pension, informational only
    #[serde(default)]
    pub current_pension: Option<f64>,

    /// Occupational pension, monthly
    #[serde(default)]
    pub company_pension: f64,

    /// Private pension, monthly
    #[serde(default)]
    pub private_pension: f64,

    /// Widow/survivor pension, monthly
    #[serde(default)]
    pub survivor_pension: Option<f64>,
}

impl Person {
    /// Create a person with the core inputs; supplementary amounts start at zero.
    pub fn new(
        id: u64,
        sex: Sex,
        birth_date: NaiveDate,
        monthly_gross_income: f64,
        accrued_points: f64,
    ) -> Self {
        Self {
            id,
            sex,
            birth_date,
            monthly_gross_income,
            accrued_points,
            current_pension: None,
            company_pension: 0.0,
            private_pension: 0.0,
            survivor_pension: None,
        }
    }

    /// Birth year in the civil calendar.
    pub fn birth_year(&self) -> i32 {
        self.birth_date.year()
    }

    /// Annual gross income (monthly x 12).
    pub fn annual_gross_income(&self) -> f64 {
        self.monthly_gross_income * 12.0
    }

    /// Sum of all supplementary monthly pensions (occupational, private,
    /// survivor).
    pub fn total_supplementary_pension(&self) -> f64 {
        self.company_pension + self.private_pension + self.survivor_pension.unwrap_or(0.0)
    }

    /// Annualized supplementary pensions.
    pub fn annual_supplementary_pension(&self) -> f64 {
        self.total_supplementary_pension() * 12.0
    }

    pub fn has_supplementary_pension(&self) -> bool {
        self.total_supplementary_pension() > 0.0
    }

    /// Full years of age at the given date.
    pub fn age_as_of(&self, as_of: NaiveDate) -> i32 {
        calendar::age_in_years(self.birth_date, as_of)
    }

    /// Validate all inputs against the given parameter set, as of today.
    ///
    /// Recoverable: the caller surfaces the message and re-prompts. The
    /// engine itself never returns these; it must only be invoked with a
    /// person that passed validation.
    pub fn validate(&self, params: &PensionParameters) -> Result<(), ValidationError> {
        self.validate_as_of(params, calendar::today())
    }

    /// Validation against an explicit reference date.
    pub fn validate_as_of(
        &self,
        params: &PensionParameters,
        as_of: NaiveDate,
    ) -> Result<(), ValidationError> {
        if !calendar::is_valid_birth_date_as_of(self.birth_date, as_of) {
            return Err(ValidationError::InvalidBirthDate);
        }

        let max_monthly = params.contribution_ceiling_annual / 12.0;
        if self.monthly_gross_income < 0.0 || self.monthly_gross_income > max_monthly {
            return Err(ValidationError::IncomeOutOfRange { max: max_monthly });
        }

        if self.accrued_points < 0.0 || self.accrued_points > MAX_ACCRUED_POINTS {
            return Err(ValidationError::PointsOutOfRange);
        }

        if let RetirementChoice::Custom(start) = params.retirement_choice {
            let age_60 = calendar::add_years(self.birth_date, MIN_RETIREMENT_START_AGE);
            if start < age_60 {
                return Err(ValidationError::RetirementStartTooEarly);
            }
        }

        for amount in [
            self.company_pension,
            self.private_pension,
            self.survivor_pension.unwrap_or(0.0),
        ] {
            if !(0.0..=MAX_SUPPLEMENTARY_PENSION).contains(&amount) {
                return Err(ValidationError::SupplementaryPensionOutOfRange);
            }
        }

        Ok(())
    }

    /// Boolean form of [`Person::validate_as_of`], used by engine preconditions.
    pub fn is_valid_as_of(&self, params: &PensionParameters, as_of: NaiveDate) -> bool {
        self.validate_as_of(params, as_of).is_ok()
    }
}

/// User-facing validation errors.
///
/// These are rejected before the formula engine is reached; none of them
/// occurs inside a computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("birth date must lie between 1 Jan 1920 and 18 years before today")]
    InvalidBirthDate,

    #[error("monthly income must be between 0 and {max:.0} (contribution ceiling)")]
    IncomeOutOfRange { max: f64 },

    #[error("accrued pension points must be between 0 and 200")]
    PointsOutOfRange,

    #[error("the chosen retirement start must not lie before the 60th birthday")]
    RetirementStartTooEarly,

    #[error("supplementary pensions must be between 0 and 5000 per month")]
    SupplementaryPensionOutOfRange,
}
