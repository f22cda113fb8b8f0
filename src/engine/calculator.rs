//! Benefit calculator tying rules, calendar, and parameters together

use chrono::NaiveDate;
use log::debug;

use super::deduction::deduction_percentage;
use super::result::{ComputationTrace, PensionResult};
use crate::calendar;
use crate::config::PensionParameters;
use crate::person::Person;
use crate::rules;

/// Age thresholds for the retirement-start plausibility check.
const EARLIEST_START_AGE: i32 = 60;
const EARLY_START_WARNING_AGE: i32 = 63;

/// Computes benefit estimates for validated person records.
///
/// Holds one parameter value; per-call overrides take a different set without
/// touching the held one. The calculator itself has no mutable state, so it
/// is freely shareable across threads.
#[derive(Debug, Clone)]
pub struct PensionCalculator {
    params: PensionParameters,
}

impl PensionCalculator {
    /// Create a calculator with the given parameter set.
    pub fn new(params: PensionParameters) -> Self {
        Self { params }
    }

    /// Calculator with the default statutory values.
    pub fn with_defaults() -> Self {
        Self::new(PensionParameters::default())
    }

    /// Get reference to the held parameters for inspection.
    pub fn params(&self) -> &PensionParameters {
        &self.params
    }

    /// Get mutable reference to the held parameters for customization.
    pub fn params_mut(&mut self) -> &mut PensionParameters {
        &mut self.params
    }

    /// Compute the benefit estimate for a person, as of today.
    ///
    /// Precondition: the person has passed [`Person::validate`] against the
    /// held parameters. Invalid input is a caller contract violation.
    pub fn compute_benefit(&self, person: &Person) -> PensionResult {
        self.compute(person, &self.params, calendar::today())
    }

    /// Compute with an explicit parameter set instead of the held one.
    pub fn compute_benefit_with(&self, person: &Person, params: &PensionParameters) -> PensionResult {
        self.compute(person, params, calendar::today())
    }

    /// Compute against an explicit reference date.
    pub fn compute_benefit_as_of(&self, person: &Person, as_of: NaiveDate) -> PensionResult {
        self.compute(person, &self.params, as_of)
    }

    fn compute(
        &self,
        person: &Person,
        params: &PensionParameters,
        as_of: NaiveDate,
    ) -> PensionResult {
        debug_assert!(
            person.is_valid_as_of(params, as_of),
            "person record failed validation; callers must validate before computing"
        );

        // Statutory dates, derived from the birth date and already snapped to
        // a first of month
        let statutory_date = rules::standard_retirement_date(person.birth_date);
        let earliest_free_date = rules::earliest_deduction_free_date(person.birth_date);
        let chosen_date = params.resolve_retirement_date(statutory_date);

        // Remaining contribution span; the running month does not count
        let current_month = calendar::first_of_month(as_of);
        let months_until = calendar::months_between(current_month, chosen_date, true);
        let years_until = months_until as f64 / 12.0;

        // Projected additional points from income, capped at the ceiling
        let annual_income = person.annual_gross_income();
        let capped_income = annual_income.min(params.contribution_ceiling_annual);
        let points_per_year = if params.average_annual_wage > 0.0 {
            capped_income / params.average_annual_wage
        } else {
            0.0
        };
        let projected_points = points_per_year * years_until;

        let deduction_rate =
            deduction_percentage(chosen_date, statutory_date, earliest_free_date);

        debug!(
            "compute_benefit: person={} chosen={} months_until={} points/yr={:.4} projected={:.4} deduction={:.3}",
            person.id, chosen_date, months_until, points_per_year, projected_points, deduction_rate
        );

        let trace = ComputationTrace {
            months_until_retirement: months_until,
            years_until_retirement: years_until,
            annual_gross_income: annual_income,
            contribution_ceiling: params.contribution_ceiling_annual,
            average_wage: params.average_annual_wage,
            capped_income,
            points_per_year,
        };

        PensionResult::new(
            person,
            statutory_date,
            earliest_free_date,
            chosen_date,
            person.accrued_points,
            projected_points,
            deduction_rate,
            params,
        )
        .with_trace(trace)
    }

    /// Pension points one year of the given annual income earns.
    pub fn points_per_year(&self, annual_income: f64) -> f64 {
        if self.params.average_annual_wage <= 0.0 {
            return 0.0;
        }
        let capped = annual_income.min(self.params.contribution_ceiling_annual);
        capped / self.params.average_annual_wage
    }

    /// Annual income required to earn the given number of points per year.
    pub fn required_income_for_points(&self, points: f64) -> f64 {
        points * self.params.average_annual_wage
    }

    /// Gross benefit only, for quick what-if displays.
    pub fn quick_estimate(&self, person: &Person) -> f64 {
        self.compute_benefit(person).gross_benefit
    }

    /// Monthly gross-benefit change if the person's income changed.
    pub fn income_raise_impact(&self, person: &Person, new_monthly_income: f64) -> f64 {
        let baseline = self.quick_estimate(person);
        let mut raised = person.clone();
        raised.monthly_gross_income = new_monthly_income;
        self.quick_estimate(&raised) - baseline
    }
}

impl Default for PensionCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Outcome of the retirement-start plausibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetirementStartCheck {
    pub is_valid: bool,
    pub warning: Option<String>,
}

/// Check a desired retirement start against the person's age.
///
/// Before 60 the start is rejected outright; before 63 it is accepted with a
/// warning since the qualifying conditions are rarely met that early.
pub fn check_retirement_start(start: NaiveDate, birth_date: NaiveDate) -> RetirementStartCheck {
    let age_at_start = calendar::age_in_years(birth_date, start);

    if age_at_start < EARLIEST_START_AGE {
        return RetirementStartCheck {
            is_valid: false,
            warning: Some("a retirement start before age 60 is not possible".to_string()),
        };
    }

    if age_at_start < EARLY_START_WARNING_AGE {
        return RetirementStartCheck {
            is_valid: true,
            warning: Some(
                "very early retirement start; check the qualifying conditions".to_string(),
            ),
        };
    }

    RetirementStartCheck { is_valid: true, warning: None }
}
