//! Scenario generation for alternative retirement-start dates
//!
//! Re-runs the formula engine under several start-date alternatives, each on
//! its own parameter copy so the session's baseline is never touched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::{PensionParameters, RetirementChoice};
use crate::engine::{PensionCalculator, PensionResult};
use crate::person::Person;
use crate::rules;

/// Qualitative tag attached to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Favorable,
    Neutral,
    Unfavorable,
}

/// One named scenario wrapping a computed result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    pub recommendation: Recommendation,
    pub result: PensionResult,
}

/// Pre-configured generator for the standard set of retirement scenarios.
///
/// Holds the session's base parameters; every scenario runs on a clone with
/// its own retirement choice.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    base_params: PensionParameters,
}

impl ScenarioGenerator {
    /// Create a generator over the given base parameters.
    pub fn new(base_params: PensionParameters) -> Self {
        Self { base_params }
    }

    /// Generator with the default statutory values.
    pub fn with_defaults() -> Self {
        Self::new(PensionParameters::default())
    }

    /// Get reference to the base parameters for inspection.
    pub fn params(&self) -> &PensionParameters {
        &self.base_params
    }

    /// Get mutable reference to the base parameters for customization.
    pub fn params_mut(&mut self) -> &mut PensionParameters {
        &mut self.base_params
    }

    /// Generate the scenario set for a person, as of today.
    pub fn generate(&self, person: &Person) -> Vec<ScenarioResult> {
        self.generate_as_of(person, calendar::today())
    }

    /// Generate against an explicit reference date.
    ///
    /// The list always starts with the statutory-age scenario; the others are
    /// included when their qualifying conditions hold.
    pub fn generate_as_of(&self, person: &Person, as_of: NaiveDate) -> Vec<ScenarioResult> {
        let statutory_date = rules::standard_retirement_date(person.birth_date);
        let earliest_free_date = rules::earliest_deduction_free_date(person.birth_date);

        let mut scenarios = Vec::new();

        scenarios.push(self.run(
            person,
            RetirementChoice::StatutoryDate,
            as_of,
            "Standard retirement age",
            "Retirement exactly at the statutory age",
            Recommendation::Neutral,
        ));

        if earliest_free_date < statutory_date {
            scenarios.push(self.run(
                person,
                RetirementChoice::Custom(earliest_free_date),
                as_of,
                "Deduction-free earlier",
                "Earliest start without deductions (45 contribution years assumed)",
                Recommendation::Favorable,
            ));
        }

        let age_63 = calendar::add_years(person.birth_date, 63);
        if age_63 > as_of && age_63 > earliest_free_date {
            scenarios.push(self.run(
                person,
                RetirementChoice::Custom(calendar::next_first_of_month(age_63)),
                as_of,
                "At age 63",
                "Retirement at 63, before full eligibility",
                Recommendation::Unfavorable,
            ));
        }

        let one_year_later = calendar::add_years(statutory_date, 1);
        scenarios.push(self.run(
            person,
            RetirementChoice::Custom(calendar::next_first_of_month(one_year_later)),
            as_of,
            "One year after standard age",
            "Retirement one year past the statutory age",
            Recommendation::Favorable,
        ));

        scenarios
    }

    fn run(
        &self,
        person: &Person,
        choice: RetirementChoice,
        as_of: NaiveDate,
        name: &str,
        description: &str,
        recommendation: Recommendation,
    ) -> ScenarioResult {
        let mut params = self.base_params.clone();
        params.update_for_birth_date(person.birth_date);
        params.retirement_choice = choice;

        let calculator = PensionCalculator::new(params);
        ScenarioResult {
            name: name.to_string(),
            description: description.to_string(),
            recommendation,
            result: calculator.compute_benefit_as_of(person, as_of),
        }
    }
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Scenario with the highest combined gross benefit; on equal benefits the
/// earlier list entry wins.
pub fn best_by_gross(scenarios: &[ScenarioResult]) -> Option<&ScenarioResult> {
    let mut best: Option<&ScenarioResult> = None;
    for scenario in scenarios {
        let beats = match best {
            Some(current) => {
                scenario.result.combined_gross_benefit > current.result.combined_gross_benefit
            }
            None => true,
        };
        if beats {
            best = Some(scenario);
        }
    }
    best
}
