//! Parameter value type holding the statutory and economic constants

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::rules;

/// How the retirement start date for a calculation is chosen.
///
/// `Custom` survives a birth-date change; `StatutoryDate` always tracks the
/// freshly derived default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetirementChoice {
    /// Follow the statutory retirement date derived from the birth date.
    StatutoryDate,
    /// Explicit start date chosen by the user.
    Custom(NaiveDate),
}

/// Economy-wide constants valid for one calendar year, plus the derived
/// statutory dates for the current reference birth date.
///
/// A plain value type: scenarios clone it and modify the clone, so a session's
/// baseline is never aliased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionParameters {
    /// Calendar year these constants are valid for
    pub validity_year: i32,

    /// National average annual wage
    pub average_annual_wage: f64,

    /// Monetary value of one pension point (monthly)
    pub pension_point_value: f64,

    /// Annual income ceiling above which no further points accrue
    pub contribution_ceiling_annual: f64,

    /// Annual tax-free allowance
    pub tax_free_allowance_annual: f64,

    /// Share of the pension that is taxable
    pub taxable_share: f64,

    /// Flat average tax rate applied to the taxable amount
    pub average_tax_rate: f64,

    /// General health-insurance contribution rate
    pub health_insurance_rate: f64,

    /// Health-insurance supplemental contribution rate
    pub health_insurance_extra_rate: f64,

    /// Long-term-care contribution rate
    pub long_term_care_rate: f64,

    /// Statutory retirement date for the current reference birth date
    pub standard_retirement_date: NaiveDate,

    /// Earliest deduction-free start for the current reference birth date
    pub earliest_deduction_free_date: NaiveDate,

    /// Retirement start selection driving the next calculation
    pub retirement_choice: RetirementChoice,
}

/// Reference birth date used for the derived dates before any person is known.
fn default_reference_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1965, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl Default for PensionParameters {
    /// 2025 statutory values.
    fn default() -> Self {
        let reference = default_reference_birth_date();
        Self {
            validity_year: 2025,
            average_annual_wage: 50_493.0,
            pension_point_value: 40.79,
            contribution_ceiling_annual: 96_600.0,
            tax_free_allowance_annual: 12_084.0,
            taxable_share: 0.85,
            average_tax_rate: 0.15,
            health_insurance_rate: 0.146,
            health_insurance_extra_rate: 0.013,
            long_term_care_rate: 0.034,
            standard_retirement_date: rules::standard_retirement_date(reference),
            earliest_deduction_free_date: rules::earliest_deduction_free_date(reference),
            retirement_choice: RetirementChoice::StatutoryDate,
        }
    }
}

impl PensionParameters {
    /// Recompute the derived statutory dates for a new reference birth date.
    ///
    /// The retirement choice is left untouched: a custom choice keeps its
    /// date, the statutory default follows the recomputed dates implicitly.
    pub fn update_for_birth_date(&mut self, birth_date: NaiveDate) {
        self.standard_retirement_date = rules::standard_retirement_date(birth_date);
        self.earliest_deduction_free_date = rules::earliest_deduction_free_date(birth_date);
    }

    /// Combined social-contribution rate on the gross pension.
    ///
    /// Half of the base health rate is covered by the pension fund; the
    /// supplemental and care rates are borne in full.
    pub fn social_contribution_rate(&self) -> f64 {
        self.health_insurance_rate / 2.0
            + self.health_insurance_extra_rate
            + self.long_term_care_rate
    }

    /// Monthly share of the annual tax-free allowance.
    pub fn monthly_tax_free_allowance(&self) -> f64 {
        self.tax_free_allowance_annual / 12.0
    }

    /// Rough net factor: taxable share times retained-after-tax fraction.
    pub fn net_factor_estimate(&self) -> f64 {
        self.taxable_share * (1.0 - self.average_tax_rate)
    }

    /// Resolve the retirement choice against a statutory date, snapping a
    /// custom date to the next first of month.
    pub fn resolve_retirement_date(&self, statutory_date: NaiveDate) -> NaiveDate {
        match self.retirement_choice {
            RetirementChoice::StatutoryDate => statutory_date,
            RetirementChoice::Custom(date) => calendar::next_first_of_month(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_values() {
        let params = PensionParameters::default();
        assert_eq!(params.validity_year, 2025);
        assert_eq!(params.average_annual_wage, 50_493.0);
        assert_eq!(params.pension_point_value, 40.79);
        assert_eq!(params.retirement_choice, RetirementChoice::StatutoryDate);
    }

    #[test]
    fn test_social_contribution_rate_halves_base_health() {
        let params = PensionParameters::default();
        let expected = 0.146 / 2.0 + 0.013 + 0.034;
        assert!((params.social_contribution_rate() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_net_factor_estimate() {
        let params = PensionParameters::default();
        assert!((params.net_factor_estimate() - 0.85 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_update_for_birth_date() {
        let mut params = PensionParameters::default();
        params.update_for_birth_date(date(1970, 1, 1));
        assert_eq!(params.standard_retirement_date, date(2037, 1, 1));
        assert_eq!(params.earliest_deduction_free_date, date(2035, 1, 1));
    }

    #[test]
    fn test_custom_choice_survives_birth_date_update() {
        let mut params = PensionParameters::default();
        let chosen = date(2033, 6, 1);
        params.retirement_choice = RetirementChoice::Custom(chosen);
        params.update_for_birth_date(date(1971, 4, 12));
        assert_eq!(params.retirement_choice, RetirementChoice::Custom(chosen));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = PensionParameters::default();
        let mut copy = original.clone();
        copy.retirement_choice = RetirementChoice::Custom(date(2030, 1, 1));
        copy.pension_point_value = 99.0;
        assert_eq!(original.retirement_choice, RetirementChoice::StatutoryDate);
        assert_eq!(original.pension_point_value, 40.79);
    }

    #[test]
    fn test_resolve_retirement_date_snaps_custom() {
        let mut params = PensionParameters::default();
        let statutory = date(2037, 1, 1);
        assert_eq!(params.resolve_retirement_date(statutory), statutory);

        params.retirement_choice = RetirementChoice::Custom(date(2033, 6, 15));
        assert_eq!(params.resolve_retirement_date(statutory), date(2033, 7, 1));
    }
}
