//! Benefit computation results

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::PensionParameters;
use crate::person::Person;

/// Immutable snapshot of one benefit computation.
///
/// The constructor performs the full derivation chain from points and
/// deduction rate down to the estimated net benefit, so the arithmetic
/// invariants (total = accrued + projected, net = gross − deductions +
/// supplements) hold by construction. Only the enumerated fields are
/// serialized; the parameter back-reference and the trace are computation
/// aids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionResult {
    /// When this result was computed
    pub computed_at: DateTime<Utc>,

    // Dates
    pub standard_retirement_date: NaiveDate,
    pub earliest_deduction_free_date: NaiveDate,
    /// The retirement start this result was computed for
    pub retirement_date: NaiveDate,

    // Points
    pub accrued_points: f64,
    pub projected_points: f64,
    pub total_points: f64,

    // Statutory benefit
    /// Gross benefit before any deduction
    pub theoretical_gross_benefit: f64,
    pub deduction_rate: f64,
    pub deduction_amount: f64,
    /// Gross benefit after the early-retirement deduction
    pub gross_benefit: f64,

    // Supplements and totals
    pub supplementary_pension: f64,
    pub combined_gross_benefit: f64,

    // Net approximation
    pub social_contribution_deduction: f64,
    pub tax_deduction: f64,
    pub total_deductions: f64,
    pub estimated_net_benefit: f64,

    // Distance to the statutory date
    pub months_before_standard_age: u32,
    pub years_before_standard_age: f64,

    /// Point value this computation used
    pub point_value_used: f64,

    /// Parameter set used, kept for follow-up computations only
    #[serde(skip)]
    pub params: Option<PensionParameters>,

    /// Intermediate values of the projection arithmetic
    #[serde(skip)]
    pub trace: Option<ComputationTrace>,
}

/// Intermediate values of the point projection, for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ComputationTrace {
    pub months_until_retirement: u32,
    pub years_until_retirement: f64,
    pub annual_gross_income: f64,
    pub contribution_ceiling: f64,
    pub average_wage: f64,
    pub capped_income: f64,
    pub points_per_year: f64,
}

impl PensionResult {
    /// Assemble a result from the computed points and deduction rate.
    pub fn new(
        person: &Person,
        standard_retirement_date: NaiveDate,
        earliest_deduction_free_date: NaiveDate,
        retirement_date: NaiveDate,
        accrued_points: f64,
        projected_points: f64,
        deduction_rate: f64,
        params: &PensionParameters,
    ) -> Self {
        let total_points = accrued_points + projected_points;
        let point_value = params.pension_point_value;

        let theoretical_gross = total_points * point_value;
        let deduction_amount = theoretical_gross * deduction_rate;
        let gross_benefit = theoretical_gross - deduction_amount;

        let supplementary = person.total_supplementary_pension();
        let combined_gross = gross_benefit + supplementary;

        // Social contributions come off the post-deduction gross; the tax
        // base is what remains after them.
        let social_deduction = gross_benefit * params.social_contribution_rate();
        let after_social = gross_benefit - social_deduction;

        let taxable_amount =
            (after_social * params.taxable_share - params.monthly_tax_free_allowance()).max(0.0);
        let tax_deduction = taxable_amount * params.average_tax_rate;

        let estimated_net = (after_social - tax_deduction) + supplementary;

        let months_before =
            calendar::months_between(retirement_date, standard_retirement_date, false);

        Self {
            computed_at: Utc::now(),
            standard_retirement_date,
            earliest_deduction_free_date,
            retirement_date,
            accrued_points,
            projected_points,
            total_points,
            theoretical_gross_benefit: theoretical_gross,
            deduction_rate,
            deduction_amount,
            gross_benefit,
            supplementary_pension: supplementary,
            combined_gross_benefit: combined_gross,
            social_contribution_deduction: social_deduction,
            tax_deduction,
            total_deductions: social_deduction + tax_deduction,
            estimated_net_benefit: estimated_net,
            months_before_standard_age: months_before,
            years_before_standard_age: months_before as f64 / 12.0,
            point_value_used: point_value,
            params: Some(params.clone()),
            trace: None,
        }
    }

    /// Attach the intermediate projection values.
    pub fn with_trace(mut self, trace: ComputationTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Whether this result carries no early-retirement deduction.
    pub fn is_deduction_free(&self) -> bool {
        self.deduction_rate == 0.0
    }

    /// Compare this result against another one.
    pub fn compare_to(&self, other: &PensionResult) -> BenefitComparison {
        let monthly = other.combined_gross_benefit - self.combined_gross_benefit;
        BenefitComparison {
            baseline_gross: self.combined_gross_benefit,
            other_gross: other.combined_gross_benefit,
            monthly_difference: monthly,
            annual_difference: monthly * 12.0,
            deduction_rate_difference: other.deduction_rate - self.deduction_rate,
        }
    }
}

/// Difference between two computed benefits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitComparison {
    pub baseline_gross: f64,
    pub other_gross: f64,
    pub monthly_difference: f64,
    pub annual_difference: f64,
    pub deduction_rate_difference: f64,
}

impl BenefitComparison {
    pub fn is_improvement(&self) -> bool {
        self.monthly_difference > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Sex;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_result(deduction_rate: f64, supplements: f64) -> PensionResult {
        let mut person = Person::new(1, Sex::Male, date(1970, 1, 1), 3_000.0, 20.0);
        person.company_pension = supplements;
        let params = PensionParameters::default();
        PensionResult::new(
            &person,
            date(2037, 1, 1),
            date(2035, 1, 1),
            date(2037, 1, 1),
            20.0,
            8.0,
            deduction_rate,
            &params,
        )
    }

    #[test]
    fn test_point_and_gross_chain() {
        let result = sample_result(0.0, 0.0);
        assert_relative_eq!(result.total_points, 28.0);
        assert_relative_eq!(result.theoretical_gross_benefit, 28.0 * 40.79);
        assert_relative_eq!(result.deduction_amount, 0.0);
        assert_relative_eq!(result.gross_benefit, result.theoretical_gross_benefit);
        assert!(result.is_deduction_free());
    }

    #[test]
    fn test_deduction_applied_to_theoretical_gross() {
        let result = sample_result(0.144, 0.0);
        let theoretical = 28.0 * 40.79;
        assert_relative_eq!(result.deduction_amount, theoretical * 0.144);
        assert_relative_eq!(result.gross_benefit, theoretical * (1.0 - 0.144));
        assert!(!result.is_deduction_free());
    }

    #[test]
    fn test_social_deduction_uses_post_deduction_gross() {
        let with_deduction = sample_result(0.1, 0.0);
        let params = PensionParameters::default();
        let expected_social = with_deduction.gross_benefit * params.social_contribution_rate();
        assert_relative_eq!(with_deduction.social_contribution_deduction, expected_social);
        // On the theoretical gross the contribution would be strictly larger
        assert!(
            with_deduction.theoretical_gross_benefit * params.social_contribution_rate()
                > with_deduction.social_contribution_deduction
        );
    }

    #[test]
    fn test_net_chain_with_supplements() {
        let result = sample_result(0.0, 400.0);
        let params = PensionParameters::default();

        let after_social = result.gross_benefit - result.social_contribution_deduction;
        let taxable =
            (after_social * params.taxable_share - params.monthly_tax_free_allowance()).max(0.0);
        let expected_tax = taxable * params.average_tax_rate;
        assert_relative_eq!(result.tax_deduction, expected_tax);

        assert_relative_eq!(
            result.total_deductions,
            result.social_contribution_deduction + result.tax_deduction
        );
        assert_relative_eq!(
            result.estimated_net_benefit,
            after_social - expected_tax + 400.0
        );
        assert_relative_eq!(result.combined_gross_benefit, result.gross_benefit + 400.0);
    }

    #[test]
    fn test_months_before_standard_age_clamped() {
        let result = sample_result(0.0, 0.0);
        assert_eq!(result.months_before_standard_age, 0);
        assert_eq!(result.years_before_standard_age, 0.0);
    }

    #[test]
    fn test_compare_to_reports_monthly_and_annual_difference() {
        let baseline = sample_result(0.144, 0.0);
        let better = sample_result(0.0, 0.0);

        let comparison = baseline.compare_to(&better);
        assert!(comparison.is_improvement());
        assert_relative_eq!(
            comparison.monthly_difference,
            better.combined_gross_benefit - baseline.combined_gross_benefit
        );
        assert_relative_eq!(comparison.annual_difference, comparison.monthly_difference * 12.0);
        assert_relative_eq!(comparison.deduction_rate_difference, -0.144);
    }

    #[test]
    fn test_serialization_skips_transients() {
        let result = sample_result(0.0, 0.0).with_trace(ComputationTrace::default());
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("params"));
        assert!(!json.contains("trace"));
        assert!(json.contains("estimated_net_benefit"));
    }
}
