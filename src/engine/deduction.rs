//! Early-retirement deduction rule

use chrono::NaiveDate;

use crate::calendar;
use crate::rules;

/// Permanent deduction applied for retiring before the statutory date.
///
/// Zero at or after the statutory date, and zero from the earliest
/// deduction-free start onwards (45 qualifying years assumed). Otherwise
/// 0.3% per full month of early retirement, hard-capped at 48 months and
/// 14.4% total. The current partial month never counts here.
pub fn deduction_percentage(
    chosen_date: NaiveDate,
    statutory_date: NaiveDate,
    earliest_deduction_free_date: NaiveDate,
) -> f64 {
    if chosen_date >= statutory_date {
        return 0.0;
    }
    if chosen_date >= earliest_deduction_free_date {
        return 0.0;
    }

    let months_early = calendar::months_between(chosen_date, statutory_date, false)
        .min(rules::MAX_DEDUCTION_MONTHS);
    (months_early as f64 * rules::DEDUCTION_PER_MONTH).min(rules::MAX_DEDUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_deduction_at_or_after_statutory_date() {
        let statutory = date(2037, 1, 1);
        let earliest = date(2035, 1, 1);
        assert_eq!(deduction_percentage(statutory, statutory, earliest), 0.0);
        assert_eq!(deduction_percentage(date(2038, 1, 1), statutory, earliest), 0.0);
    }

    #[test]
    fn test_no_deduction_from_earliest_free_start() {
        let statutory = date(2037, 1, 1);
        let earliest = date(2035, 1, 1);
        assert_eq!(deduction_percentage(earliest, statutory, earliest), 0.0);
        assert_eq!(deduction_percentage(date(2036, 3, 1), statutory, earliest), 0.0);
    }

    #[test]
    fn test_ten_months_early() {
        let statutory = date(2037, 1, 1);
        // Earliest free start at the statutory date: no early qualification
        let d = deduction_percentage(date(2036, 3, 1), statutory, statutory);
        assert!((d - 0.030).abs() < 1e-12);
    }

    #[test]
    fn test_forty_eight_months_early_hits_cap_exactly() {
        let statutory = date(2037, 1, 1);
        let d = deduction_percentage(date(2033, 1, 1), statutory, statutory);
        assert!((d - 0.144).abs() < 1e-12);
    }

    #[test]
    fn test_cap_holds_far_beyond_48_months() {
        let statutory = date(2037, 1, 1);
        // 120 months early: still capped at 14.4%
        let d = deduction_percentage(date(2027, 1, 1), statutory, statutory);
        assert!((d - 0.144).abs() < 1e-12);
    }
}
