//! Birth-year threshold tables for statutory retirement dates
//!
//! The tables reproduce the DRV transition schedules literally, entry by
//! entry, so they can be audited against the legal source. Lookups clamp to
//! the closed cohorts below and above the transition ranges.
//!
//! Each absolute date is derived as birth date + offset (or a fixed statutory
//! cutoff), snapped to the first of the following month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::person::Sex;

/// An age expressed as whole years plus months, offset from the birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeOffset {
    pub years: u32,
    pub months: u32,
}

impl AgeOffset {
    pub const fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Total offset in months.
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Apply the offset to a birth date.
    pub fn from_birth_date(&self, birth_date: NaiveDate) -> NaiveDate {
        calendar::add_years_months(birth_date, self.years, self.months)
    }
}

/// Rule for the earliest deduction-free start of a cohort.
///
/// Most cohorts carry an age offset; the 1959-1963 cohorts are governed by
/// fixed statutory cutoff dates instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyStartRule {
    /// Age offset from the birth date.
    Offset(AgeOffset),
    /// Fixed calendar cutoff date.
    FixedDate { year: i32, month: u32, day: u32 },
}

/// Standard retirement age for the 1947-1963 transition cohorts.
/// Below the table: 65y0m. Above: 67y0m.
const STANDARD_AGE_TRANSITION: &[(i32, AgeOffset)] = &[
    (1947, AgeOffset::new(65, 1)),
    (1948, AgeOffset::new(65, 2)),
    (1949, AgeOffset::new(65, 3)),
    (1950, AgeOffset::new(65, 4)),
    (1951, AgeOffset::new(65, 5)),
    (1952, AgeOffset::new(65, 6)),
    (1953, AgeOffset::new(65, 7)),
    (1954, AgeOffset::new(65, 8)),
    (1955, AgeOffset::new(65, 9)),
    (1956, AgeOffset::new(65, 10)),
    (1957, AgeOffset::new(65, 11)),
    (1958, AgeOffset::new(66, 0)),
    (1959, AgeOffset::new(66, 2)),
    (1960, AgeOffset::new(66, 4)),
    (1961, AgeOffset::new(66, 6)),
    (1962, AgeOffset::new(66, 8)),
    (1963, AgeOffset::new(66, 10)),
];

/// Earliest deduction-free start (45 qualifying years) for the 1953-1963
/// transition cohorts. Below: 63y0m. Above: 65y0m.
///
/// 1959-1963 are fixed cutoff dates in the DRV source. The 1963 cutoff
/// predates 1962's there; the table mirrors the source verbatim.
const DEDUCTION_FREE_TRANSITION: &[(i32, EarlyStartRule)] = &[
    (1953, EarlyStartRule::Offset(AgeOffset::new(63, 2))),
    (1954, EarlyStartRule::Offset(AgeOffset::new(63, 4))),
    (1955, EarlyStartRule::Offset(AgeOffset::new(63, 6))),
    (1956, EarlyStartRule::Offset(AgeOffset::new(63, 8))),
    (1957, EarlyStartRule::Offset(AgeOffset::new(63, 10))),
    (1958, EarlyStartRule::Offset(AgeOffset::new(64, 0))),
    (1959, EarlyStartRule::FixedDate { year: 2023, month: 12, day: 31 }),
    (1960, EarlyStartRule::FixedDate { year: 2025, month: 12, day: 31 }),
    (1961, EarlyStartRule::FixedDate { year: 2027, month: 12, day: 31 }),
    (1962, EarlyStartRule::FixedDate { year: 2029, month: 12, day: 31 }),
    (1963, EarlyStartRule::FixedDate { year: 2028, month: 12, day: 31 }),
];

/// Severe-disability retirement age for the 1952-1968 transition cohorts.
/// Below the table: 63y0m. Above: 65y0m.
const SEVERE_DISABILITY_TRANSITION: &[(i32, AgeOffset)] = &[
    (1952, AgeOffset::new(63, 1)),
    (1953, AgeOffset::new(63, 2)),
    (1954, AgeOffset::new(63, 3)),
    (1955, AgeOffset::new(63, 4)),
    (1956, AgeOffset::new(63, 5)),
    (1957, AgeOffset::new(63, 6)),
    (1958, AgeOffset::new(63, 7)),
    (1959, AgeOffset::new(63, 8)),
    (1960, AgeOffset::new(63, 9)),
    (1961, AgeOffset::new(63, 10)),
    (1962, AgeOffset::new(63, 11)),
    (1963, AgeOffset::new(64, 0)),
    (1964, AgeOffset::new(64, 2)),
    (1965, AgeOffset::new(64, 4)),
    (1966, AgeOffset::new(64, 6)),
    (1967, AgeOffset::new(64, 8)),
    (1968, AgeOffset::new(64, 10)),
];

fn lookup<T: Copy>(table: &[(i32, T)], birth_year: i32, below: T, above: T) -> T {
    match table.first() {
        Some(&(first_year, _)) if birth_year < first_year => return below,
        None => return below,
        _ => {}
    }
    table
        .iter()
        .find(|(year, _)| *year == birth_year)
        .map(|&(_, value)| value)
        .unwrap_or(above)
}

/// Standard retirement age for a birth year.
pub fn standard_retirement_age(birth_year: i32) -> AgeOffset {
    lookup(
        STANDARD_AGE_TRANSITION,
        birth_year,
        AgeOffset::new(65, 0),
        AgeOffset::new(67, 0),
    )
}

/// Earliest deduction-free start rule (45 qualifying years) for a birth year.
pub fn earliest_deduction_free_start(birth_year: i32) -> EarlyStartRule {
    lookup(
        DEDUCTION_FREE_TRANSITION,
        birth_year,
        EarlyStartRule::Offset(AgeOffset::new(63, 0)),
        EarlyStartRule::Offset(AgeOffset::new(65, 0)),
    )
}

/// Severe-disability retirement age for a birth year.
pub fn severe_disability_retirement_age(birth_year: i32) -> AgeOffset {
    lookup(
        SEVERE_DISABILITY_TRANSITION,
        birth_year,
        AgeOffset::new(63, 0),
        AgeOffset::new(65, 0),
    )
}

/// Early retirement age under the historical women's pension rule.
/// Only cohorts born 1951 or earlier qualify.
pub fn womens_early_retirement_age(birth_year: i32) -> Option<AgeOffset> {
    if birth_year <= 1951 {
        Some(AgeOffset::new(60, 0))
    } else {
        None
    }
}

/// Statutory retirement date: birth date + standard age, snapped to the next
/// first of month.
pub fn standard_retirement_date(birth_date: NaiveDate) -> NaiveDate {
    let offset = standard_retirement_age(birth_date.year());
    calendar::next_first_of_month(offset.from_birth_date(birth_date))
}

/// Earliest deduction-free retirement date, snapped to the next first of month.
pub fn earliest_deduction_free_date(birth_date: NaiveDate) -> NaiveDate {
    let raw = match earliest_deduction_free_start(birth_date.year()) {
        EarlyStartRule::Offset(offset) => offset.from_birth_date(birth_date),
        EarlyStartRule::FixedDate { year, month, day } => {
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or(birth_date)
        }
    };
    calendar::next_first_of_month(raw)
}

/// Severe-disability retirement date, snapped to the next first of month.
pub fn severe_disability_retirement_date(birth_date: NaiveDate) -> NaiveDate {
    let offset = severe_disability_retirement_age(birth_date.year());
    calendar::next_first_of_month(offset.from_birth_date(birth_date))
}

/// Women's early retirement date, if the historical rule applies.
pub fn womens_early_retirement_date(birth_date: NaiveDate, sex: Sex) -> Option<NaiveDate> {
    if sex != Sex::Female {
        return None;
    }
    womens_early_retirement_age(birth_date.year())
        .map(|offset| calendar::next_first_of_month(offset.from_birth_date(birth_date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_standard_age_boundaries() {
        assert_eq!(standard_retirement_age(1920), AgeOffset::new(65, 0));
        assert_eq!(standard_retirement_age(1946), AgeOffset::new(65, 0));
        assert_eq!(standard_retirement_age(1964), AgeOffset::new(67, 0));
        assert_eq!(standard_retirement_age(1990), AgeOffset::new(67, 0));
    }

    #[test]
    fn test_standard_age_transition_values() {
        assert_eq!(standard_retirement_age(1947), AgeOffset::new(65, 1));
        assert_eq!(standard_retirement_age(1957), AgeOffset::new(65, 11));
        assert_eq!(standard_retirement_age(1958), AgeOffset::new(66, 0));
        assert_eq!(standard_retirement_age(1959), AgeOffset::new(66, 2));
        assert_eq!(standard_retirement_age(1963), AgeOffset::new(66, 10));
    }

    #[test]
    fn test_standard_age_monotonic() {
        let mut previous = standard_retirement_age(1945).total_months();
        for year in 1946..=1965 {
            let current = standard_retirement_age(year).total_months();
            assert!(
                current >= previous,
                "standard age decreased from {} to {} at birth year {}",
                previous,
                current,
                year
            );
            previous = current;
        }
    }

    #[test]
    fn test_deduction_free_rules() {
        assert_eq!(
            earliest_deduction_free_start(1950),
            EarlyStartRule::Offset(AgeOffset::new(63, 0))
        );
        assert_eq!(
            earliest_deduction_free_start(1958),
            EarlyStartRule::Offset(AgeOffset::new(64, 0))
        );
        assert_eq!(
            earliest_deduction_free_start(1964),
            EarlyStartRule::Offset(AgeOffset::new(65, 0))
        );
        // Fixed-date cohorts, including the 1963-before-1962 source quirk
        assert_eq!(
            earliest_deduction_free_start(1959),
            EarlyStartRule::FixedDate { year: 2023, month: 12, day: 31 }
        );
        assert_eq!(
            earliest_deduction_free_start(1962),
            EarlyStartRule::FixedDate { year: 2029, month: 12, day: 31 }
        );
        assert_eq!(
            earliest_deduction_free_start(1963),
            EarlyStartRule::FixedDate { year: 2028, month: 12, day: 31 }
        );
    }

    #[test]
    fn test_severe_disability_ages() {
        assert_eq!(severe_disability_retirement_age(1950), AgeOffset::new(63, 0));
        assert_eq!(severe_disability_retirement_age(1952), AgeOffset::new(63, 1));
        assert_eq!(severe_disability_retirement_age(1963), AgeOffset::new(64, 0));
        assert_eq!(severe_disability_retirement_age(1966), AgeOffset::new(64, 6));
        assert_eq!(severe_disability_retirement_age(1969), AgeOffset::new(65, 0));
    }

    #[test]
    fn test_womens_rule_cohort_cutoff() {
        assert_eq!(womens_early_retirement_age(1951), Some(AgeOffset::new(60, 0)));
        assert_eq!(womens_early_retirement_age(1952), None);
    }

    #[test]
    fn test_standard_date_snaps_to_next_first() {
        // Born 1970-01-01: 67y0m lands on 2037-01-01, already a first
        assert_eq!(standard_retirement_date(date(1970, 1, 1)), date(2037, 1, 1));
        // Born 1970-01-02: lands on 2037-01-02, snapped to 2037-02-01
        assert_eq!(standard_retirement_date(date(1970, 1, 2)), date(2037, 2, 1));
        // Born 1960-05-15: 66y4m => 2026-09-15, snapped to 2026-10-01
        assert_eq!(standard_retirement_date(date(1960, 5, 15)), date(2026, 10, 1));
    }

    #[test]
    fn test_deduction_free_date_fixed_cohorts() {
        // 1960 cohort: fixed cutoff 2025-12-31, snapped to 2026-01-01
        assert_eq!(earliest_deduction_free_date(date(1960, 5, 15)), date(2026, 1, 1));
        // 1963 cohort: fixed cutoff 2028-12-31, snapped to 2029-01-01
        assert_eq!(earliest_deduction_free_date(date(1963, 2, 10)), date(2029, 1, 1));
    }

    #[test]
    fn test_deduction_free_date_offset_cohorts() {
        // Born 1970-01-01: 65y0m => 2035-01-01, already a first
        assert_eq!(earliest_deduction_free_date(date(1970, 1, 1)), date(2035, 1, 1));
    }

    #[test]
    fn test_womens_date_requires_female() {
        let birth = date(1950, 3, 20);
        assert_eq!(womens_early_retirement_date(birth, Sex::Male), None);
        assert_eq!(
            womens_early_retirement_date(birth, Sex::Female),
            Some(date(2010, 4, 1))
        );
        assert_eq!(womens_early_retirement_date(date(1955, 3, 20), Sex::Female), None);
    }
}
