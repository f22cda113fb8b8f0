//! Calendar normalization and month arithmetic for pension date rules
//!
//! Statutory retirement dates are defined in terms of German civil dates, so
//! every date entering the engine is a plain `NaiveDate` and "today" is always
//! derived in the fixed home timezone. Age thresholds snap to the first of the
//! following month; benefit formulas count whole months between first-of-month
//! dates. All downstream date math goes through these helpers.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;

/// Home timezone for all civil-date conversions.
/// Statutory rules are anchored to German calendar days, so UTC instants are
/// converted here before any day-level comparison.
pub const PENSION_TZ: Tz = chrono_tz::Europe::Berlin;

/// Earliest birth year the engine accepts.
pub const MIN_BIRTH_YEAR: i32 = 1920;

/// Minimum age (in years) a person must have reached to be calculable.
pub const MIN_AGE_YEARS: u32 = 18;

/// Convert a UTC instant to a civil date in the home timezone.
///
/// Single source of truth for deriving a "pension date" from a timestamp;
/// avoids the off-by-one-day drift that comes from comparing UTC midnights
/// against local calendar days.
pub fn civil_date_from_utc(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&PENSION_TZ).date_naive()
}

/// Today's civil date in the home timezone.
pub fn today() -> NaiveDate {
    civil_date_from_utc(Utc::now())
}

/// Snap a date to the first day of its month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First of the following month, unless the date already is a first.
///
/// Pension entitlements begin on the first of the month after a threshold is
/// reached; a threshold falling exactly on a first starts that same day.
/// Idempotent on first-of-month inputs.
pub fn next_first_of_month(date: NaiveDate) -> NaiveDate {
    let month_start = first_of_month(date);
    if date.day() == 1 {
        month_start
    } else {
        month_start + Months::new(1)
    }
}

/// Whole months from `start` to `end`, never negative.
///
/// Both dates are snapped to their month start before differencing. With
/// `include_partial_current_month` the count begins at the month after
/// `start`, excluding the remainder of the already-running month.
pub fn months_between(
    start: NaiveDate,
    end: NaiveDate,
    include_partial_current_month: bool,
) -> u32 {
    let mut from = first_of_month(start);
    if include_partial_current_month {
        from = from + Months::new(1);
    }
    let to = first_of_month(end);

    let total =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    total.max(0) as u32
}

/// Fractional years from `start` to `end`, same semantics as [`months_between`].
pub fn years_between(
    start: NaiveDate,
    end: NaiveDate,
    include_partial_current_month: bool,
) -> f64 {
    months_between(start, end, include_partial_current_month) as f64 / 12.0
}

/// Add a year/month offset to a date.
///
/// Day-of-month is clamped to the target month's length (Jan 31 + 1 month is
/// Feb 28/29), matching civil-calendar addition.
pub fn add_years_months(date: NaiveDate, years: u32, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years * 12 + months))
        .unwrap_or(date)
}

/// Add whole years to a date.
pub fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    add_years_months(date, years, 0)
}

/// Full years of age at `as_of`.
pub fn age_in_years(birth_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth_date.year();
    if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Whether a birth date is calculable: on or after 1 Jan 1920 and at least
/// 18 years before `as_of`.
pub fn is_valid_birth_date_as_of(birth_date: NaiveDate, as_of: NaiveDate) -> bool {
    let earliest = NaiveDate::from_ymd_opt(MIN_BIRTH_YEAR, 1, 1).unwrap_or(as_of);
    let latest = as_of
        .checked_sub_months(Months::new(MIN_AGE_YEARS * 12))
        .unwrap_or(as_of);
    birth_date >= earliest && birth_date <= latest
}

/// Birth date validity against today's civil date.
pub fn is_valid_birth_date(birth_date: NaiveDate) -> bool {
    is_valid_birth_date_as_of(birth_date, today())
}

/// Candidate retirement-start dates: the next `count` first-of-month dates
/// beginning with `from`'s month. Presentation layers use this for pickers.
pub fn retirement_start_options(from: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let start = first_of_month(from);
    (0..count).map(|i| start + Months::new(i)).collect()
}
