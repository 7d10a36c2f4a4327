//! Partial-date reconstruction and tenure arithmetic.
//!
//! Profile dates carry a year and, sometimes, a month and a day. Before any
//! arithmetic they are completed with fixed defaults: a missing month becomes
//! the configured mid-year month, a missing day becomes the 1st. Durations
//! are measured in 30-day months and 365.25-day years against an instant the
//! caller supplies, never against the wall clock.
use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::NormalizeConfig;
use crate::types::PartialDate;

const SECONDS_PER_MONTH: f64 = 30.0 * 86_400.0;
const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Completes a partial date into a calendar date.
///
/// Returns `None` only when the year is missing or zero. A month past 12
/// carries into the following years (`2016-13` is January 2017); a day past
/// the end of its month is clamped to the month's last day.
///
/// ```rust
/// use chrono::NaiveDate;
/// use normalize::{reconstruct_date, PartialDate};
///
/// let date = reconstruct_date(&PartialDate::new(2020, None, None), 7);
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 7, 1));
/// ```
pub fn reconstruct_date(partial: &PartialDate, default_month: u32) -> Option<NaiveDate> {
    let year = i32::try_from(partial.year()?).ok()?;
    let month = partial.month().unwrap_or(default_month).max(1);
    let year = year.checked_add(i32::try_from((month - 1) / 12).ok()?)?;
    let month = (month - 1) % 12 + 1;
    let day = partial.day().unwrap_or(1);
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Midnight UTC at the start of `date`.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Fractional 30-day months from `start` to `end`; negative when `end` is earlier.
pub fn months_between(start: NaiveDate, end: DateTime<Utc>) -> f64 {
    (end - start_of_day(start)).num_seconds() as f64 / SECONDS_PER_MONTH
}

/// Whole years (365.25 days, rounded) from `start` to `now`, never negative.
pub fn years_since(start: NaiveDate, now: DateTime<Utc>) -> u32 {
    let years = (now - start_of_day(start)).num_seconds() as f64 / SECONDS_PER_YEAR;
    years.round().max(0.0) as u32
}

/// Reconstructed start and end of a dated span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
}

impl Span {
    pub(crate) fn resolve(
        start: Option<&PartialDate>,
        end: Option<&PartialDate>,
        cfg: &NormalizeConfig,
    ) -> Self {
        Self {
            start: start.and_then(|d| reconstruct_date(d, cfg.default_month)),
            end: end.and_then(|d| reconstruct_date(d, cfg.default_month)),
        }
    }

    /// End of the span, or `now` when it is still running.
    pub(crate) fn end_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.map(start_of_day).unwrap_or(now)
    }

    /// Fractional months, `None` when the start is unknown.
    pub(crate) fn months(&self, now: DateTime<Utc>) -> Option<f64> {
        self.start.map(|start| months_between(start, self.end_or(now)))
    }

    /// Display duration: rounded months floored at zero, `0` when unknown.
    pub(crate) fn duration_months(&self, now: DateTime<Utc>) -> u32 {
        self.months(now)
            .map(|months| months.max(0.0).round() as u32)
            .unwrap_or(0)
    }

    /// `"{start} - {end|present}"`, or `""` when the start is unknown.
    pub(crate) fn date_range(&self, cfg: &NormalizeConfig) -> String {
        let Some(start) = self.start else {
            return String::new();
        };
        let end = match self.end {
            Some(end) => format_month_year(end, &cfg.month_year_format),
            None => cfg.present_label.clone(),
        };
        format!(
            "{} - {}",
            format_month_year(start, &cfg.month_year_format),
            end
        )
    }
}

/// Formats `date` with a strftime pattern, falling back to ISO-8601 if the
/// pattern cannot be rendered.
pub fn format_month_year(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => date.to_string(),
    }
}
