//! # Report Schedules
//!
//! Parses the periodic-report expressions stored on question sets
//! (`@every 30s`, `@daily`, ...) into something that can compute fire times.

use crate::domain::error::{DialogError, Result};
use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSchedule {
    /// Fixed interval, counted from the previous run
    Every(TimeDelta),
    Hourly,
    Daily,
    /// Sundays at midnight
    Weekly,
}

fn interval_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\d+[hms])+$").expect("valid interval regex"))
}

fn interval_part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)([hms])").expect("valid interval part regex"))
}

impl ReportSchedule {
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        match expr {
            "@hourly" => return Ok(Self::Hourly),
            "@daily" | "@midnight" => return Ok(Self::Daily),
            "@weekly" => return Ok(Self::Weekly),
            _ => {}
        }

        let Some(interval) = expr.strip_prefix("@every") else {
            return Err(DialogError::Schedule(format!(
                "unsupported schedule expression `{expr}`"
            )));
        };

        let interval = interval.trim();
        if !interval_regex().is_match(interval) {
            return Err(DialogError::Schedule(format!("invalid interval `{interval}`")));
        }

        let mut total = TimeDelta::zero();
        for caps in interval_part_regex().captures_iter(interval) {
            let amount: i64 = caps[1]
                .parse()
                .map_err(|_| DialogError::Schedule(format!("interval too large `{interval}`")))?;
            let part = match &caps[2] {
                "h" => TimeDelta::try_hours(amount),
                "m" => TimeDelta::try_minutes(amount),
                _ => TimeDelta::try_seconds(amount),
            }
            .ok_or_else(|| DialogError::Schedule(format!("interval too large `{interval}`")))?;
            total = total
                .checked_add(&part)
                .ok_or_else(|| DialogError::Schedule(format!("interval too large `{interval}`")))?;
        }

        if total <= TimeDelta::zero() {
            return Err(DialogError::Schedule("interval must be positive".to_string()));
        }
        Ok(Self::Every(total))
    }

    /// First fire time strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Every(interval) => after + *interval,
            Self::Hourly => {
                let hour_start = after
                    .with_nanosecond(0)
                    .and_then(|t| t.with_second(0))
                    .and_then(|t| t.with_minute(0))
                    .unwrap_or(after);
                hour_start + TimeDelta::hours(1)
            }
            Self::Daily => midnight(after) + TimeDelta::days(1),
            Self::Weekly => {
                let mut days = (7 - after.weekday().num_days_from_sunday()) % 7;
                if days == 0 {
                    days = 7;
                }
                midnight(after) + TimeDelta::days(i64::from(days))
            }
        }
    }
}

fn midnight(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(at)
}
