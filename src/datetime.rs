//! Appointment time parsing and the clock used for "now" and "today"

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Storage and display format for appointment date-times
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display format for the time-only column of the today listing
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Date format used for the today filter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full date-time formats, tried in order before the date-only fallback.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Time given to appointments entered as a bare date.
pub fn date_only_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_seconds(Local::now().naive_local())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// Why an appointment time fell back to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    /// Nothing entered; "now" was requested.
    Empty,
    /// Text entered but no accepted format matched.
    Unparseable,
}

/// Result of parsing an appointment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentTime {
    Explicit(NaiveDateTime),
    Defaulted {
        value: NaiveDateTime,
        reason: DefaultReason,
    },
}

impl AppointmentTime {
    pub fn value(&self) -> NaiveDateTime {
        match *self {
            AppointmentTime::Explicit(value) => value,
            AppointmentTime::Defaulted { value, .. } => value,
        }
    }

    /// True when the user typed something that could not be parsed.
    pub fn needs_warning(&self) -> bool {
        matches!(
            self,
            AppointmentTime::Defaulted {
                reason: DefaultReason::Unparseable,
                ..
            }
        )
    }
}

/// Parse an appointment time, falling back to `now` instead of failing.
///
/// Accepted, first match wins: `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`,
/// `YYYY-MM-DD` (at 09:00:00).
pub fn parse_appointment_time(input: &str, now: NaiveDateTime) -> AppointmentTime {
    let input = input.trim();
    if input.is_empty() {
        return AppointmentTime::Defaulted {
            value: now,
            reason: DefaultReason::Empty,
        };
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return AppointmentTime::Explicit(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return AppointmentTime::Explicit(date.and_time(date_only_time()));
    }

    AppointmentTime::Defaulted {
        value: now,
        reason: DefaultReason::Unparseable,
    }
}
