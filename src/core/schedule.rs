use crate::core::rules::{Rule, ValidationOutcome};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

/*-------------------------------------------------------------------------------------------------
  Timestamp Parsing
-------------------------------------------------------------------------------------------------*/

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DD[T ]HH:MM[:SS]` / `YYYY-MM-DD` value read as
/// UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive_date_time| naive_date_time.and_utc())
}

/*-------------------------------------------------------------------------------------------------
  Is Not Past
-------------------------------------------------------------------------------------------------*/

/// Timestamp values must be valid and not earlier than the current time.
#[derive(Clone, Debug, Default)]
pub struct IsNotPast {
    message: Option<String>,
}

impl IsNotPast {
    pub const DEFAULT_MESSAGE: &'static str = "Time cannot be in the past";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validate against a fixed `now`.
    pub fn check_at(&self, value: &str, now: DateTime<Utc>) -> ValidationOutcome {
        match parse_timestamp(value) {
            Some(timestamp) if timestamp >= now => ValidationOutcome::Valid,
            _ => ValidationOutcome::Invalid(
                self.message
                    .clone()
                    .unwrap_or_else(|| Self::DEFAULT_MESSAGE.to_string()),
            ),
        }
    }
}

impl Rule for IsNotPast {
    fn name(&self) -> &str {
        "isNotPast"
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        self.check_at(value, Utc::now())
    }
}

/*-------------------------------------------------------------------------------------------------
  Modulo
-------------------------------------------------------------------------------------------------*/

/// Timestamp values must be valid and fall on a UTC minute that is a multiple of `operand`
/// (e.g. `5` allows `:00`, `:05`, `:10`, ...).
#[derive(Clone, Debug)]
pub struct Modulo {
    operand: u32,
    message: Option<String>,
}

impl Modulo {
    pub fn new(operand: u32) -> Self {
        Self {
            operand,
            message: None,
        }
    }

    /// Replace the default error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn operand(&self) -> u32 {
        self.operand
    }
}

impl Rule for Modulo {
    fn name(&self) -> &str {
        "modulo"
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let on_increment = parse_timestamp(value)
            .and_then(|timestamp| timestamp.minute().checked_rem(self.operand))
            .is_some_and(|remainder| remainder == 0);

        if on_increment {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("Value must be an increment of {}", self.operand)),
            )
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
