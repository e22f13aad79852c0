use crate::core::notation::{Notation, NotationError, ParseMode};
use crate::core::rules::{Rule, ValidationOutcome};
use crate::core::utils::get_env_var;
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// Validate a comma-separated target list against an optional cap on the total number of
/// addresses. A cap of `None` or `Some(0)` disables the count check.
///
/// Validation stops at the first invalid token; tokens after it are never examined.
///
/// ```
/// use targetspec::{validate_targets, ValidationOutcome};
///
/// assert!(validate_targets("10.0.0.1, 10.0.0.0/30", Some(5)).is_valid());
/// assert_eq!(
///     validate_targets("10.0.0.0/24", Some(100)),
///     ValidationOutcome::Invalid("Max targets is 100. You have entered 256.".to_string())
/// );
/// assert_eq!(
///     validate_targets("10.0.0.1, bogus", Some(100)),
///     ValidationOutcome::Invalid("Invalid target format supplied.".to_string())
/// );
/// ```
pub fn validate_targets(raw: &str, max: Option<u64>) -> ValidationOutcome {
    let mut builder = TargetsRuleBuilder::default();
    if let Some(max) = max {
        builder.max_targets(max);
    }
    builder.build().validate(raw)
}

/// Split a raw target list on `,`, drop empty segments, and trim the rest. Order and duplicates
/// are preserved; a whitespace-only segment becomes an empty token.
pub fn split_targets(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',')
        .filter(|segment| !segment.is_empty())
        .map(str::trim)
}

/*-------------------------------------------------------------------------------------------------
  Target Errors
-------------------------------------------------------------------------------------------------*/

/// Reason a target list failed validation. The [Display](std::fmt::Display) text is the message
/// shown to the user.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TargetError {
    #[error("Invalid target format supplied.")]
    InvalidFormat {
        token: String,
        #[source]
        reason: NotationError,
    },

    #[error("Max targets is {max}. You have entered {count}.")]
    TooManyTargets { max: u64, count: i64 },
}

/*-------------------------------------------------------------------------------------------------
  Target Report
-------------------------------------------------------------------------------------------------*/

/// An accepted target token with its parsed notation and address count.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TargetEntry {
    pub token: String,
    pub notation: Notation,
    pub count: i64,
}

/// Accepted target tokens, in input order, and their total address count.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TargetReport {
    pub entries: Vec<TargetEntry>,
    pub total: i64,
    pub max_targets: Option<u64>,
}

/*-------------------------------------------------------------------------------------------------
  Targets Rule Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [TargetsRule] struct.
///
/// ```
/// let rule = targetspec::TargetsRuleBuilder::new()
///     .max_targets(256)
///     .strict()
///     .build();
///
/// assert_eq!(rule.max_targets(), Some(256));
/// assert!(rule.mode().is_strict());
/// ```
///
/// The [TargetsRuleBuilder::new] method sources initial values from environment variables when
/// set. Use [TargetsRuleBuilder::default] to ignore the environment.
#[derive(Debug, Clone, Default)]
pub struct TargetsRuleBuilder {
    max_targets: Option<u64>,
    mode: ParseMode,
}

impl TargetsRuleBuilder {
    /// Create a new [TargetsRuleBuilder] reading initial configuration values from environment
    /// variables when set and default values when the environment variables are not set.
    ///
    /// The environment variables used to set the initial configuration values are:
    /// - `TARGETSPEC_MAX_TARGETS` (`0` disables the cap)
    /// - `TARGETSPEC_STRICT` (`true` or `false`)
    pub fn new() -> Self {
        let default = TargetsRuleBuilder::default();

        let max_targets = get_env_var(
            "TARGETSPEC_MAX_TARGETS",
            default.max_targets.unwrap_or_default(),
        );
        let strict = get_env_var("TARGETSPEC_STRICT", default.mode.is_strict());

        Self {
            max_targets: Some(max_targets).filter(|max| *max > 0),
            mode: if strict {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the maximum total number of addresses; `0` disables the cap.
    pub fn max_targets(&mut self, max_targets: u64) -> &mut Self {
        self.max_targets = Some(max_targets).filter(|max| *max > 0);
        self
    }

    /// Set the parse mode; defaults to [ParseMode::Lenient].
    pub fn mode(&mut self, mode: ParseMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `.mode(ParseMode::Strict)`.
    pub fn strict(&mut self) -> &mut Self {
        self.mode(ParseMode::Strict)
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> TargetsRule {
        TargetsRule {
            max_targets: self.max_targets,
            mode: self.mode,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Targets Rule
-------------------------------------------------------------------------------------------------*/

/// Validation rule for a comma-separated list of IPv4 addresses, ranges, and CIDR blocks, with an
/// optional cap on the total number of addresses.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TargetsRule {
    max_targets: Option<u64>,
    mode: ParseMode,
}

impl TargetsRule {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Maximum total number of addresses, if capped.
    pub fn max_targets(&self) -> Option<u64> {
        self.max_targets
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /*-------------------------------------------------------------------------
      Validation
    -------------------------------------------------------------------------*/

    /// Parse and count every token in a raw target list.
    pub fn check(&self, raw: &str) -> Result<TargetReport, TargetError> {
        let mut report = TargetReport {
            max_targets: self.max_targets,
            ..TargetReport::default()
        };

        for token in split_targets(raw) {
            let notation = Notation::parse(token, self.mode).map_err(|reason| {
                debug!("Rejected target {:?}: {}", token, reason);
                TargetError::InvalidFormat {
                    token: token.to_string(),
                    reason,
                }
            })?;

            let count = notation.count();
            trace!("Target {:?} denotes {} address(es)", token, count);

            report.total = report.total.saturating_add(count);
            report.entries.push(TargetEntry {
                token: token.to_string(),
                notation,
                count,
            });
        }

        if let Some(max) = self.max_targets {
            if i128::from(report.total) > i128::from(max) {
                debug!("Target count {} exceeds the maximum of {}", report.total, max);
                return Err(TargetError::TooManyTargets {
                    max,
                    count: report.total,
                });
            }
        }

        Ok(report)
    }
}

impl Rule for TargetsRule {
    fn name(&self) -> &str {
        "validateTargets"
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        self.check(value).into()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cardinality::count_ip_addresses;
    use crate::core::errors::log_error;
    use std::env;
    use test_log::test;

    const INVALID_FORMAT: &str = "Invalid target format supplied.";

    fn invalid(message: &str) -> ValidationOutcome {
        ValidationOutcome::Invalid(message.to_string())
    }

    /*-------------------------------------------------------------------------
      Splitting
    -------------------------------------------------------------------------*/

    #[test]
    fn test_split_targets() {
        let tokens: Vec<&str> = split_targets("10.0.0.1, 10.0.0.2 ,,10.0.0.1,").collect();
        assert_eq!(tokens, ["10.0.0.1", "10.0.0.2", "10.0.0.1"]);

        let tokens: Vec<&str> = split_targets("10.0.0.1, ,10.0.0.2").collect();
        assert_eq!(tokens, ["10.0.0.1", "", "10.0.0.2"]); // Whitespace survives the empty filter

        assert_eq!(split_targets("").count(), 0);
    }

    /*-------------------------------------------------------------------------
      Simple Interface
    -------------------------------------------------------------------------*/

    #[test]
    fn test_validate_targets_valid() {
        assert!(validate_targets("10.0.0.1", Some(1)).is_valid());
        assert!(validate_targets("10.0.0.1, 10.0.0.2-10.0.0.4", Some(4)).is_valid());
        assert!(validate_targets("10.0.0.0/30,10.0.0.9", Some(5)).is_valid());
        assert!(validate_targets("", Some(1)).is_valid()); // Nothing to validate
    }

    #[test]
    fn test_validate_targets_too_many() {
        assert_eq!(
            validate_targets("10.0.0.1, 10.0.0.2-10.0.0.4", Some(3)),
            invalid("Max targets is 3. You have entered 4.")
        );
        assert_eq!(
            validate_targets("10.0.0.0/0", Some(1_000_000)),
            invalid("Max targets is 1000000. You have entered 4294967296.")
        );
    }

    #[test]
    fn test_validate_targets_duplicates_are_counted() {
        assert_eq!(
            validate_targets("10.0.0.1,10.0.0.1", Some(1)),
            invalid("Max targets is 1. You have entered 2.")
        );
    }

    #[test]
    fn test_validate_targets_invalid_format() {
        assert_eq!(validate_targets("bogus", Some(100)), invalid(INVALID_FORMAT));
        assert_eq!(validate_targets("10.0.0", None), invalid(INVALID_FORMAT));
        assert_eq!(validate_targets("10.0.0.1, ,10.0.0.2", None), invalid(INVALID_FORMAT));
    }

    #[test]
    fn test_validate_targets_short_circuits() {
        // The /0 after the invalid token would exceed the cap if it were counted
        assert_eq!(
            validate_targets("10.0.0.1, bogus, 10.0.0.0/0", Some(100)),
            invalid(INVALID_FORMAT)
        );
        assert_eq!(
            validate_targets("10.0.0.0/0, bogus", Some(100)),
            invalid(INVALID_FORMAT)
        );
    }

    #[test]
    fn test_validate_targets_cap_disabled() {
        assert!(validate_targets("10.0.0.0/0, 11.0.0.0/0", None).is_valid());
        assert!(validate_targets("10.0.0.0/0, 11.0.0.0/0", Some(0)).is_valid());
        assert_eq!(validate_targets("10.0.0.0/0, bogus", None), invalid(INVALID_FORMAT));
    }

    #[test]
    fn test_validate_targets_cap_matches_summed_counts() {
        let lists = [
            "10.0.0.1",
            "10.0.0.1, 10.0.0.0/30",
            "10.0.0.0-10.0.0.9, 10.0.1.0/28, 192.168.1.1",
            "10.0.0.10-10.0.0.5, 10.0.0.1",
        ];
        for list in lists {
            let sum: i64 = split_targets(list).map(count_ip_addresses).sum();
            for max in 1..=40u64 {
                let expected = sum <= max as i64;
                assert_eq!(
                    validate_targets(list, Some(max)).is_valid(),
                    expected,
                    "{list} with max {max}"
                );
            }
        }
    }

    #[test]
    fn test_validate_targets_is_idempotent_across_threads() {
        let list = "10.0.0.1, 10.0.0.0/24, 10.0.1.0-10.0.1.9";
        let expected = validate_targets(list, Some(200));

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(move |_| scope.spawn(move || validate_targets(list, Some(200))))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    /*-------------------------------------------------------------------------
      Reversed Ranges and Long Prefixes
    -------------------------------------------------------------------------*/

    #[test]
    fn test_lenient_reversed_range_reduces_total() {
        // 10.0.0.10-10.0.0.5 counts as -4
        let report = TargetsRule::default()
            .check("10.0.0.10-10.0.0.5, 10.0.0.0/29")
            .unwrap();
        assert_eq!(report.total, 4);
        assert!(validate_targets("10.0.0.10-10.0.0.5, 10.0.0.0/29", Some(4)).is_valid());
    }

    #[test]
    fn test_strict_rejects_reversed_range_and_long_prefix() {
        let rule = TargetsRuleBuilder::default().strict().max_targets(10).build();

        assert_eq!(rule.validate("10.0.0.10-10.0.0.5"), invalid(INVALID_FORMAT));
        assert_eq!(rule.validate("10.0.0.0/33"), invalid(INVALID_FORMAT));
        assert_eq!(rule.validate("10.0.0.1-10.0.0.256"), invalid(INVALID_FORMAT));
        assert!(rule.validate("10.0.0.1-10.0.0.10").is_valid());
    }

    /*-------------------------------------------------------------------------
      Targets Rule
    -------------------------------------------------------------------------*/

    #[test]
    fn test_check_report() {
        let rule = TargetsRuleBuilder::default().max_targets(10).build();
        let report = rule
            .check("10.0.0.1, 10.0.0.0/30 , 10.0.1.1-10.0.1.2")
            .inspect_err(log_error)
            .unwrap();

        assert_eq!(report.max_targets, Some(10));
        assert_eq!(report.total, 7);
        let counts: Vec<i64> = report.entries.iter().map(|entry| entry.count).collect();
        assert_eq!(counts, [1, 4, 2]);
        let tokens: Vec<&str> = report.entries.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, ["10.0.0.1", "10.0.0.0/30", "10.0.1.1-10.0.1.2"]);
    }

    #[test]
    fn test_check_errors() {
        let rule = TargetsRuleBuilder::default().max_targets(2).build();

        match rule.check("10.0.0.1, nope") {
            Err(TargetError::InvalidFormat { token, reason }) => {
                assert_eq!(token, "nope");
                assert_eq!(reason, NotationError::Incomplete("nope".to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert_eq!(
            rule.check("10.0.0.0/30"),
            Err(TargetError::TooManyTargets { max: 2, count: 4 })
        );
    }

    #[test]
    fn test_getter_and_setter_methods() {
        let rule = TargetsRuleBuilder::default()
            .max_targets(50)
            .mode(ParseMode::Strict)
            .build();
        assert_eq!(rule.max_targets(), Some(50));
        assert_eq!(rule.mode(), ParseMode::Strict);
        assert_eq!(rule.name(), "validateTargets");

        let rule = TargetsRuleBuilder::default().max_targets(0).build();
        assert_eq!(rule.max_targets(), None);
        assert_eq!(rule.mode(), ParseMode::Lenient);
    }

    /*-------------------------------------------------------------------------
      Environment Variable Configuration
    -------------------------------------------------------------------------*/

    /// ENV_VAR: TARGETSPEC_MAX_TARGETS
    /// ENV_VAR: TARGETSPEC_STRICT
    #[test]
    fn test_environment_variable_configuration() {
        let test_env_vars = [("TARGETSPEC_MAX_TARGETS", "16"), ("TARGETSPEC_STRICT", "true")];

        // Store environment variable values
        let stored_env_vars: Vec<(&str, Option<String>)> = test_env_vars
            .iter()
            .map(|(env_var, _)| (*env_var, env::var(env_var).ok()))
            .collect();

        for (env_var, value) in test_env_vars.iter() {
            env::set_var(env_var, value);
        }

        let rule = TargetsRuleBuilder::new().build();
        let default = TargetsRuleBuilder::default().build();

        // Restore environment variable values
        for (env_var, value) in stored_env_vars {
            match value {
                Some(value) => env::set_var(env_var, value),
                None => env::remove_var(env_var),
            }
        }

        assert_eq!(rule.max_targets(), Some(16));
        assert!(rule.mode().is_strict());
        assert_eq!(default.max_targets(), None);
        assert!(!default.mode().is_strict());
    }
}
