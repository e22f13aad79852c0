use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Validation Outcome
-------------------------------------------------------------------------------------------------*/

/// Result of applying a [Rule] to a field value: pass, or the first error message to show the
/// user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Error message, when invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(message) => Some(message),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for ValidationOutcome {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => ValidationOutcome::Valid,
            Err(error) => ValidationOutcome::Invalid(error.to_string()),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => write!(f, "Valid"),
            ValidationOutcome::Invalid(message) => write!(f, "{message}"),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Rule
-------------------------------------------------------------------------------------------------*/

/// A validation rule for a string-typed form field. Rules are plain values attached to a field by
/// the caller; nothing is registered globally.
pub trait Rule: Send + Sync {
    /// Rule name, used in logs.
    fn name(&self) -> &str;

    /// Validate a raw field value.
    fn validate(&self, value: &str) -> ValidationOutcome;
}

/*-------------------------------------------------------------------------------------------------
  Rule Set
-------------------------------------------------------------------------------------------------*/

/// Ordered rules for a single field. Validation stops at the first invalid outcome.
///
/// ```
/// use targetspec::{RuleSet, TargetsRuleBuilder};
///
/// let rules = RuleSet::new().rule(TargetsRuleBuilder::default().max_targets(4).build());
///
/// assert!(rules.validate("10.0.0.0/30").is_valid());
/// assert!(!rules.validate("10.0.0.0/29").is_valid());
/// ```
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply each rule in order and return the first invalid outcome, or
    /// [ValidationOutcome::Valid] when every rule passes.
    pub fn validate(&self, value: &str) -> ValidationOutcome {
        for rule in &self.rules {
            let outcome = rule.validate(value);
            if !outcome.is_valid() {
                log::debug!("Rule `{}` rejected {:?}: {}", rule.name(), value, outcome);
                return outcome;
            }
        }
        ValidationOutcome::Valid
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct NotEmpty;

    impl Rule for NotEmpty {
        fn name(&self) -> &str {
            "notEmpty"
        }

        fn validate(&self, value: &str) -> ValidationOutcome {
            if value.is_empty() {
                ValidationOutcome::Invalid("Required".to_string())
            } else {
                ValidationOutcome::Valid
            }
        }
    }

    struct MaxLength(usize);

    impl Rule for MaxLength {
        fn name(&self) -> &str {
            "maxLength"
        }

        fn validate(&self, value: &str) -> ValidationOutcome {
            if value.len() > self.0 {
                ValidationOutcome::Invalid(format!("At most {} characters", self.0))
            } else {
                ValidationOutcome::Valid
            }
        }
    }

    /*----------------------------------------------------------------------------------
      ValidationOutcome
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_validation_outcome_accessors() {
        let valid = ValidationOutcome::Valid;
        let invalid = ValidationOutcome::Invalid("Nope".to_string());

        assert!(valid.is_valid());
        assert_eq!(valid.message(), None);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.message(), Some("Nope"));
        assert_eq!(invalid.to_string(), "Nope");
    }

    #[test]
    fn test_validation_outcome_from_result() {
        let ok: Result<(), String> = Ok(());
        let err: Result<(), String> = Err("Broken".to_string());

        assert_eq!(ValidationOutcome::from(ok), ValidationOutcome::Valid);
        assert_eq!(
            ValidationOutcome::from(err),
            ValidationOutcome::Invalid("Broken".to_string())
        );
    }

    #[test]
    fn test_validation_outcome_serialize() {
        let valid = serde_json::to_string(&ValidationOutcome::Valid).unwrap();
        let invalid = serde_json::to_string(&ValidationOutcome::Invalid("Nope".into())).unwrap();

        assert_eq!(valid, r#"{"status":"valid"}"#);
        assert_eq!(invalid, r#"{"status":"invalid","message":"Nope"}"#);
    }

    /*----------------------------------------------------------------------------------
      RuleSet
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_rule_set_first_error_wins() {
        let rules = RuleSet::new().rule(NotEmpty).rule(MaxLength(3));

        assert_eq!(rules.len(), 2);
        assert!(rules.validate("abc").is_valid());
        assert_eq!(rules.validate("").message(), Some("Required"));
        assert_eq!(rules.validate("abcd").message(), Some("At most 3 characters"));
    }

    #[test]
    fn test_empty_rule_set_is_valid() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert!(rules.validate("anything").is_valid());
    }

    #[test]
    fn test_rule_set_debug_lists_names() {
        let rules = RuleSet::new().rule(NotEmpty).rule(MaxLength(3));
        assert_eq!(format!("{rules:?}"), r#"["notEmpty", "maxLength"]"#);
    }
}
