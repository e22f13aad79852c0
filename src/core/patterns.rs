use lazy_static::lazy_static;
use regex::Regex;

/*-------------------------------------------------------------------------------------------------
  Target List Patterns
-------------------------------------------------------------------------------------------------*/

// These patterns pre-filter input (e.g. to highlight a field while it is being edited); the
// authoritative accept/reject decision is made by `TargetsRule`.

macro_rules! ip_pattern {
    () => {
        r"(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)"
    };
}

macro_rules! cidr_pattern {
    () => {
        r"($|/\b([0-9]{1,2}|1[01][0-9]|12[0-8]))"
    };
}

/// A dotted-quad IPv4 address with octets 0-255.
pub const IP_PATTERN: &str = ip_pattern!();

/// End of input, or a `/` prefix length of 0-128.
pub const CIDR_PATTERN: &str = cidr_pattern!();

/// A comma-separated list of addresses, `start-end` ranges, and CIDR blocks.
pub const IP_LIST_PATTERN: &str = concat!(
    "^(",
    ip_pattern!(),
    "((-",
    ip_pattern!(),
    ")?|",
    cidr_pattern!(),
    r")(?:\s*,\s*|$))+$"
);

lazy_static! {
    static ref IP_LIST_REGEX: Regex = Regex::new(IP_LIST_PATTERN).unwrap();
}

/// Check whether the input looks like a target list. This is a pre-filter only; use
/// [TargetsRule](crate::TargetsRule) to validate.
///
/// ```
/// assert!(targetspec::is_ip_list("10.0.0.1, 10.0.0.0/24,10.0.0.5-10.0.0.9"));
/// assert!(!targetspec::is_ip_list("10.0.0.1, bogus"));
/// ```
pub fn is_ip_list(input: &str) -> bool {
    IP_LIST_REGEX.is_match(input)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
