//! Parse, count, and validate IPv4 target lists.
//!
//! A target list is a comma-separated sequence of single addresses (`10.0.0.1`), inclusive
//! ranges (`10.0.0.1-10.0.0.9`), and CIDR blocks (`10.0.0.0/24`). The library exposes:
//!
//! - [is_valid_ip_address] and [Notation::parse] to recognize a single token,
//! - [count_ip_addresses] and [Notation::count] to size it,
//! - [validate_targets] and [TargetsRule] to validate a whole list against a cap on the total
//!   number of addresses.
//!
//! Rules implement the [Rule] trait and are attached to a field explicitly with a [RuleSet].
//!
//! ```
//! use targetspec::{RuleSet, TargetsRuleBuilder};
//!
//! let targets = RuleSet::new().rule(TargetsRuleBuilder::default().max_targets(256).build());
//!
//! assert!(targets.validate("10.0.0.0/24").is_valid());
//! assert_eq!(
//!     targets.validate("10.0.0.0/24, 10.0.1.1").message(),
//!     Some("Max targets is 256. You have entered 257.")
//! );
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::cardinality::{cidr_size, count_ip_addresses, ips_between};
pub use crate::core::errors::{Error, Result};
pub use crate::core::notation::{
    is_valid_ip_address, DottedQuad, Notation, NotationError, ParseMode,
};
pub use crate::core::patterns::{is_ip_list, CIDR_PATTERN, IP_LIST_PATTERN, IP_PATTERN};
pub use crate::core::rules::{Rule, RuleSet, ValidationOutcome};
pub use crate::core::schedule::{parse_timestamp, IsNotPast, Modulo};
pub use crate::core::targets::{
    split_targets, validate_targets, TargetEntry, TargetError, TargetReport, TargetsRule,
    TargetsRuleBuilder,
};

