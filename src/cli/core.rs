use crate::cli;
use targetspec::{TargetsRule, TargetsRuleBuilder};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the Targets Rule from CLI arguments
--------------------------------------------------------------------------------------*/

/// Environment variables seed the rule; CLI arguments override them.
pub fn build_rule(args: &cli::Args) -> TargetsRule {
    let mut builder = TargetsRuleBuilder::new();

    if let Some(max_targets) = args.max_targets {
        builder.max_targets(max_targets);
    }
    if args.strict {
        builder.strict();
    }

    builder.build()
}

/*--------------------------------------------------------------------------------------
  Join target arguments into a single target list
--------------------------------------------------------------------------------------*/

pub fn target_list(args: &cli::Args) -> String {
    args.targets.join(",")
}
