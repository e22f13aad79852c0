use log::{error, info, warn};
use targetspec::{TargetError, TargetReport};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Target Report
--------------------------------------------------------------------------------------*/

pub fn target_report(report: &TargetReport) {
    let count_targets = report.entries.len();
    let total = report.total;
    info!("Validated {count_targets} target(s) denoting {total} address(es)");

    match report.max_targets {
        Some(max_targets) => info!("Within the maximum of {max_targets} address(es)"),
        None => info!("No maximum target count configured"),
    }

    for entry in report.entries.iter().filter(|entry| entry.count <= 0) {
        warn!(
            "Target {:?} denotes {} address(es); check for a reversed range or a prefix longer than /32",
            entry.token, entry.count
        );
    }
}

/*--------------------------------------------------------------------------------------
  Target Error
--------------------------------------------------------------------------------------*/

pub fn target_error(target_error: &TargetError) {
    error!("{target_error}");

    if let TargetError::InvalidFormat { token, reason } = target_error {
        warn!("Rejected target {:?}: {}", token, reason);
    }
}
