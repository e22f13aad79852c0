use std::path::PathBuf;
use targetspec::{Result, TargetReport};

/*-------------------------------------------------------------------------------------------------
  Save Target Report to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(report: &TargetReport, path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["Target", "Notation", "Addresses"])?;

    // Write target records
    for entry in &report.entries {
        let record = (&entry.token, entry.notation.kind(), entry.count);
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
