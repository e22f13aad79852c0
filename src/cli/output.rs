use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use targetspec::{Result, TargetError, TargetReport, ValidationOutcome};

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Target Table
--------------------------------------------------------------------------------------*/

pub fn target_table(report: &TargetReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Target")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Notation")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Addresses")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for entry in &report.entries {
        let count = Cell::new(entry.count);
        let count = if entry.count <= 0 {
            count.fg(Color::Yellow)
        } else {
            count
        };

        table.add_row(vec![
            Cell::new(entry.notation).add_attribute(Attribute::Bold),
            Cell::new(entry.notation.kind()),
            count,
        ]);
    }

    // Right-align the Addresses column
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");

    // Print target-table summary
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new(report.entries.len()), Cell::new("Targets")]);
    summary_table.add_row(vec![Cell::new(report.total), Cell::new("Addresses")]);
    if let Some(max_targets) = report.max_targets {
        summary_table.add_row(vec![Cell::new(max_targets), Cell::new("Maximum Addresses")]);
    }

    if let Some(summary_numbers_column) = summary_table.column_mut(0) {
        summary_numbers_column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Address Count
--------------------------------------------------------------------------------------*/

pub fn address_count(report: &TargetReport) {
    println!("{}", report.total);
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

pub fn json_report(report: &TargetReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn json_error(target_error: &TargetError) -> Result<()> {
    let outcome = ValidationOutcome::Invalid(target_error.to_string());
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
