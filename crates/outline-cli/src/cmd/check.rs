use crate::input::read_json;
use crate::output::{print_json, print_table, Column};
use anyhow::Context;
use outline_core::{check_outline, Outline};
use std::path::Path;

pub fn run(file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let raw = read_json(file)?;
    let outline: Outline =
        serde_json::from_value(raw).context("input is not a normalized outline")?;
    let violations = check_outline(&outline);

    if json {
        print_json(&serde_json::json!({
            "valid": violations.is_empty(),
            "nodes": outline.node_count(),
            "violations": violations,
        }))?;
    } else if violations.is_empty() {
        println!("Outline is valid ({} headings).", outline.node_count());
    } else {
        let rows: Vec<Vec<String>> = violations
            .iter()
            .map(|v| vec![v.path.clone(), v.message.clone()])
            .collect();
        print_table(&[Column::left("PATH"), Column::left("PROBLEM")], &rows);
    }

    if !violations.is_empty() {
        anyhow::bail!("outline has {} violation(s)", violations.len());
    }
    Ok(())
}
