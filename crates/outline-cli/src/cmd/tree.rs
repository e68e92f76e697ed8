use crate::input::read_json;
use crate::locate::load_config;
use crate::output::{print_json, print_table, Column};
use outline_core::{LevelPolicy, Normalizer};
use std::path::Path;

pub fn run(
    config: Option<&Path>,
    file: Option<&Path>,
    policy: Option<LevelPolicy>,
    json: bool,
) -> anyhow::Result<()> {
    let normalizer = Normalizer::new(load_config(config, policy)?);
    let raw = read_json(file)?;
    let Some(outline) = normalizer.outline(&raw) else {
        anyhow::bail!("input is not a JSON object");
    };

    if json {
        let rows: Vec<serde_json::Value> = outline
            .walk()
            .into_iter()
            .map(|(depth, node)| {
                serde_json::json!({
                    "depth": depth,
                    "level": node.level,
                    "heading": node.heading,
                    "estimated_chars": node.estimated_chars,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "title": outline.title,
            "top_level_heading": outline.top_level_heading,
            "rows": rows,
        }))?;
        return Ok(());
    }

    println!("{} (top level H{})", outline.title, outline.top_level_heading);
    if outline.sections.is_empty() {
        println!("(no sections)");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = outline
        .walk()
        .into_iter()
        .map(|(depth, node)| {
            vec![
                format!("H{}", node.level),
                node.estimated_chars.to_string(),
                format!("{}{}", "  ".repeat(depth), node.heading),
            ]
        })
        .collect();
    print_table(
        &[
            Column::left("LEVEL"),
            Column::right("CHARS"),
            Column::left("HEADING"),
        ],
        &rows,
    );
    Ok(())
}
