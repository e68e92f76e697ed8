use crate::input::read_json;
use crate::locate::load_config;
use crate::output::{print_json, print_yaml};
use clap::Args;
use outline_core::{LevelPolicy, Normalizer};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct NormalizeArgs {
    /// Input file (default: stdin)
    pub file: Option<PathBuf>,

    /// Level correction policy: clamp or preserve
    #[arg(long)]
    pub policy: Option<LevelPolicy>,

    /// Override the outline's top_level_heading (1-6)
    #[arg(long)]
    pub top_level: Option<i64>,

    /// Include the list of repairs applied
    #[arg(long)]
    pub report: bool,

    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

pub fn run(config: Option<&Path>, args: NormalizeArgs) -> anyhow::Result<()> {
    let normalizer = Normalizer::new(load_config(config, args.policy)?);
    let mut raw = read_json(args.file.as_deref())?;

    if let (Some(top), Some(obj)) = (args.top_level, raw.as_object_mut()) {
        obj.insert("top_level_heading".to_string(), Value::from(top));
    }

    let value = if args.report {
        match normalizer.outline_with_report(&raw) {
            Some((outline, repairs)) => {
                tracing::info!(repairs = repairs.len(), "outline normalized");
                serde_json::json!({ "outline": outline, "repairs": repairs })
            }
            None => Value::Null,
        }
    } else {
        match normalizer.outline(&raw) {
            Some(outline) => serde_json::to_value(outline)?,
            None => Value::Null,
        }
    };

    if value.is_null() {
        tracing::warn!("input is not a JSON object; nothing to normalize");
    }

    if args.yaml {
        print_yaml(&value)
    } else {
        print_json(&value)
    }
}
