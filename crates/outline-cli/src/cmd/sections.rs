use crate::input::read_json;
use crate::locate::load_config;
use crate::output::print_json;
use outline_core::{LevelPolicy, Normalizer};
use std::path::Path;

pub fn run(
    config: Option<&Path>,
    file: Option<&Path>,
    top_level: Option<i64>,
    policy: Option<LevelPolicy>,
) -> anyhow::Result<()> {
    let normalizer = Normalizer::new(load_config(config, policy)?);
    let raw = read_json(file)?;
    if !raw.is_array() {
        tracing::warn!("input is not a JSON array; no sections produced");
    }
    let forest = normalizer.sections(Some(&raw), top_level);
    print_json(&forest)
}
