use crate::locate::{config_target, load_config, resolve_config_path};
use crate::output::{print_json, print_yaml};
use anyhow::Context;
use clap::Subcommand;
use outline_core::config::{NormalizeConfig, WarnLevel};
use outline_core::io::write_if_missing;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective config (file values merged over defaults)
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config: Option<&Path>, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config, json),
        ConfigSubcommand::Validate => validate(config, json),
        ConfigSubcommand::Init { force } => init(config, force),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(config, None)?;
    if json {
        let source = resolve_config_path(config).map(|p| p.display().to_string());
        print_json(&serde_json::json!({
            "source": source,
            "config": cfg,
        }))
    } else {
        match resolve_config_path(config) {
            Some(p) => println!("# {}", p.display()),
            None => println!("# built-in defaults"),
        }
        print_yaml(&cfg)
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let cfg = load_config(config, None).context("failed to load config")?;
    let warnings = cfg.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(config: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config_target(config);
    let cfg = NormalizeConfig::default();
    if force {
        cfg.save(&path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    } else {
        let data = serde_yaml::to_string(&cfg)?;
        let written = write_if_missing(&path, data.as_bytes())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        if !written {
            anyhow::bail!("'{}' already exists (use --force to overwrite)", path.display());
        }
    }
    println!("Wrote {}", path.display());
    Ok(())
}
