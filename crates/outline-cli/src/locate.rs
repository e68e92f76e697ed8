use anyhow::Context;
use outline_core::config::{config_path, NormalizeConfig};
use outline_core::LevelPolicy;
use std::path::{Path, PathBuf};

/// Resolve which config file applies.
///
/// Priority:
/// 1. `--config` flag / `OUTLINE_CONFIG` env var (passed in as `explicit`)
/// 2. `.outline.yaml` in the current directory, if it exists
/// 3. None (built-in defaults)
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidate = config_path(&cwd);
    candidate.is_file().then_some(candidate)
}

/// Path `config init` writes to.
pub fn config_target(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path(&std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    }
}

/// Load the effective config, applying a `--policy` override when given.
pub fn load_config(
    explicit: Option<&Path>,
    policy: Option<LevelPolicy>,
) -> anyhow::Result<NormalizeConfig> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            NormalizeConfig::load(&path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?
        }
        None => NormalizeConfig::default(),
    };

    for w in config.validate() {
        tracing::warn!(level = ?w.level, "config: {}", w.message);
    }

    if let Some(policy) = policy {
        config.policy = policy;
    }
    Ok(config)
}
