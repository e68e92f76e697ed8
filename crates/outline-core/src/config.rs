use crate::error::{OutlineError, Result};
use crate::types::{LevelPolicy, MAX_LEVEL, MIN_LEVEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no explicit config is given.
pub const CONFIG_FILE: &str = ".outline.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// NormalizeConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub policy: LevelPolicy,
    /// Top level used when the outline does not declare a usable one.
    #[serde(default = "default_top_level")]
    pub default_top_level: u8,
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Fallback `estimated_chars` for nodes at the top level.
    #[serde(default = "default_top_level_chars")]
    pub top_level_chars: u64,
    /// Fallback `estimated_chars` for nodes below the top level.
    #[serde(default = "default_nested_chars")]
    pub nested_chars: u64,
}

fn default_top_level() -> u8 {
    2
}

fn default_title() -> String {
    "Untitled article".to_string()
}

fn default_top_level_chars() -> u64 {
    300
}

fn default_nested_chars() -> u64 {
    200
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            policy: LevelPolicy::default(),
            default_top_level: default_top_level(),
            default_title: default_title(),
            top_level_chars: default_top_level_chars(),
            nested_chars: default_nested_chars(),
        }
    }
}

impl NormalizeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OutlineError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: NormalizeConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.default_top_level) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "default_top_level={} is outside {MIN_LEVEL}..={MAX_LEVEL}",
                    self.default_top_level
                ),
            });
        }

        if self.default_title.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "default_title is blank".to_string(),
            });
        }

        for (name, value) in [
            ("top_level_chars", self.top_level_chars),
            ("nested_chars", self.nested_chars),
        ] {
            if value == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{name} must be positive"),
                });
            }
        }

        if self.nested_chars > self.top_level_chars {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "nested_chars={} exceeds top_level_chars={} \
                     (deeper sections may not get the larger budget)",
                    self.nested_chars, self.top_level_chars
                ),
            });
        }

        warnings
    }

    /// Copy of this config with every field that fails validation reset to its default.
    ///
    /// `nested_chars` is capped at `top_level_chars` rather than reset.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&cfg.default_top_level) {
            cfg.default_top_level = default_top_level();
        }
        let title = cfg.default_title.trim();
        cfg.default_title = if title.is_empty() {
            default_title()
        } else {
            title.to_string()
        };
        if cfg.top_level_chars == 0 {
            cfg.top_level_chars = default_top_level_chars();
        }
        if cfg.nested_chars == 0 {
            cfg.nested_chars = default_nested_chars();
        }
        cfg.nested_chars = cfg.nested_chars.min(cfg.top_level_chars);
        cfg
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_yaml_uses_defaults() {
        let cfg: NormalizeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, NormalizeConfig::default());
        assert_eq!(cfg.policy, LevelPolicy::Clamp);
        assert_eq!(cfg.default_top_level, 2);
        assert_eq!(cfg.top_level_chars, 300);
        assert_eq!(cfg.nested_chars, 200);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "policy: preserve\nnested_chars: 150\n";
        let cfg: NormalizeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.policy, LevelPolicy::Preserve);
        assert_eq!(cfg.nested_chars, 150);
        assert_eq!(cfg.top_level_chars, 300);
        assert_eq!(cfg.default_title, "Untitled article");
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = serde_yaml::from_str::<NormalizeConfig>("policy: aggressive\n");
        assert!(err.is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = config_path(dir.path());
        let cfg = NormalizeConfig {
            policy: LevelPolicy::Preserve,
            default_top_level: 1,
            ..NormalizeConfig::default()
        };
        cfg.save(&path).unwrap();
        let loaded = NormalizeConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = NormalizeConfig::load(&config_path(dir.path())).unwrap_err();
        assert!(matches!(err, OutlineError::ConfigNotFound(_)));
        let cfg = NormalizeConfig::load_or_default(&config_path(dir.path())).unwrap();
        assert_eq!(cfg, NormalizeConfig::default());
    }

    #[test]
    fn validate_default_config_no_warnings() {
        assert!(NormalizeConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_values() {
        let cfg = NormalizeConfig {
            default_top_level: 9,
            default_title: "  ".to_string(),
            top_level_chars: 0,
            nested_chars: 50,
            ..NormalizeConfig::default()
        };
        let warnings = cfg.validate();
        let errors = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Error)
            .count();
        assert_eq!(errors, 4);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("top_level_chars must be positive")));
        // nested (50) > top (0) is also reported
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("exceeds")));
    }

    #[test]
    fn sanitized_resets_invalid_fields_only() {
        let cfg = NormalizeConfig {
            policy: LevelPolicy::Preserve,
            default_top_level: 0,
            default_title: " Draft ".to_string(),
            top_level_chars: 500,
            nested_chars: 0,
        };
        let clean = cfg.sanitized();
        assert_eq!(clean.policy, LevelPolicy::Preserve);
        assert_eq!(clean.default_top_level, 2);
        assert_eq!(clean.default_title, "Draft");
        assert_eq!(clean.top_level_chars, 500);
        assert_eq!(clean.nested_chars, 200);
        assert!(clean
            .validate()
            .iter()
            .all(|w| w.level != WarnLevel::Error));
    }

    #[test]
    fn sanitized_caps_nested_chars_at_top_level_chars() {
        let cfg = NormalizeConfig {
            top_level_chars: 100,
            nested_chars: 900,
            ..NormalizeConfig::default()
        };
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("nested_chars=900")));
        let clean = cfg.sanitized();
        assert_eq!(clean.top_level_chars, 100);
        assert_eq!(clean.nested_chars, 100);
        assert!(clean.validate().is_empty());

        // a zero nested budget is reset first, then capped
        let clean = NormalizeConfig {
            top_level_chars: 50,
            nested_chars: 0,
            ..NormalizeConfig::default()
        }
        .sanitized();
        assert_eq!(clean.nested_chars, 50);
    }
}
