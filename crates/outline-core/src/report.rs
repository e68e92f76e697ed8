use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Repair
// ---------------------------------------------------------------------------

/// A silent correction applied while normalizing a raw outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Repair {
    TitleDefaulted,
    TopLevelDefaulted {
        to: u8,
    },
    TopLevelClamped {
        from: i64,
        to: u8,
    },
    /// A `sections`/`subsections` entry that is not an object.
    SkippedNonObject {
        path: String,
    },
    DroppedBlankHeading {
        path: String,
    },
    /// `level` was missing or not a number.
    LevelDefaulted {
        heading: String,
        to: u8,
    },
    LevelCorrected {
        heading: String,
        declared: i64,
        effective: u8,
    },
    CharsDefaulted {
        heading: String,
        to: u64,
    },
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repair::TitleDefaulted => write!(f, "title missing or blank, default used"),
            Repair::TopLevelDefaulted { to } => {
                write!(f, "top_level_heading missing or invalid, using {to}")
            }
            Repair::TopLevelClamped { from, to } => {
                write!(f, "top_level_heading {from} clamped to {to}")
            }
            Repair::SkippedNonObject { path } => write!(f, "{path}: not an object, skipped"),
            Repair::DroppedBlankHeading { path } => {
                write!(f, "{path}: blank heading dropped, children kept")
            }
            Repair::LevelDefaulted { heading, to } => {
                write!(f, "'{heading}': level missing or invalid, set to {to}")
            }
            Repair::LevelCorrected {
                heading,
                declared,
                effective,
            } => write!(f, "'{heading}': level {declared} corrected to {effective}"),
            Repair::CharsDefaulted { heading, to } => {
                write!(f, "'{heading}': estimated_chars missing or invalid, set to {to}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Collects repairs when a report was requested and mirrors them to `tracing`.
///
/// When neither a report nor debug logging is wanted, `note` never builds the
/// repair, so the plain normalization path does no extra allocation.
pub(crate) struct Recorder {
    repairs: Option<Vec<Repair>>,
    tracing: bool,
}

impl Recorder {
    pub(crate) fn silent() -> Self {
        Self {
            repairs: None,
            tracing: tracing::enabled!(tracing::Level::DEBUG),
        }
    }

    pub(crate) fn collecting() -> Self {
        Self {
            repairs: Some(Vec::new()),
            tracing: tracing::enabled!(tracing::Level::DEBUG),
        }
    }

    /// Whether noted repairs go anywhere; callers use it to skip building paths.
    pub(crate) fn active(&self) -> bool {
        self.tracing || self.repairs.is_some()
    }

    pub(crate) fn note(&mut self, make: impl FnOnce() -> Repair) {
        if !self.active() {
            return;
        }
        let repair = make();
        if self.tracing {
            tracing::debug!(repair = %repair, "outline repair");
        }
        if let Some(list) = self.repairs.as_mut() {
            list.push(repair);
        }
    }

    pub(crate) fn finish(self) -> Vec<Repair> {
        self.repairs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_are_tagged_by_kind() {
        let r = Repair::LevelCorrected {
            heading: "Intro".to_string(),
            declared: 7,
            effective: 6,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["kind"], "level_corrected");
        assert_eq!(json["declared"], 7);

        let unit = serde_json::to_value(Repair::TitleDefaulted).unwrap();
        assert_eq!(unit, serde_json::json!({"kind": "title_defaulted"}));
    }

    #[test]
    fn display_names_the_location() {
        let r = Repair::DroppedBlankHeading {
            path: "/sections/1".to_string(),
        };
        assert_eq!(r.to_string(), "/sections/1: blank heading dropped, children kept");
    }

    #[test]
    fn silent_recorder_keeps_nothing() {
        let mut rec = Recorder {
            repairs: None,
            tracing: false,
        };
        assert!(!rec.active());
        rec.note(|| panic!("repair must not be built"));
        assert!(rec.finish().is_empty());
    }

    #[test]
    fn collecting_recorder_keeps_order() {
        let mut rec = Recorder::collecting();
        rec.note(|| Repair::TitleDefaulted);
        rec.note(|| Repair::TopLevelDefaulted { to: 2 });
        assert_eq!(
            rec.finish(),
            vec![Repair::TitleDefaulted, Repair::TopLevelDefaulted { to: 2 }]
        );
    }
}
