//! Outline normalization.
//!
//! A raw outline is produced by a language model and its nesting does not
//! reliably match the `level` each heading declares. Normalization never
//! trusts the nesting as the hierarchy:
//!
//! 1. **Flatten** the raw tree in pre-order. Blank headings are dropped but
//!    their subsections are still visited. Raw nesting only contributes a
//!    depth floor: a kept node declares at least one level below its nearest
//!    kept raw ancestor.
//! 2. **Rebuild** the hierarchy from declared levels with a stack of open
//!    ancestors: a node becomes the child of the nearest preceding node whose
//!    effective level is strictly lower, or a root when there is none.
//!
//! Both passes are iterative and linear in the number of raw nodes.

use crate::coerce;
use crate::config::NormalizeConfig;
use crate::report::{Recorder, Repair};
use crate::types::{LevelPolicy, Outline, OutlineNode, MAX_LEVEL, MIN_LEVEL};
use serde_json::Value;

/// Normalize a raw outline with the default configuration.
///
/// Returns `None` only when `raw` is not a JSON object.
pub fn normalize_outline(raw: &Value) -> Option<Outline> {
    Normalizer::default().outline(raw)
}

/// Rebuild a raw `sections` array into a forest with the default configuration.
///
/// Absent or non-array input yields an empty forest.
pub fn normalize_outline_sections(
    sections: Option<&Value>,
    top_level: Option<i64>,
) -> Vec<OutlineNode> {
    Normalizer::default().sections(sections, top_level)
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

/// A kept raw heading, in document order.
struct FlatHeading {
    heading: String,
    /// Coerced raw `level`, before any clamping.
    raw_level: Option<i64>,
    /// Raw level clamped into `[top, 6]` and raised to the nesting floor.
    declared: u8,
    description: Option<String>,
    estimated_chars: Option<u64>,
}

/// A raw entry waiting to be visited during flattening.
struct Pending<'a> {
    value: &'a Value,
    path: Option<String>,
    floor: u8,
}

impl Normalizer {
    /// Build a normalizer; config fields that fail validation fall back to defaults.
    pub fn new(config: NormalizeConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn outline(&self, raw: &Value) -> Option<Outline> {
        self.build_outline(raw, &mut Recorder::silent())
    }

    /// Like [`Normalizer::outline`], also returning every correction applied.
    pub fn outline_with_report(&self, raw: &Value) -> Option<(Outline, Vec<Repair>)> {
        let mut rec = Recorder::collecting();
        let outline = self.build_outline(raw, &mut rec)?;
        Some((outline, rec.finish()))
    }

    pub fn sections(
        &self,
        sections: Option<&Value>,
        top_level: Option<i64>,
    ) -> Vec<OutlineNode> {
        let top = self.resolve_top_level(top_level);
        self.build_sections(sections, top, &mut Recorder::silent())
    }

    /// Clamp a requested top level into `[1, 6]`, falling back to the configured default.
    pub fn resolve_top_level(&self, raw: Option<i64>) -> u8 {
        match raw {
            Some(n) => coerce::clamp_level(n, MIN_LEVEL, MAX_LEVEL),
            None => self.config.default_top_level,
        }
    }

    fn build_outline(&self, raw: &Value, rec: &mut Recorder) -> Option<Outline> {
        let obj = raw.as_object()?;

        let title = coerce::text(obj.get("title")).unwrap_or_else(|| {
            rec.note(|| Repair::TitleDefaulted);
            self.config.default_title.clone()
        });
        let suggested_tone = coerce::text(obj.get("suggested_tone"));

        let requested = coerce::integer(obj.get("top_level_heading"));
        let top = self.resolve_top_level(requested);
        match requested {
            None => rec.note(|| Repair::TopLevelDefaulted { to: top }),
            Some(n) if n != i64::from(top) => {
                rec.note(|| Repair::TopLevelClamped { from: n, to: top })
            }
            Some(_) => {}
        }

        let sections = self.build_sections(obj.get("sections"), top, rec);
        tracing::trace!(title = %title, top, roots = sections.len(), "outline normalized");

        Some(Outline {
            title,
            suggested_tone,
            top_level_heading: top,
            sections,
        })
    }

    fn build_sections(
        &self,
        sections: Option<&Value>,
        top: u8,
        rec: &mut Recorder,
    ) -> Vec<OutlineNode> {
        let flat = flatten(sections, top, rec);
        self.rebuild(flat, top, rec)
    }

    // -----------------------------------------------------------------------
    // Rebuild
    // -----------------------------------------------------------------------

    fn rebuild(&self, flat: Vec<FlatHeading>, top: u8, rec: &mut Recorder) -> Vec<OutlineNode> {
        let mut arena: Vec<Option<OutlineNode>> = Vec::with_capacity(flat.len());
        let mut children: Vec<Vec<usize>> = Vec::with_capacity(flat.len());
        let mut roots: Vec<usize> = Vec::new();
        // Open ancestors: (arena index, effective level), levels strictly increasing.
        let mut open: Vec<(usize, u8)> = Vec::new();

        for item in flat {
            while open.last().is_some_and(|&(_, lvl)| lvl >= item.declared) {
                open.pop();
            }
            let parent = open.last().copied();

            let level = match (self.config.policy, parent) {
                (LevelPolicy::Clamp, None) => top,
                (LevelPolicy::Clamp, Some((_, parent_level))) => parent_level + 1,
                (LevelPolicy::Preserve, _) => item.declared,
            };

            match item.raw_level {
                None => rec.note(|| Repair::LevelDefaulted {
                    heading: item.heading.clone(),
                    to: level,
                }),
                Some(raw) if raw != i64::from(level) => rec.note(|| Repair::LevelCorrected {
                    heading: item.heading.clone(),
                    declared: raw,
                    effective: level,
                }),
                Some(_) => {}
            }

            let estimated_chars = item.estimated_chars.unwrap_or_else(|| {
                let fallback = if level == top {
                    self.config.top_level_chars
                } else {
                    self.config.nested_chars
                };
                rec.note(|| Repair::CharsDefaulted {
                    heading: item.heading.clone(),
                    to: fallback,
                });
                fallback
            });

            let idx = arena.len();
            arena.push(Some(OutlineNode {
                heading: item.heading,
                level,
                description: item.description,
                estimated_chars,
                subsections: Vec::new(),
            }));
            children.push(Vec::new());
            match parent {
                Some((parent_idx, _)) => children[parent_idx].push(idx),
                None => roots.push(idx),
            }
            open.push((idx, level));
        }

        // Children always sit after their parent in the arena, so walking
        // backwards finishes every subtree before it is attached.
        for idx in (0..arena.len()).rev() {
            let kids: Vec<OutlineNode> = std::mem::take(&mut children[idx])
                .into_iter()
                .filter_map(|k| arena[k].take())
                .collect();
            if let Some(node) = arena[idx].as_mut() {
                node.subsections = kids;
            }
        }

        roots.into_iter().filter_map(|r| arena[r].take()).collect()
    }
}

// ---------------------------------------------------------------------------
// Flatten
// ---------------------------------------------------------------------------

fn flatten(sections: Option<&Value>, top: u8, rec: &mut Recorder) -> Vec<FlatHeading> {
    let mut flat = Vec::new();
    let Some(items) = sections.and_then(Value::as_array) else {
        return flat;
    };

    let mut work: Vec<Pending<'_>> = Vec::new();
    let root_path = rec.active().then(|| "/sections".to_string());
    push_pending(&mut work, items, root_path.as_deref(), top);

    while let Some(Pending { value, path, floor }) = work.pop() {
        let Some(obj) = value.as_object() else {
            rec.note(|| Repair::SkippedNonObject {
                path: path.clone().unwrap_or_default(),
            });
            continue;
        };

        let child_floor = match coerce::text(obj.get("heading")) {
            Some(heading) => {
                let raw_level = coerce::integer(obj.get("level"));
                let declared =
                    coerce::clamp_level(raw_level.unwrap_or(i64::from(top)), top, MAX_LEVEL)
                        .max(floor);
                let estimated_chars = coerce::integer(obj.get("estimated_chars"))
                    .filter(|&n| n >= 1)
                    .map(|n| n as u64);
                flat.push(FlatHeading {
                    heading,
                    raw_level,
                    declared,
                    description: coerce::text(obj.get("description")),
                    estimated_chars,
                });
                (declared + 1).min(MAX_LEVEL)
            }
            None => {
                rec.note(|| Repair::DroppedBlankHeading {
                    path: path.clone().unwrap_or_default(),
                });
                floor
            }
        };

        if let Some(subs) = obj.get("subsections").and_then(Value::as_array) {
            let sub_path = path.map(|p| format!("{p}/subsections"));
            push_pending(&mut work, subs, sub_path.as_deref(), child_floor);
        }
    }

    flat
}

/// Queue `items` so that popping yields them in declared order.
fn push_pending<'a>(
    work: &mut Vec<Pending<'a>>,
    items: &'a [Value],
    path: Option<&str>,
    floor: u8,
) {
    for (i, value) in items.iter().enumerate().rev() {
        work.push(Pending {
            value,
            path: path.map(|p| format!("{p}/{i}")),
            floor,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
