use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest heading level an outline may use (HTML `<h6>`).
pub const MAX_LEVEL: u8 = 6;

/// Shallowest heading level an outline may use (HTML `<h1>`).
pub const MIN_LEVEL: u8 = 1;

// ---------------------------------------------------------------------------
// LevelPolicy
// ---------------------------------------------------------------------------

/// How a node's effective level is derived once its parent is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelPolicy {
    /// Roots sit at the top level; every child is exactly one level below its parent.
    #[default]
    Clamp,
    /// Keep the declared level; gaps such as H2 → H4 survive.
    Preserve,
}

impl LevelPolicy {
    pub fn all() -> &'static [LevelPolicy] {
        &[LevelPolicy::Clamp, LevelPolicy::Preserve]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LevelPolicy::Clamp => "clamp",
            LevelPolicy::Preserve => "preserve",
        }
    }
}

impl fmt::Display for LevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LevelPolicy {
    type Err = crate::error::OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clamp" => Ok(LevelPolicy::Clamp),
            "preserve" => Ok(LevelPolicy::Preserve),
            _ => Err(crate::error::OutlineError::InvalidPolicy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// OutlineNode
// ---------------------------------------------------------------------------

/// One heading of a normalized outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub heading: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub estimated_chars: u64,
    #[serde(default)]
    pub subsections: Vec<OutlineNode>,
}

impl OutlineNode {
    /// A leaf node, mostly useful for building expected trees in tests.
    pub fn leaf(heading: impl Into<String>, level: u8, estimated_chars: u64) -> Self {
        Self {
            heading: heading.into(),
            level,
            description: None,
            estimated_chars,
            subsections: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// A normalized outline: title plus the reconstructed section forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_tone: Option<String>,
    pub top_level_heading: u8,
    #[serde(default)]
    pub sections: Vec<OutlineNode>,
}

impl Outline {
    /// Every node paired with its depth (0 for roots), in pre-order.
    pub fn walk(&self) -> Vec<(usize, &OutlineNode)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, &OutlineNode)> =
            self.sections.iter().rev().map(|n| (0, n)).collect();
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            stack.extend(node.subsections.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }

    /// Headings in document (pre-order) order.
    pub fn headings(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .map(|(_, n)| n.heading.as_str())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.walk().len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
