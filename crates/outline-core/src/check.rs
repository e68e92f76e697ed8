use crate::types::{Outline, OutlineNode, MAX_LEVEL, MIN_LEVEL};
use serde::{Deserialize, Serialize};

/// A broken structural rule in a normalized outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Location such as `/sections/0/subsections/2`.
    pub path: String,
    pub message: String,
}

/// Check the structural rules every normalized outline satisfies.
///
/// Useful for outlines that did not come straight out of the normalizer,
/// such as ones edited by hand and read back from disk. An empty result
/// means the outline is valid.
pub fn check_outline(outline: &Outline) -> Vec<Violation> {
    let mut violations = Vec::new();
    let top = outline.top_level_heading;

    if outline.title.trim().is_empty() {
        violations.push(Violation {
            path: "/title".to_string(),
            message: "title is blank".to_string(),
        });
    }
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&top) {
        violations.push(Violation {
            path: "/top_level_heading".to_string(),
            message: format!("top_level_heading {top} is outside {MIN_LEVEL}..={MAX_LEVEL}"),
        });
    }

    // (node, path, parent level)
    let mut stack: Vec<(&OutlineNode, String, Option<u8>)> = outline
        .sections
        .iter()
        .enumerate()
        .rev()
        .map(|(i, n)| (n, format!("/sections/{i}"), None))
        .collect();

    while let Some((node, path, parent_level)) = stack.pop() {
        if node.heading.trim().is_empty() {
            violations.push(Violation {
                path: path.clone(),
                message: "heading is blank".to_string(),
            });
        }
        if node.level < top || node.level > MAX_LEVEL {
            violations.push(Violation {
                path: path.clone(),
                message: format!("level {} is outside {top}..={MAX_LEVEL}", node.level),
            });
        }
        if let Some(parent) = parent_level {
            if node.level <= parent {
                violations.push(Violation {
                    path: path.clone(),
                    message: format!(
                        "level {} is not deeper than parent level {parent}",
                        node.level
                    ),
                });
            }
        }
        if node.estimated_chars == 0 {
            violations.push(Violation {
                path: path.clone(),
                message: "estimated_chars must be positive".to_string(),
            });
        }
        if node.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            violations.push(Violation {
                path: path.clone(),
                message: "description is present but blank".to_string(),
            });
        }

        for (i, child) in node.subsections.iter().enumerate().rev() {
            stack.push((child, format!("{path}/subsections/{i}"), Some(node.level)));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_outline;
    use serde_json::json;

    fn outline(sections: Vec<OutlineNode>) -> Outline {
        Outline {
            title: "T".to_string(),
            suggested_tone: None,
            top_level_heading: 2,
            sections,
        }
    }

    #[test]
    fn normalized_outline_is_valid() {
        let raw = json!({"sections": [
            {"heading": "A", "level": 4, "subsections": [{"heading": "B", "level": 1}]},
            {"heading": "", "subsections": [{"heading": "C", "level": 9, "estimated_chars": -1}]}
        ]});
        let normalized = normalize_outline(&raw).unwrap();
        assert!(check_outline(&normalized).is_empty());
    }

    #[test]
    fn child_not_deeper_than_parent() {
        let mut a = OutlineNode::leaf("A", 3, 100);
        a.subsections.push(OutlineNode::leaf("B", 3, 100));
        let violations = check_outline(&outline(vec![a]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/sections/0/subsections/0");
        assert!(violations[0].message.contains("not deeper than parent level 3"));
    }

    #[test]
    fn level_out_of_range() {
        let violations = check_outline(&outline(vec![
            OutlineNode::leaf("Shallow", 1, 100),
            OutlineNode::leaf("Deep", 7, 100),
        ]));
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["/sections/0", "/sections/1"]);
    }

    #[test]
    fn blank_fields_and_zero_chars() {
        let mut node = OutlineNode::leaf("  ", 2, 0);
        node.description = Some(String::new());
        let mut o = outline(vec![node]);
        o.title = " ".to_string();
        o.top_level_heading = 0;
        let messages: Vec<String> = check_outline(&o).into_iter().map(|v| v.message).collect();
        assert_eq!(messages.len(), 5);
        assert!(messages.iter().any(|m| m == "title is blank"));
        assert!(messages.iter().any(|m| m.contains("top_level_heading 0")));
        assert!(messages.iter().any(|m| m == "heading is blank"));
        assert!(messages.iter().any(|m| m == "estimated_chars must be positive"));
        assert!(messages.iter().any(|m| m == "description is present but blank"));
    }
}
