//! Secondary renderer over the same control-tree: an indented, depth-nested
//! bullet explanation of the program, one bullet per statement, branch, or
//! loop.

use crate::classifier::{self, MAX_LABEL_LEN};
use crate::model::{ControlNode, LoopKind};

#[derive(Default)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn new() -> Self {
        ExplanationGenerator
    }

    pub fn generate(&self, tree: &[ControlNode]) -> String {
        let mut lines = vec!["Program Explanation:".to_string()];
        Self::walk(tree, 0, &mut lines);
        lines.join("\n")
    }

    fn walk(nodes: &[ControlNode], depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        for node in nodes {
            match node {
                ControlNode::Statement(stmt) => {
                    let (label, _) = classifier::label_for(stmt, MAX_LABEL_LEN);
                    lines.push(format!("{}- {}.", indent, label));
                }
                ControlNode::Conditional { clauses, else_body } => {
                    for (idx, clause) in clauses.iter().enumerate() {
                        if idx == 0 {
                            lines.push(format!(
                                "{}- If condition ({}) is true:",
                                indent, clause.condition
                            ));
                        } else {
                            lines.push(format!(
                                "{}- Otherwise, if ({}) is true:",
                                indent, clause.condition
                            ));
                        }
                        Self::walk(&clause.body, depth + 1, lines);
                    }
                    if let Some(body) = else_body {
                        lines.push(format!("{}- Otherwise:", indent));
                        Self::walk(body, depth + 1, lines);
                    }
                }
                ControlNode::Loop {
                    kind: LoopKind::PreTest,
                    keyword,
                    condition,
                    body,
                } => {
                    if keyword == "for" {
                        lines.push(format!("{}- For loop ({}), repeat:", indent, condition));
                    } else {
                        lines.push(format!("{}- While ({}), repeat:", indent, condition));
                    }
                    Self::walk(body, depth + 1, lines);
                }
                ControlNode::Loop {
                    kind: LoopKind::PostTest,
                    condition,
                    body,
                    ..
                } => {
                    lines.push(format!("{}- Do the following at least once:", indent));
                    Self::walk(body, depth + 1, lines);
                    lines.push(format!("{}- Then repeat while ({}).", indent, condition));
                }
                ControlNode::Switch { selector, cases } => {
                    lines.push(format!("{}- Switch on ({}):", indent, selector));
                    for case in cases {
                        let arm = case
                            .label
                            .strip_prefix("case")
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .unwrap_or(case.label.as_str());
                        lines.push(format!("{}  - Case {}:", indent, arm));
                        Self::walk(&case.body, depth + 2, lines);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod explain_tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::frontend::CProfile;

    fn explain(src: &str) -> String {
        let tree = TreeBuilder::new(&CProfile).build(src);
        ExplanationGenerator::new().generate(&tree)
    }

    #[test]
    fn statements_become_bullets() {
        let text = explain("int x; printf(\"hi\");");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Program Explanation:");
        assert_eq!(lines[1], "- Declare variable x.");
        assert_eq!(lines[2], "- Output: hi.");
    }

    #[test]
    fn branches_nest_one_level() {
        let text = explain("if (x > 0) { y = 1; } else { y = 2; }");
        assert!(text.contains("- If condition (x > 0) is true:"));
        assert!(text.contains("\n  - y = 1."));
        assert!(text.contains("- Otherwise:"));
        assert!(text.contains("\n  - y = 2."));
    }

    #[test]
    fn else_if_reads_as_otherwise_if() {
        let text = explain("if (a) { x = 1; } else if (b) { x = 2; }");
        assert!(text.contains("- Otherwise, if (b) is true:"));
    }

    #[test]
    fn loops_word_by_keyword() {
        let text = explain("while (n < 5) { n = n + 1; }");
        assert!(text.contains("- While (n < 5), repeat:"));

        let text = explain("for (int i = 0; i < 3; i++) { printf(\"hi\"); }");
        assert!(text.contains("- For loop (int i = 0; i < 3; i++), repeat:"));

        let text = explain("do { j++; } while (j < 3);");
        assert!(text.contains("- Do the following at least once:"));
        assert!(text.contains("- Then repeat while (j < 3)."));
    }

    #[test]
    fn switch_cases_nest_two_levels() {
        let text = explain(
            "switch (x) { case 1: a = 1; break; default: a = 0; }",
        );
        assert!(text.contains("- Switch on (x):"));
        assert!(text.contains("\n  - Case 1:"));
        assert!(text.contains("\n    - a = 1."));
        assert!(text.contains("\n  - Case default:"));
    }

    #[test]
    fn nesting_depth_follows_tree_depth() {
        let text = explain("while (a) { if (b) { c = 1; } }");
        assert!(text.contains("\n  - If condition (b) is true:"));
        assert!(text.contains("\n    - c = 1."));
    }
}
