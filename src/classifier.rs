//! Shared mapping from a classified statement to its renderable label and
//! shape. Family-specific recognition (what counts as an output call, which
//! tokens open a declaration) lives in the frontends; the label wording and
//! the truncation policy are identical across families.

use crate::flow::ShapeKind;
use crate::model::{Statement, StatementDetail, StatementKind};

pub const MAX_LABEL_LEN: usize = 50;

/// Truncate over-long labels, marking the cut with an ellipsis.
pub fn truncate_label(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Pure statement-to-(label, shape) mapping.
pub fn label_for(stmt: &Statement, max_len: usize) -> (String, ShapeKind) {
    let empty = StatementDetail::default();
    let detail = stmt.detail.as_ref().unwrap_or(&empty);

    match stmt.kind {
        StatementKind::Output => {
            let label = match &detail.prompt {
                Some(payload) => format!("Output: {}", payload),
                None => "Output".to_string(),
            };
            (label, ShapeKind::Io)
        }
        StatementKind::Input => {
            let vars = (!detail.variables.is_empty()).then(|| detail.variables.join(", "));
            let label = match (vars, &detail.prompt) {
                (Some(var), Some(prompt)) => match &detail.conversion {
                    Some(conv) => format!("Input {}: {} (as {})", var, prompt, conv),
                    None => format!("Input {}: {}", var, prompt),
                },
                (Some(var), None) => format!("Input {}", var),
                (None, Some(prompt)) => format!("Input: {}", prompt),
                (None, None) => "Input".to_string(),
            };
            (label, ShapeKind::Io)
        }
        StatementKind::Declaration => {
            let label = match detail.variables.len() {
                0 => "Declare variable".to_string(),
                1 => format!("Declare variable {}", detail.variables[0]),
                _ => format!("Declare variables {}", detail.variables.join(", ")),
            };
            (label, ShapeKind::Process)
        }
        StatementKind::Return => ("Return".to_string(), ShapeKind::Process),
        StatementKind::Assignment | StatementKind::Generic => {
            (truncate_label(stmt.text.trim(), max_len), ShapeKind::Process)
        }
    }
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    fn stmt(kind: StatementKind, text: &str, detail: Option<StatementDetail>) -> Statement {
        Statement {
            text: text.to_string(),
            kind,
            detail,
        }
    }

    #[test]
    fn output_with_payload() {
        let s = stmt(
            StatementKind::Output,
            "printf(\"hello\")",
            Some(StatementDetail {
                prompt: Some("hello".to_string()),
                ..Default::default()
            }),
        );
        let (label, shape) = label_for(&s, MAX_LABEL_LEN);
        assert_eq!(label, "Output: hello");
        assert_eq!(shape, ShapeKind::Io);
    }

    #[test]
    fn output_without_payload_is_generic() {
        let s = stmt(StatementKind::Output, "printf(fmt, x)", None);
        assert_eq!(label_for(&s, MAX_LABEL_LEN).0, "Output");
    }

    #[test]
    fn input_variants() {
        let with_all = stmt(
            StatementKind::Input,
            "x = int(input('n? '))",
            Some(StatementDetail {
                variables: vec!["x".to_string()],
                prompt: Some("n? ".to_string()),
                conversion: Some("int".to_string()),
            }),
        );
        assert_eq!(label_for(&with_all, MAX_LABEL_LEN).0, "Input x: n?  (as int)");

        let var_only = stmt(
            StatementKind::Input,
            "scanf(\"%d\", &x)",
            Some(StatementDetail {
                variables: vec!["x".to_string()],
                ..Default::default()
            }),
        );
        assert_eq!(label_for(&var_only, MAX_LABEL_LEN).0, "Input x");

        let bare = stmt(StatementKind::Input, "scanf(fmt)", None);
        assert_eq!(label_for(&bare, MAX_LABEL_LEN).0, "Input");
    }

    #[test]
    fn declaration_joins_names() {
        let s = stmt(
            StatementKind::Declaration,
            "int a, b",
            Some(StatementDetail {
                variables: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            }),
        );
        assert_eq!(label_for(&s, MAX_LABEL_LEN).0, "Declare variables a, b");
    }

    #[test]
    fn return_is_fixed() {
        let s = stmt(StatementKind::Return, "return x + 1", None);
        let (label, shape) = label_for(&s, MAX_LABEL_LEN);
        assert_eq!(label, "Return");
        assert_eq!(shape, ShapeKind::Process);
    }

    #[test]
    fn generic_truncates_with_ellipsis() {
        let long = "x".repeat(60);
        let s = stmt(StatementKind::Generic, &long, None);
        let (label, _) = label_for(&s, MAX_LABEL_LEN);
        assert_eq!(label.chars().count(), MAX_LABEL_LEN);
        assert!(label.ends_with("..."));
        assert_eq!(truncate_label("short", MAX_LABEL_LEN), "short");
    }
}
