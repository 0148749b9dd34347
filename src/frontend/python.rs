use std::sync::LazyLock;

use regex::Regex;

use super::SyntaxProfile;
use crate::model::{Statement, StatementDetail, StatementKind};
use crate::scanner::keyword_at;

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[^\n]*").unwrap());
static TRIPLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"{3}.*?"{3}|'{3}.*?'{3}"#).unwrap());
static PRINT_CALL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^print\s*\(").unwrap());
static PRINT_PAYLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^print\s*\(\s*["']([^"']*)["']"#).unwrap());
static INPUT_READ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z_]\w*)\s*=\s*(?:([A-Za-z_]\w*)\s*\(\s*)?input\s*\(\s*(?:["']([^"']*)["'])?"#)
        .unwrap()
});
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w\[\].]*\s*(?:[-+*/%]|//|\*\*)?=[^=]").unwrap());

/// Python adapter. Indentation-delimited blocks are normalized into the
/// braced, `;`-terminated form the shared builder consumes: a trailing-`:`
/// header opens a block, a dedent closes it, `elif` becomes `else if`,
/// `match`/`case` become `switch`/`case`, and `def`/`class` wrappers are
/// flattened away.
pub struct PythonProfile;

impl SyntaxProfile for PythonProfile {
    fn strip(&self, source: &str) -> String {
        let source = TRIPLE_QUOTED.replace_all(source, "");
        LINE_COMMENT.replace_all(&source, "").into_owned()
    }

    fn entry_block(&self, source: &str) -> String {
        normalize_blocks(source)
    }

    fn classify(&self, text: &str) -> Statement {
        let text = text.trim();

        if let Some(captures) = INPUT_READ.captures(text) {
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Input,
                detail: Some(StatementDetail {
                    variables: vec![captures[1].to_string()],
                    prompt: captures.get(3).map(|m| m.as_str().to_string()),
                    conversion: captures.get(2).map(|m| m.as_str().to_string()),
                }),
            };
        }

        if PRINT_CALL.is_match(text) {
            let prompt = PRINT_PAYLOAD.captures(text).map(|c| c[1].to_string());
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Output,
                detail: Some(StatementDetail {
                    prompt,
                    ..Default::default()
                }),
            };
        }

        if keyword_at(text, 0, "return") {
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Return,
                detail: None,
            };
        }

        if ASSIGNMENT.is_match(text) {
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Assignment,
                detail: None,
            };
        }

        Statement::generic(text)
    }
}

/// How a trailing-`:` line translates into the braced form.
enum Header {
    /// Opens a braced block: `if (…) {`, `while (…) {`, `switch (…) {`.
    Braced(String),
    /// Emits a bare arm label inside a switch body: `case 1:`.
    Label(String),
    /// Opens no textual block; the contents are flattened into the parent
    /// (used for `def`/`class` wrappers and unmodeled suites).
    Silent,
}

fn header_for(text: &str) -> Option<Header> {
    let head = text.strip_suffix(':')?.trim_end();

    if keyword_at(head, 0, "if") {
        return Some(Header::Braced(format!("if ({})", head[2..].trim())));
    }
    if keyword_at(head, 0, "elif") {
        return Some(Header::Braced(format!("else if ({})", head[4..].trim())));
    }
    if head == "else" {
        return Some(Header::Braced("else".to_string()));
    }
    if keyword_at(head, 0, "while") {
        return Some(Header::Braced(format!("while ({})", head[5..].trim())));
    }
    if keyword_at(head, 0, "for") {
        return Some(Header::Braced(format!("for ({})", head[3..].trim())));
    }
    if keyword_at(head, 0, "match") {
        return Some(Header::Braced(format!("switch ({})", head[5..].trim())));
    }
    if keyword_at(head, 0, "case") {
        let pattern = head[4..].trim();
        let label = if pattern == "_" {
            "default".to_string()
        } else {
            format!("case {}", pattern)
        };
        return Some(Header::Label(label));
    }
    // def/class wrappers and unmodeled suites (try, with, …) are flattened
    Some(Header::Silent)
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn normalize_blocks(source: &str) -> String {
    let mut out = String::new();
    // open blocks: minimum indent of lines inside, and whether a closing
    // brace is owed on dedent
    let mut stack: Vec<(usize, bool)> = Vec::new();

    for raw in source.lines() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let indent = indent_width(raw);

        while let Some(&(min_indent, owes_brace)) = stack.last() {
            if indent >= min_indent {
                break;
            }
            stack.pop();
            if owes_brace {
                out.push_str("}\n");
            }
        }

        if text.ends_with(':') {
            match header_for(text) {
                Some(Header::Braced(header)) => {
                    out.push_str(&header);
                    out.push_str(" {\n");
                    stack.push((indent + 1, true));
                }
                Some(Header::Label(label)) => {
                    out.push_str(&label);
                    out.push_str(":\n");
                    stack.push((indent + 1, false));
                }
                Some(Header::Silent) | None => {
                    stack.push((indent + 1, false));
                }
            }
            continue;
        }

        out.push_str(text);
        if !text.ends_with(';') {
            out.push(';');
        }
        out.push('\n');
    }

    for (_, owes_brace) in stack.into_iter().rev() {
        if owes_brace {
            out.push_str("}\n");
        }
    }

    out
}

#[cfg(test)]
mod python_tests {
    use super::*;

    #[test]
    fn normalizes_if_elif_else() {
        let src = "if x > 0:\n    a = 1\nelif x == 0:\n    a = 2\nelse:\n    a = 3\nb = 4\n";
        let out = normalize_blocks(src);
        assert_eq!(
            out,
            "if (x > 0) {\na = 1;\n}\nelse if (x == 0) {\na = 2;\n}\nelse {\na = 3;\n}\nb = 4;\n"
        );
    }

    #[test]
    fn normalizes_loops() {
        let src = "for i in range(3):\n    print(i)\nwhile n < 5:\n    n = n + 1\n";
        let out = normalize_blocks(src);
        assert!(out.contains("for (i in range(3)) {"));
        assert!(out.contains("while (n < 5) {"));
        assert!(out.contains("print(i);"));
    }

    #[test]
    fn normalizes_match_into_switch() {
        let src = "match x:\n    case 1:\n        print('one')\n    case _:\n        print('other')\n";
        let out = normalize_blocks(src);
        assert!(out.contains("switch (x) {"));
        assert!(out.contains("case 1:"));
        assert!(out.contains("default:"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn flattens_def_wrappers() {
        let src = "def main():\n    x = 1\n    return x\n";
        let out = normalize_blocks(src);
        assert_eq!(out, "x = 1;\nreturn x;\n");
    }

    #[test]
    fn nested_blocks_close_in_order() {
        let src = "while a:\n    if b:\n        c = 1\nd = 2\n";
        let out = normalize_blocks(src);
        assert_eq!(out, "while (a) {\nif (b) {\nc = 1;\n}\n}\nd = 2;\n");
    }

    #[test]
    fn strips_comments_and_docstrings() {
        let src = "x = 1  # set up\n\"\"\"module\ndoc\"\"\"\ny = 2\n";
        let clean = PythonProfile.strip(src);
        assert!(!clean.contains("set up"));
        assert!(!clean.contains("module"));
        assert!(clean.contains("y = 2"));
    }

    #[test]
    fn classifies_input_with_prompt_and_conversion() {
        let s = PythonProfile.classify("age = int(input('How old? '))");
        assert_eq!(s.kind, StatementKind::Input);
        let detail = s.detail.unwrap();
        assert_eq!(detail.variables, vec!["age"]);
        assert_eq!(detail.prompt.as_deref(), Some("How old? "));
        assert_eq!(detail.conversion.as_deref(), Some("int"));

        let plain = PythonProfile.classify("name = input(\"Name: \")");
        let detail = plain.detail.unwrap();
        assert_eq!(detail.conversion, None);
        assert_eq!(detail.prompt.as_deref(), Some("Name: "));
    }

    #[test]
    fn classifies_print_and_assignment() {
        let s = PythonProfile.classify("print('hi')");
        assert_eq!(s.kind, StatementKind::Output);
        assert_eq!(s.detail.unwrap().prompt.as_deref(), Some("hi"));

        assert_eq!(
            PythonProfile.classify("total += 1").kind,
            StatementKind::Assignment
        );
        assert_eq!(
            PythonProfile.classify("return total").kind,
            StatementKind::Return
        );
    }
}
