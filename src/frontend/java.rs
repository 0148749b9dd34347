use std::sync::LazyLock;

use regex::Regex;

use super::{declared_names, SyntaxProfile};
use crate::model::{Statement, StatementDetail, StatementKind};
use crate::scanner::{keyword_at, read_delimited};

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());
static MAIN_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstatic\s+void\s+main\s*\([^)]*\)\s*\{").unwrap());
static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+[A-Za-z_$][\w$]*[^{]*\{").unwrap());
static PRINT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^System\s*\.\s*out\s*\.\s*print(?:ln)?\s*\(").unwrap());
static PRINT_PAYLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^System\s*\.\s*out\s*\.\s*print(?:ln)?\s*\(\s*"([^"]*)""#).unwrap());
static SCANNER_READ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_$][\w$<>\[\]]*\s+)?([A-Za-z_$][\w$]*)\s*=\s*[A-Za-z_$][\w$]*\s*\.\s*next\w*\s*\(")
        .unwrap()
});
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:final\s+)?(?:int|long|short|byte|char|boolean|float|double|String)\b(.*)$")
        .unwrap()
});
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$\[\].]*\s*(?:[-+*/%&|^]|<<|>>)?=[^=]").unwrap());

/// Java adapter: `//`, `/* */` comments, `public static void main` entry
/// point (falling back to the first class body), `System.out` output calls,
/// `Scanner`-style `next*` reads, primitive/String declarations.
pub struct JavaProfile;

impl SyntaxProfile for JavaProfile {
    fn strip(&self, source: &str) -> String {
        let source = BLOCK_COMMENT.replace_all(source, "");
        LINE_COMMENT.replace_all(&source, "").into_owned()
    }

    fn entry_block(&self, source: &str) -> String {
        if let Some(m) = MAIN_METHOD.find(source) {
            let (body, _) = read_delimited(source, m.end() - 1);
            return body.to_string();
        }
        if let Some(m) = CLASS_DECL.find(source) {
            let (body, _) = read_delimited(source, m.end() - 1);
            return body.to_string();
        }
        source.to_string()
    }

    fn classify(&self, text: &str) -> Statement {
        let text = text.trim();

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

        if let Some(captures) = SCANNER_READ.captures(text) {
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Input,
                detail: Some(StatementDetail {
                    variables: vec![captures[1].to_string()],
                    ..Default::default()
                }),
            };
        }

        if let Some(captures) = DECLARATION.captures(text) {
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Declaration,
                detail: Some(StatementDetail {
                    variables: declared_names(&captures[1]),
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
