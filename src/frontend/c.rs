use std::sync::LazyLock;

use regex::Regex;

use super::{declared_names, SyntaxProfile};
use crate::model::{Statement, StatementDetail, StatementKind};
use crate::scanner::{keyword_at, read_delimited};

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());
static MAIN_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bint\s+main\s*\([^)]*\)\s*\{").unwrap());
static PRINTF_PAYLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"printf\s*\(\s*"([^"]*)""#).unwrap());
static SCANF_TARGETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scanf\s*\([^,]+,\s*(.+)\)").unwrap());
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:unsigned\s+|signed\s+)?(?:short|long|int|char|float|double|size_t)\b(.*)$")
        .unwrap()
});
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w\[\].>-]*\s*(?:[-+*/%&|^]|<<|>>)?=[^=]").unwrap());

/// C-family adapter: `//`, `/* */` comments, `#` directives, `int main`
/// entry point, printf/scanf io calls, primitive-type declarations.
pub struct CProfile;

impl SyntaxProfile for CProfile {
    fn strip(&self, source: &str) -> String {
        let source = BLOCK_COMMENT.replace_all(source, "");
        let source = LINE_COMMENT.replace_all(&source, "");
        source
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn entry_block(&self, source: &str) -> String {
        if let Some(m) = MAIN_FN.find(source) {
            // the match ends on the opening brace
            let (body, _) = read_delimited(source, m.end() - 1);
            return body.to_string();
        }
        source.to_string()
    }

    fn classify(&self, text: &str) -> Statement {
        let text = text.trim();

        if keyword_at(text, 0, "printf") {
            let prompt = PRINTF_PAYLOAD.captures(text).map(|c| c[1].to_string());
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Output,
                detail: Some(StatementDetail {
                    prompt,
                    ..Default::default()
                }),
            };
        }

        if keyword_at(text, 0, "scanf") {
            let variables = SCANF_TARGETS
                .captures(text)
                .map(|c| {
                    c[1].split(',')
                        .map(|part| part.replace('&', "").trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            return Statement {
                text: text.to_string(),
                kind: StatementKind::Input,
                detail: Some(StatementDetail {
                    variables,
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
