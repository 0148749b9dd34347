//! Recursive-descent parser turning the stripped entry block into a
//! control-tree. The block grammar (braces, parenthesized conditions, `;`
//! terminators) is shared by every family; only statement recognition is
//! delegated to the frontend profile. Parsing is deliberately permissive:
//! malformed input degrades to generic statements, it never fails.

use crate::frontend::SyntaxProfile;
use crate::model::{Clause, ControlNode, LoopKind, SwitchCase};
use crate::scanner::{is_ident_byte, keyword_at, read_delimited, read_statement, skip_whitespace};

pub struct TreeBuilder<'a> {
    profile: &'a dyn SyntaxProfile,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(profile: &'a dyn SyntaxProfile) -> Self {
        TreeBuilder { profile }
    }

    pub fn build(&self, block: &str) -> Vec<ControlNode> {
        self.parse_sequence(block)
    }

    fn parse_sequence(&self, src: &str) -> Vec<ControlNode> {
        let mut nodes = Vec::new();
        let mut i = 0;
        loop {
            i = skip_whitespace(src, i);
            if i >= src.len() {
                break;
            }
            // a bare braced group contributes its contents in place
            if src.as_bytes()[i] == b'{' {
                let (inner, next) = read_delimited(src, i);
                nodes.extend(self.parse_sequence(inner));
                i = next;
                continue;
            }
            let (node, next) = self.parse_construct(src, i);
            if let Some(node) = node {
                nodes.push(node);
            }
            // guarantee forward progress on any input
            i = if next > i { next } else { i + 1 };
        }
        nodes
    }

    /// Parse exactly one construct (control form or plain statement)
    /// starting at `i`.
    fn parse_construct(&self, src: &str, i: usize) -> (Option<ControlNode>, usize) {
        if keyword_at(src, i, "if") {
            return self.parse_conditional(src, i);
        }
        if keyword_at(src, i, "while") {
            return self.parse_pretest(src, i, "while");
        }
        if keyword_at(src, i, "for") {
            return self.parse_pretest(src, i, "for");
        }
        if keyword_at(src, i, "do") {
            return self.parse_posttest(src, i);
        }
        if keyword_at(src, i, "switch") {
            return self.parse_switch(src, i);
        }

        match src.as_bytes()[i] {
            // stray closers and empty statements carry no content
            b'}' | b')' | b';' => (None, i + 1),
            _ => {
                let (raw, next) = read_statement(src, i);
                let text = raw.trim().trim_end_matches(';').trim_end();
                if text.is_empty() {
                    (None, next)
                } else {
                    (Some(ControlNode::Statement(self.profile.classify(text))), next)
                }
            }
        }
    }

    /// Parenthesized group after a keyword; absent parentheses yield an
    /// empty condition without consuming anything.
    fn paren_group<'s>(&self, src: &'s str, i: usize) -> (&'s str, usize) {
        let j = skip_whitespace(src, i);
        if j < src.len() && src.as_bytes()[j] == b'(' {
            let (inner, next) = read_delimited(src, j);
            (inner.trim(), next)
        } else {
            ("", j)
        }
    }

    /// Braced block or single statement. A nested block in single-statement
    /// position is parsed as one full construct, recursively.
    fn parse_body(&self, src: &str, i: usize) -> (Vec<ControlNode>, usize) {
        let i = skip_whitespace(src, i);
        if i >= src.len() {
            return (Vec::new(), i);
        }
        if src.as_bytes()[i] == b'{' {
            let (inner, next) = read_delimited(src, i);
            return (self.parse_sequence(inner), next);
        }
        let (node, next) = self.parse_construct(src, i);
        (node.into_iter().collect(), next)
    }

    fn parse_conditional(&self, src: &str, start: usize) -> (Option<ControlNode>, usize) {
        let (cond, i) = self.paren_group(src, start + 2);
        let (then_body, mut i) = self.parse_body(src, i);
        let mut clauses = vec![Clause {
            condition: cond.to_string(),
            body: then_body,
        }];
        let mut else_body = None;

        loop {
            let j = skip_whitespace(src, i);
            if !keyword_at(src, j, "else") {
                break;
            }
            let k = skip_whitespace(src, j + 4);
            if keyword_at(src, k, "if") {
                let (cond, m) = self.paren_group(src, k + 2);
                let (body, m) = self.parse_body(src, m);
                clauses.push(Clause {
                    condition: cond.to_string(),
                    body,
                });
                i = m;
            } else {
                let (body, m) = self.parse_body(src, k);
                else_body = Some(body);
                i = m;
                break;
            }
        }

        (Some(ControlNode::Conditional { clauses, else_body }), i)
    }

    fn parse_pretest(
        &self,
        src: &str,
        start: usize,
        keyword: &'static str,
    ) -> (Option<ControlNode>, usize) {
        // a for-header (init/cond/step) is kept as one opaque string
        let (condition, i) = self.paren_group(src, start + keyword.len());
        let (body, next) = self.parse_body(src, i);
        (
            Some(ControlNode::Loop {
                kind: LoopKind::PreTest,
                keyword: keyword.to_string(),
                condition: condition.to_string(),
                body,
            }),
            next,
        )
    }

    fn parse_posttest(&self, src: &str, start: usize) -> (Option<ControlNode>, usize) {
        let (body, mut i) = self.parse_body(src, start + 2);
        let mut condition = String::new();

        let j = skip_whitespace(src, i);
        if keyword_at(src, j, "while") {
            let (cond, k) = self.paren_group(src, j + 5);
            condition = cond.to_string();
            let k2 = skip_whitespace(src, k);
            i = if k2 < src.len() && src.as_bytes()[k2] == b';' {
                k2 + 1
            } else {
                k
            };
        }

        (
            Some(ControlNode::Loop {
                kind: LoopKind::PostTest,
                keyword: "do".to_string(),
                condition,
                body,
            }),
            i,
        )
    }

    fn parse_switch(&self, src: &str, start: usize) -> (Option<ControlNode>, usize) {
        let (selector, i) = self.paren_group(src, start + 6);
        let j = skip_whitespace(src, i);
        let (cases, next) = if j < src.len() && src.as_bytes()[j] == b'{' {
            let (inner, n) = read_delimited(src, j);
            (self.split_cases(inner), n)
        } else {
            (Vec::new(), j)
        };
        (
            Some(ControlNode::Switch {
                selector: selector.to_string(),
                cases,
            }),
            next,
        )
    }

    /// Split a switch body into its `case`/`default` arms at the body's top
    /// nesting level. Each arm's statements run up to (excluding) the first
    /// top-level `break`; anything after it is not modeled. Content before
    /// the first arm label is dropped.
    fn split_cases(&self, body: &str) -> Vec<SwitchCase> {
        let bytes = body.as_bytes();
        let mut starts = Vec::new();
        let (mut brace, mut paren) = (0usize, 0usize);

        for i in 0..bytes.len() {
            match bytes[i] {
                b'{' => brace += 1,
                b'}' => brace = brace.saturating_sub(1),
                b'(' => paren += 1,
                b')' => paren = paren.saturating_sub(1),
                _ => {
                    if brace == 0
                        && paren == 0
                        && (i == 0 || !is_ident_byte(bytes[i - 1]))
                        && (keyword_at(body, i, "case") || keyword_at(body, i, "default"))
                    {
                        starts.push(i);
                    }
                }
            }
        }

        let mut cases = Vec::new();
        for (idx, &s) in starts.iter().enumerate() {
            let end = starts.get(idx + 1).copied().unwrap_or(body.len());
            let arm = &body[s..end];
            let Some(colon) = arm.find(':') else { continue };
            let label = arm[..colon].trim();
            let arm_body = cut_at_break(&arm[colon + 1..]);
            cases.push(SwitchCase {
                label: label.to_string(),
                body: self.parse_sequence(arm_body),
            });
        }
        cases
    }
}

/// Truncate a case body at its first top-level `break` token.
fn cut_at_break(body: &str) -> &str {
    let bytes = body.as_bytes();
    let (mut brace, mut paren) = (0usize, 0usize);
    for i in 0..bytes.len() {
        match bytes[i] {
            b'{' => brace += 1,
            b'}' => brace = brace.saturating_sub(1),
            b'(' => paren += 1,
            b')' => paren = paren.saturating_sub(1),
            _ => {
                if brace == 0
                    && paren == 0
                    && (i == 0 || !is_ident_byte(bytes[i - 1]))
                    && keyword_at(body, i, "break")
                {
                    return &body[..i];
                }
            }
        }
    }
    body
}
