use serde::{Deserialize, Serialize};

/// What a single statement was recognized as by a frontend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatementKind {
    Input,
    Output,
    Declaration,
    Assignment,
    Return,
    Generic,
}

/// Pieces of a statement that frontends manage to pull out syntactically:
/// declared or assigned variable names, and the string payload of an
/// output call or the prompt of an input call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatementDetail {
    #[serde(default)]
    pub variables: Vec<String>,
    pub prompt: Option<String>,
    /// Conversion wrapped around an input read, e.g. `int` in `int(input(...))`.
    pub conversion: Option<String>,
}

/// One statement of the analyzed block: the raw text (terminator stripped)
/// plus whatever the family-specific recognition extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub text: String,
    pub kind: StatementKind,
    pub detail: Option<StatementDetail>,
}

impl Statement {
    pub fn generic(text: impl Into<String>) -> Self {
        Statement {
            text: text.into(),
            kind: StatementKind::Generic,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopKind {
    PreTest,
    PostTest,
}

/// One `condition -> body` arm of an if/else-if chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clause {
    pub condition: String,
    pub body: Vec<ControlNode>,
}

/// One `case`/`default` arm of a multi-way branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwitchCase {
    pub label: String,
    pub body: Vec<ControlNode>,
}

/// The control-tree produced by the builder. A body is an ordered sequence
/// of nodes; a single-statement body is a one-element sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ControlNode {
    Statement(Statement),
    Conditional {
        clauses: Vec<Clause>,
        else_body: Option<Vec<ControlNode>>,
    },
    Loop {
        kind: LoopKind,
        /// Source keyword that introduced the loop (`while`, `for`, `do`).
        /// The explanation renderer words its bullets with this.
        keyword: String,
        condition: String,
        body: Vec<ControlNode>,
    },
    Switch {
        selector: String,
        cases: Vec<SwitchCase>,
    },
}
