use crate::classifier::{self, MAX_LABEL_LEN};
use crate::flow::graph::{FlowGraph, ShapeKind};
use crate::model::{Clause, ControlNode, LoopKind, Statement, StatementKind, SwitchCase};

#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Mermaid layout direction in the header line.
    pub direction: String,
    /// Labels longer than this are truncated with an ellipsis.
    pub max_label_len: usize,
    /// Collapse consecutive statements that render to the same label.
    pub collapse_duplicates: bool,
    /// Label for the node placed on an otherwise empty branch edge.
    pub placeholder_label: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            direction: "TD".to_string(),
            max_label_len: MAX_LABEL_LEN,
            collapse_duplicates: true,
            placeholder_label: "No action".to_string(),
        }
    }
}

pub struct GraphGenerator {
    config: GraphConfig,
}

impl Default for GraphGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphGenerator {
    pub fn new() -> Self {
        GraphGenerator {
            config: GraphConfig::default(),
        }
    }

    pub fn with_config(config: GraphConfig) -> Self {
        GraphGenerator { config }
    }

    /// Linearize a control-tree into one connected directed graph.
    pub fn generate(&self, tree: &[ControlNode]) -> FlowGraph {
        let mut walker = Walker::new(&self.config);
        walker.run(tree);
        walker.graph
    }

    pub fn generate_mermaid(&self, tree: &[ControlNode]) -> String {
        self.generate(tree).to_mermaid(&self.config.direction)
    }

    /// Minimal diagram for input the pipeline could not tokenize: the error
    /// text becomes the single content node. Conversion never fails outright.
    pub fn degraded(&self, message: &str) -> FlowGraph {
        let mut graph = FlowGraph::default();
        let start = graph.add_node("Start", ShapeKind::Terminal);
        let end = graph.add_node("End", ShapeKind::Terminal);
        let note = graph.add_node(message, ShapeKind::Process);
        graph.add_edge(start, note, None);
        graph.add_edge(note, end, None);
        graph
    }
}

/// Where the traversal currently stands: `Open` carries the id of the most
/// recently emitted node (the tail new edges hang off); `Closed` means the
/// walk already drained into End and no further edges may be added at this
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    Open(usize),
    Closed,
}

struct Walker<'a> {
    config: &'a GraphConfig,
    graph: FlowGraph,
    end: usize,
    /// Most recent statement label emitted in the current sequence run,
    /// for duplicate collapsing. Reset whenever a control construct opens.
    last_label: Option<String>,
}

impl<'a> Walker<'a> {
    fn new(config: &'a GraphConfig) -> Self {
        let mut graph = FlowGraph::default();
        let _start = graph.add_node("Start", ShapeKind::Terminal);
        let end = graph.add_node("End", ShapeKind::Terminal);
        Walker {
            config,
            graph,
            end,
            last_label: None,
        }
    }

    fn run(&mut self, tree: &[ControlNode]) {
        let start = 1;
        if tree.is_empty() {
            self.graph.add_edge(start, self.end, None);
            return;
        }
        match self.walk_sequence(tree, start, None, true) {
            Tail::Open(id) => self.graph.add_edge(id, self.end, None),
            Tail::Closed => {}
        }
    }

    fn connect(&mut self, from: usize, to: usize, label: Option<String>) {
        self.graph.add_edge(from, to, label);
    }

    /// Walk one sequence. `entry_label` decorates the first edge out of
    /// `entry` (a branch's Yes/No/case label); `to_end_if_last` is true only
    /// for the outermost sequence, where the final construct may close
    /// straight into End instead of through a merge node.
    fn walk_sequence(
        &mut self,
        seq: &[ControlNode],
        entry: usize,
        entry_label: Option<&str>,
        to_end_if_last: bool,
    ) -> Tail {
        let mut tail = entry;
        let mut pending = entry_label.map(str::to_string);

        for (idx, node) in seq.iter().enumerate() {
            let is_last = to_end_if_last && idx + 1 == seq.len();
            let next = match node {
                ControlNode::Statement(stmt) => self.walk_statement(stmt, tail, pending.take()),
                ControlNode::Conditional { clauses, else_body } => {
                    self.last_label = None;
                    self.walk_conditional(clauses, else_body.as_deref(), tail, pending.take(), is_last)
                }
                ControlNode::Loop {
                    kind: LoopKind::PreTest,
                    condition,
                    body,
                    ..
                } => {
                    self.last_label = None;
                    self.walk_pretest(condition, body, tail, pending.take(), is_last)
                }
                ControlNode::Loop {
                    kind: LoopKind::PostTest,
                    condition,
                    body,
                    ..
                } => {
                    self.last_label = None;
                    self.walk_posttest(condition, body, tail, pending.take(), is_last)
                }
                ControlNode::Switch { selector, cases } => {
                    self.last_label = None;
                    self.walk_switch(selector, cases, tail, pending.take())
                }
            };
            match next {
                Tail::Open(id) => tail = id,
                // a return (or all-returning branches) drained into End:
                // remaining siblings at this level are unreachable
                Tail::Closed => return Tail::Closed,
            }
        }
        Tail::Open(tail)
    }

    fn walk_statement(&mut self, stmt: &Statement, tail: usize, pending: Option<String>) -> Tail {
        let (label, shape) = classifier::label_for(stmt, self.config.max_label_len);

        // collapse a repeat of the immediately preceding label, but never
        // swallow the node a branch edge needs to land on
        if self.config.collapse_duplicates
            && pending.is_none()
            && self.last_label.as_deref() == Some(label.as_str())
        {
            return Tail::Open(tail);
        }

        let id = self.graph.add_node(label.clone(), shape);
        self.connect(tail, id, pending);
        self.last_label = Some(label);

        if stmt.kind == StatementKind::Return {
            self.connect(id, self.end, None);
            return Tail::Closed;
        }
        Tail::Open(id)
    }

    fn walk_conditional(
        &mut self,
        clauses: &[Clause],
        else_body: Option<&[ControlNode]>,
        tail: usize,
        pending: Option<String>,
        is_last: bool,
    ) -> Tail {
        // open branch ends waiting for the merge point, with the edge label
        // to use when the branch is an empty body hanging off its decision
        let mut open_ends: Vec<(usize, Option<String>)> = Vec::new();
        let mut prev_decision = 0;

        for (idx, clause) in clauses.iter().enumerate() {
            let label = if clause.condition.is_empty() {
                "Condition"
            } else {
                clause.condition.as_str()
            };
            let decision = self.graph.add_node(label, ShapeKind::Decision);
            if idx == 0 {
                self.connect(tail, decision, pending.clone());
            } else {
                self.connect(prev_decision, decision, Some("No".to_string()));
            }

            if clause.body.is_empty() {
                open_ends.push((decision, Some("Yes".to_string())));
            } else {
                self.last_label = None;
                if let Tail::Open(id) = self.walk_sequence(&clause.body, decision, Some("Yes"), false)
                {
                    open_ends.push((id, None));
                }
            }
            prev_decision = decision;
        }

        match else_body {
            Some(body) if !body.is_empty() => {
                self.last_label = None;
                if let Tail::Open(id) = self.walk_sequence(body, prev_decision, Some("No"), false) {
                    open_ends.push((id, None));
                }
            }
            _ => open_ends.push((prev_decision, Some("No".to_string()))),
        }

        if is_last {
            for (id, label) in open_ends {
                self.connect(id, self.end, label);
            }
            return Tail::Closed;
        }
        if open_ends.is_empty() {
            // every branch returned
            return Tail::Closed;
        }

        let merge = self.graph.add_node("", ShapeKind::Process);
        for (id, label) in open_ends {
            self.connect(id, merge, label);
        }
        self.last_label = None;
        Tail::Open(merge)
    }

    fn walk_pretest(
        &mut self,
        condition: &str,
        body: &[ControlNode],
        tail: usize,
        pending: Option<String>,
        is_last: bool,
    ) -> Tail {
        let label = if condition.is_empty() { "Condition" } else { condition };
        let decision = self.graph.add_node(label, ShapeKind::Decision);
        self.connect(tail, decision, pending);

        if body.is_empty() {
            let placeholder = self
                .graph
                .add_node(self.config.placeholder_label.clone(), ShapeKind::Process);
            self.connect(decision, placeholder, Some("Yes".to_string()));
            self.connect(placeholder, decision, None);
        } else {
            self.last_label = None;
            // back-edge closes the cycle; a body that returned has no tail
            if let Tail::Open(id) = self.walk_sequence(body, decision, Some("Yes"), false) {
                self.connect(id, decision, None);
            }
        }

        self.exit_from(decision, is_last)
    }

    fn walk_posttest(
        &mut self,
        condition: &str,
        body: &[ControlNode],
        tail: usize,
        pending: Option<String>,
        is_last: bool,
    ) -> Tail {
        // body first: the unconditional entry edge guarantees one execution
        let body_entry = self.graph.next_id();
        let body_tail = if body.is_empty() {
            let placeholder = self
                .graph
                .add_node(self.config.placeholder_label.clone(), ShapeKind::Process);
            self.connect(tail, placeholder, pending);
            Tail::Open(placeholder)
        } else {
            self.last_label = None;
            self.walk_sequence(body, tail, pending.as_deref(), false)
        };

        let Tail::Open(body_tail) = body_tail else {
            // the body returned unconditionally: the condition is never
            // reached, so no decision node is emitted
            return Tail::Closed;
        };

        let label = if condition.is_empty() { "Condition" } else { condition };
        let decision = self.graph.add_node(label, ShapeKind::Decision);
        self.connect(body_tail, decision, None);
        self.connect(decision, body_entry, Some("Yes".to_string()));

        self.exit_from(decision, is_last)
    }

    fn walk_switch(
        &mut self,
        selector: &str,
        cases: &[SwitchCase],
        tail: usize,
        pending: Option<String>,
    ) -> Tail {
        let label = if selector.is_empty() { "Switch" } else { selector };
        let decision = self.graph.add_node(label, ShapeKind::Decision);
        self.connect(tail, decision, pending);

        if cases.is_empty() {
            // degenerate body: fall straight through
            let merge = self.graph.add_node("", ShapeKind::Process);
            self.connect(decision, merge, None);
            self.last_label = None;
            return Tail::Open(merge);
        }

        let mut open_ends = Vec::new();
        for case in cases {
            if case.body.is_empty() {
                let placeholder = self
                    .graph
                    .add_node(self.config.placeholder_label.clone(), ShapeKind::Process);
                self.connect(decision, placeholder, Some(case.label.clone()));
                open_ends.push(placeholder);
            } else {
                self.last_label = None;
                if let Tail::Open(id) =
                    self.walk_sequence(&case.body, decision, Some(case.label.as_str()), false)
                {
                    open_ends.push(id);
                }
            }
        }

        if open_ends.is_empty() {
            return Tail::Closed;
        }
        let merge = self.graph.add_node("", ShapeKind::Process);
        for id in open_ends {
            self.connect(id, merge, None);
        }
        self.last_label = None;
        Tail::Open(merge)
    }

    /// Wire a loop's false edge: straight to End when the loop is the final
    /// construct, otherwise to a fresh exit node that becomes the tail.
    fn exit_from(&mut self, decision: usize, is_last: bool) -> Tail {
        if is_last {
            self.connect(decision, self.end, Some("No".to_string()));
            return Tail::Closed;
        }
        let exit = self.graph.add_node("", ShapeKind::Process);
        self.connect(decision, exit, Some("No".to_string()));
        self.last_label = None;
        Tail::Open(exit)
    }
}
