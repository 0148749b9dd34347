use serde::{Deserialize, Serialize};

/// Shape a node is drawn with: rectangle for process steps, diamond for
/// decisions, parallelogram for input/output, circle for the terminals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShapeKind {
    Process,
    Decision,
    Io,
    Terminal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: usize,
    pub label: String,
    pub shape: ShapeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectedEdge {
    pub from: usize,
    pub to: usize,
    pub label: Option<String>,
}

/// One connected flow diagram. Node ids start at 1 and are assigned
/// monotonically within a single render call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<DirectedEdge>,
}

impl FlowGraph {
    pub fn add_node(&mut self, label: impl Into<String>, shape: ShapeKind) -> usize {
        let id = self.nodes.len() + 1;
        self.nodes.push(GraphNode {
            id,
            label: label.into(),
            shape,
        });
        id
    }

    pub fn add_edge(&mut self, from: usize, to: usize, label: Option<String>) {
        self.edges.push(DirectedEdge { from, to, label });
    }

    /// Id the next `add_node` call will return.
    pub fn next_id(&self) -> usize {
        self.nodes.len() + 1
    }

    pub fn node(&self, id: usize) -> Option<&GraphNode> {
        self.nodes.get(id.checked_sub(1)?)
    }

    pub fn out_edges(&self, id: usize) -> impl Iterator<Item = &DirectedEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn in_degree(&self, id: usize) -> usize {
        self.edges.iter().filter(|e| e.to == id).count()
    }

    /// Serialize to Mermaid flowchart notation: one header line, one line
    /// per node, one line per edge.
    pub fn to_mermaid(&self, direction: &str) -> String {
        let mut lines = vec![format!("flowchart {}", direction)];

        for node in &self.nodes {
            let label = sanitize_label(&node.label);
            let label = if label.is_empty() { " " } else { label.as_str() };
            lines.push(match node.shape {
                ShapeKind::Terminal => format!("N{}((\"{}\"))", node.id, label),
                ShapeKind::Process => format!("N{}[\"{}\"]", node.id, label),
                ShapeKind::Decision => format!("N{}{{\"{}\"}}", node.id, label),
                ShapeKind::Io => format!("N{}[/\"{}\"/]", node.id, label),
            });
        }

        for edge in &self.edges {
            lines.push(match &edge.label {
                Some(label) => format!(
                    "N{} -- {} --> N{}",
                    edge.from,
                    sanitize_label(label),
                    edge.to
                ),
                None => format!("N{} --> N{}", edge.from, edge.to),
            });
        }

        lines.join("\n")
    }
}

/// Make a label safe for the line-oriented notation: collapse whitespace
/// runs, swap double quotes for single ones, escape HTML-significant
/// characters.
pub fn sanitize_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        match ch {
            '"' => out.push('\''),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
