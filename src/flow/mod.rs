mod graph;
mod graph_generator;

pub use graph::{sanitize_label, DirectedEdge, FlowGraph, GraphNode, ShapeKind};
pub use graph_generator::{GraphConfig, GraphGenerator};
