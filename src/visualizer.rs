use serde::Serialize;

use crate::builder::TreeBuilder;
use crate::detect::detect_language;
use crate::explain::ExplanationGenerator;
use crate::flow::{FlowGraph, GraphConfig, GraphGenerator};
use crate::frontend::Language;
use crate::model::ControlNode;

#[derive(Debug, Clone, Serialize)]
pub struct VisualizationResult {
    pub mermaid_code: String,
    pub explanation: String,
    pub graph: FlowGraph,
    pub language: Language,
}

/// Front door over the whole pipeline: pick the frontend for a family,
/// strip and extract the entry block, build the control-tree, render the
/// graph and the explanation. Owns nothing across calls; every conversion
/// gets a fresh id counter and output buffer.
pub struct FlowchartVisualizer {
    config: GraphConfig,
}

impl Default for FlowchartVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowchartVisualizer {
    pub fn new() -> Self {
        FlowchartVisualizer {
            config: GraphConfig::default(),
        }
    }

    pub fn with_config(config: GraphConfig) -> Self {
        FlowchartVisualizer { config }
    }

    pub fn update_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    /// Parse a snippet into its control-tree.
    pub fn parse(&self, language: Language, code: &str) -> Vec<ControlNode> {
        let profile = language.profile();
        let stripped = profile.strip(code);
        let block = profile.entry_block(&stripped);
        TreeBuilder::new(profile).build(&block)
    }

    pub fn visualize(&self, language: Language, code: &str) -> VisualizationResult {
        let generator = GraphGenerator::with_config(self.config.clone());
        let tree = self.parse(language, code);

        let graph = if code.trim().is_empty() {
            generator.degraded("No code provided")
        } else if tree.is_empty() {
            generator.degraded("Unable to parse input")
        } else {
            generator.generate(&tree)
        };

        VisualizationResult {
            mermaid_code: graph.to_mermaid(&self.config.direction),
            explanation: ExplanationGenerator::new().generate(&tree),
            graph,
            language,
        }
    }

    pub fn visualize_auto(&self, code: &str) -> VisualizationResult {
        self.visualize(detect_language(code), code)
    }
}

#[cfg(test)]
mod visualizer_tests {
    use super::*;

    #[test]
    fn c_pipeline_end_to_end() {
        let code = r#"
            #include <stdio.h>
            int main(void) {
                int x = 5;
                printf("done");
                return 0;
            }
        "#;
        let result = FlowchartVisualizer::new().visualize(Language::C, code);
        assert!(result.mermaid_code.starts_with("flowchart TD"));
        assert!(result.mermaid_code.contains("Declare variable x"));
        assert!(result.mermaid_code.contains("Output: done"));
        assert!(result.explanation.contains("- Output: done."));
    }

    #[test]
    fn blank_input_degrades() {
        let result = FlowchartVisualizer::new().visualize(Language::Python, "   \n  ");
        assert!(result.mermaid_code.contains("No code provided"));
        // degraded diagrams still have Start and End terminals
        assert!(result.mermaid_code.contains("N1((\"Start\"))"));
        assert!(result.mermaid_code.contains("N2((\"End\"))"));
    }

    #[test]
    fn auto_detection_routes_by_marker() {
        let result = FlowchartVisualizer::new().visualize_auto("System.out.println(\"hi\");");
        assert_eq!(result.language, Language::Java);
        assert!(result.mermaid_code.contains("Output: hi"));
    }

    #[test]
    fn custom_direction_flows_into_header() {
        let config = GraphConfig {
            direction: "LR".to_string(),
            ..Default::default()
        };
        let result = FlowchartVisualizer::with_config(config).visualize(Language::C, "x = 1;");
        assert!(result.mermaid_code.starts_with("flowchart LR"));
    }
}
