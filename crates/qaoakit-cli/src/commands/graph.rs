//! Graph command implementation.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qaoakit_ham::{
    HyperParams, NodeData, PauliSum, WeightedGraph, graph_from_hamiltonian, graph_to_dot,
    hyperparams_from_graph,
};
use qaoakit_ir::QubitRef;

use super::common::{OutputFormat, emit, load_document};

/// Interaction graph of a Hamiltonian.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    /// Nodes in insertion order
    pub nodes: Vec<NodeData>,
    /// Edges as `(endpoint, endpoint, weight)`
    pub edges: Vec<(QubitRef, QubitRef, Option<f64>)>,
    /// Flattened hyperparameters
    pub hyperparams: HyperParams,
    #[serde(skip)]
    graph: WeightedGraph,
}

impl GraphReport {
    /// Build the report for a Hamiltonian.
    pub fn from_hamiltonian(hamiltonian: &PauliSum) -> Result<Self> {
        let (graph, _) =
            graph_from_hamiltonian(hamiltonian).context("Failed to convert Hamiltonian to graph")?;
        Ok(Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().collect(),
            hyperparams: hyperparams_from_graph(&graph),
            graph,
        })
    }

    /// The converted graph.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.graph)
    }
}

/// Execute the graph command.
pub fn execute(
    input: &Path,
    dot: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let hamiltonian: PauliSum = load_document(input)?;
    let report = GraphReport::from_hamiltonian(&hamiltonian)?;

    if let Some(dot_path) = dot {
        fs::write(dot_path, graph_to_dot(report.graph()))
            .with_context(|| format!("Failed to write file: {}", dot_path.display()))?;
        eprintln!(
            "{} Wrote {}",
            style("✓").green().bold(),
            style(dot_path.display()).green()
        );
    }

    emit(&report, format, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaoakit_ham::PauliTerm;

    #[test]
    fn test_report_from_hamiltonian() {
        let h = PauliSum::new(vec![PauliTerm::z(0u32, 0.5), PauliTerm::zz(0u32, 1u32, 2.0)]);
        let report = GraphReport::from_hamiltonian(&h).unwrap();
        assert_eq!(report.nodes.len(), 2);
        assert_eq!(report.edges.len(), 1);
        assert_eq!(report.hyperparams.biases, vec![0.5]);
        assert!(report.to_string().contains("0 -- 1 (weight: 2.0000)"));
    }

    #[test]
    fn test_report_rejects_three_qubit_term() {
        let term = PauliTerm::zz(0u32, 1u32, 1.0) * PauliTerm::z(2u32, 1.0);
        assert!(GraphReport::from_hamiltonian(&PauliSum::new(vec![term])).is_err());
    }
}
