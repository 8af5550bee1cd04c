//! Conversions between Hamiltonians, graphs and hyperparameter bundles.
//!
//! ```text
//! HyperParams ──► WeightedGraph ──► PauliSum ──► HyperParams
//! ```
//!
//! Bias terms become node weights and coupling terms become edge weights.

use tracing::debug;

use crate::error::HamResult;
use crate::graph::{NodeLabels, WeightedGraph};
use crate::hyperparams::HyperParams;
use crate::pauli::{PauliSum, PauliTerm};

/// Build a cost Hamiltonian from problem hyperparameters.
///
/// Coupling terms come first, in `pairs` order, followed by bias terms in
/// `singles` order. Indices are not checked against `nqubits`; out-of-range
/// indices are logged and kept.
pub fn hamiltonian_from_hyperparams(params: &HyperParams) -> HamResult<PauliSum> {
    params.validate()?;
    params.warn_out_of_range();

    let couplings = params
        .pairs
        .iter()
        .zip(&params.couplings)
        .map(|(&(a, b), &c)| PauliTerm::z(a, c) * PauliTerm::z(b, 1.0));
    let biases = params
        .singles
        .iter()
        .zip(&params.biases)
        .map(|(&q, &bias)| PauliTerm::z(q, bias));

    let hamiltonian: PauliSum = couplings.chain(biases).collect();
    debug!(
        nqubits = params.nqubits,
        n_terms = hamiltonian.num_terms(),
        "built Hamiltonian from hyperparameters"
    );
    Ok(hamiltonian)
}

/// Build a graph from problem hyperparameters.
///
/// Every biased qubit becomes a weighted node and every coupled pair a
/// weighted edge; endpoints without a bias are added as plain nodes.
pub fn graph_from_hyperparams(params: &HyperParams) -> HamResult<(WeightedGraph, NodeLabels)> {
    params.validate()?;
    params.warn_out_of_range();

    let mut graph = WeightedGraph::new();
    for (&qubit, &bias) in params.singles.iter().zip(&params.biases) {
        graph.set_bias(qubit, bias);
    }
    for (&(a, b), &coupling) in params.pairs.iter().zip(&params.couplings) {
        graph.add_coupling(a, b, coupling);
    }

    let labels = graph.labels();
    Ok((graph, labels))
}

/// Build a graph from a Hamiltonian.
///
/// Single-qubit terms become node weights and two-qubit terms edge weights.
/// Any other term fails with [`HamError::InvalidArity`](crate::HamError::InvalidArity).
/// Placeholder nodes are labelled `Holder n` after their registry handle.
pub fn graph_from_hamiltonian(hamiltonian: &PauliSum) -> HamResult<(WeightedGraph, NodeLabels)> {
    let params = HyperParams::from_hamiltonian(hamiltonian)?;
    debug!(
        nqubits = params.nqubits,
        n_singles = params.singles.len(),
        n_pairs = params.pairs.len(),
        "extracted hyperparameters from Hamiltonian"
    );
    graph_from_hyperparams(&params)
}

/// Build a cost Hamiltonian from a graph.
///
/// One bias term per weighted node, in node order, then one coupling term per
/// weighted edge, in edge order. Unweighted nodes and edges contribute nothing.
pub fn hamiltonian_from_graph(graph: &WeightedGraph) -> PauliSum {
    let biases = graph
        .nodes()
        .filter_map(|n| n.weight.map(|w| PauliTerm::z(n.key, w)));
    let couplings = graph
        .edges()
        .filter_map(|(a, b, w)| w.map(|w| PauliTerm::z(a, w) * PauliTerm::z(b, 1.0)));
    biases.chain(couplings).collect()
}

/// Flatten a graph into a hyperparameter bundle.
///
/// `nqubits` is the node count; only weighted nodes and edges are listed.
pub fn hyperparams_from_graph(graph: &WeightedGraph) -> HyperParams {
    let mut params = HyperParams::empty(graph.node_count());
    for node in graph.nodes() {
        if let Some(w) = node.weight {
            params.singles.push(node.key);
            params.biases.push(w);
        }
    }
    for (a, b, w) in graph.edges() {
        if let Some(w) = w {
            params.pairs.push((a, b));
            params.couplings.push(w);
        }
    }
    params
}
