//! Weighted interaction graphs.
//!
//! Nodes are keyed by [`QubitRef`] and may carry a bias weight; edges may
//! carry a coupling weight. Nodes and edges are iterated in insertion order.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use qaoakit_ir::QubitRef;

/// Display labels keyed by node.
pub type NodeLabels = BTreeMap<QubitRef, String>;

/// Attributes stored on a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// The qubit this node stands for.
    pub key: QubitRef,
    /// Display name.
    pub name: String,
    /// Bias weight, if the qubit has a bias term.
    pub weight: Option<f64>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(w) => write!(f, "{} ({w:.4})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Attributes stored on a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    /// Coupling weight, if the pair has a coupling term.
    pub weight: Option<f64>,
}

impl fmt::Display for EdgeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(w) => write!(f, "{w:.4}"),
            None => Ok(()),
        }
    }
}

/// An undirected graph of qubits with optional node and edge weights.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: UnGraph<NodeData, EdgeData>,
    index: FxHashMap<QubitRef, NodeIndex>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return the existing one for `key`.
    pub fn add_node(&mut self, key: impl Into<QubitRef>) -> NodeIndex {
        let key = key.into();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            key,
            name: key.label(),
            weight: None,
        });
        self.index.insert(key, idx);
        idx
    }

    /// Set the bias weight of a node, creating it if needed.
    pub fn set_bias(&mut self, key: impl Into<QubitRef>, weight: f64) -> NodeIndex {
        let idx = self.add_node(key);
        self.graph[idx].weight = Some(weight);
        idx
    }

    /// Set the display name of a node, creating it if needed.
    pub fn set_name(&mut self, key: impl Into<QubitRef>, name: impl Into<String>) -> NodeIndex {
        let idx = self.add_node(key);
        self.graph[idx].name = name.into();
        idx
    }

    /// Add an edge, or overwrite the weight of an existing one.
    pub fn add_edge(
        &mut self,
        a: impl Into<QubitRef>,
        b: impl Into<QubitRef>,
        weight: Option<f64>,
    ) -> EdgeIndex {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        self.graph.update_edge(ia, ib, EdgeData { weight })
    }

    /// Add a weighted edge.
    pub fn add_coupling(
        &mut self,
        a: impl Into<QubitRef>,
        b: impl Into<QubitRef>,
        weight: f64,
    ) -> EdgeIndex {
        self.add_edge(a, b, Some(weight))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a node exists for `key`.
    pub fn contains_node(&self, key: impl Into<QubitRef>) -> bool {
        self.index.contains_key(&key.into())
    }

    /// Node attributes for `key`.
    pub fn node(&self, key: impl Into<QubitRef>) -> Option<&NodeData> {
        self.index.get(&key.into()).map(|&idx| &self.graph[idx])
    }

    /// Bias weight of a node.
    pub fn bias(&self, key: impl Into<QubitRef>) -> Option<f64> {
        self.node(key).and_then(|n| n.weight)
    }

    fn find_edge(&self, a: QubitRef, b: QubitRef) -> Option<EdgeIndex> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        self.graph.find_edge(ia, ib)
    }

    /// Check if an edge joins `a` and `b` (in either direction).
    pub fn has_edge(&self, a: impl Into<QubitRef>, b: impl Into<QubitRef>) -> bool {
        self.find_edge(a.into(), b.into()).is_some()
    }

    /// Coupling weight of the edge between `a` and `b`.
    pub fn coupling(&self, a: impl Into<QubitRef>, b: impl Into<QubitRef>) -> Option<f64> {
        self.find_edge(a.into(), b.into())
            .and_then(|e| self.graph[e].weight)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges in insertion order, as `(endpoint, endpoint, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (QubitRef, QubitRef, Option<f64>)> + '_ {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].key,
                self.graph[e.target()].key,
                e.weight().weight,
            )
        })
    }

    /// Keys of the nodes adjacent to `key`.
    pub fn neighbors(&self, key: impl Into<QubitRef>) -> Vec<QubitRef> {
        match self.index.get(&key.into()) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].key)
                .collect(),
            None => vec![],
        }
    }

    /// Display labels of all nodes.
    pub fn labels(&self) -> NodeLabels {
        self.nodes().map(|n| (n.key, n.name.clone())).collect()
    }

    /// The underlying petgraph graph.
    pub fn inner(&self) -> &UnGraph<NodeData, EdgeData> {
        &self.graph
    }
}

impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges):",
            self.node_count(),
            self.edge_count()
        )?;
        for node in self.nodes() {
            if let Some(w) = node.weight {
                writeln!(f, "  {} (bias: {w:.4})", node.name)?;
            }
        }
        for (a, b, w) in self.edges() {
            match w {
                Some(w) => writeln!(f, "  {} -- {} (weight: {w:.4})", a.label(), b.label())?,
                None => writeln!(f, "  {} -- {}", a.label(), b.label())?,
            }
        }
        Ok(())
    }
}
