//! `qaoakit-ham`: cost Hamiltonians, interaction graphs and datasets for QAOA.
//!
//! A diagonal cost Hamiltonian is a [`PauliSum`] of single-qubit `Z` biases
//! and two-qubit `ZZ` couplings. This crate moves it between three
//! equivalent views:
//!
//! - **Hamiltonian**: [`PauliSum`] / [`PauliTerm`]
//! - **Graph**: [`WeightedGraph`], biases on nodes and couplings on edges
//! - **Hyperparameters**: [`HyperParams`], flat lists of indices and weights
//!
//! plus generators ([`random_hamiltonian`], [`ring_of_disagrees`],
//! [`hamiltonian_from_distance_matrix`]), synthetic datasets
//! ([`gaussian_2d_clusters`]) and basis-state helpers.
//!
//! # Quick start
//!
//! ```rust
//! use qaoakit_ham::{graph_from_hamiltonian, hamiltonian_from_graph, ring_of_disagrees};
//!
//! let h = ring_of_disagrees(4).unwrap();
//! let (graph, labels) = graph_from_hamiltonian(&h).unwrap();
//! assert_eq!(graph.edge_count(), 4);
//! assert_eq!(labels.len(), 4);
//!
//! let back = hamiltonian_from_graph(&graph);
//! assert_eq!(back.num_terms(), 4);
//! ```

pub mod clusters;
pub mod convert;
pub mod distance;
pub mod error;
pub mod generate;
pub mod graph;
pub mod hyperparams;
pub mod pauli;
pub mod render;
pub mod state;

pub use clusters::{Cluster, ClusterData, gaussian_2d_clusters};
pub use convert::{
    graph_from_hamiltonian, graph_from_hyperparams, hamiltonian_from_graph,
    hamiltonian_from_hyperparams, hyperparams_from_graph,
};
pub use distance::{
    BiasArg, Biases, DataTable, Dataset, LabeledTable, Metric, distances_dataset,
    hamiltonian_from_distance_matrix,
};
pub use error::{HamError, HamResult};
pub use generate::{random_hamiltonian, ring_of_disagrees};
pub use graph::{EdgeData, NodeData, NodeLabels, WeightedGraph};
pub use hyperparams::HyperParams;
pub use pauli::{PauliOp, PauliSum, PauliTerm};
pub use render::{AmplitudeBar, AmplitudeChart, ClusterScatter, graph_to_dot};
pub use state::{AccuracyReport, evaluate_lowest_state, prepare_classical_state, return_lowest_state};
