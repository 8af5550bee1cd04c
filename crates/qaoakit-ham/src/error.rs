//! Error types for the Hamiltonian crate.

use thiserror::Error;

/// Errors produced while building or converting Hamiltonians and datasets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HamError {
    /// A term touches neither one nor two qubits.
    #[error("Only single- and two-qubit terms are supported, got a {arity}-qubit term: {term}")]
    InvalidArity {
        /// Number of distinct qubits in the term.
        arity: usize,
        /// The offending term, formatted.
        term: String,
    },

    /// An argument had the wrong shape.
    #[error("{argument} must be {expected}, got {found}")]
    InvalidArgumentType {
        /// Name of the argument.
        argument: &'static str,
        /// What was expected.
        expected: &'static str,
        /// What was supplied.
        found: &'static str,
    },

    /// Parallel inputs differ in length.
    #[error("{what}: expected length {expected}, got {got}")]
    LengthMismatch {
        /// Which input is mismatched.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Covariance matrix cannot be factorised.
    #[error("Covariance of cluster {cluster} is invalid: {reason}")]
    InvalidCovariance {
        /// Index of the cluster.
        cluster: usize,
        /// Why the matrix was rejected.
        reason: String,
    },

    /// Probability or amplitude vector is unusable.
    #[error("Invalid probability vector: {0}")]
    InvalidProbabilities(String),

    /// A classical state bit is neither 0 nor 1.
    #[error("State bit at position {position} must be 0 or 1, got {value}")]
    InvalidStateBit {
        /// Position in the state.
        position: usize,
        /// The offending value.
        value: u8,
    },

    /// Ring of disagrees needs at least one vertex.
    #[error("Ring size must be at least 1, got {0}")]
    InvalidRingSize(usize),

    /// Unknown distance metric name.
    #[error("Unknown distance metric '{0}'")]
    UnknownMetric(String),

    /// Dataset has no points.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Array shapes are incompatible.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Placeholder or program error.
    #[error("IR error: {0}")]
    Ir(#[from] qaoakit_ir::IrError),
}

/// Result type for Hamiltonian operations.
pub type HamResult<T> = Result<T, HamError>;
