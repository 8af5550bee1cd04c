//! Error types for the IR crate.

use crate::qubit::{QubitId, QubitPlaceholder};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Placeholder was never issued by the registry.
    #[error("Placeholder {0} was not issued by this registry")]
    UnknownPlaceholder(QubitPlaceholder),

    /// Placeholder has no concrete qubit bound to it.
    #[error("Placeholder {0} is not bound to a qubit")]
    UnboundPlaceholder(QubitPlaceholder),

    /// A concrete qubit is already claimed by another placeholder.
    #[error("Qubit {qubit} is already bound to {existing}")]
    DuplicateBinding {
        /// The concrete qubit.
        qubit: QubitId,
        /// The placeholder that already owns it.
        existing: QubitPlaceholder,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
