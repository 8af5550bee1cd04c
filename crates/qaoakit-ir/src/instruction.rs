//! Program instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitRef;

/// A gate applied to its operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitRef>,
}

impl Instruction {
    /// Create a gate instruction, checking the operand count.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitRef>) -> IrResult<Self> {
        let qubits: Vec<QubitRef> = qubits.into_iter().collect();
        let got = u32::try_from(qubits.len()).unwrap_or(u32::MAX);
        if got != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got,
            });
        }
        Ok(Self { gate, qubits })
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitRef) -> IrResult<Self> {
        Self::gate(gate, [qubit])
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for q in &self.qubits {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}
