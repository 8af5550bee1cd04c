//! Linear gate programs.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitRef;
use crate::registry::PlaceholderRegistry;

/// An ordered list of gate instructions.
///
/// Operands may be placeholders until [`Program::address_qubits`] binds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Name of the program.
    name: String,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new empty program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: vec![],
        }
    }

    /// Name of the program.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: impl Into<QubitRef>) -> IrResult<&mut Self> {
        let inst = Instruction::single_qubit_gate(StandardGate::X, qubit.into())?;
        Ok(self.push(inst))
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Distinct qubits touched by the program, in first-use order.
    pub fn qubits(&self) -> Vec<QubitRef> {
        let mut seen = FxHashSet::default();
        self.instructions
            .iter()
            .flat_map(|inst| inst.qubits.iter().copied())
            .filter(|q| seen.insert(*q))
            .collect()
    }

    /// Check if any operand is still a placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.instructions
            .iter()
            .any(|inst| inst.qubits.iter().any(QubitRef::is_placeholder))
    }

    /// Return a copy with every placeholder replaced by its bound qubit.
    pub fn address_qubits(&self, registry: &PlaceholderRegistry) -> IrResult<Program> {
        let instructions = self
            .instructions
            .iter()
            .map(|inst| {
                let qubits = inst
                    .qubits
                    .iter()
                    .map(|q| registry.resolve_ref(*q).map(QubitRef::Fixed))
                    .collect::<IrResult<Vec<_>>>()?;
                Ok(Instruction {
                    gate: inst.gate,
                    qubits,
                })
            })
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Program {
            name: self.name.clone(),
            instructions,
        })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program '{}' ({} instructions):", self.name, self.len())?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use crate::qubit::QubitId;

    #[test]
    fn test_build_program() {
        let mut p = Program::new("init");
        p.x(0u32).unwrap().x(2u32).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.qubits(), vec![QubitRef::from(0u32), QubitRef::from(2u32)]);
        assert!(!p.has_placeholders());
    }

    #[test]
    fn test_address_qubits() {
        let mut reg = PlaceholderRegistry::new();
        let phs = reg.allocate_many(2);
        let mut p = Program::new("init");
        p.x(phs[0]).unwrap().x(phs[1]).unwrap();
        assert!(p.has_placeholders());

        reg.assign_sequential();
        let addressed = p.address_qubits(&reg).unwrap();
        assert!(!addressed.has_placeholders());
        assert_eq!(
            addressed.qubits(),
            vec![QubitRef::Fixed(QubitId(0)), QubitRef::Fixed(QubitId(1))]
        );
    }

    #[test]
    fn test_address_unbound_fails() {
        let mut reg = PlaceholderRegistry::new();
        let ph = reg.allocate();
        let mut p = Program::new("init");
        p.x(ph).unwrap();
        assert!(matches!(
            p.address_qubits(&reg),
            Err(IrError::UnboundPlaceholder(_))
        ));
    }

    #[test]
    fn test_display() {
        let mut p = Program::new("init");
        p.x(1u32).unwrap();
        assert_eq!(p.to_string(), "Program 'init' (1 instructions):\n  x q1\n");
    }
}
