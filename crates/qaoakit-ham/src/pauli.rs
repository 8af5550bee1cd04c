//! Pauli-term algebra.
//!
//! A cost Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a product of single-qubit Pauli operators on distinct
//! qubits. Terms are kept in insertion order and are never simplified, so a
//! Hamiltonian built from a list of terms hands the same list back.
//!
//! # Example
//!
//! ```rust
//! use qaoakit_ham::pauli::{PauliSum, PauliTerm};
//!
//! // H = 0.5·Z₀Z₁ + 0.2·Z₁
//! let h = PauliSum::new(vec![
//!     PauliTerm::z(0u32, 0.5) * PauliTerm::z(1u32, 1.0),
//!     PauliTerm::z(1u32, 0.2),
//! ]);
//! assert_eq!(h.num_terms(), 2);
//! assert_eq!(h.num_qubits(), 2);
//! ```

use num_complex::Complex64;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

use qaoakit_ir::{PlaceholderRegistry, QubitRef};

use crate::error::HamResult;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Get the name of this operator.
    pub fn name(&self) -> &'static str {
        match self {
            PauliOp::I => "I",
            PauliOp::X => "X",
            PauliOp::Y => "Y",
            PauliOp::Z => "Z",
        }
    }

    /// Product of two operators on the same qubit, as `(phase, operator)`.
    pub fn product(self, rhs: PauliOp) -> (Complex64, PauliOp) {
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match (self, rhs) {
            (PauliOp::I, op) | (op, PauliOp::I) => (one, op),
            (PauliOp::X, PauliOp::X) | (PauliOp::Y, PauliOp::Y) | (PauliOp::Z, PauliOp::Z) => {
                (one, PauliOp::I)
            }
            (PauliOp::X, PauliOp::Y) => (i, PauliOp::Z),
            (PauliOp::Y, PauliOp::X) => (-i, PauliOp::Z),
            (PauliOp::Y, PauliOp::Z) => (i, PauliOp::X),
            (PauliOp::Z, PauliOp::Y) => (-i, PauliOp::X),
            (PauliOp::Z, PauliOp::X) => (i, PauliOp::Y),
            (PauliOp::X, PauliOp::Z) => (-i, PauliOp::Y),
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single weighted Pauli string: `coefficient · (P_a ⊗ P_b ⊗ …)`.
///
/// Deserialized terms are rebuilt through [`PauliTerm::from_ops`], so repeated
/// qubits are multiplied out and identity operators dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPauliTerm")]
pub struct PauliTerm {
    /// The coefficient of this term.
    pub coefficient: Complex64,
    /// Non-identity operators, at most one per qubit, in insertion order.
    ops: Vec<(QubitRef, PauliOp)>,
}

/// Serialized form of a [`PauliTerm`], before operators are merged.
#[derive(Deserialize)]
struct RawPauliTerm {
    coefficient: Complex64,
    #[serde(default)]
    ops: Vec<(QubitRef, PauliOp)>,
}

impl From<RawPauliTerm> for PauliTerm {
    fn from(raw: RawPauliTerm) -> Self {
        PauliTerm::from_ops(raw.coefficient, raw.ops)
    }
}

impl PauliTerm {
    /// Build a term, multiplying together operators that share a qubit.
    pub fn from_ops(
        coefficient: impl Into<Complex64>,
        ops: impl IntoIterator<Item = (QubitRef, PauliOp)>,
    ) -> Self {
        let mut term = Self {
            coefficient: coefficient.into(),
            ops: vec![],
        };
        for (qubit, op) in ops {
            term.apply(qubit, op);
        }
        term
    }

    /// Create an identity term (scalar).
    pub fn identity(coefficient: f64) -> Self {
        Self {
            coefficient: coefficient.into(),
            ops: vec![],
        }
    }

    /// Create a single-qubit term.
    pub fn single(op: PauliOp, qubit: impl Into<QubitRef>, coefficient: f64) -> Self {
        Self::from_ops(coefficient, [(qubit.into(), op)])
    }

    /// Create a single-qubit Z term.
    pub fn z(qubit: impl Into<QubitRef>, coefficient: f64) -> Self {
        Self::single(PauliOp::Z, qubit, coefficient)
    }

    /// Create a ZZ coupling term.
    ///
    /// Equivalent to `z(a, coefficient) * z(b, 1.0)`, so `a == b` collapses
    /// to an identity term.
    pub fn zz(a: impl Into<QubitRef>, b: impl Into<QubitRef>, coefficient: f64) -> Self {
        Self::from_ops(coefficient, [(a.into(), PauliOp::Z), (b.into(), PauliOp::Z)])
    }

    fn apply(&mut self, qubit: QubitRef, op: PauliOp) {
        match self.ops.iter().position(|(q, _)| *q == qubit) {
            Some(pos) => {
                let (phase, result) = self.ops[pos].1.product(op);
                self.coefficient *= phase;
                if result == PauliOp::I {
                    self.ops.remove(pos);
                } else {
                    self.ops[pos].1 = result;
                }
            }
            None if op != PauliOp::I => self.ops.push((qubit, op)),
            None => {}
        }
    }

    /// The non-identity operators.
    pub fn ops(&self) -> &[(QubitRef, PauliOp)] {
        &self.ops
    }

    /// Qubits this term acts on, in insertion order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitRef> + '_ {
        self.ops.iter().map(|(q, _)| *q)
    }

    /// Number of distinct qubits the term touches.
    pub fn arity(&self) -> usize {
        self.ops.len()
    }

    /// Check if this is an identity term.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Return a copy with placeholders replaced by their bound qubits.
    pub fn address_qubits(&self, registry: &PlaceholderRegistry) -> HamResult<PauliTerm> {
        let ops = self
            .ops
            .iter()
            .map(|(q, op)| Ok((QubitRef::Fixed(registry.resolve_ref(*q)?), *op)))
            .collect::<HamResult<Vec<_>>>()?;
        Ok(PauliTerm::from_ops(self.coefficient, ops))
    }
}

impl Mul for &PauliTerm {
    type Output = PauliTerm;

    fn mul(self, rhs: &PauliTerm) -> PauliTerm {
        let mut out = self.clone();
        out.coefficient *= rhs.coefficient;
        for (qubit, op) in &rhs.ops {
            out.apply(*qubit, *op);
        }
        out
    }
}

impl Mul for PauliTerm {
    type Output = PauliTerm;

    fn mul(self, rhs: PauliTerm) -> PauliTerm {
        &self * &rhs
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.coefficient;
        if c.im == 0.0 {
            write!(f, "{:+.4}", c.re)?;
        } else {
            write!(f, "({:.4}{:+.4}i)", c.re, c.im)?;
        }

        if self.ops.is_empty() {
            write!(f, " I")?;
        } else {
            for (qubit, op) in &self.ops {
                write!(f, " {}[{}]", op, qubit.label())?;
            }
        }
        Ok(())
    }
}

/// A Hamiltonian represented as a sum of Pauli terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PauliSum {
    /// The terms in the Hamiltonian.
    terms: Vec<PauliTerm>,
}

impl PauliSum {
    /// Create a new Hamiltonian from a list of terms.
    pub fn new(terms: Vec<PauliTerm>) -> Self {
        Self { terms }
    }

    /// Create an empty Hamiltonian.
    pub fn empty() -> Self {
        Self { terms: vec![] }
    }

    /// Add a term to the Hamiltonian.
    pub fn push(&mut self, term: PauliTerm) {
        self.terms.push(term);
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Get the number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Check if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Distinct qubits referenced by any term, in first-seen order.
    pub fn qubits(&self) -> Vec<QubitRef> {
        let mut seen = FxHashSet::default();
        self.terms
            .iter()
            .flat_map(|t| t.qubits())
            .filter(|q| seen.insert(*q))
            .collect()
    }

    /// Number of distinct qubits referenced.
    pub fn num_qubits(&self) -> usize {
        self.qubits().len()
    }

    /// Single-qubit terms.
    pub fn bias_terms(&self) -> impl Iterator<Item = &PauliTerm> {
        self.terms.iter().filter(|t| t.arity() == 1)
    }

    /// Two-qubit terms.
    pub fn coupling_terms(&self) -> impl Iterator<Item = &PauliTerm> {
        self.terms.iter().filter(|t| t.arity() == 2)
    }

    /// Sum of the identity coefficients.
    pub fn constant(&self) -> Complex64 {
        self.terms
            .iter()
            .filter(|t| t.is_identity())
            .map(|t| t.coefficient)
            .sum()
    }

    /// Return a copy with placeholders replaced by their bound qubits.
    pub fn address_qubits(&self, registry: &PlaceholderRegistry) -> HamResult<PauliSum> {
        self.terms
            .iter()
            .map(|t| t.address_qubits(registry))
            .collect()
    }
}

impl FromIterator<PauliTerm> for PauliSum {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hamiltonian ({} terms, {} qubits):",
            self.num_terms(),
            self.num_qubits()
        )?;
        for term in &self.terms {
            writeln!(f, "  {term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaoakit_ir::QubitId;

    #[test]
    fn test_zz_product() {
        let t = PauliTerm::z(0u32, 0.5) * PauliTerm::z(1u32, 1.0);
        assert_eq!(t.arity(), 2);
        assert_eq!(t.coefficient, Complex64::new(0.5, 0.0));
        assert_eq!(t, PauliTerm::zz(0u32, 1u32, 0.5));
    }

    #[test]
    fn test_same_qubit_collapses_to_identity() {
        let t = PauliTerm::zz(3u32, 3u32, 0.5);
        assert!(t.is_identity());
        assert_eq!(t.coefficient, Complex64::new(0.5, 0.0));
    }

    #[test]
    fn test_pauli_phases() {
        let xy = PauliTerm::single(PauliOp::X, 0u32, 1.0) * PauliTerm::single(PauliOp::Y, 0u32, 1.0);
        assert_eq!(xy.ops(), &[(QubitRef::from(0u32), PauliOp::Z)]);
        assert_eq!(xy.coefficient, Complex64::new(0.0, 1.0));

        let yx = PauliTerm::single(PauliOp::Y, 0u32, 1.0) * PauliTerm::single(PauliOp::X, 0u32, 1.0);
        assert_eq!(yx.coefficient, Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_sum_qubits_first_seen() {
        let h = PauliSum::new(vec![
            PauliTerm::zz(2u32, 0u32, 1.0),
            PauliTerm::z(0u32, 0.3),
            PauliTerm::z(5u32, 0.1),
        ]);
        assert_eq!(
            h.qubits(),
            vec![QubitRef::from(2u32), QubitRef::from(0u32), QubitRef::from(5u32)]
        );
        assert_eq!(h.bias_terms().count(), 2);
        assert_eq!(h.coupling_terms().count(), 1);
    }

    #[test]
    fn test_constant() {
        let h = PauliSum::new(vec![PauliTerm::identity(-1.0), PauliTerm::zz(0u32, 0u32, 0.5)]);
        assert_eq!(h.constant(), Complex64::new(-0.5, 0.0));
    }

    #[test]
    fn test_address_qubits() {
        let mut reg = PlaceholderRegistry::new();
        let ph = reg.allocate();
        let h = PauliSum::new(vec![PauliTerm::zz(ph, 0u32, 1.0)]);
        reg.bind(ph, QubitId(1)).unwrap();
        let addressed = h.address_qubits(&reg).unwrap();
        assert_eq!(addressed.terms()[0], PauliTerm::zz(1u32, 0u32, 1.0));
    }

    #[test]
    fn test_display() {
        let t = PauliTerm::zz(0u32, 1u32, 0.5);
        assert_eq!(t.to_string(), "+0.5000 Z[0] Z[1]");
        let id = PauliTerm::identity(-1.0);
        assert_eq!(id.to_string(), "-1.0000 I");
    }

    #[test]
    fn test_deserialize_merges_repeated_qubits() {
        let h: PauliSum = serde_json::from_str(
            r#"{"terms":[{"coefficient":[0.5,0.0],"ops":[[0,"Z"],[0,"Z"]]}]}"#,
        )
        .unwrap();
        let t = &h.terms()[0];
        assert!(t.is_identity());
        assert_eq!(t.arity(), 0);
        assert_eq!(t.coefficient, Complex64::new(0.5, 0.0));
    }

    #[test]
    fn test_deserialize_drops_identity_ops() {
        let t: PauliTerm =
            serde_json::from_str(r#"{"coefficient":[0.5,0.0],"ops":[[3,"I"],[1,"Z"]]}"#).unwrap();
        assert_eq!(t, PauliTerm::z(1u32, 0.5));
    }

    #[test]
    fn test_serde_roundtrip_keeps_term() {
        let t = PauliTerm::zz(0u32, 2u32, -1.5);
        let back: PauliTerm = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }
}
