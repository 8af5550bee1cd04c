//! Flat hyperparameter bundles.
//!
//! The bundle `(nqubits, singles, biases, pairs, couplings)` is the
//! intermediate form used to move between [`PauliSum`] and
//! [`WeightedGraph`](crate::graph::WeightedGraph).

use serde::{Deserialize, Serialize};
use tracing::warn;

use qaoakit_ir::QubitRef;

use crate::error::{HamError, HamResult};
use crate::pauli::PauliSum;

/// Problem hyperparameters: biased qubits and coupled pairs with their weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HyperParams {
    /// Number of qubits.
    pub nqubits: usize,
    /// Qubits carrying a bias term.
    pub singles: Vec<QubitRef>,
    /// Bias values, parallel to `singles`.
    pub biases: Vec<f64>,
    /// Coupled qubit pairs.
    pub pairs: Vec<(QubitRef, QubitRef)>,
    /// Coupling values, parallel to `pairs`.
    pub couplings: Vec<f64>,
}

impl HyperParams {
    /// Create a bundle from parallel lists.
    pub fn new(
        nqubits: usize,
        singles: Vec<QubitRef>,
        biases: Vec<f64>,
        pairs: Vec<(QubitRef, QubitRef)>,
        couplings: Vec<f64>,
    ) -> HamResult<Self> {
        let params = Self {
            nqubits,
            singles,
            biases,
            pairs,
            couplings,
        };
        params.validate()?;
        Ok(params)
    }

    /// Create an empty bundle for `nqubits` qubits.
    pub fn empty(nqubits: usize) -> Self {
        Self {
            nqubits,
            ..Self::default()
        }
    }

    /// Add a bias term.
    #[must_use]
    pub fn with_bias(mut self, qubit: impl Into<QubitRef>, bias: f64) -> Self {
        self.singles.push(qubit.into());
        self.biases.push(bias);
        self
    }

    /// Add a coupling term.
    #[must_use]
    pub fn with_coupling(
        mut self,
        a: impl Into<QubitRef>,
        b: impl Into<QubitRef>,
        coupling: f64,
    ) -> Self {
        self.pairs.push((a.into(), b.into()));
        self.couplings.push(coupling);
        self
    }

    /// Check that the parallel lists have matching lengths.
    pub fn validate(&self) -> HamResult<()> {
        if self.biases.len() != self.singles.len() {
            return Err(HamError::LengthMismatch {
                what: "biases",
                expected: self.singles.len(),
                got: self.biases.len(),
            });
        }
        if self.couplings.len() != self.pairs.len() {
            return Err(HamError::LengthMismatch {
                what: "couplings",
                expected: self.pairs.len(),
                got: self.couplings.len(),
            });
        }
        Ok(())
    }

    /// Concrete indices that are `>= nqubits`.
    ///
    /// These are accepted by every conversion; callers that want a strict
    /// contract can reject a non-empty result themselves.
    pub fn out_of_range(&self) -> Vec<QubitRef> {
        let limit = self.nqubits;
        let mut out: Vec<QubitRef> = self
            .singles
            .iter()
            .chain(self.pairs.iter().flat_map(|(a, b)| [a, b]))
            .filter(|q| q.as_fixed().is_some_and(|id| id.0 as usize >= limit))
            .copied()
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub(crate) fn warn_out_of_range(&self) {
        let out = self.out_of_range();
        if !out.is_empty() {
            warn!(
                nqubits = self.nqubits,
                indices = ?out,
                "hyperparameters reference qubits outside the register"
            );
        }
    }

    /// Extract the bundle from a Hamiltonian.
    ///
    /// `nqubits` is the number of distinct qubits referenced. Coefficients
    /// keep their real part only. Terms touching anything other than one or
    /// two qubits are rejected.
    pub fn from_hamiltonian(hamiltonian: &PauliSum) -> HamResult<Self> {
        let mut params = Self::empty(hamiltonian.num_qubits());
        for term in hamiltonian.terms() {
            let qubits: Vec<QubitRef> = term.qubits().collect();
            match qubits.as_slice() {
                [q] => {
                    params.singles.push(*q);
                    params.biases.push(term.coefficient.re);
                }
                [a, b] => {
                    params.pairs.push((*a, *b));
                    params.couplings.push(term.coefficient.re);
                }
                _ => {
                    return Err(HamError::InvalidArity {
                        arity: qubits.len(),
                        term: term.to_string(),
                    });
                }
            }
        }
        Ok(params)
    }
}
