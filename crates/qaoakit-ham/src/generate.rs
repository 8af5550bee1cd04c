//! Hamiltonian generators: random instances and analytic formulae.

use rand::Rng;
use rand::seq::index;
use tracing::debug;

use crate::error::{HamError, HamResult};
use crate::pauli::{PauliSum, PauliTerm};

/// Create a random cost Hamiltonian, diagonal in the computational basis.
///
/// - Picks `k` uniformly from `[0, nqubits)` and gives `k` distinct qubits a
///   bias drawn uniformly from `[0, 1)`.
/// - For every pair `i < j`, flips a fair coin and on heads adds a coupling
///   drawn uniformly from `[0, 1)`.
///
/// Seeding `rng` makes the result reproducible:
/// ```rust
/// use rand::SeedableRng;
/// use qaoakit_ham::random_hamiltonian;
///
/// let mut a = rand::rngs::StdRng::seed_from_u64(7);
/// let mut b = rand::rngs::StdRng::seed_from_u64(7);
/// assert_eq!(random_hamiltonian(5, &mut a), random_hamiltonian(5, &mut b));
/// ```
pub fn random_hamiltonian<R: Rng>(nqubits: usize, rng: &mut R) -> PauliSum {
    let mut hamiltonian = PauliSum::empty();
    if nqubits == 0 {
        return hamiltonian;
    }

    let n_biases = rng.gen_range(0..nqubits);
    let bias_qubits = index::sample(rng, nqubits, n_biases);
    for qubit in bias_qubits.iter() {
        let coeff: f64 = rng.r#gen();
        hamiltonian.push(PauliTerm::z(qubit, coeff));
    }

    for i in 0..nqubits {
        for j in (i + 1)..nqubits {
            if rng.gen_bool(0.5) {
                let coeff: f64 = rng.r#gen();
                hamiltonian.push(PauliTerm::z(i, coeff) * PauliTerm::z(j, 1.0));
            }
        }
    }

    debug!(
        nqubits,
        n_biases,
        n_terms = hamiltonian.num_terms(),
        "generated random Hamiltonian"
    );
    hamiltonian
}

/// Cost Hamiltonian of the "ring of disagrees" from the QAOA paper
/// (Farhi, Goldstone, Gutmann, arXiv:1411.4028).
///
/// A coupling of 0.5 joins every pair of neighbours on a ring of `n`
/// vertices, including the wraparound pair `(n-1, 0)`. For `n = 1` that
/// pair is `(0, 0)` and the term is the constant `0.5·I`.
pub fn ring_of_disagrees(n: usize) -> HamResult<PauliSum> {
    if n == 0 {
        return Err(HamError::InvalidRingSize(n));
    }
    Ok((0..n)
        .map(|i| PauliTerm::z(i, 0.5) * PauliTerm::z((i + 1) % n, 1.0))
        .collect())
}
