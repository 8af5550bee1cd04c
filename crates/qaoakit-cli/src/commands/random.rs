//! Random command implementation.

use std::path::Path;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use qaoakit_ham::random_hamiltonian;

use super::common::{OutputFormat, emit};

/// Execute the random command.
pub fn execute(n: usize, seed: Option<u64>, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "seeding random Hamiltonian");

    let mut rng = StdRng::seed_from_u64(seed);
    let hamiltonian = random_hamiltonian(n, &mut rng);
    emit(&hamiltonian, format, output)
}
