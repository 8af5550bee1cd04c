//! Ring command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use qaoakit_ham::ring_of_disagrees;

use super::common::{OutputFormat, emit};

/// Execute the ring command.
pub fn execute(n: usize, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let hamiltonian = ring_of_disagrees(n).context("Failed to build ring of disagrees")?;
    emit(&hamiltonian, format, output)
}
