//! Prepare command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use qaoakit_ham::prepare_classical_state;

use super::common::{OutputFormat, emit};

/// Parse a bit string such as `"0110"`.
pub fn parse_bits(state: &str) -> Result<Vec<u8>> {
    let state = state.trim();
    if state.is_empty() {
        anyhow::bail!("State must contain at least one bit");
    }
    state
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => anyhow::bail!("Invalid bit '{other}' at position {i}, expected 0 or 1"),
        })
        .collect()
}

/// Execute the prepare command.
pub fn execute(state: &str, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let bits = parse_bits(state)?;
    let register: Vec<u32> = (0..bits.len() as u32).collect();
    let program = prepare_classical_state(&register, &bits)
        .context("Failed to build state preparation program")?;
    emit(&program, format, output)
}
