//! CLI command implementations.

pub mod common;
pub mod experiment;
pub mod graph;
pub mod prepare;
pub mod random;
pub mod ring;
