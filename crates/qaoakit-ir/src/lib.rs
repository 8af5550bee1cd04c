//! qaoakit qubit addressing and gate programs
//!
//! This crate provides the small IR shared by the qaoakit helpers:
//!
//! - **Qubits**: [`QubitId`] for concrete indices, [`QubitPlaceholder`] for
//!   qubits not yet assigned, and [`QubitRef`] for either
//! - **Registry**: [`PlaceholderRegistry`] issues sequential placeholder
//!   handles and binds them to concrete qubits
//! - **Programs**: [`Program`], an ordered list of [`Instruction`]s
//!
//! # Example: addressing a program
//!
//! ```rust
//! use qaoakit_ir::{PlaceholderRegistry, Program, QubitId};
//!
//! let mut registry = PlaceholderRegistry::new();
//! let a = registry.allocate();
//! let b = registry.allocate();
//!
//! let mut program = Program::new("flip");
//! program.x(a).unwrap().x(b).unwrap();
//!
//! registry.bind(b, QubitId(0)).unwrap();
//! registry.assign_sequential();
//!
//! let addressed = program.address_qubits(&registry).unwrap();
//! assert!(!addressed.has_placeholders());
//! ```

pub mod error;
pub mod gate;
pub mod instruction;
pub mod program;
pub mod qubit;
pub mod registry;

pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::Instruction;
pub use program::Program;
pub use qubit::{QubitId, QubitPlaceholder, QubitRef};
pub use registry::PlaceholderRegistry;
