//! Qubit addressing: concrete indices and placeholders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete qubit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

/// A qubit that has not been assigned a concrete index yet.
///
/// Placeholders are small sequential handles issued by a
/// [`PlaceholderRegistry`](crate::PlaceholderRegistry). Two placeholders are
/// equal only if they carry the same handle, so labels derived from them are
/// stable across runs.
///
/// A handle carries no registry identity: placeholders issued by two
/// different registries compare equal and share a label when their handles
/// match. Mix placeholders from a single registry only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitPlaceholder {
    #[serde(rename = "placeholder")]
    id: u32,
}

impl QubitPlaceholder {
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }

    /// The sequential handle of this placeholder.
    #[inline]
    pub fn index(&self) -> u32 {
        self.id
    }

    /// Human-readable label, used for display purposes only.
    pub fn label(&self) -> String {
        format!("Holder {}", self.id)
    }
}

impl fmt::Display for QubitPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.label())
    }
}

/// Reference to a qubit, either concrete or a placeholder.
///
/// Serialized untagged: a concrete qubit is a bare integer, a placeholder is
/// `{"placeholder": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QubitRef {
    /// A concrete qubit index.
    Fixed(QubitId),
    /// A placeholder awaiting assignment.
    Placeholder(QubitPlaceholder),
}

impl QubitRef {
    /// Check if this reference is a placeholder.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, QubitRef::Placeholder(_))
    }

    /// The concrete qubit, if this reference is concrete.
    #[inline]
    pub fn as_fixed(&self) -> Option<QubitId> {
        match self {
            QubitRef::Fixed(id) => Some(*id),
            QubitRef::Placeholder(_) => None,
        }
    }

    /// Display label: the index for concrete qubits, `Holder n` for placeholders.
    pub fn label(&self) -> String {
        match self {
            QubitRef::Fixed(id) => id.0.to_string(),
            QubitRef::Placeholder(ph) => ph.label(),
        }
    }
}

impl fmt::Display for QubitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitRef::Fixed(id) => write!(f, "{id}"),
            QubitRef::Placeholder(ph) => write!(f, "{ph}"),
        }
    }
}

impl From<QubitId> for QubitRef {
    fn from(id: QubitId) -> Self {
        QubitRef::Fixed(id)
    }
}

impl From<QubitPlaceholder> for QubitRef {
    fn from(ph: QubitPlaceholder) -> Self {
        QubitRef::Placeholder(ph)
    }
}

impl From<u32> for QubitRef {
    fn from(id: u32) -> Self {
        QubitRef::Fixed(QubitId(id))
    }
}

impl From<usize> for QubitRef {
    fn from(id: usize) -> Self {
        QubitRef::Fixed(QubitId::from(id))
    }
}
