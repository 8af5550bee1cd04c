//! Placeholder allocation and binding.

use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::qubit::{QubitId, QubitPlaceholder, QubitRef};

/// Issues placeholders and tracks their binding to concrete qubits.
///
/// Handles are allocated sequentially starting at 0, so the `n`-th
/// placeholder of a registry always has handle `n`.
///
/// Handles are unique within one registry only. Every registry starts again
/// at 0, so the first placeholder of any two registries is the same value.
/// Build every placeholder of a program or Hamiltonian from one registry.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRegistry {
    next_id: u32,
    bindings: FxHashMap<QubitPlaceholder, QubitId>,
    owners: FxHashMap<QubitId, QubitPlaceholder>,
}

impl PlaceholderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh placeholder.
    pub fn allocate(&mut self) -> QubitPlaceholder {
        let ph = QubitPlaceholder::new(self.next_id);
        self.next_id += 1;
        ph
    }

    /// Allocate `n` fresh placeholders.
    pub fn allocate_many(&mut self, n: u32) -> Vec<QubitPlaceholder> {
        (0..n).map(|_| self.allocate()).collect()
    }

    /// Number of placeholders issued so far.
    pub fn len(&self) -> usize {
        self.next_id as usize
    }

    /// Check if no placeholder has been issued.
    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    /// Check if the placeholder was issued by this registry.
    pub fn contains(&self, ph: QubitPlaceholder) -> bool {
        ph.index() < self.next_id
    }

    /// All issued placeholders, in allocation order.
    pub fn placeholders(&self) -> impl Iterator<Item = QubitPlaceholder> + '_ {
        (0..self.next_id).map(QubitPlaceholder::new)
    }

    /// Bind a placeholder to a concrete qubit.
    ///
    /// Rebinding a placeholder releases its previous qubit.
    pub fn bind(&mut self, ph: QubitPlaceholder, qubit: QubitId) -> IrResult<()> {
        if !self.contains(ph) {
            return Err(IrError::UnknownPlaceholder(ph));
        }
        if let Some(&existing) = self.owners.get(&qubit) {
            if existing != ph {
                return Err(IrError::DuplicateBinding { qubit, existing });
            }
            return Ok(());
        }
        if let Some(previous) = self.bindings.insert(ph, qubit) {
            self.owners.remove(&previous);
        }
        self.owners.insert(qubit, ph);
        Ok(())
    }

    /// Bind every unbound placeholder to the lowest free qubit index, in
    /// allocation order.
    pub fn assign_sequential(&mut self) {
        let mut candidate = 0u32;
        for ph in (0..self.next_id).map(QubitPlaceholder::new) {
            if self.bindings.contains_key(&ph) {
                continue;
            }
            while self.owners.contains_key(&QubitId(candidate)) {
                candidate += 1;
            }
            self.bindings.insert(ph, QubitId(candidate));
            self.owners.insert(QubitId(candidate), ph);
        }
    }

    /// The qubit bound to a placeholder, if any.
    pub fn resolve(&self, ph: QubitPlaceholder) -> Option<QubitId> {
        self.bindings.get(&ph).copied()
    }

    /// Resolve any qubit reference to a concrete qubit.
    pub fn resolve_ref(&self, qubit: QubitRef) -> IrResult<QubitId> {
        match qubit {
            QubitRef::Fixed(id) => Ok(id),
            QubitRef::Placeholder(ph) => {
                if !self.contains(ph) {
                    return Err(IrError::UnknownPlaceholder(ph));
                }
                self.resolve(ph).ok_or(IrError::UnboundPlaceholder(ph))
            }
        }
    }
}
