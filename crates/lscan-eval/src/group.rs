use std::sync::Arc;

use lscan_arith::{DirichletCharacter, DirichletGroup};
use lscan_core::LscanError;

/// Read-only handle on the characters of one modulus.
///
/// Built once per request and shared across workers through an [`Arc`];
/// nothing inside it is mutated after construction.
#[derive(Debug, Clone)]
pub struct CharacterGroup {
    inner: DirichletGroup,
}

impl CharacterGroup {
    /// Builds the group for modulus `q`, failing with `InvalidModulus` for `q < 1`.
    pub fn new(modulus: u64) -> Result<Self, LscanError> {
        Ok(Self {
            inner: DirichletGroup::new(modulus)?,
        })
    }

    /// Same as [`CharacterGroup::new`] but ready to hand to worker threads.
    pub fn shared(modulus: u64) -> Result<Arc<Self>, LscanError> {
        Self::new(modulus).map(Arc::new)
    }

    /// Modulus `q`.
    pub fn modulus(&self) -> u64 {
        self.inner.modulus()
    }

    /// Number of characters, `phi(q)`.
    pub fn size(&self) -> u64 {
        self.inner.size()
    }

    /// Fails with `InvalidCharacterIndex` unless `index < phi(q)`.
    pub fn validate_index(&self, index: u64) -> Result<u64, LscanError> {
        if self.inner.contains(index) {
            Ok(index)
        } else {
            Err(LscanError::invalid_character_index(
                self.modulus(),
                index,
                self.size(),
            ))
        }
    }

    /// Resolves a zero-based index to a character handle.
    pub fn character(&self, index: u64) -> Result<DirichletCharacter<'_>, LscanError> {
        self.inner.character(index)
    }

    /// Underlying backend group.
    pub fn backend(&self) -> &DirichletGroup {
        &self.inner
    }
}
