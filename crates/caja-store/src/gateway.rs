//! # Persistence Gateway
//!
//! Serializes the whole [`State`] and the [`CompanyProfile`] to and from
//! their blob-store keys. Two keys total, mirroring the legacy layout:
//! one for the sales/inventory state, one for the business identity.

use caja_core::{CompanyProfile, State};

use crate::blob::BlobStore;
use crate::error::StoreError;

/// Storage key for the `{products, sales, cart}` state blob.
pub const STATE_KEY: &str = "caja_state";

/// Storage key for the company profile blob.
pub const PROFILE_KEY: &str = "caja_company";

/// The gateway between in-memory state and a [`BlobStore`].
///
/// Holds the store by value: there is exactly one writer per process
/// (single-tab, single-user model), so no sharing machinery is needed.
#[derive(Debug)]
pub struct StateGateway<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> StateGateway<S> {
    pub fn new(store: S) -> Self {
        StateGateway { store }
    }

    /// Loads the persisted state, `None` if none was ever saved.
    ///
    /// A blob that exists but fails to parse is reported as
    /// [`StoreError::Corrupt`] rather than silently replaced — losing a
    /// shop's sales history to a typo'd file is worse than an error.
    pub fn load_state(&self) -> Result<Option<State>, StoreError> {
        match self.store.load(STATE_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    /// Persists the full state blob.
    pub fn save_state(&mut self, state: &State) -> Result<(), StoreError> {
        let blob = serde_json::to_string(state)?;
        self.store.save(STATE_KEY, &blob)
    }

    /// Loads the persisted company profile, `None` if absent.
    pub fn load_profile(&self) -> Result<Option<CompanyProfile>, StoreError> {
        match self.store.load(PROFILE_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    /// Persists the company profile.
    pub fn save_profile(&mut self, profile: &CompanyProfile) -> Result<(), StoreError> {
        let blob = serde_json::to_string(profile)?;
        self.store.save(PROFILE_KEY, &blob)
    }

    /// Wipes every stored blob (factory reset).
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
