//! Persistence gateway: one slot holding the whole serialized state document.

pub mod json_backend;
pub mod memory;

use crate::{
    core::migration::{self, LoadReport},
    domain::AppState,
    errors::Result,
};

/// A single key-value slot for the serialized document.
///
/// Saving always overwrites the whole document; there are no partial updates.
pub trait StateStore: Send + Sync {
    /// Returns the stored text, or `None` on first run.
    fn load_raw(&self) -> Result<Option<String>>;
    fn save_raw(&self, document: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Reads the slot and runs the migration protocol over it.
///
/// Only I/O failures are errors; unusable content yields the default state.
pub fn load_state(store: &dyn StateStore) -> Result<LoadReport> {
    let raw = store.load_raw()?;
    Ok(migration::load_state(raw.as_deref()))
}

pub fn save_state(store: &dyn StateStore, state: &AppState) -> Result<()> {
    let json = serde_json::to_string(state)?;
    store.save_raw(&json)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
