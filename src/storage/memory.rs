use std::sync::Mutex;

use crate::errors::{CoreError, Result};

use super::StateStore;

/// In-process slot, handy for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(document.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl StateStore for MemoryStore {
    fn load_raw(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save_raw(&self, document: &str) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        *slot = Some(document.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}
