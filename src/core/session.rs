use crate::core::{
    commands::{self, Command},
    migration::LoadReport,
    summary::PeriodSummary,
};
use crate::domain::{AppState, Profile};
use crate::errors::Result;
use crate::storage::{self, StateStore};

/// Facade that owns the active state and writes it back after every mutation.
pub struct ProfileSession {
    state: AppState,
    store: Box<dyn StateStore>,
}

impl ProfileSession {
    /// Loads and migrates the stored document. Unusable content falls back to
    /// the default state; only I/O failures are returned as errors.
    pub fn open(store: Box<dyn StateStore>) -> Result<(Self, LoadReport)> {
        let report = storage::load_state(store.as_ref())?;
        let session = Self {
            state: report.state.clone(),
            store,
        };
        Ok((session, report))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn profile(&self) -> &Profile {
        &self.state.user_profile
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    /// Applies `command` and overwrites the stored document with the result.
    ///
    /// The in-memory state only advances once the save succeeded.
    pub fn dispatch(&mut self, command: Command) -> Result<&AppState> {
        let name = command.name();
        let next = commands::apply(&self.state, command);
        storage::save_state(self.store.as_ref(), &next)?;
        tracing::info!(command = name, "state updated");
        self.state = next;
        Ok(&self.state)
    }

    pub fn summary(&self) -> PeriodSummary {
        PeriodSummary::compute(&self.state.user_profile)
    }

    /// Erases every stored figure and starts over from the default state.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.state = commands::apply(&self.state, Command::Reset);
        tracing::info!("state reset");
        Ok(())
    }
}
