//! Upgrades persisted documents written by older releases.
//!
//! Generations are detected structurally (by which fields are missing or null),
//! not by a version tag. Each repair touches a disjoint set of fields, so repairs are
//! order-insensitive and running the whole pass twice equals running it once.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::domain::{AllocationRule, AppState};

const PROFILE_KEY: &str = "userProfile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStep {
    /// `allocations` absent: reset maturity to level 1 and install disabled rules.
    InstallAllocations,
    /// `commitments` absent: empty list and zero opening reserve stock.
    InstallCommitments,
    /// `transactions` absent: empty ledger and an open period.
    InstallTransactions,
}

impl MigrationStep {
    pub const ALL: [MigrationStep; 3] = [
        MigrationStep::InstallAllocations,
        MigrationStep::InstallCommitments,
        MigrationStep::InstallTransactions,
    ];

    fn trigger_field(self) -> &'static str {
        match self {
            MigrationStep::InstallAllocations => "allocations",
            MigrationStep::InstallCommitments => "commitments",
            MigrationStep::InstallTransactions => "transactions",
        }
    }

    fn is_needed(self, profile: &Map<String, Value>) -> bool {
        profile
            .get(self.trigger_field())
            .map_or(true, Value::is_null)
    }

    fn repair(self, profile: &mut Map<String, Value>) {
        match self {
            MigrationStep::InstallAllocations => {
                let disabled = AllocationRule::disabled();
                profile.insert("appLevel".into(), json!(1));
                profile.insert(
                    "allocations".into(),
                    json!({ "reserve": disabled, "growth": disabled }),
                );
            }
            MigrationStep::InstallCommitments => {
                profile.insert("commitments".into(), json!([]));
                profile.insert("currentReserveBalance".into(), json!(0));
            }
            MigrationStep::InstallTransactions => {
                profile.insert("transactions".into(), json!([]));
                profile.insert("currentMonthOpen".into(), json!(true));
            }
        }
    }
}

impl fmt::Display for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MigrationStep::InstallAllocations => "installed disabled allocation rules",
            MigrationStep::InstallCommitments => "installed empty commitments",
            MigrationStep::InstallTransactions => "installed empty ledger",
        };
        f.write_str(label)
    }
}

/// Why a document could not be migrated and the default state was used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Missing,
    InvalidJson(String),
    NotAnObject,
    MissingProfile,
    InvalidShape(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Missing => f.write_str("no stored state"),
            FallbackReason::InvalidJson(err) => write!(f, "stored state is not valid JSON: {err}"),
            FallbackReason::NotAnObject => f.write_str("stored state is not a JSON object"),
            FallbackReason::MissingProfile => f.write_str("stored state has no profile object"),
            FallbackReason::InvalidShape(err) => write!(f, "stored profile is malformed: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    Migrated {
        state: AppState,
        steps: Vec<MigrationStep>,
    },
    Fallback(FallbackReason),
}

/// Applies every repair whose trigger field is absent or null. Idempotent.
pub fn migrate_profile(profile: &mut Map<String, Value>) -> Vec<MigrationStep> {
    let mut applied = Vec::new();
    for step in MigrationStep::ALL {
        if step.is_needed(profile) {
            step.repair(profile);
            applied.push(step);
        }
    }
    applied
}

/// Normalizes a raw document in place. Returns `None` when it has no usable profile.
pub fn migrate_value(document: &mut Value) -> Option<Vec<MigrationStep>> {
    let profile = document.get_mut(PROFILE_KEY)?.as_object_mut()?;
    Some(migrate_profile(profile))
}

/// Migrates a parsed document and decodes it into the current [`AppState`].
pub fn migrate_document(mut document: Value) -> MigrationOutcome {
    if !document.is_object() {
        return MigrationOutcome::Fallback(FallbackReason::NotAnObject);
    }
    let Some(steps) = migrate_value(&mut document) else {
        return MigrationOutcome::Fallback(FallbackReason::MissingProfile);
    };
    match serde_json::from_value::<AppState>(document) {
        Ok(state) => MigrationOutcome::Migrated { state, steps },
        Err(err) => MigrationOutcome::Fallback(FallbackReason::InvalidShape(err.to_string())),
    }
}

/// Result of loading the stored document at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub state: AppState,
    pub migrations: Vec<MigrationStep>,
    pub fallback: Option<FallbackReason>,
}

impl LoadReport {
    fn fallback(reason: FallbackReason) -> Self {
        match &reason {
            FallbackReason::Missing => tracing::debug!("no stored state; starting fresh"),
            other => tracing::warn!(reason = %other, "discarding stored state"),
        }
        Self {
            state: AppState::default(),
            migrations: Vec::new(),
            fallback: Some(reason),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Parses, migrates and decodes the stored text. Never fails: unusable input
/// (including first run) yields the default state.
pub fn load_state(raw: Option<&str>) -> LoadReport {
    let Some(raw) = raw else {
        return LoadReport::fallback(FallbackReason::Missing);
    };
    let document: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => return LoadReport::fallback(FallbackReason::InvalidJson(err.to_string())),
    };
    match migrate_document(document) {
        MigrationOutcome::Migrated { state, steps } => {
            for step in &steps {
                tracing::info!(step = %step, "migrated stored profile");
            }
            LoadReport {
                state,
                migrations: steps,
                fallback: None,
            }
        }
        MigrationOutcome::Fallback(reason) => LoadReport::fallback(reason),
    }
}
