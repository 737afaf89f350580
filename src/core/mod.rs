//! Financial core: derived metrics, ledger operations, the command reducer and
//! the load-time migration protocol.

pub mod commands;
pub mod ledger;
pub mod metrics;
pub mod migration;
pub mod session;
pub mod summary;

pub use commands::{apply, Command, LevelSetup, OnboardingAnswers};
pub use migration::{load_state, migrate_document, LoadReport, MigrationOutcome, MigrationStep};
pub use session::ProfileSession;
pub use summary::{structure_health, PeriodSummary, RunwayHealth, StructureHealth};
