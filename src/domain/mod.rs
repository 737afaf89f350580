pub mod allocation;
pub mod commitment;
pub mod common;
pub mod profile;
pub mod transaction;

pub use allocation::{AllocationBasis, AllocationRule, Allocations};
pub use commitment::{Commitment, CommitmentKind};
pub use common::{Amounted, Identifiable, NamedEntity};
pub use profile::{
    AppState, CompanyType, FlatRateCategory, MaturityLevel, Profile, SalaryMethod, SalaryPolicy,
    TaxConfig,
};
pub use transaction::{Transaction, TransactionKind};
