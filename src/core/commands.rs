//! Closed set of state mutations. Each command maps the current state to a new one.

use chrono::{DateTime, Utc};

use crate::core::ledger::append_entry;
use crate::domain::{
    Allocations, AppState, Commitment, MaturityLevel, Profile, SalaryPolicy, TaxConfig,
    Transaction, TransactionKind,
};

/// Answers collected by the onboarding wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingAnswers {
    pub tax: TaxConfig,
    pub salary: SalaryPolicy,
    pub monthly_revenue: f64,
}

/// Configuration installed when the owner unlocks the next maturity level.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSetup {
    /// Level 2: reserve and growth rules.
    Allocations(Allocations),
    /// Level 3: current reserve stock and recurring commitments.
    Structure {
        opening_balance: f64,
        commitments: Vec<Commitment>,
    },
}

impl LevelSetup {
    pub fn level(&self) -> MaturityLevel {
        match self {
            LevelSetup::Allocations(_) => MaturityLevel::Allocations,
            LevelSetup::Structure { .. } => MaturityLevel::Structure,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AppendTransaction {
        kind: TransactionKind,
        amount: f64,
        description: String,
        occurred_at: DateTime<Utc>,
        commitment_id: Option<String>,
    },
    SetAllocationRules(Allocations),
    SetTaxConfig(TaxConfig),
    SetSalaryPolicy(SalaryPolicy),
    SetCommitments(Vec<Commitment>),
    SetOpeningBalance(f64),
    CompleteOnboarding(OnboardingAnswers),
    AdvanceMaturity(LevelSetup),
    Reset,
}

impl Command {
    pub fn append(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Command::AppendTransaction {
            kind,
            amount,
            description: description.into(),
            occurred_at,
            commitment_id: None,
        }
    }

    /// Fixed-cost payment explicitly linked to a commitment.
    pub fn pay_commitment(
        commitment: &Commitment,
        amount: f64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Command::AppendTransaction {
            kind: TransactionKind::FixedCost,
            amount,
            description: commitment.name.clone(),
            occurred_at,
            commitment_id: Some(commitment.id.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AppendTransaction { .. } => "append_transaction",
            Command::SetAllocationRules(_) => "set_allocation_rules",
            Command::SetTaxConfig(_) => "set_tax_config",
            Command::SetSalaryPolicy(_) => "set_salary_policy",
            Command::SetCommitments(_) => "set_commitments",
            Command::SetOpeningBalance(_) => "set_opening_balance",
            Command::CompleteOnboarding(_) => "complete_onboarding",
            Command::AdvanceMaturity(_) => "advance_maturity",
            Command::Reset => "reset",
        }
    }
}

/// Applies `command` to `state`, returning the next state. `state` is left untouched.
///
/// Any amount is accepted, but non-finite figures are recorded as zero: the
/// stored document has no encoding for them.
pub fn apply(state: &AppState, command: Command) -> AppState {
    tracing::debug!(command = command.name(), "applying command");
    let mut next = state.clone();
    let profile = &mut next.user_profile;
    match command {
        Command::AppendTransaction {
            kind,
            amount,
            description,
            occurred_at,
            commitment_id,
        } => append_to_profile(profile, kind, amount, &description, occurred_at, commitment_id),
        Command::SetAllocationRules(allocations) => {
            profile.allocations = finite_allocations(allocations)
        }
        Command::SetTaxConfig(config) => profile.set_tax_config(finite_tax(config)),
        Command::SetSalaryPolicy(policy) => profile.set_salary_policy(finite_salary(policy)),
        Command::SetCommitments(commitments) => {
            profile.commitments = finite_commitments(commitments)
        }
        Command::SetOpeningBalance(balance) => profile.opening_reserve_balance = finite(balance),
        Command::CompleteOnboarding(answers) => {
            profile.set_tax_config(finite_tax(answers.tax));
            profile.set_salary_policy(finite_salary(answers.salary));
            profile.monthly_revenue = finite(answers.monthly_revenue);
            next.is_setup_complete = true;
        }
        Command::AdvanceMaturity(setup) => {
            profile.maturity_level = setup.level();
            match setup {
                LevelSetup::Allocations(allocations) => {
                    profile.allocations = finite_allocations(allocations)
                }
                LevelSetup::Structure {
                    opening_balance,
                    commitments,
                } => {
                    profile.opening_reserve_balance = finite(opening_balance);
                    profile.commitments = finite_commitments(commitments);
                }
            }
        }
        Command::Reset => next = AppState::default(),
    }
    next
}

fn append_to_profile(
    profile: &mut Profile,
    kind: TransactionKind,
    amount: f64,
    description: &str,
    occurred_at: DateTime<Utc>,
    commitment_id: Option<String>,
) {
    let amount = finite(amount);
    let mut entry = Transaction::new(kind, amount, occurred_at).with_description(description);
    entry.commitment_id = commitment_id;
    profile.transactions = append_entry(&profile.transactions, entry);
    // The reserve stock is cumulative across periods and moves with every reserve entry.
    if kind == TransactionKind::ReserveAllocation {
        profile.opening_reserve_balance += amount;
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn finite_allocations(mut allocations: Allocations) -> Allocations {
    allocations.reserve.magnitude = finite(allocations.reserve.magnitude);
    allocations.growth.magnitude = finite(allocations.growth.magnitude);
    allocations
}

fn finite_commitments(commitments: Vec<Commitment>) -> Vec<Commitment> {
    commitments
        .into_iter()
        .map(|mut commitment| {
            commitment.amount = finite(commitment.amount);
            commitment
        })
        .collect()
}

fn finite_tax(config: TaxConfig) -> TaxConfig {
    TaxConfig {
        rate: finite(config.rate),
        ..config
    }
}

fn finite_salary(policy: SalaryPolicy) -> SalaryPolicy {
    SalaryPolicy {
        amount: finite(policy.amount),
        ..policy
    }
}
