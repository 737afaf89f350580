use serde::Serialize;

use crate::core::{ledger::is_commitment_paid, metrics};
use crate::domain::{Commitment, Profile, SalaryMethod, TransactionKind};

/// Runway below this many months is flagged as a caution state.
pub const RUNWAY_CAUTION_MONTHS: f64 = 3.0;
/// Runway below this many months means the business stalls as soon as income stops.
pub const RUNWAY_DANGER_MONTHS: f64 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RunwayHealth {
    /// Company cash is negative.
    Danger,
    Caution,
    Healthy,
}

/// Diagnosis shown when the owner first maps their fixed structure.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum StructureHealth {
    Danger,
    Caution,
    Safe,
}

impl StructureHealth {
    pub fn from_runway(months: f64) -> Self {
        if months < RUNWAY_DANGER_MONTHS {
            StructureHealth::Danger
        } else if months < RUNWAY_CAUTION_MONTHS {
            StructureHealth::Caution
        } else {
            StructureHealth::Safe
        }
    }
}

/// Classifies how long `balance` covers the monthly `commitments`.
///
/// No commitments yields the runway sentinel and therefore [`StructureHealth::Safe`].
pub fn structure_health(balance: f64, commitments: &[Commitment]) -> StructureHealth {
    let months = metrics::runway_months(balance, metrics::commitments_total(commitments));
    StructureHealth::from_runway(months)
}

/// Actual totals recorded in the ledger, one per kind.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Actuals {
    pub income: f64,
    pub tax: f64,
    pub salary: f64,
    pub reserve: f64,
    pub growth: f64,
    pub fixed_costs: f64,
}

impl Actuals {
    pub fn from_ledger(profile: &Profile) -> Self {
        let ledger = &profile.transactions;
        Self {
            income: metrics::sum_by_kind(ledger, TransactionKind::Income),
            tax: metrics::sum_by_kind(ledger, TransactionKind::TaxPayment),
            salary: metrics::sum_by_kind(ledger, TransactionKind::SalaryWithdrawal),
            reserve: metrics::sum_by_kind(ledger, TransactionKind::ReserveAllocation),
            growth: metrics::sum_by_kind(ledger, TransactionKind::GrowthAllocation),
            fixed_costs: metrics::sum_by_kind(ledger, TransactionKind::FixedCost),
        }
    }

    pub fn for_kind(&self, kind: TransactionKind) -> f64 {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::TaxPayment => self.tax,
            TransactionKind::SalaryWithdrawal => self.salary,
            TransactionKind::ReserveAllocation => self.reserve,
            TransactionKind::GrowthAllocation => self.growth,
            TransactionKind::FixedCost => self.fixed_costs,
        }
    }
}

/// Targets derived from configuration and ledger income, gated by maturity level.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Targets {
    pub tax: f64,
    pub reserve: f64,
    pub growth: f64,
    pub fixed_costs: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommitmentStatus {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub paid: bool,
}

/// Every figure the dashboard shows, recomputed from scratch on each call.
///
/// "Period" is the whole ledger: nothing ever rolls over, so monthly figures
/// are all-time sums.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub actuals: Actuals,
    pub targets: Targets,
    pub safe_personal_limit: f64,
    pub operating_result: f64,
    pub total_cash: f64,
    /// Only tracked once commitments are unlocked.
    pub runway_months: Option<f64>,
    pub runway_health: RunwayHealth,
    pub commitments: Vec<CommitmentStatus>,
    salary_method: Option<SalaryMethod>,
    salary_value: f64,
}

impl PeriodSummary {
    pub fn compute(profile: &Profile) -> Self {
        let actuals = Actuals::from_ledger(profile);
        let level = profile.maturity_level;
        let income = actuals.income;

        let tax = profile.tax_config();
        let salary = profile.salary_policy();

        let targets = Targets {
            tax: metrics::tax_target(income, tax.company_type, tax.rate, tax.flat_rate_category),
            reserve: if level.unlocks_allocations() {
                metrics::allocation_target(income, &profile.allocations.reserve)
            } else {
                0.0
            },
            growth: if level.unlocks_allocations() {
                metrics::allocation_target(income, &profile.allocations.growth)
            } else {
                0.0
            },
            fixed_costs: if level.unlocks_commitments() {
                metrics::commitments_total(&profile.commitments)
            } else {
                0.0
            },
        };

        let safe_personal_limit = metrics::safe_personal_limit(
            income,
            targets.tax,
            targets.reserve,
            targets.growth,
            targets.fixed_costs,
        );
        let operating_result = metrics::operating_result(
            income,
            actuals.tax,
            actuals.salary,
            actuals.reserve,
            actuals.growth,
            actuals.fixed_costs,
        );
        let total_cash = metrics::total_cash(profile.opening_reserve_balance, operating_result);
        let runway_months = level
            .unlocks_commitments()
            .then(|| metrics::runway_months(total_cash, targets.fixed_costs));
        let runway_health = if total_cash < 0.0 {
            RunwayHealth::Danger
        } else if runway_months.is_some_and(|months| months < RUNWAY_CAUTION_MONTHS) {
            RunwayHealth::Caution
        } else {
            RunwayHealth::Healthy
        };

        let commitments = profile
            .commitments
            .iter()
            .map(|commitment| CommitmentStatus {
                id: commitment.id.clone(),
                name: commitment.name.clone(),
                amount: commitment.amount,
                paid: is_commitment_paid(&profile.transactions, commitment),
            })
            .collect();

        Self {
            actuals,
            targets,
            safe_personal_limit,
            operating_result,
            total_cash,
            runway_months,
            runway_health,
            commitments,
            salary_method: salary.method,
            salary_value: salary.amount,
        }
    }

    pub fn is_danger(&self) -> bool {
        self.total_cash < 0.0
    }

    /// Amount pre-filled in the entry form for `kind`: whatever is still missing
    /// to reach the target.
    pub fn suggested_amount(&self, kind: TransactionKind) -> f64 {
        let remaining = |target: f64, paid: f64| (target - paid).max(0.0);
        match kind {
            TransactionKind::Income => 0.0,
            TransactionKind::TaxPayment => remaining(self.targets.tax, self.actuals.tax),
            TransactionKind::ReserveAllocation => {
                remaining(self.targets.reserve, self.actuals.reserve)
            }
            TransactionKind::GrowthAllocation => {
                remaining(self.targets.growth, self.actuals.growth)
            }
            TransactionKind::FixedCost => {
                remaining(self.targets.fixed_costs, self.actuals.fixed_costs)
            }
            TransactionKind::SalaryWithdrawal => {
                let paid = self.actuals.salary;
                if self.salary_method == Some(SalaryMethod::Fixed) && paid < self.salary_value {
                    self.salary_value - paid
                } else {
                    remaining(self.safe_personal_limit, paid)
                }
            }
        }
    }

    pub fn unpaid_commitments(&self) -> impl Iterator<Item = &CommitmentStatus> {
        self.commitments.iter().filter(|status| !status.paid)
    }
}
