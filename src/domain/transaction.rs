use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_entity_id, Amounted, Identifiable};

/// Bucket a ledger entry contributes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "TAX")]
    TaxPayment,
    #[serde(rename = "SALARY")]
    SalaryWithdrawal,
    #[serde(rename = "RESERVE")]
    ReserveAllocation,
    #[serde(rename = "GROWTH")]
    GrowthAllocation,
    #[serde(rename = "COST")]
    FixedCost,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 6] = [
        TransactionKind::Income,
        TransactionKind::TaxPayment,
        TransactionKind::SalaryWithdrawal,
        TransactionKind::ReserveAllocation,
        TransactionKind::GrowthAllocation,
        TransactionKind::FixedCost,
    ];
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::TaxPayment => "tax",
            TransactionKind::SalaryWithdrawal => "salary",
            TransactionKind::ReserveAllocation => "reserve",
            TransactionKind::GrowthAllocation => "growth",
            TransactionKind::FixedCost => "fixed cost",
        };
        f.write_str(label)
    }
}

/// Immutable ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "value")]
    pub amount: f64,
    #[serde(rename = "date")]
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit link to the commitment a fixed-cost payment settles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commitment_id: Option<String>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: f64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: new_entity_id(),
            kind,
            amount,
            occurred_at,
            description: None,
            commitment_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn for_commitment(mut self, commitment_id: impl Into<String>) -> Self {
        self.commitment_id = Some(commitment_id.into());
        self
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}
