use serde::{Deserialize, Serialize};

use crate::domain::common::{new_entity_id, Amounted, Identifiable, NamedEntity};

/// Display grouping for recurring commitments; does not affect totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CommitmentKind {
    #[serde(rename = "PEOPLE")]
    Personnel,
    #[serde(rename = "SERVICE")]
    Service,
    #[serde(rename = "OBLIGATION")]
    Obligation,
}

/// A recurring monthly fixed cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commitment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommitmentKind,
    #[serde(rename = "value")]
    pub amount: f64,
}

impl Commitment {
    pub fn new(name: impl Into<String>, kind: CommitmentKind, amount: f64) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            kind,
            amount,
        }
    }
}

impl Identifiable for Commitment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Commitment {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Commitment {
    fn amount(&self) -> f64 {
        self.amount
    }
}
