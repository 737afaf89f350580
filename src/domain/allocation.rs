use serde::{Deserialize, Serialize};

/// How an allocation magnitude is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AllocationBasis {
    #[default]
    #[serde(rename = "PERCENTAGE")]
    Percentage,
    #[serde(rename = "FIXED")]
    FixedAmount,
}

/// Rule governing the reserve or growth target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AllocationRule {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub basis: AllocationBasis,
    #[serde(rename = "value")]
    pub magnitude: f64,
}

impl AllocationRule {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            basis: AllocationBasis::Percentage,
            magnitude: 0.0,
        }
    }

    pub fn percentage(magnitude: f64) -> Self {
        Self {
            enabled: true,
            basis: AllocationBasis::Percentage,
            magnitude,
        }
    }

    pub fn fixed(magnitude: f64) -> Self {
        Self {
            enabled: true,
            basis: AllocationBasis::FixedAmount,
            magnitude,
        }
    }
}

impl Default for AllocationRule {
    fn default() -> Self {
        Self::disabled()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Allocations {
    pub reserve: AllocationRule,
    pub growth: AllocationRule,
}

impl Allocations {
    pub fn new(reserve: AllocationRule, growth: AllocationRule) -> Self {
        Self { reserve, growth }
    }
}
