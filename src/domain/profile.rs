//! Root aggregate for a single business owner's configuration and ledger.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{allocation::Allocations, commitment::Commitment, transaction::Transaction};

/// Default percentage-of-revenue tax rate offered to new profiles.
pub const DEFAULT_TAX_RATE: f64 = 6.0;

/// Company tax classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CompanyType {
    /// Flat-rate micro-entrepreneur tier.
    #[serde(rename = "MEI")]
    MicroEntrepreneur,
    #[serde(rename = "PJ_SIMPLES")]
    SimplifiedCompany,
    #[serde(rename = "AUTONOMO")]
    SelfEmployed,
}

impl CompanyType {
    pub fn is_flat_rate(self) -> bool {
        matches!(self, CompanyType::MicroEntrepreneur)
    }
}

/// Activity category selecting the flat-rate tier's fixed monthly levy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlatRateCategory {
    #[serde(rename = "COMMERCE")]
    Commerce,
    #[serde(rename = "SERVICE")]
    Service,
    #[serde(rename = "MIXED")]
    Mixed,
    #[serde(rename = "TRUCKER")]
    Trucker,
}

impl FlatRateCategory {
    /// Monthly levy for the category; unknown categories fall back to `Service`.
    pub fn monthly_levy(category: Option<FlatRateCategory>) -> f64 {
        match category {
            Some(FlatRateCategory::Commerce) => 82.35,
            Some(FlatRateCategory::Service) => 86.35,
            Some(FlatRateCategory::Mixed) => 87.35,
            Some(FlatRateCategory::Trucker) => 194.52,
            None => 86.35,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SalaryMethod {
    /// Fixed monthly stipend.
    #[serde(rename = "FIXED")]
    Fixed,
    /// Discretionary withdrawal of whatever profit is left.
    #[serde(rename = "PROFIT")]
    Profit,
}

/// Tracking features unlocked so far. Serialized as the integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaturityLevel {
    #[default]
    Basic,
    Allocations,
    Structure,
}

impl MaturityLevel {
    pub fn unlocks_allocations(self) -> bool {
        self >= MaturityLevel::Allocations
    }

    pub fn unlocks_commitments(self) -> bool {
        self == MaturityLevel::Structure
    }
}

impl TryFrom<u8> for MaturityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MaturityLevel::Basic),
            2 => Ok(MaturityLevel::Allocations),
            3 => Ok(MaturityLevel::Structure),
            other => Err(format!("maturity level {other} is out of range 1..=3")),
        }
    }
}

impl From<MaturityLevel> for u8 {
    fn from(level: MaturityLevel) -> u8 {
        match level {
            MaturityLevel::Basic => 1,
            MaturityLevel::Allocations => 2,
            MaturityLevel::Structure => 3,
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", u8::from(*self))
    }
}

/// Tax configuration replaced wholesale by settings updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxConfig {
    pub company_type: Option<CompanyType>,
    pub flat_rate_category: Option<FlatRateCategory>,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryPolicy {
    pub method: Option<SalaryMethod>,
    /// Stipend amount; only meaningful for [`SalaryMethod::Fixed`].
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub company_type: Option<CompanyType>,
    /// Unrecognized categories load as `None` and pay the fallback levy.
    #[serde(
        rename = "meiCategory",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_category"
    )]
    pub flat_rate_category: Option<FlatRateCategory>,
    /// Reference revenue captured during setup; ongoing math uses ledger income.
    pub monthly_revenue: f64,
    pub salary_method: Option<SalaryMethod>,
    pub salary_value: f64,
    pub tax_rate: f64,
    #[serde(rename = "appLevel")]
    pub maturity_level: MaturityLevel,
    pub allocations: Allocations,
    /// Accumulated reserve stock, separate from the flow-derived ledger sums.
    #[serde(rename = "currentReserveBalance")]
    pub opening_reserve_balance: f64,
    pub commitments: Vec<Commitment>,
    pub transactions: Vec<Transaction>,
    pub current_month_open: bool,
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<FlatRateCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            company_type: None,
            flat_rate_category: None,
            monthly_revenue: 0.0,
            salary_method: None,
            salary_value: 0.0,
            tax_rate: DEFAULT_TAX_RATE,
            maturity_level: MaturityLevel::Basic,
            allocations: Allocations::default(),
            opening_reserve_balance: 0.0,
            commitments: Vec::new(),
            transactions: Vec::new(),
            current_month_open: true,
        }
    }
}

impl Profile {
    pub fn tax_config(&self) -> TaxConfig {
        TaxConfig {
            company_type: self.company_type,
            flat_rate_category: self.flat_rate_category,
            rate: self.tax_rate,
        }
    }

    pub fn set_tax_config(&mut self, config: TaxConfig) {
        self.company_type = config.company_type;
        self.flat_rate_category = config.flat_rate_category;
        self.tax_rate = config.rate;
    }

    pub fn salary_policy(&self) -> SalaryPolicy {
        SalaryPolicy {
            method: self.salary_method,
            amount: self.salary_value,
        }
    }

    pub fn set_salary_policy(&mut self, policy: SalaryPolicy) {
        self.salary_method = policy.method;
        self.salary_value = match policy.method {
            Some(SalaryMethod::Profit) => 0.0,
            _ => policy.amount,
        };
    }
}

/// Persisted document root: the profile plus the onboarding flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub user_profile: Profile,
    pub is_setup_complete: bool,
}

impl AppState {
    pub fn new(user_profile: Profile, is_setup_complete: bool) -> Self {
        Self {
            user_profile,
            is_setup_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::AllocationRule;

    #[test]
    fn default_profile_matches_documented_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.maturity_level, MaturityLevel::Basic);
        assert!(profile.transactions.is_empty());
        assert!(profile.commitments.is_empty());
        assert_eq!(profile.allocations.reserve, AllocationRule::disabled());
        assert_eq!(profile.allocations.growth, AllocationRule::disabled());
        assert_eq!(profile.tax_rate, DEFAULT_TAX_RATE);
        assert!(profile.current_month_open);
    }

    #[test]
    fn serializes_with_document_field_names() {
        let value = serde_json::to_value(AppState::default()).unwrap();
        let profile = &value["userProfile"];
        assert_eq!(profile["appLevel"], 1);
        assert_eq!(profile["taxRate"], 6.0);
        assert_eq!(profile["currentReserveBalance"], 0.0);
        assert_eq!(profile["allocations"]["reserve"]["type"], "PERCENTAGE");
        assert!(profile["companyType"].is_null());
        assert_eq!(value["isSetupComplete"], false);
    }

    #[test]
    fn maturity_level_rejects_out_of_range_values() {
        assert_eq!(MaturityLevel::try_from(3), Ok(MaturityLevel::Structure));
        assert!(MaturityLevel::try_from(0).is_err());
        assert!(serde_json::from_str::<MaturityLevel>("4").is_err());
    }

    #[test]
    fn maturity_gates_features() {
        assert!(!MaturityLevel::Basic.unlocks_allocations());
        assert!(MaturityLevel::Allocations.unlocks_allocations());
        assert!(!MaturityLevel::Allocations.unlocks_commitments());
        assert!(MaturityLevel::Structure.unlocks_commitments());
    }

    #[test]
    fn profit_salary_policy_clears_stipend() {
        let mut profile = Profile::default();
        profile.set_salary_policy(SalaryPolicy {
            method: Some(SalaryMethod::Profit),
            amount: 1500.0,
        });
        assert_eq!(profile.salary_value, 0.0);
    }

    #[test]
    fn unknown_category_loads_as_fallback() {
        let profile: Profile = serde_json::from_str(
            r#"{"companyType": "MEI", "meiCategory": "OTHER", "transactions": []}"#,
        )
        .unwrap();
        assert_eq!(profile.flat_rate_category, None);
        assert_eq!(FlatRateCategory::monthly_levy(profile.flat_rate_category), 86.35);

        let known: Profile = serde_json::from_str(r#"{"meiCategory": "TRUCKER"}"#).unwrap();
        assert_eq!(known.flat_rate_category, Some(FlatRateCategory::Trucker));
        let null: Profile = serde_json::from_str(r#"{"meiCategory": null}"#).unwrap();
        assert_eq!(null.flat_rate_category, None);
    }

    #[test]
    fn flat_rate_levy_falls_back_to_service() {
        assert_eq!(FlatRateCategory::monthly_levy(None), 86.35);
        assert_eq!(
            FlatRateCategory::monthly_levy(Some(FlatRateCategory::Trucker)),
            194.52
        );
    }
}
