//! Derived-metrics engine.
//!
//! Every function here is pure and total: out-of-range inputs are clamped or
//! mapped to a sentinel, never rejected. Targets ("what should be set aside")
//! and actuals ("what was recorded") are deliberately separate families.

use crate::domain::{
    common::total, AllocationBasis, AllocationRule, Commitment, CompanyType, FlatRateCategory,
    Transaction, TransactionKind,
};

/// Runway reported when there are no monthly commitments to burn through.
pub const RUNWAY_SENTINEL: f64 = 99.0;

/// Sum of amounts of every transaction of `kind`.
pub fn sum_by_kind(ledger: &[Transaction], kind: TransactionKind) -> f64 {
    total(ledger.iter().filter(|txn| txn.kind == kind))
}

/// Sum of amounts of every transaction whose kind is listed in `kinds`.
pub fn sum_by_kinds(ledger: &[Transaction], kinds: &[TransactionKind]) -> f64 {
    total(ledger.iter().filter(|txn| kinds.contains(&txn.kind)))
}

/// Monthly tax target.
///
/// The flat-rate tier pays a fixed levy chosen by category and ignores both
/// `revenue` and `rate`; every other classification pays `rate` percent of revenue.
pub fn tax_target(
    revenue: f64,
    classification: Option<CompanyType>,
    rate: f64,
    category: Option<FlatRateCategory>,
) -> f64 {
    match classification {
        Some(company) if company.is_flat_rate() => FlatRateCategory::monthly_levy(category),
        _ => revenue * rate / 100.0,
    }
}

pub fn allocation_target(revenue: f64, rule: &AllocationRule) -> f64 {
    if !rule.enabled {
        return 0.0;
    }
    match rule.basis {
        AllocationBasis::FixedAmount => rule.magnitude,
        AllocationBasis::Percentage => revenue * rule.magnitude / 100.0,
    }
}

pub fn commitments_total(commitments: &[Commitment]) -> f64 {
    total(commitments)
}

/// Months of operation `cash_on_hand` covers. Negative when cash is negative.
pub fn runway_months(cash_on_hand: f64, monthly_commitments: f64) -> f64 {
    if monthly_commitments == 0.0 {
        return RUNWAY_SENTINEL;
    }
    cash_on_hand / monthly_commitments
}

/// What may be withdrawn personally once every target is covered; floored at zero.
pub fn safe_personal_limit(
    income: f64,
    tax_target: f64,
    reserve_target: f64,
    growth_target: f64,
    fixed_cost_target: f64,
) -> f64 {
    let margin = income - tax_target - reserve_target - growth_target - fixed_cost_target;
    // NaN compares false, so it also lands on zero.
    if margin > 0.0 {
        margin
    } else {
        0.0
    }
}

/// Income minus actual outflows for the period. May be negative.
pub fn operating_result(
    income: f64,
    paid_tax: f64,
    paid_salary: f64,
    paid_reserve: f64,
    paid_growth: f64,
    paid_costs: f64,
) -> f64 {
    income - (paid_tax + paid_salary + paid_reserve + paid_growth + paid_costs)
}

/// Headline company cash: the accumulated stock plus this period's flow.
pub fn total_cash(opening_reserve_balance: f64, operating_result: f64) -> f64 {
    opening_reserve_balance + operating_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommitmentKind;
    use chrono::{TimeZone, Utc};

    fn txn(kind: TransactionKind, amount: f64) -> Transaction {
        Transaction::new(kind, amount, Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap())
    }

    #[test]
    fn sum_by_kind_is_zero_for_empty_ledger() {
        for kind in TransactionKind::ALL {
            assert_eq!(sum_by_kind(&[], kind), 0.0);
        }
    }

    #[test]
    fn sum_by_kind_ignores_other_kinds() {
        let ledger = vec![
            txn(TransactionKind::Income, 1000.0),
            txn(TransactionKind::TaxPayment, 60.0),
            txn(TransactionKind::Income, 250.0),
            txn(TransactionKind::FixedCost, 40.0),
        ];
        assert_eq!(sum_by_kind(&ledger, TransactionKind::Income), 1250.0);
        assert_eq!(sum_by_kind(&ledger, TransactionKind::TaxPayment), 60.0);
        assert_eq!(sum_by_kind(&ledger, TransactionKind::GrowthAllocation), 0.0);
        assert_eq!(
            sum_by_kinds(
                &ledger,
                &[TransactionKind::TaxPayment, TransactionKind::FixedCost]
            ),
            100.0
        );
    }

    #[test]
    fn flat_rate_tax_ignores_revenue_and_rate() {
        let target = tax_target(
            10_000.0,
            Some(CompanyType::MicroEntrepreneur),
            20.0,
            Some(FlatRateCategory::Service),
        );
        assert_eq!(target, 86.35);
        assert_eq!(
            tax_target(0.0, Some(CompanyType::MicroEntrepreneur), 0.0, None),
            86.35
        );
        assert_eq!(
            tax_target(
                5.0,
                Some(CompanyType::MicroEntrepreneur),
                6.0,
                Some(FlatRateCategory::Commerce)
            ),
            82.35
        );
    }

    #[test]
    fn percentage_tax_scales_with_revenue() {
        assert_eq!(
            tax_target(10_000.0, Some(CompanyType::SimplifiedCompany), 6.0, None),
            600.0
        );
        // An unset classification is taxed by rate as well.
        assert_eq!(tax_target(2000.0, None, 10.0, None), 200.0);
    }

    #[test]
    fn allocation_target_follows_rule() {
        assert_eq!(allocation_target(5000.0, &AllocationRule::percentage(10.0)), 500.0);
        assert_eq!(allocation_target(5000.0, &AllocationRule::fixed(750.0)), 750.0);
        assert_eq!(allocation_target(0.0, &AllocationRule::fixed(750.0)), 750.0);
    }

    #[test]
    fn disabled_allocation_is_always_zero() {
        for (revenue, magnitude) in [(0.0, 0.0), (5000.0, 10.0), (-100.0, 50.0), (1e9, 1e9)] {
            let mut rule = AllocationRule::percentage(magnitude);
            rule.enabled = false;
            assert_eq!(allocation_target(revenue, &rule), 0.0);
            rule.basis = AllocationBasis::FixedAmount;
            assert_eq!(allocation_target(revenue, &rule), 0.0);
        }
    }

    #[test]
    fn commitments_total_sums_amounts() {
        assert_eq!(commitments_total(&[]), 0.0);
        let commitments = vec![
            Commitment::new("Contador", CommitmentKind::Service, 300.0),
            Commitment::new("Assistente", CommitmentKind::Personnel, 1700.0),
        ];
        assert_eq!(commitments_total(&commitments), 2000.0);
    }

    #[test]
    fn runway_saturates_without_commitments() {
        for cash in [-500.0, 0.0, 1.0, 1e12] {
            assert_eq!(runway_months(cash, 0.0), RUNWAY_SENTINEL);
        }
    }

    #[test]
    fn runway_can_go_negative() {
        assert_eq!(runway_months(500.0, 2000.0), 0.25);
        assert_eq!(runway_months(-1000.0, 2000.0), -0.5);
    }

    #[test]
    fn safe_limit_never_negative() {
        let samples = [-1e6, -1.0, 0.0, 0.5, 100.0, 1e6];
        for income in samples {
            for target in samples {
                let limit = safe_personal_limit(income, target, target, target, target);
                assert!(limit >= 0.0, "negative limit for {income} / {target}");
            }
        }
        assert_eq!(safe_personal_limit(8000.0, 500.0, 800.0, 400.0, 2000.0), 4300.0);
        assert_eq!(safe_personal_limit(f64::NAN, 0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn operating_result_subtracts_actual_outflows() {
        let ledger = vec![
            txn(TransactionKind::Income, 8000.0),
            txn(TransactionKind::TaxPayment, 500.0),
            txn(TransactionKind::SalaryWithdrawal, 3000.0),
        ];
        let result = operating_result(
            sum_by_kind(&ledger, TransactionKind::Income),
            sum_by_kind(&ledger, TransactionKind::TaxPayment),
            sum_by_kind(&ledger, TransactionKind::SalaryWithdrawal),
            sum_by_kind(&ledger, TransactionKind::ReserveAllocation),
            sum_by_kind(&ledger, TransactionKind::GrowthAllocation),
            sum_by_kind(&ledger, TransactionKind::FixedCost),
        );
        assert_eq!(result, 4500.0);
    }

    #[test]
    fn total_cash_and_runway_scenario() {
        let cash = total_cash(1000.0, -500.0);
        assert_eq!(cash, 500.0);
        assert_eq!(runway_months(cash, 2000.0), 0.25);
    }
}
