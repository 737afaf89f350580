//! Append-only ledger operations and commitment matching.

use chrono::{DateTime, Utc};

use crate::domain::{Commitment, Identifiable, NamedEntity, Transaction, TransactionKind};

/// Returns a new ledger with one entry appended after the existing ones.
///
/// No validation happens here; callers gate submission with [`is_submittable`].
pub fn append_transaction(
    ledger: &[Transaction],
    kind: TransactionKind,
    amount: f64,
    description: &str,
    occurred_at: DateTime<Utc>,
) -> Vec<Transaction> {
    let entry = Transaction::new(kind, amount, occurred_at).with_description(description);
    append_entry(ledger, entry)
}

pub fn append_entry(ledger: &[Transaction], entry: Transaction) -> Vec<Transaction> {
    tracing::debug!(kind = %entry.kind, amount = entry.amount, "appending ledger entry");
    let mut next = Vec::with_capacity(ledger.len() + 1);
    next.extend_from_slice(ledger);
    next.push(entry);
    next
}

/// Whether an entry form may be submitted: a positive amount and a non-blank description.
pub fn is_submittable(amount: f64, description: &str) -> bool {
    amount > 0.0 && !description.trim().is_empty()
}

/// Entries of a single kind, in insertion order.
pub fn transactions_of_kind(
    ledger: &[Transaction],
    kind: TransactionKind,
) -> impl Iterator<Item = &Transaction> {
    ledger.iter().filter(move |txn| txn.kind == kind)
}

/// Whether some fixed-cost entry settles `commitment`.
///
/// Entries linked through `commitment_id` match by id only. Unlinked entries
/// (everything written before the link existed) fall back to a case-insensitive
/// comparison between their description and the commitment name.
pub fn is_commitment_paid(ledger: &[Transaction], commitment: &Commitment) -> bool {
    let name = commitment.name().to_lowercase();
    transactions_of_kind(ledger, TransactionKind::FixedCost).any(|txn| {
        match txn.commitment_id.as_deref() {
            Some(id) => id == commitment.id(),
            None => txn
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase() == name),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommitmentKind;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn append_preserves_insertion_order_and_input() {
        let first = append_transaction(&[], TransactionKind::Income, 100.0, "Cliente A", at(20));
        let second = append_transaction(&first, TransactionKind::Income, 50.0, "Cliente B", at(1));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].description(), "Cliente A");
        assert_eq!(second[1].description(), "Cliente B");
        assert_ne!(second[0].id, second[1].id);
    }

    #[test]
    fn append_trims_description() {
        let ledger = append_transaction(&[], TransactionKind::TaxPayment, 86.35, "  DAS  ", at(5));
        assert_eq!(ledger[0].description.as_deref(), Some("DAS"));
        let blank = append_transaction(&[], TransactionKind::TaxPayment, 1.0, "   ", at(5));
        assert_eq!(blank[0].description, None);
    }

    #[test]
    fn submission_requires_amount_and_description() {
        assert!(is_submittable(10.0, "Venda"));
        assert!(!is_submittable(0.0, "Venda"));
        assert!(!is_submittable(-5.0, "Venda"));
        assert!(!is_submittable(10.0, "  "));
    }

    #[test]
    fn commitment_matches_description_case_insensitively() {
        let rent = Commitment::new("Aluguel Sala", CommitmentKind::Obligation, 1200.0);
        let ledger =
            append_transaction(&[], TransactionKind::FixedCost, 1200.0, "aluguel sala", at(3));
        assert!(is_commitment_paid(&ledger, &rent));

        let income =
            append_transaction(&[], TransactionKind::Income, 1200.0, "Aluguel Sala", at(3));
        assert!(!is_commitment_paid(&income, &rent));
    }

    #[test]
    fn linked_entries_match_by_id_only() {
        let first = Commitment::new("Software", CommitmentKind::Service, 99.0);
        let second = Commitment::new("Software", CommitmentKind::Service, 49.0);
        let entry = Transaction::new(TransactionKind::FixedCost, 99.0, at(8))
            .with_description("Software")
            .for_commitment(first.id.clone());
        let ledger = append_entry(&[], entry);
        assert!(is_commitment_paid(&ledger, &first));
        assert!(!is_commitment_paid(&ledger, &second));
    }
}
