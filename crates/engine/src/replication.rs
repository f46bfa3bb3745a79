//! Month-to-month replication.
//!
//! When a month is viewed, obligations from the month right before it are
//! carried forward:
//!
//! - every fixed expense gets a fresh, unpaid *template* occurrence, paid or not;
//! - every unpaid expense (fixed or variable) gets a *pendency* occurrence with
//!   `(Pendente)` appended to its description and `original_id` pointing back
//!   to it.
//!
//! Income never carries forward. [`replicate`] is pure and only proposes new
//! entries; the existence checks make a second call against the merged
//! collection return nothing.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{EntryKind, FinancialEntry, MonthYear, ResultEngine, entry::pending_label};

/// Computes the entries to append so that `target` reflects the obligations
/// carried over from the previous month.
///
/// The returned batch lists templates first, then pendencies, each in source
/// collection order.
pub fn replicate(
    entries: &[FinancialEntry],
    target: MonthYear,
) -> ResultEngine<Vec<FinancialEntry>> {
    let source = target.previous();
    let source_entries: Vec<&FinancialEntry> =
        entries.iter().filter(|e| e.belongs_to(source)).collect();
    let target_entries: Vec<&FinancialEntry> =
        entries.iter().filter(|e| e.belongs_to(target)).collect();

    let mut batch = fixed_templates(&source_entries, &target_entries, target)?;
    batch.extend(pendencies(&source_entries, &target_entries, target));

    if !batch.is_empty() {
        tracing::debug!(
            "replicating {} entries from {}/{} into {}/{}",
            batch.len(),
            source.month() + 1,
            source.year(),
            target.month() + 1,
            target.year()
        );
    }
    Ok(batch)
}

/// Fixed expenses recur every month regardless of whether they were paid.
fn fixed_templates(
    source_entries: &[&FinancialEntry],
    target_entries: &[&FinancialEntry],
    target: MonthYear,
) -> ResultEngine<Vec<FinancialEntry>> {
    // Descriptions of templates already in the target month, plus the ones
    // produced by this batch, so two sources sharing a description yield one template.
    let mut present: HashSet<&str> = target_entries
        .iter()
        .filter(|e| e.kind == EntryKind::FixedExpense && !e.is_pendency())
        .map(|e| e.description.as_str())
        .collect();

    let mut templates = Vec::new();
    for prev in source_entries
        .iter()
        .filter(|e| e.kind == EntryKind::FixedExpense)
    {
        if !present.insert(prev.description.as_str()) {
            continue;
        }
        templates.push(FinancialEntry {
            id: Uuid::new_v4(),
            date: target.move_date(prev.date)?,
            is_paid: false,
            month: target.month(),
            year: target.year(),
            is_replicated: Some(false),
            ..(*prev).clone()
        });
    }
    Ok(templates)
}

/// Unpaid expenses chase forward until paid. Each pendency points at its
/// immediate predecessor, so a long overdue bill forms a chain.
fn pendencies(
    source_entries: &[&FinancialEntry],
    target_entries: &[&FinancialEntry],
    target: MonthYear,
) -> Vec<FinancialEntry> {
    source_entries
        .iter()
        .filter(|e| !e.is_paid && e.is_expense())
        .filter(|pending| !already_pending(pending, target_entries))
        .map(|pending| FinancialEntry {
            id: Uuid::new_v4(),
            original_id: Some(pending.id),
            description: pending.pending_description(),
            is_paid: false,
            month: target.month(),
            year: target.year(),
            is_replicated: Some(true),
            ..(*pending).clone()
        })
        .collect()
}

/// Matches by `original_id`; falls back to the marked description for
/// entries carried forward before the link was recorded.
///
/// The fallback can match an unrelated entry whose description happens to be
/// `"<source description> (Pendente)"`.
fn already_pending(source: &FinancialEntry, target_entries: &[&FinancialEntry]) -> bool {
    let marked = pending_label(&source.description);
    target_entries
        .iter()
        .any(|curr| curr.original_id == Some(source.id) || curr.description == marked)
}

/// Follows `original_id` links from `id` back toward the root of its chain.
///
/// Returns the occurrences visited, newest first, starting with `id` itself.
/// Stops at a dangling link or when an id repeats. Empty if `id` is unknown.
pub fn pendency_chain(entries: &[FinancialEntry], id: Uuid) -> Vec<&FinancialEntry> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(id);

    while let Some(current) = next {
        if !seen.insert(current) {
            break;
        }
        let Some(entry) = entries.iter().find(|e| e.id == current) else {
            break;
        };
        chain.push(entry);
        next = entry.original_id;
    }
    chain
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::MoneyCents;

    fn march() -> MonthYear {
        MonthYear::new(2, 2025).unwrap()
    }

    fn entry(kind: EntryKind, description: &str, reais: i64, bucket: MonthYear) -> FinancialEntry {
        let date = Utc
            .with_ymd_and_hms(bucket.year(), bucket.month() + 1, 10, 9, 0, 0)
            .unwrap();
        FinancialEntry::new(kind, description, MoneyCents::from_reais(reais), date, bucket)
    }

    #[test]
    fn empty_collection_replicates_nothing() {
        assert!(replicate(&[], march()).unwrap().is_empty());
    }

    #[test]
    fn only_previous_month_is_a_source() {
        let two_months_ago = march().shift(-2);
        let entries = vec![entry(EntryKind::VariableExpense, "Mercado", 80, two_months_ago)];

        assert!(replicate(&entries, march()).unwrap().is_empty());
    }

    #[test]
    fn template_copies_fields_and_moves_date() {
        let feb = march().previous();
        let mut rent = entry(EntryKind::FixedExpense, "Aluguel", 1500, feb).paid();
        rent.date = Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap();
        let batch = replicate(&[rent.clone()], march()).unwrap();

        assert_eq!(batch.len(), 1);
        let template = &batch[0];
        assert_ne!(template.id, rent.id);
        assert_eq!(template.description, "Aluguel");
        assert_eq!(template.amount, rent.amount);
        assert_eq!(template.date, Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap());
        assert!(template.belongs_to(march()));
        assert!(!template.is_paid);
        assert_eq!(template.is_replicated, Some(false));
    }

    #[test]
    fn unpaid_fixed_expense_yields_template_and_pendency() {
        let rent = entry(EntryKind::FixedExpense, "Aluguel", 1500, march().previous());
        let batch = replicate(&[rent.clone()], march()).unwrap();

        assert_eq!(batch.len(), 2);
        assert!(!batch[0].is_pendency());
        assert_eq!(batch[0].description, "Aluguel");
        assert!(batch[1].is_pendency());
        assert_eq!(batch[1].description, "Aluguel (Pendente)");
        assert_eq!(batch[1].original_id, Some(rent.id));
    }

    #[test]
    fn pendency_keeps_the_original_date() {
        let bill = entry(EntryKind::VariableExpense, "Luz", 120, march().previous());
        let batch = replicate(&[bill.clone()], march()).unwrap();

        assert_eq!(batch[0].date, bill.date);
        assert!(batch[0].belongs_to(march()));
    }

    #[test]
    fn duplicate_fixed_descriptions_yield_one_template() {
        let feb = march().previous();
        let entries = vec![
            entry(EntryKind::FixedExpense, "Internet", 100, feb).paid(),
            entry(EntryKind::FixedExpense, "Internet", 100, feb).paid(),
        ];

        assert_eq!(replicate(&entries, march()).unwrap().len(), 1);
    }

    #[test]
    fn existing_template_suppresses_a_new_one() {
        let feb = march().previous();
        let entries = vec![
            entry(EntryKind::FixedExpense, "Internet", 100, feb).paid(),
            entry(EntryKind::FixedExpense, "Internet", 110, march()),
        ];

        assert!(replicate(&entries, march()).unwrap().is_empty());
    }

    #[test]
    fn pendency_does_not_count_as_template() {
        let feb = march().previous();
        let rent = entry(EntryKind::FixedExpense, "Aluguel", 1500, feb).paid();
        let mut pendency = entry(EntryKind::FixedExpense, "Aluguel", 1500, march());
        pendency.is_replicated = Some(true);

        let batch = replicate(&[rent, pendency], march()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].is_replicated, Some(false));
    }

    #[test]
    fn marked_description_is_a_fallback_match() {
        let feb = march().previous();
        let bill = entry(EntryKind::VariableExpense, "Luz", 120, feb);
        let legacy = entry(EntryKind::VariableExpense, "Luz (Pendente)", 120, march());

        assert!(replicate(&[bill, legacy], march()).unwrap().is_empty());
    }

    #[test]
    fn marker_is_not_appended_twice() {
        let feb = march().previous();
        let mut pendency = entry(EntryKind::VariableExpense, "Luz (Pendente)", 120, feb);
        pendency.is_replicated = Some(true);

        let batch = replicate(&[pendency.clone()], march()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].description, "Luz (Pendente)");
        assert_eq!(batch[0].original_id, Some(pendency.id));
    }

    #[test]
    fn january_pulls_from_december_of_previous_year() {
        let january = MonthYear::new(0, 2026).unwrap();
        let december = MonthYear::new(11, 2025).unwrap();
        let entries = vec![entry(EntryKind::VariableExpense, "Presentes", 300, december)];

        let batch = replicate(&entries, january).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch[0].belongs_to(january));
    }

    #[test]
    fn chain_walks_back_to_the_root() {
        let feb = march().previous();
        let root = entry(EntryKind::VariableExpense, "Luz", 120, feb);
        let first = replicate(&[root.clone()], march()).unwrap().remove(0);
        let mut entries = vec![root.clone(), first.clone()];
        let second = replicate(&entries, march().next()).unwrap().remove(0);
        entries.push(second.clone());

        let chain: Vec<Uuid> = pendency_chain(&entries, second.id)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(chain, vec![second.id, first.id, root.id]);
    }

    #[test]
    fn chain_stops_on_cycles_and_unknown_ids() {
        let mut a = entry(EntryKind::VariableExpense, "A", 1, march());
        let mut b = entry(EntryKind::VariableExpense, "B", 1, march());
        a.original_id = Some(b.id);
        b.original_id = Some(a.id);
        let entries = vec![a.clone(), b];

        assert_eq!(pendency_chain(&entries, a.id).len(), 2);
        assert!(pendency_chain(&entries, Uuid::new_v4()).is_empty());
    }
}
