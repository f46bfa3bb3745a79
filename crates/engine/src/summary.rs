//! Month listing and totals.

use crate::{FinancialEntry, MoneyCents, MonthYear};

/// Totals of one month bucket.
///
/// `balance` is income minus **paid** expenses: money owed but not yet spent
/// is still available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonthSummary {
    pub income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub paid_expenses: MoneyCents,
    pub balance: MoneyCents,
}

impl MonthSummary {
    pub fn of<'a>(entries: impl IntoIterator<Item = &'a FinancialEntry>) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            if entry.is_income() {
                summary.income += entry.amount;
            } else {
                summary.total_expenses += entry.amount;
                if entry.is_paid {
                    summary.paid_expenses += entry.amount;
                }
            }
        }
        summary.balance = summary.income - summary.paid_expenses;
        summary
    }
}

/// The entries of one month in display order, with their totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthView {
    pub month: MonthYear,
    pub entries: Vec<FinancialEntry>,
    pub summary: MonthSummary,
}

impl MonthView {
    pub fn build(all: &[FinancialEntry], month: MonthYear) -> Self {
        let mut entries: Vec<FinancialEntry> = all
            .iter()
            .filter(|e| e.belongs_to(month))
            .cloned()
            .collect();
        sort_for_display(&mut entries);
        let summary = MonthSummary::of(&entries);
        Self {
            month,
            entries,
            summary,
        }
    }
}

/// Unpaid before paid; inside each group income, fixed, variable. Stable, so
/// insertion order breaks ties.
pub fn sort_for_display(entries: &mut [FinancialEntry]) {
    entries.sort_by_key(|e| (e.is_paid, e.kind.rank()));
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::EntryKind;

    fn march() -> MonthYear {
        MonthYear::new(2, 2025).unwrap()
    }

    fn entry(kind: EntryKind, description: &str, reais: i64) -> FinancialEntry {
        FinancialEntry::new(
            kind,
            description,
            MoneyCents::from_reais(reais),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            march(),
        )
    }

    #[test]
    fn balance_ignores_unpaid_expenses() {
        let entries = vec![
            entry(EntryKind::Income, "Salário", 5000),
            entry(EntryKind::FixedExpense, "Aluguel", 2000).paid(),
            entry(EntryKind::VariableExpense, "Mercado", 1000),
        ];
        let summary = MonthSummary::of(&entries);

        assert_eq!(summary.income, MoneyCents::from_reais(5000));
        assert_eq!(summary.total_expenses, MoneyCents::from_reais(3000));
        assert_eq!(summary.paid_expenses, MoneyCents::from_reais(2000));
        assert_eq!(summary.balance, MoneyCents::from_reais(3000));
    }

    #[test]
    fn paid_income_still_counts_as_income() {
        let entries = vec![entry(EntryKind::Income, "Freela", 800).paid()];
        assert_eq!(MonthSummary::of(&entries).balance, MoneyCents::from_reais(800));
    }

    #[test]
    fn unpaid_first_then_by_kind() {
        let mut entries = vec![
            entry(EntryKind::Income, "Salário", 5000).paid(),
            entry(EntryKind::VariableExpense, "Mercado", 300),
            entry(EntryKind::FixedExpense, "Aluguel", 2000),
        ];
        sort_for_display(&mut entries);

        let order: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["Aluguel", "Mercado", "Salário"]);
    }

    #[test]
    fn view_only_contains_its_month() {
        let mut other = entry(EntryKind::Income, "Bônus", 100);
        other.month = 3;
        let entries = vec![entry(EntryKind::Income, "Salário", 5000), other];
        let view = MonthView::build(&entries, march());

        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.summary.income, MoneyCents::from_reais(5000));
    }
}
