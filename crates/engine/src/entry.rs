//! The module contains the `FinancialEntry` type, the only entity of the ledger.
//!
//! Income, fixed expenses and variable expenses are all represented by
//! `FinancialEntry`, distinguished by [`EntryKind`]. Every entry lives in exactly
//! one month bucket (`month`, `year`), assigned at creation and never changed.
use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoneyCents, MonthYear};

/// Marker appended to the description of a carried-forward unpaid entry.
pub const PENDING_MARKER: &str = "(Pendente)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Income,
    FixedExpense,
    VariableExpense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::FixedExpense => "FIXED_EXPENSE",
            Self::VariableExpense => "VARIABLE_EXPENSE",
        }
    }

    /// Short Portuguese label shown next to an entry.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::FixedExpense => "Fixa",
            Self::VariableExpense => "Variável",
        }
    }

    #[must_use]
    pub fn is_expense(self) -> bool {
        !matches!(self, Self::Income)
    }

    /// Display rank inside a month: income, then fixed, then variable.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Self::Income => 0,
            Self::FixedExpense => 1,
            Self::VariableExpense => 2,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One month-bucketed occurrence of an income or expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub description: String,
    /// Always positive, in cents.
    pub amount: MoneyCents,
    pub date: DateTime<Utc>,
    pub is_paid: bool,
    /// Zero-based month of the bucket.
    pub month: u32,
    pub year: i32,
    /// Entry this occurrence was replicated from. Reference only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<Uuid>,
    /// `Some(true)` for carried-forward pendencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_replicated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_installment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl FinancialEntry {
    /// Creates an unpaid entry with a fresh id in the given bucket.
    pub fn new(
        kind: EntryKind,
        description: impl Into<String>,
        amount: MoneyCents,
        date: DateTime<Utc>,
        bucket: MonthYear,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            description: description.into(),
            amount,
            date,
            is_paid: false,
            month: bucket.month(),
            year: bucket.year(),
            original_id: None,
            is_replicated: None,
            is_installment: None,
            installment_number: None,
            total_installments: None,
            parent_id: None,
        }
    }

    #[must_use]
    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }

    #[must_use]
    pub fn belongs_to(&self, bucket: MonthYear) -> bool {
        self.month == bucket.month() && self.year == bucket.year()
    }

    /// `true` for carried-forward pendencies; an absent flag counts as `false`.
    #[must_use]
    pub fn is_pendency(&self) -> bool {
        self.is_replicated.unwrap_or(false)
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Description with the pendency marker appended once.
    #[must_use]
    pub fn pending_description(&self) -> String {
        if self.description.contains(PENDING_MARKER) {
            self.description.clone()
        } else {
            pending_label(&self.description)
        }
    }
}

/// `"<description> (Pendente)"`, unconditionally.
pub(crate) fn pending_label(description: &str) -> String {
    format!("{description} {PENDING_MARKER}")
}

impl fmt::Display for FinancialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.amount, self.kind.label(), self.description)
    }
}
