//! Command structs for engine operations.
//!
//! These types group the fields of a submitted form (new entry or edit),
//! keeping call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::{EntryKind, MoneyCents};

/// Upper bound accepted for an installment plan.
pub const MAX_INSTALLMENTS: u32 = 120;

/// Create one entry, or an installment plan when `installments > 1` and the
/// kind is [`EntryKind::VariableExpense`].
#[derive(Clone, Debug)]
pub struct NewEntryCmd {
    pub kind: EntryKind,
    pub description: String,
    pub amount: MoneyCents,
    pub date: DateTime<Utc>,
    pub installments: u32,
}

impl NewEntryCmd {
    #[must_use]
    pub fn new(
        kind: EntryKind,
        description: impl Into<String>,
        amount: MoneyCents,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            amount,
            date,
            installments: 1,
        }
    }

    #[must_use]
    pub fn installments(mut self, installments: u32) -> Self {
        self.installments = installments;
        self
    }
}

/// Replace the editable fields of an existing entry. `None` keeps the
/// current value.
#[derive(Clone, Debug, Default)]
pub struct EditEntryCmd {
    pub kind: Option<EntryKind>,
    pub description: Option<String>,
    pub amount: Option<MoneyCents>,
    pub date: Option<DateTime<Utc>>,
}

impl EditEntryCmd {
    #[must_use]
    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}
