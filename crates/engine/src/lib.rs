//! Monthly income and expense ledger.
//!
//! [`Engine`] owns the entry collection and the [`EntryStore`] it is persisted
//! to. Changing the viewed month carries forward fixed expenses and unpaid
//! obligations from the month before (see [`replicate`]).
use uuid::Uuid;

pub use commands::{EditEntryCmd, MAX_INSTALLMENTS, NewEntryCmd};
pub use entry::{EntryKind, FinancialEntry, PENDING_MARKER};
pub use error::EngineError;
pub use installments::expand_submission;
pub use money::MoneyCents;
pub use period::MonthYear;
pub use replication::{pendency_chain, replicate};
pub use store::{EntryStore, JsonFileStore, MemoryStore};
pub use summary::{MonthSummary, MonthView, sort_for_display};

mod commands;
mod entry;
mod error;
mod installments;
mod money;
mod period;
mod replication;
mod store;
mod summary;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine<S> {
    entries: Vec<FinancialEntry>,
    view: MonthYear,
    store: S,
}

impl<S: EntryStore> Engine<S> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder {
            store: None,
            view: None,
        }
    }

    pub fn entries(&self) -> &[FinancialEntry] {
        &self.entries
    }

    pub fn entry(&self, id: Uuid) -> ResultEngine<&FinancialEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    pub fn view(&self) -> MonthYear {
        self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switches to `view` and replicates into it.
    ///
    /// Returns the entries appended, empty when the month already held every
    /// carried-forward occurrence.
    pub fn set_view(&mut self, view: MonthYear) -> ResultEngine<Vec<FinancialEntry>> {
        self.view = view;
        self.replicate_view()
    }

    /// Moves the view by `offset` months and replicates into the new month.
    pub fn navigate(&mut self, offset: i32) -> ResultEngine<Vec<FinancialEntry>> {
        self.set_view(self.view.shift(offset))
    }

    /// Runs replication for the current view against the current collection.
    ///
    /// Computing and committing happen under the same `&mut self`, so the
    /// existence checks always see the latest snapshot.
    pub fn replicate_view(&mut self) -> ResultEngine<Vec<FinancialEntry>> {
        let batch = replicate(&self.entries, self.view)?;
        if batch.is_empty() {
            return Ok(batch);
        }
        self.append(batch.clone())?;
        tracing::info!("carried {} entries into {}", batch.len(), self.view);
        Ok(batch)
    }

    /// Stores a submitted entry in the viewed month, or an installment plan
    /// starting there. Returns the created entries.
    pub fn submit(&mut self, cmd: NewEntryCmd) -> ResultEngine<Vec<FinancialEntry>> {
        let created = expand_submission(&cmd, self.view)?;
        self.append(created.clone())?;
        Ok(created)
    }

    /// Replaces kind, description, amount and date of an entry. Bucket, paid
    /// state and links are kept. Returns the replacement.
    pub fn edit(&mut self, id: Uuid, cmd: EditEntryCmd) -> ResultEngine<FinancialEntry> {
        let mut updated = self.entry(id)?.clone();
        if let Some(kind) = cmd.kind {
            updated.kind = kind;
        }
        if let Some(description) = cmd.description.as_deref() {
            updated.description = util::normalize_description(description)?;
        }
        if let Some(amount) = cmd.amount {
            util::validate_amount(amount)?;
            updated.amount = amount;
        }
        if let Some(date) = cmd.date {
            updated.date = date;
        }
        self.replace(updated.clone())?;
        Ok(updated)
    }

    /// Flips the paid flag. Returns the new value.
    pub fn toggle_paid(&mut self, id: Uuid) -> ResultEngine<bool> {
        let mut updated = self.entry(id)?.clone();
        updated.is_paid = !updated.is_paid;
        let is_paid = updated.is_paid;
        self.replace(updated)?;
        Ok(is_paid)
    }

    /// Removes an entry. Occurrences replicated from it keep their
    /// `original_id`, which then dangles.
    pub fn delete(&mut self, id: Uuid) -> ResultEngine<FinancialEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let mut next = self.entries.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    /// Sorted entries and totals of the viewed month.
    pub fn month_view(&self) -> MonthView {
        MonthView::build(&self.entries, self.view)
    }

    /// The pendency chain of `id`, newest first (see [`pendency_chain`]).
    pub fn chain(&self, id: Uuid) -> ResultEngine<Vec<&FinancialEntry>> {
        self.entry(id)?;
        Ok(pendency_chain(&self.entries, id))
    }

    fn append(&mut self, batch: Vec<FinancialEntry>) -> ResultEngine<()> {
        let mut next = self.entries.clone();
        next.extend(batch);
        self.commit(next)
    }

    fn replace(&mut self, updated: FinancialEntry) -> ResultEngine<()> {
        let next = self
            .entries
            .iter()
            .map(|e| {
                if e.id == updated.id {
                    updated.clone()
                } else {
                    e.clone()
                }
            })
            .collect();
        self.commit(next)
    }

    /// Persist first, then swap: a failed save leaves memory untouched.
    fn commit(&mut self, next: Vec<FinancialEntry>) -> ResultEngine<()> {
        self.store.save_all(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// The builder for `Engine`
pub struct EngineBuilder<S> {
    store: Option<S>,
    view: Option<MonthYear>,
}

impl<S: EntryStore> EngineBuilder<S> {
    /// Pass the required store
    pub fn store(mut self, store: S) -> EngineBuilder<S> {
        self.store = Some(store);
        self
    }

    /// Initial view. Defaults to the current month.
    pub fn view(mut self, view: MonthYear) -> EngineBuilder<S> {
        self.view = Some(view);
        self
    }

    /// Construct `Engine`, loading the stored collection.
    ///
    /// No replication happens here; call [`Engine::set_view`] or
    /// [`Engine::replicate_view`] once the view is settled.
    pub fn build(self) -> ResultEngine<Engine<S>> {
        let store = self
            .store
            .ok_or_else(|| EngineError::MissingStore("an entry store is required".to_string()))?;
        let entries = store.load_all()?;
        Ok(Engine {
            entries,
            view: self.view.unwrap_or_else(MonthYear::current),
            store,
        })
    }
}
