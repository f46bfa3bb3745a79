//! Expansion of a submitted entry into the occurrences to store.
//!
//! A variable expense submitted with `n > 1` installments becomes an
//! installment plan: `n` unpaid entries in consecutive months starting at the
//! viewed month, sharing a `parent_id`. Anything else becomes a single unpaid
//! entry in the viewed month.

use uuid::Uuid;

use crate::{
    EngineError, EntryKind, FinancialEntry, MoneyCents, MonthYear, ResultEngine,
    commands::NewEntryCmd,
    util::{normalize_description, validate_amount, validate_installments},
};

/// Validates `cmd` and returns the entries to append, in month order.
pub fn expand_submission(
    cmd: &NewEntryCmd,
    view: MonthYear,
) -> ResultEngine<Vec<FinancialEntry>> {
    let description = normalize_description(&cmd.description)?;
    validate_amount(cmd.amount)?;
    validate_installments(cmd.installments)?;

    if cmd.kind != EntryKind::VariableExpense || cmd.installments == 1 {
        return Ok(vec![FinancialEntry::new(
            cmd.kind,
            description,
            cmd.amount,
            cmd.date,
            view,
        )]);
    }

    let total = cmd.installments;
    if cmd.amount.cents() < i64::from(total) {
        return Err(EngineError::InvalidInstallments(format!(
            "{} cannot be split into {total} installments",
            cmd.amount
        )));
    }
    let parent_id = Uuid::new_v4();
    let mut plan = Vec::with_capacity(total as usize);
    for (i, share) in split_amount(cmd.amount, total).into_iter().enumerate() {
        let number = i as u32 + 1;
        let bucket = view.shift(i as i32);
        let mut entry = FinancialEntry::new(
            cmd.kind,
            format!("{description} ({number}/{total})"),
            share,
            bucket.move_date(cmd.date)?,
            bucket,
        );
        entry.is_installment = Some(true);
        entry.installment_number = Some(number);
        entry.total_installments = Some(total);
        entry.parent_id = Some(parent_id);
        plan.push(entry);
    }

    tracing::debug!(
        "expanded \"{description}\" ({}) into {total} installments",
        cmd.amount
    );
    Ok(plan)
}

/// Splits `amount` into `parts` shares that sum back to `amount`.
///
/// Cents that do not divide evenly go to the first share.
pub(crate) fn split_amount(amount: MoneyCents, parts: u32) -> Vec<MoneyCents> {
    let parts_i64 = i64::from(parts.max(1));
    let share = amount.cents() / parts_i64;
    let remainder = amount.cents() % parts_i64;

    (0..parts_i64)
        .map(|i| {
            if i == 0 {
                MoneyCents::new(share + remainder)
            } else {
                MoneyCents::new(share)
            }
        })
        .collect()
}
