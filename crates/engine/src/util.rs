//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize the
//! checks applied to submitted and edited entries.

use crate::{EngineError, MoneyCents, ResultEngine, commands::MAX_INSTALLMENTS};

/// Trim a description and reject it when blank.
pub(crate) fn normalize_description(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidDescription(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Entry amounts are magnitudes: strictly positive.
pub(crate) fn validate_amount(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be > 0, got {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_installments(installments: u32) -> ResultEngine<()> {
    if !(1..=MAX_INSTALLMENTS).contains(&installments) {
        return Err(EngineError::InvalidInstallments(format!(
            "installments must be in 1..={MAX_INSTALLMENTS}, got {installments}"
        )));
    }
    Ok(())
}
