//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] returned when an entry id is not in the collection.
//! - [`InvalidAmount`], [`InvalidDescription`], [`InvalidInstallments`] returned when a submitted
//!   entry fails validation.
//! - [`Storage`] and [`Serialization`] returned when the snapshot cannot be written.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDescription`]: EngineError::InvalidDescription
//!  [`InvalidInstallments`]: EngineError::InvalidInstallments
//!  [`Storage`]: EngineError::Storage
//!  [`Serialization`]: EngineError::Serialization
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid description: {0}")]
    InvalidDescription(String),
    #[error("Invalid installments: {0}")]
    InvalidInstallments(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Missing store: {0}")]
    MissingStore(String),
    #[error(transparent)]
    Storage(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDescription(a), Self::InvalidDescription(b)) => a == b,
            (Self::InvalidInstallments(a), Self::InvalidInstallments(b)) => a == b,
            (Self::InvalidMonth(a), Self::InvalidMonth(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::MissingStore(a), Self::MissingStore(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
