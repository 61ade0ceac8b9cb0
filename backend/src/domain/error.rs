//! Errors surfaced by ledger operations.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Income not found: {0}")]
    IncomeNotFound(String),
    #[error("Member not found: {0}")]
    MemberNotFound(String),
    #[error("A member with id {0} already exists")]
    DuplicateMember(String),
    #[error("Failed to serialize {key}: {source}")]
    Serialization {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::IncomeNotFound(_) | LedgerError::MemberNotFound(_)
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
