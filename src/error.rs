use crate::models::transaction::{Category, TransactionType};

/// Rejections of user-supplied entry fields. These abort the operation and
/// leave the ledger untouched.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("invalid amount '{0}': expected a decimal number")]
    InvalidAmount(String),
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("unknown entry type '{0}': use 'income' or 'expense'")]
    UnknownType(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("category '{category}' cannot be used for {kind} entries")]
    CategoryMismatch {
        category: Category,
        kind: TransactionType,
    },
    #[error("expected 4 comma-separated fields but got {0}")]
    FieldCount(usize),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("the ledger is already empty")]
    EmptyLedger,
    #[error("invalid row on line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
