use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::repository;
use crate::error::{AppError, ValidationError};
use crate::ledger::Ledger;
use crate::models::transaction::{Category, NewTransaction, Transaction, TransactionType};

/// Parses one raw entry line in the form
/// `description, amount, type(income/expense), category`.
pub fn parse_entry(input: &str) -> Result<NewTransaction, ValidationError> {
    let parts: Vec<&str> = input.split(',').map(|s| s.trim()).collect();
    if parts.len() != 4 {
        return Err(ValidationError::FieldCount(parts.len()));
    }

    let description = parts[0].to_string();
    let amount = Decimal::from_str(parts[1])
        .map_err(|_| ValidationError::InvalidAmount(parts[1].to_string()))?;
    let kind = TransactionType::parse(parts[2])?;
    let category = Category::parse(parts[3])?;

    Ok(NewTransaction {
        description,
        amount,
        kind,
        category,
    })
}

/// Parses, validates, appends and persists one entry. Nothing is stored when
/// any field is rejected.
pub fn add_entry(
    ledger: &mut Ledger,
    conn: &Connection,
    input: &str,
) -> Result<Transaction, AppError> {
    let new = parse_entry(input)?;
    let transaction = ledger.add(new)?;
    repository::save(conn, ledger.transactions())?;
    Ok(transaction)
}
