use rusqlite::{Connection, OptionalExtension};

use crate::error::AppError;
use crate::models::transaction::Transaction;

/// The whole ledger lives under a single key, serialized as one JSON array
/// and overwritten wholesale after every mutation.
const LEDGER_KEY: &str = "transactions";

pub fn save(conn: &Connection, transactions: &[Transaction]) -> Result<(), AppError> {
    let value = serde_json::to_string(transactions)?;
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![LEDGER_KEY, value],
    )?;
    Ok(())
}

/// Reads the stored ledger. A missing key or a value that no longer parses
/// both start an empty ledger rather than failing.
pub fn load(conn: &Connection) -> Result<Vec<Transaction>, AppError> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            [LEDGER_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let transactions = match stored {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    };
    Ok(transactions)
}
