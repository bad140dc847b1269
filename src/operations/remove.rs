use rusqlite::Connection;

use crate::db::repository;
use crate::error::AppError;
use crate::ledger::Ledger;

/// Removes one entry by id and persists. Returns false (not an error) when
/// the id does not exist; nothing is written in that case.
pub fn remove_entry(ledger: &mut Ledger, conn: &Connection, id: u64) -> Result<bool, AppError> {
    if !ledger.remove(id) {
        return Ok(false);
    }
    repository::save(conn, ledger.transactions())?;
    Ok(true)
}

/// Empties the ledger and persists. Refused on an already-empty ledger.
pub fn clear_entries(ledger: &mut Ledger, conn: &Connection) -> Result<usize, AppError> {
    let dropped = ledger.clear()?;
    repository::save(conn, ledger.transactions())?;
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::operations::add::add_entry;

    #[test]
    fn test_remove_entry_updates_store() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        let added = add_entry(&mut ledger, &conn, "Coffee, 3.50, expense, dining").unwrap();

        assert!(remove_entry(&mut ledger, &conn, added.id).unwrap());
        assert!(ledger.is_empty());
        assert!(repository::load(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_remove_absent_id_changes_nothing() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        add_entry(&mut ledger, &conn, "Coffee, 3.50, expense, dining").unwrap();

        assert!(!remove_entry(&mut ledger, &conn, 1).unwrap());
        assert_eq!(ledger.len(), 1);
        assert_eq!(repository::load(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_clear_entries_empties_the_store() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        add_entry(&mut ledger, &conn, "Coffee, 3.50, expense, dining").unwrap();
        add_entry(&mut ledger, &conn, "Salary, 1500, income, salary").unwrap();

        assert_eq!(clear_entries(&mut ledger, &conn).unwrap(), 2);
        assert!(repository::load(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_clear_empty_ledger_is_refused() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();

        let result = clear_entries(&mut ledger, &conn);
        assert!(matches!(result, Err(AppError::EmptyLedger)));
    }
}
