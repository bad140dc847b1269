use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::fs::File;
use std::str::FromStr;

use super::export::DATE_FORMAT;
use crate::db::repository;
use crate::error::{AppError, ValidationError};
use crate::ledger::Ledger;
use crate::models::transaction::{Category, NewTransaction, TransactionType};

struct ParsedRow {
    date: NaiveDateTime,
    new: NewTransaction,
}

/// Reads headerless CSV rows of `date,description,amount,type,category`.
/// The whole file is validated before any entry lands in the ledger; the
/// first bad row rejects the file with its line number. Imported rows keep
/// the file's date but get fresh ids.
pub fn import_csv(ledger: &mut Ledger, conn: &Connection, path: &str) -> Result<usize, AppError> {
    let rows = read_rows(path)?;
    let count = rows.len();

    for row in rows {
        // Rows were already validated; a rejection here would be a bug.
        ledger.add_dated(row.new, row.date)?;
    }
    repository::save(conn, ledger.transactions())?;

    Ok(count)
}

fn read_rows(path: &str) -> Result<Vec<ParsedRow>, AppError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .from_reader(file);

    let mut rows = Vec::new();
    for (line_index, result) in reader.records().enumerate() {
        let line = line_index + 1;
        let record = result.map_err(|e| AppError::InvalidRow {
            line,
            reason: e.to_string(),
        })?;

        if record.len() != 5 {
            return Err(AppError::InvalidRow {
                line,
                reason: format!("expected 5 columns, got {}", record.len()),
            });
        }

        let date = parse_date(record.get(0).unwrap_or("")).map_err(|reason| {
            AppError::InvalidRow { line, reason }
        })?;
        let new = parse_fields(&record).map_err(|e| AppError::InvalidRow {
            line,
            reason: e.to_string(),
        })?;

        rows.push(ParsedRow { date, new });
    }

    Ok(rows)
}

fn parse_fields(record: &csv::StringRecord) -> Result<NewTransaction, ValidationError> {
    let amount_field = record.get(2).unwrap_or("");
    let amount = Decimal::from_str(amount_field)
        .map_err(|_| ValidationError::InvalidAmount(amount_field.to_string()))?;

    let new = NewTransaction {
        description: record.get(1).unwrap_or("").to_string(),
        amount,
        kind: TransactionType::parse(record.get(3).unwrap_or(""))?,
        category: Category::parse(record.get(4).unwrap_or(""))?,
    };
    new.validate()?;
    Ok(new)
}

/// Accepts the exported timestamp form and plain dates from hand-made files.
fn parse_date(input: &str) -> Result<NaiveDateTime, String> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, DATE_FORMAT) {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| format!("invalid date '{}': use YYYY-MM-DD", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::operations::export::export_csv;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test CSV");
        tmp
    }

    #[test]
    fn test_import_csv_success() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        let csv_data = "\
2025-11-10,Salary,1500.00,income,salary
2025-11-11,Coffee,3.50,expense,dining
";

        let tmp = write_temp_csv(csv_data);
        let count = import_csv(&mut ledger, &conn, tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0].amount, Decimal::new(150000, 2));
        assert_eq!(ledger.transactions()[1].amount, Decimal::new(-350, 2));
        assert_eq!(repository::load(&conn).unwrap().len(), 2);
    }

    #[test]
    fn test_import_invalid_amount_names_the_line() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        let csv_data = "\
2025-11-10,Salary,1500.00,income,salary
2025-11-11,Coffee,free,expense,dining
";

        let tmp = write_temp_csv(csv_data);
        let result = import_csv(&mut ledger, &conn, tmp.path().to_str().unwrap());

        let error = result.unwrap_err().to_string();
        assert!(error.contains("line 2"));
        assert!(error.contains("invalid amount"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_import_bad_date_is_rejected() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        let csv_data = "bad-date,Salary,1500.00,income,salary\n";

        let tmp = write_temp_csv(csv_data);
        let result = import_csv(&mut ledger, &conn, tmp.path().to_str().unwrap());

        let error = result.unwrap_err().to_string();
        assert!(error.contains("line 1"));
        assert!(error.contains("invalid date"));
    }

    #[test]
    fn test_import_wrong_column_count() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();
        let csv_data = "2025-11-10,Salary,1500.00,income\n";

        let tmp = write_temp_csv(csv_data);
        let result = import_csv(&mut ledger, &conn, tmp.path().to_str().unwrap());

        assert!(result.unwrap_err().to_string().contains("expected 5 columns"));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let conn = establish_test_connection().unwrap();
        let mut ledger = Ledger::new();

        let result = import_csv(&mut ledger, &conn, "nonexistent.csv");
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let conn = establish_test_connection().unwrap();
        let mut source = Ledger::new();
        import_csv(
            &mut source,
            &conn,
            write_temp_csv("2025-11-10,Salary,1500.00,income,salary\n")
                .path()
                .to_str()
                .unwrap(),
        )
        .unwrap();

        let tmp = NamedTempFile::new().expect("Failed to create temp file");
        export_csv(source.transactions(), tmp.path().to_str().unwrap()).unwrap();

        let mut reimported = Ledger::new();
        let count = import_csv(&mut reimported, &conn, tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(count, 1);
        let original = &source.transactions()[0];
        let copy = &reimported.transactions()[0];
        assert_eq!(copy.description, original.description);
        assert_eq!(copy.amount, original.amount);
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.category, original.category);
        assert_eq!(copy.date, original.date);
    }
}
