use std::fs::File;

use crate::error::AppError;
use crate::models::transaction::Transaction;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes headerless CSV rows of `date,description,amount,type,category`
/// with amounts as positive magnitudes; the same shape `import` reads back.
pub fn export_csv(transactions: &[Transaction], path: &str) -> Result<usize, AppError> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for transaction in transactions {
        writer.write_record(&[
            transaction.date.format(DATE_FORMAT).to_string(),
            transaction.description.clone(),
            transaction.abs_amount().to_string(),
            transaction.kind.label().to_string(),
            transaction.category.label().to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::models::transaction::{Category, NewTransaction, TransactionType};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add(NewTransaction {
                description: "Salary".to_string(),
                amount: Decimal::new(150000, 2),
                kind: TransactionType::Income,
                category: Category::Salary,
            })
            .unwrap();
        ledger
            .add(NewTransaction {
                description: "Coffee".to_string(),
                amount: Decimal::new(350, 2),
                kind: TransactionType::Expense,
                category: Category::Dining,
            })
            .unwrap();
        ledger
    }

    #[test]
    fn test_export_writes_magnitudes_and_labels() {
        let ledger = sample_ledger();
        let tmp = NamedTempFile::new().expect("Failed to create temp file");

        let count = export_csv(ledger.transactions(), tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(count, 2);

        let contents = fs::read_to_string(tmp.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Salary,1500.00,income,salary"));
        assert!(lines[1].contains("Coffee,3.50,expense,dining"));
    }

    #[test]
    fn test_export_empty_ledger_writes_empty_file() {
        let tmp = NamedTempFile::new().expect("Failed to create temp file");

        let count = export_csv(&[], tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(count, 0);
        assert!(fs::read_to_string(tmp.path()).unwrap().is_empty());
    }
}
