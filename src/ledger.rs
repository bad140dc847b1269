use chrono::{Local, NaiveDateTime};

use crate::error::{AppError, ValidationError};
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};

/// The in-memory entry collection; the durable copy is written by the
/// caller after every successful mutation.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn add(&mut self, new: NewTransaction) -> Result<Transaction, ValidationError> {
        self.add_dated(new, Local::now().naive_local())
    }

    /// `add` with a caller-supplied date (file import); the id still comes
    /// from the creation instant.
    pub fn add_dated(
        &mut self,
        new: NewTransaction,
        date: NaiveDateTime,
    ) -> Result<Transaction, ValidationError> {
        new.validate()?;

        let amount = match new.kind {
            TransactionType::Income => new.amount,
            TransactionType::Expense => -new.amount,
        };

        let transaction = Transaction {
            id: self.next_id(),
            description: new.description.trim().to_string(),
            amount,
            category: new.category,
            kind: new.kind,
            date,
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Returns false when no entry matches; an absent id is not an error.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.transactions.iter().position(|t| t.id == id) {
            Some(pos) => {
                self.transactions.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clearing an already-empty ledger is refused.
    pub fn clear(&mut self) -> Result<usize, AppError> {
        if self.transactions.is_empty() {
            return Err(AppError::EmptyLedger);
        }
        let dropped = self.transactions.len();
        self.transactions.clear();
        Ok(dropped)
    }

    /// Ids follow the creation timestamp in milliseconds. Entries created
    /// within the same millisecond (or after a clock step backwards) bump
    /// past the highest existing id so ids stay strictly increasing.
    fn next_id(&self) -> u64 {
        let now = Local::now().timestamp_millis().max(0) as u64;
        match self.transactions.iter().map(|t| t.id).max() {
            Some(last) if now <= last => last + 1,
            _ => now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Category;
    use rust_decimal::Decimal;

    fn income(description: &str, amount: Decimal) -> NewTransaction {
        NewTransaction {
            description: description.to_string(),
            amount,
            kind: TransactionType::Income,
            category: Category::Salary,
        }
    }

    fn expense(description: &str, amount: Decimal) -> NewTransaction {
        NewTransaction {
            description: description.to_string(),
            amount,
            kind: TransactionType::Expense,
            category: Category::Groceries,
        }
    }

    #[test]
    fn test_add_income_keeps_positive_amount() {
        let mut ledger = Ledger::new();
        let added = ledger.add(income("Salary", Decimal::new(100000, 2))).unwrap();

        assert_eq!(added.amount, Decimal::new(100000, 2));
        assert!(added.is_income());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_expense_negates_amount() {
        let mut ledger = Ledger::new();
        let added = ledger.add(expense("Groceries", Decimal::new(20000, 2))).unwrap();

        assert_eq!(added.amount, Decimal::new(-20000, 2));
        assert!(added.is_expense());
        assert_eq!(added.abs_amount(), Decimal::new(20000, 2));
    }

    #[test]
    fn test_add_empty_description_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        let result = ledger.add(income("   ", Decimal::ONE));

        assert_eq!(result.unwrap_err(), ValidationError::EmptyDescription);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_non_positive_amount_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();

        let zero = ledger.add(income("Salary", Decimal::ZERO));
        assert_eq!(zero.unwrap_err(), ValidationError::NonPositiveAmount);

        let negative = ledger.add(income("Salary", Decimal::new(-100, 2)));
        assert_eq!(negative.unwrap_err(), ValidationError::NonPositiveAmount);

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_mismatched_category_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        let new = NewTransaction {
            description: "Salary".to_string(),
            amount: Decimal::ONE,
            kind: TransactionType::Income,
            category: Category::Rent,
        };

        assert!(ledger.add(new).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ledger = Ledger::new();
        let first = ledger.add(income("a", Decimal::ONE)).unwrap();
        let second = ledger.add(income("b", Decimal::ONE)).unwrap();
        let third = ledger.add(expense("c", Decimal::ONE)).unwrap();

        assert!(second.id > first.id);
        assert!(third.id > second.id);
    }

    #[test]
    fn test_remove_existing_entry() {
        let mut ledger = Ledger::new();
        let kept = ledger.add(income("keep", Decimal::ONE)).unwrap();
        let dropped = ledger.add(expense("drop", Decimal::ONE)).unwrap();

        assert!(ledger.remove(dropped.id));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].id, kept.id);
    }

    #[test]
    fn test_remove_absent_id_is_a_no_op() {
        let mut ledger = Ledger::new();
        ledger.add(income("keep", Decimal::ONE)).unwrap();

        assert!(!ledger.remove(42));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_clear_non_empty_ledger() {
        let mut ledger = Ledger::new();
        ledger.add(income("a", Decimal::ONE)).unwrap();
        ledger.add(expense("b", Decimal::ONE)).unwrap();

        assert_eq!(ledger.clear().unwrap(), 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_clear_empty_ledger_is_refused() {
        let mut ledger = Ledger::new();
        let result = ledger.clear();

        assert!(matches!(result, Err(AppError::EmptyLedger)));
    }
}
