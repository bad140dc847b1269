use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::transaction::Transaction;

/// `expense_total` is an absolute value; `expense_ratio` a rounded integer
/// percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: Decimal,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub expense_ratio: u32,
}

/// Computed over the full, unfiltered collection; the current filter or
/// search never changes these numbers.
pub fn summarize(transactions: &[Transaction]) -> Statistics {
    let mut total = Decimal::ZERO;
    let mut income_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    let mut income_count = 0;
    let mut expense_count = 0;

    for transaction in transactions {
        total += transaction.amount;
        if transaction.is_income() {
            income_total += transaction.amount;
            income_count += 1;
        } else {
            expense_total += transaction.abs_amount();
            expense_count += 1;
        }
    }

    // With no income the ratio is reported as 0% rather than left undefined.
    // Display policy, not a derived fact.
    let expense_ratio = if income_total > Decimal::ZERO {
        (expense_total / income_total * Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    } else {
        0
    };

    Statistics {
        total,
        income_total,
        expense_total,
        count: transactions.len(),
        income_count,
        expense_count,
        expense_ratio,
    }
}
