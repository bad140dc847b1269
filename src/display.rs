use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::transaction::Transaction;
use crate::operations::summary::Statistics;

/// Currency-symbol-prefixed, two decimals, thousands separators. Negative
/// values carry a leading minus: `-$1,234.56`.
pub fn format_currency(amount: Decimal) -> String {
    let negative = amount < Decimal::ZERO;
    let sign = if negative { "-" } else { "" };

    let cents = (amount.abs() * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let cents = match cents.to_u128() {
        Some(cents) => cents,
        // Out of u128 range; fall back to the plain decimal rendering.
        None => return format!("{}${}", sign, amount.abs()),
    };

    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Row rendering: income as `+$…`, expense as `-$…`.
pub fn signed_currency(transaction: &Transaction) -> String {
    let sign = if transaction.is_income() { "+" } else { "-" };
    format!("{}{}", sign, format_currency(transaction.abs_amount()))
}

/// Direction marker: money coming in vs. money going out.
pub fn type_marker(transaction: &Transaction) -> &'static str {
    if transaction.is_income() { "↓" } else { "↑" }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn shorten(description: &str, max: usize) -> String {
    if description.chars().count() <= max {
        return description.to_string();
    }
    let mut short: String = description.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

pub fn print_table(transactions: &[&Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<15} {:<17} {:<2} {:<42} {:<15} {:>14}",
        "Id", "Date", "", "Description", "Category", "Amount"
    );
    for transaction in transactions {
        println!(
            "{:<15} {:<17} {:<2} {:<42} {:<15} {:>14}",
            transaction.id,
            transaction.date.format("%Y-%m-%d %H:%M").to_string(),
            type_marker(transaction),
            shorten(&transaction.description, 42),
            transaction.category.label(),
            signed_currency(transaction),
        );
    }
}

pub fn print_statistics(stats: &Statistics) {
    println!("Balance:       {}", format_currency(stats.total));
    println!(
        "Income:        {}  ({} entries)",
        format_currency(stats.income_total),
        stats.income_count
    );
    println!(
        "Expenses:      {}  ({} entries)",
        format_currency(stats.expense_total),
        stats.expense_count
    );
    println!("Entries:       {}", stats.count);
    println!("Expense ratio: {}%", stats.expense_ratio);
}
