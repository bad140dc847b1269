use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ValidationError::UnknownType(input.trim().to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed category set with disjoint income and expense subsets. Categories
/// only drive display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    Bonus,
    OtherIncome,
    Groceries,
    Utilities,
    Rent,
    Entertainment,
    Transportation,
    Healthcare,
    Dining,
    Shopping,
    Education,
    OtherExpense,
}

impl Category {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_lowercase().as_str() {
            "salary" => Ok(Category::Salary),
            "freelance" => Ok(Category::Freelance),
            "investment" => Ok(Category::Investment),
            "bonus" => Ok(Category::Bonus),
            "other-income" => Ok(Category::OtherIncome),
            "groceries" => Ok(Category::Groceries),
            "utilities" => Ok(Category::Utilities),
            "rent" => Ok(Category::Rent),
            "entertainment" => Ok(Category::Entertainment),
            "transportation" => Ok(Category::Transportation),
            "healthcare" => Ok(Category::Healthcare),
            "dining" => Ok(Category::Dining),
            "shopping" => Ok(Category::Shopping),
            "education" => Ok(Category::Education),
            "other-expense" => Ok(Category::OtherExpense),
            _ => Err(ValidationError::UnknownCategory(input.trim().to_string())),
        }
    }

    pub fn transaction_type(self) -> TransactionType {
        match self {
            Category::Salary
            | Category::Freelance
            | Category::Investment
            | Category::Bonus
            | Category::OtherIncome => TransactionType::Income,
            Category::Groceries
            | Category::Utilities
            | Category::Rent
            | Category::Entertainment
            | Category::Transportation
            | Category::Healthcare
            | Category::Dining
            | Category::Shopping
            | Category::Education
            | Category::OtherExpense => TransactionType::Expense,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Bonus => "bonus",
            Category::OtherIncome => "other-income",
            Category::Groceries => "groceries",
            Category::Utilities => "utilities",
            Category::Rent => "rent",
            Category::Entertainment => "entertainment",
            Category::Transportation => "transportation",
            Category::Healthcare => "healthcare",
            Category::Dining => "dining",
            Category::Shopping => "shopping",
            Category::Education => "education",
            Category::OtherExpense => "other-expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input for a new entry. `amount` is the magnitude as entered; the sign
/// convention is applied at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub category: Category,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.category.transaction_type() != self.kind {
            return Err(ValidationError::CategoryMismatch {
                category: self.category,
                kind: self.kind,
            });
        }
        Ok(())
    }
}

/// One recorded entry. Income carries a positive amount, expense a negative
/// one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_case_insensitive() {
        assert_eq!(TransactionType::parse("Income").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::parse(" EXPENSE ").unwrap(), TransactionType::Expense);
    }

    #[test]
    fn test_parse_type_unknown() {
        let result = TransactionType::parse("transfer");
        assert_eq!(result.unwrap_err(), ValidationError::UnknownType("transfer".to_string()));
    }

    #[test]
    fn test_parse_category_kebab_case() {
        assert_eq!(Category::parse("other-income").unwrap(), Category::OtherIncome);
        assert_eq!(Category::parse("Groceries").unwrap(), Category::Groceries);
    }

    #[test]
    fn test_parse_category_empty_is_rejected() {
        let result = Category::parse("");
        assert_eq!(result.unwrap_err(), ValidationError::UnknownCategory(String::new()));
    }

    #[test]
    fn test_category_subsets() {
        assert_eq!(Category::Salary.transaction_type(), TransactionType::Income);
        assert_eq!(Category::Bonus.transaction_type(), TransactionType::Income);
        assert_eq!(Category::Rent.transaction_type(), TransactionType::Expense);
        assert_eq!(Category::OtherExpense.transaction_type(), TransactionType::Expense);
    }

    #[test]
    fn test_validate_rejects_mismatched_category() {
        let new = NewTransaction {
            description: "Salary".to_string(),
            amount: Decimal::new(100000, 2),
            kind: TransactionType::Income,
            category: Category::Groceries,
        };
        assert_eq!(
            new.validate().unwrap_err(),
            ValidationError::CategoryMismatch {
                category: Category::Groceries,
                kind: TransactionType::Income,
            }
        );
    }
}
