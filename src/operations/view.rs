use crate::models::transaction::{Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "all" => Some(TypeFilter::All),
            "income" => Some(TypeFilter::Income),
            "expense" => Some(TypeFilter::Expense),
            _ => None,
        }
    }

    pub fn matches(self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Income,
            TypeFilter::Income => TypeFilter::Expense,
            TypeFilter::Expense => TypeFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

/// Entries matching the type filter whose description contains the search
/// term (case-insensitively), ordered by id descending.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    type_filter: TypeFilter,
    search: &str,
) -> Vec<&'a Transaction> {
    let needle = search.trim().to_lowercase();
    let mut matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| type_filter.matches(t.kind))
        .filter(|t| needle.is_empty() || t.description.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| b.id.cmp(&a.id));
    matches
}
