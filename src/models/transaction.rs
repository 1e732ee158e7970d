use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// The fixed set of spending labels a transaction can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Income,
    Food,
    Housing,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Food => "Food",
            Category::Housing => "Housing",
            Category::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Income" => Some(Category::Income),
            "Food" => Some(Category::Food),
            "Housing" => Some(Category::Housing),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored ledger entry. The id is assigned by the store on insertion
/// and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
}

/// A parsed, categorized row that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
}

impl NewTransaction {
    pub fn new(date: NaiveDate, description: String, amount: Decimal, category: Category) -> Self {
        Self {
            date,
            description,
            amount,
            category,
        }
    }
}
