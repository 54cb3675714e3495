//! Core data models: categories and transactions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CategoryColor, CategoryIcon, CategoryType};

/// Spending or income category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, unique within the store
    pub id: String,
    /// Display name
    pub title: String,
    /// Symbolic icon
    pub icon: CategoryIcon,
    /// Symbolic color
    pub color: CategoryColor,
    /// Income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Category {
    pub fn is_income(&self) -> bool {
        self.category_type == CategoryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }
}

/// Partial update of a category; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub title: Option<String>,
    pub icon: Option<CategoryIcon>,
    pub color: Option<CategoryColor>,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// Dated monetary event linked to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Merchant or description label
    pub title: String,
    /// Signed amount in rubles: negative is an expense, positive an income
    pub amount: Decimal,
    /// Calendar date
    pub date: NaiveDate,
    /// Owning category
    pub category_id: String,
    /// Optional free text
    pub note: Option<String>,
}

impl Transaction {
    /// Check if the transaction takes money out
    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Unsigned amount, as edited in forms
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }
}

/// Data required to insert a new [`Transaction`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: String,
    pub note: Option<String>,
}

/// Partial update of a transaction; `None` leaves the field untouched
///
/// `note: Some(None)` clears the note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<String>,
    pub note: Option<Option<String>>,
}

impl TransactionPatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category_id.is_none()
            && self.note.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: i64) -> Transaction {
        Transaction {
            id: "1".to_string(),
            title: "Пятёрочка".to_string(),
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
            category_id: "3".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_transaction_direction() {
        assert!(tx(-2340).is_expense());
        assert!(!tx(2340).is_expense());
        assert!(!tx(0).is_expense());
        assert_eq!(tx(-2340).magnitude(), Decimal::from(2340));
    }

    #[test]
    fn test_category_serializes_type_field() {
        let category = Category {
            id: "3".to_string(),
            title: "Продукты".to_string(),
            icon: CategoryIcon::ShoppingCart,
            color: CategoryColor::Orange,
            category_type: CategoryType::Expense,
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["icon"], "ShoppingCart");
        assert_eq!(json["color"], "orange");
    }

    #[test]
    fn test_empty_patch() {
        assert!(TransactionPatch::default().is_empty());
        let patch = TransactionPatch { note: Some(None), ..Default::default() };
        assert!(!patch.is_empty());
    }
}
