//! In-memory transaction store

use kopilka_utils::generate_id;
use rust_decimal::Decimal;

use crate::categories::validate_title;
use crate::error::{CoreError, CoreResult};
use crate::models::{NewTransaction, Transaction, TransactionPatch};

/// Ordered collection of transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Newest first; equal dates keep insertion order
fn sort_newest_first(transactions: &mut [&Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Largest magnitude a single stored amount may have
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

fn validate_amount(amount: Decimal) -> CoreResult<Decimal> {
    if amount.abs() > max_amount() {
        return Err(CoreError::validation(
            "amount",
            &format!("magnitude must not exceed {}", max_amount()),
        ));
    }
    Ok(amount)
}

/// Sum of amounts; zero for an empty sequence
pub fn total_amount<'a, I>(transactions: I) -> CoreResult<Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.amount))
        .ok_or_else(|| CoreError::InvalidOperation {
            message: "total amount overflowed".to_string(),
        })
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transactions in insertion order
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Transactions of one category, newest first
    pub fn list_for_category(&self, category_id: &str) -> Vec<&Transaction> {
        let mut matching: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.category_id == category_id)
            .collect();
        sort_newest_first(&mut matching);
        matching
    }

    pub fn count_for_category(&self, category_id: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.category_id == category_id)
            .count()
    }

    /// The `limit` newest transactions across all categories
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut all: Vec<&Transaction> = self.transactions.iter().collect();
        sort_newest_first(&mut all);
        all.truncate(limit);
        all
    }

    /// Store a new transaction under a fresh id
    pub fn insert(&mut self, new: NewTransaction) -> CoreResult<Transaction> {
        let title = validate_title(&new.title)?;
        let amount = validate_amount(new.amount)?;

        let mut id = generate_id();
        while self.get(&id).is_some() {
            id = generate_id();
        }

        let transaction = Transaction {
            id,
            title,
            amount,
            date: new.date,
            category_id: new.category_id,
            note: normalize_note(new.note),
        };
        log::debug!("Stored transaction {} ({})", transaction.id, transaction.amount);
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Store a transaction that already carries an id
    pub fn insert_existing(&mut self, transaction: Transaction) -> CoreResult<Transaction> {
        if self.get(&transaction.id).is_some() {
            return Err(CoreError::DuplicateEntry { id: transaction.id });
        }
        let title = validate_title(&transaction.title)?;
        validate_amount(transaction.amount)?;
        let transaction = Transaction {
            title,
            note: normalize_note(transaction.note),
            ..transaction
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Apply the fields present in `patch` to the transaction with `id`
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> CoreResult<Transaction> {
        let title = patch.title.as_deref().map(validate_title).transpose()?;
        let amount = patch.amount.map(validate_amount).transpose()?;

        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })?;

        if let Some(title) = title {
            transaction.title = title;
        }
        if let Some(amount) = amount {
            transaction.amount = amount;
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(category_id) = patch.category_id {
            transaction.category_id = category_id;
        }
        if let Some(note) = patch.note {
            transaction.note = normalize_note(note);
        }

        log::debug!("Updated transaction {}", id);
        Ok(transaction.clone())
    }

    /// Remove the transaction with `id`
    pub fn delete(&mut self, id: &str) -> CoreResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })?;
        log::debug!("Deleted transaction {}", id);
        Ok(self.transactions.remove(index))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn new_tx(title: &str, amount: i64, day: u32, category_id: &str) -> NewTransaction {
        NewTransaction {
            title: title.to_string(),
            amount: Decimal::from(amount),
            date: date(day),
            category_id: category_id.to_string(),
            note: None,
        }
    }

    #[test]
    fn test_list_for_category_newest_first() {
        let mut store = TransactionStore::new();
        store.insert(new_tx("Магнит", -980, 25, "3")).unwrap();
        store.insert(new_tx("Пятёрочка", -2340, 27, "3")).unwrap();
        store.insert(new_tx("Зарплата", 90000, 26, "1")).unwrap();
        store.insert(new_tx("Лента", -3200, 24, "3")).unwrap();

        let titles: Vec<&str> = store
            .list_for_category("3")
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Пятёрочка", "Магнит", "Лента"]);
        assert_eq!(store.count_for_category("3"), 3);
        assert!(store.list_for_category("404").is_empty());
    }

    #[test]
    fn test_same_day_keeps_insertion_order() {
        let mut store = TransactionStore::new();
        store.insert(new_tx("first", -1, 20, "3")).unwrap();
        store.insert(new_tx("second", -2, 20, "3")).unwrap();
        let titles: Vec<&str> = store.list_for_category("3").iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(total_amount(std::iter::empty()).unwrap(), Decimal::ZERO);

        let mut store = TransactionStore::new();
        for (i, amount) in [-2340, -1580, -980, -3200, -4500].iter().enumerate() {
            store.insert(new_tx("t", *amount, 20 + i as u32, "3")).unwrap();
        }
        let forward = total_amount(store.list()).unwrap();
        let backward = total_amount(store.list().iter().rev()).unwrap();
        assert_eq!(forward, Decimal::from(-12600));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_total_amount_overflow_is_an_error() {
        let huge = Transaction {
            id: "1".to_string(),
            title: "huge".to_string(),
            amount: Decimal::MAX,
            date: date(1),
            category_id: "1".to_string(),
            note: None,
        };
        let pair = [huge.clone(), Transaction { id: "2".to_string(), ..huge }];
        let err = total_amount(&pair).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidOperation);
    }

    #[test]
    fn test_amount_ceiling() {
        let mut store = TransactionStore::new();
        let mut too_big = new_tx("big", 0, 1, "3");
        too_big.amount = max_amount() + Decimal::ONE;
        assert!(matches!(
            store.insert(too_big),
            Err(CoreError::ValidationError { ref field, .. }) if field == "amount"
        ));

        let mut at_limit = new_tx("limit", 0, 1, "3");
        at_limit.amount = -max_amount();
        let stored = store.insert(at_limit).unwrap();

        let patch = TransactionPatch { amount: Some(Decimal::MAX), ..Default::default() };
        assert!(store.update(&stored.id, patch).is_err());
        assert_eq!(store.get(&stored.id).unwrap().amount, -max_amount());
    }

    #[test]
    fn test_recent_limits_and_orders() {
        let mut store = TransactionStore::new();
        for day in [3, 9, 1, 7] {
            store.insert(new_tx(&format!("d{}", day), -10, day, "3")).unwrap();
        }
        let titles: Vec<&str> = store.recent(2).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["d9", "d7"]);
    }

    #[test]
    fn test_insert_validates_and_normalizes() {
        let mut store = TransactionStore::new();
        assert!(store.insert(new_tx("  ", -1, 1, "3")).is_err());

        let mut with_note = new_tx(" Ашан ", -4500, 23, "3");
        with_note.note = Some("   ".to_string());
        let stored = store.insert(with_note).unwrap();
        assert_eq!(stored.title, "Ашан");
        assert_eq!(stored.note, None);
    }

    #[test]
    fn test_update_and_not_found() {
        let mut store = TransactionStore::new();
        let stored = store.insert(new_tx("Пятёрочка", -2340, 27, "3")).unwrap();

        let updated = store
            .update(&stored.id, TransactionPatch {
                amount: Some(Decimal::from(-3000)),
                note: Some(Some("Продукты на неделю".to_string())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.amount, Decimal::from(-3000));
        assert_eq!(updated.title, "Пятёрочка");
        assert_eq!(updated.note.as_deref(), Some("Продукты на неделю"));

        let err = store.update("nope", TransactionPatch::default()).unwrap_err();
        assert_eq!(err, CoreError::TransactionNotFound { id: "nope".to_string() });
    }

    #[test]
    fn test_delete_removes_from_category_listing() {
        let mut store = TransactionStore::new();
        let stored = store.insert(new_tx("Пятёрочка", -2340, 27, "3")).unwrap();
        store.insert(new_tx("Магнит", -980, 25, "3")).unwrap();

        store.delete(&stored.id).unwrap();
        assert!(store.list_for_category("3").iter().all(|t| t.id != stored.id));
        assert!(store.delete(&stored.id).unwrap_err().is_not_found());
    }
}
