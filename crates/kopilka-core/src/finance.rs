//! Process-wide finance state
//!
//! `Finance` owns both stores and is the only way handlers mutate them. It
//! adds the cross-store checks a single store cannot make: a transaction must
//! point at an existing category when it is created or moved.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::categories::CategoryStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{Category, CategoryPatch, NewTransaction, Transaction, TransactionPatch};
use crate::transactions::{total_amount, TransactionStore};
use crate::types::{CategoryColor, CategoryIcon, CategoryType};

/// Category stores plus transaction store
#[derive(Debug, Clone, Default)]
pub struct Finance {
    categories: CategoryStore,
    transactions: TransactionStore,
}

/// One category with its transactions, newest first
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTransactions<'a> {
    pub category: &'a Category,
    pub transactions: Vec<&'a Transaction>,
    pub total: Decimal,
}

/// Totals for the overview page and `/api/summary`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub total_categories: usize,
    pub income_categories: usize,
    pub expense_categories: usize,
    pub total_transactions: usize,
    /// Sum of positive amounts
    pub total_income: Decimal,
    /// Sum of negative amounts (negative or zero)
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl Finance {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with the demo categories and grocery transactions
    pub fn with_demo_data() -> CoreResult<Self> {
        let mut finance = Self::new();
        seed_demo_data(&mut finance)?;
        Ok(finance)
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn category(&self, id: &str) -> CoreResult<&Category> {
        self.categories
            .get(id)
            .ok_or_else(|| CoreError::CategoryNotFound { id: id.to_string() })
    }

    pub fn transaction(&self, id: &str) -> CoreResult<&Transaction> {
        self.transactions
            .get(id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })
    }

    // ==================== Categories ====================

    pub fn create_category(
        &mut self,
        title: &str,
        icon: CategoryIcon,
        color: CategoryColor,
        category_type: CategoryType,
    ) -> CoreResult<Category> {
        let category = self.categories.create(title, icon, color, category_type)?;
        log::info!("Category created: {} \"{}\" ({})", category.id, category.title, category.category_type);
        Ok(category)
    }

    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> CoreResult<Category> {
        let category = self.categories.update(id, patch)?;
        log::info!("Category updated: {} \"{}\"", category.id, category.title);
        Ok(category)
    }

    /// Remove a category; its transactions stay and become orphaned
    pub fn delete_category(&mut self, id: &str) -> CoreResult<Category> {
        let category = self.categories.delete(id)?;
        let orphaned = self.transactions.count_for_category(id);
        if orphaned > 0 {
            log::warn!(
                "Category {} deleted with {} transaction(s) still referencing it",
                id,
                orphaned
            );
        } else {
            log::info!("Category deleted: {}", id);
        }
        Ok(category)
    }

    /// Transactions whose category no longer exists
    pub fn orphaned_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .list()
            .iter()
            .filter(|t| !self.categories.contains(&t.category_id))
            .collect()
    }

    // ==================== Transactions ====================

    pub fn add_transaction(&mut self, new: NewTransaction) -> CoreResult<Transaction> {
        if !self.categories.contains(&new.category_id) {
            return Err(CoreError::CategoryNotFound { id: new.category_id });
        }
        let transaction = self.transactions.insert(new)?;
        log::info!(
            "Transaction created: {} \"{}\" {} in category {}",
            transaction.id,
            transaction.title,
            transaction.amount,
            transaction.category_id
        );
        Ok(transaction)
    }

    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> CoreResult<Transaction> {
        if let Some(ref category_id) = patch.category_id {
            if !self.categories.contains(category_id) {
                return Err(CoreError::CategoryNotFound { id: category_id.clone() });
            }
        }
        let transaction = self.transactions.update(id, patch)?;
        log::info!("Transaction updated: {} ({})", transaction.id, transaction.amount);
        Ok(transaction)
    }

    pub fn delete_transaction(&mut self, id: &str) -> CoreResult<Transaction> {
        let transaction = self.transactions.delete(id)?;
        log::info!("Transaction deleted: {}", id);
        Ok(transaction)
    }

    // ==================== Views ====================

    pub fn category_transactions(&self, category_id: &str) -> CoreResult<CategoryTransactions<'_>> {
        let category = self.category(category_id)?;
        let transactions = self.transactions.list_for_category(category_id);
        let total = total_amount(transactions.iter().copied())?;
        Ok(CategoryTransactions {
            category,
            transactions,
            total,
        })
    }

    pub fn summary(&self) -> CoreResult<FinanceSummary> {
        let (income, expense) = self.categories.partition_by_type();
        let all = self.transactions.list();
        let total_income = total_amount(all.iter().filter(|t| !t.is_expense()))?;
        let total_expense = total_amount(all.iter().filter(|t| t.is_expense()))?;
        let balance = total_income
            .checked_add(total_expense)
            .ok_or_else(|| CoreError::InvalidOperation {
                message: "balance overflowed".to_string(),
            })?;
        Ok(FinanceSummary {
            total_categories: self.categories.len(),
            income_categories: income.len(),
            expense_categories: expense.len(),
            total_transactions: all.len(),
            total_income,
            total_expense,
            balance,
        })
    }
}

// ==================== Demo Data ====================

fn seed_demo_data(finance: &mut Finance) -> CoreResult<()> {
    let categories = [
        ("1", "Зарплата", CategoryIcon::Briefcase, CategoryColor::Emerald, CategoryType::Income),
        ("2", "Фриланс", CategoryIcon::Code, CategoryColor::Blue, CategoryType::Income),
        ("3", "Продукты", CategoryIcon::ShoppingCart, CategoryColor::Orange, CategoryType::Expense),
        ("4", "Транспорт", CategoryIcon::Car, CategoryColor::Purple, CategoryType::Expense),
        ("5", "Развлечения", CategoryIcon::Smile, CategoryColor::Pink, CategoryType::Expense),
    ];
    for (id, title, icon, color, category_type) in categories {
        finance.categories.insert(Category {
            id: id.to_string(),
            title: title.to_string(),
            icon,
            color,
            category_type,
        })?;
    }

    let transactions = [
        ("1", "Пятёрочка", -2340, 27, Some("Продукты на неделю")),
        ("2", "Перекрёсток", -1580, 26, None),
        ("3", "Магнит", -980, 25, None),
        ("4", "Лента", -3200, 24, None),
        ("5", "Ашан", -4500, 23, None),
    ];
    for (id, title, amount, day, note) in transactions {
        let date = NaiveDate::from_ymd_opt(2026, 1, day)
            .ok_or_else(|| CoreError::validation("date", "invalid demo date"))?;
        finance.transactions.insert_existing(Transaction {
            id: id.to_string(),
            title: title.to_string(),
            amount: Decimal::from(amount),
            date,
            category_id: "3".to_string(),
            note: note.map(str::to_string),
        })?;
    }

    log::debug!(
        "Seeded {} categories and {} transactions",
        finance.categories.len(),
        finance.transactions.len()
    );
    Ok(())
}

// ==================== Tests ====================
