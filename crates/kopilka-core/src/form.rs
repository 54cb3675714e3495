//! Form controllers for transactions and categories
//!
//! Drafts hold the raw strings typed into the form. Nothing touches the
//! stores until `submit` has validated every field, so a cancelled edit leaves
//! the stored record exactly as it was.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::categories::CategoryStore;
use crate::error::{CoreError, CoreResult};
use crate::finance::Finance;
use crate::models::{Category, CategoryPatch, NewTransaction, Transaction, TransactionPatch};
use crate::navigation::Navigation;
use crate::transactions::max_amount;
use crate::types::{CategoryColor, CategoryIcon, CategoryType};

/// Date format of `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Finest amount precision accepted from the form
pub const AMOUNT_FRACTION_DIGITS: u32 = 3;

// ==================== Errors ====================

/// Per-field validation messages, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Failure of a form submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid form: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FormError {
    /// Field errors to show next to the inputs, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            FormError::Core(_) => None,
        }
    }
}

// ==================== Transaction Form ====================

/// Whether the form creates a transaction or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { transaction_id: String },
}

/// Raw transaction form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionDraft {
    pub title: String,
    /// Unsigned magnitude as typed, `,` or `.` as decimal separator
    pub amount: String,
    pub category_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub note: String,
}

impl TransactionDraft {
    /// Empty draft dated `today`, optionally pre-selecting a category
    pub fn blank(category: Option<&str>, today: NaiveDate) -> Self {
        Self {
            category_id: category.unwrap_or_default().to_string(),
            date: today.format(DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// Draft showing a stored transaction; the amount is shown unsigned
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            title: transaction.title.clone(),
            amount: transaction.magnitude().normalize().to_string(),
            category_id: transaction.category_id.clone(),
            date: transaction.date.format(DATE_FORMAT).to_string(),
            note: transaction.note.clone().unwrap_or_default(),
        }
    }

    /// Validate every field against `categories`, collecting all errors
    fn validate(&self, categories: &CategoryStore) -> Result<ValidDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Введите название");
        }

        let magnitude = match parse_magnitude(&self.amount) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.add("amount", message);
                None
            }
        };

        let category_id = self.category_id.trim();
        let category_type = if category_id.is_empty() {
            errors.add("category_id", "Выберите категорию");
            None
        } else {
            match categories.get(category_id) {
                Some(category) => Some(category.category_type),
                None => {
                    errors.add("category_id", "Категория не найдена");
                    None
                }
            }
        };

        let date = match self.date.trim() {
            "" => {
                errors.add("date", "Укажите дату");
                None
            }
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("date", "Неверный формат даты");
                    None
                }
            },
        };

        match (magnitude, category_type, date) {
            (Some(magnitude), Some(category_type), Some(date)) if errors.is_empty() => {
                let note = self.note.trim();
                Ok(ValidDraft {
                    title: title.to_string(),
                    amount: match category_type {
                        CategoryType::Expense => -magnitude,
                        CategoryType::Income => magnitude,
                    },
                    category_id: category_id.to_string(),
                    date,
                    note: (!note.is_empty()).then(|| note.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validated draft with the signed amount
struct ValidDraft {
    title: String,
    amount: Decimal,
    category_id: String,
    date: NaiveDate,
    note: Option<String>,
}

fn parse_magnitude(raw: &str) -> Result<Decimal, &'static str> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err("Введите сумму");
    }
    let value = Decimal::from_str(&cleaned).map_err(|_| "Сумма должна быть числом")?;
    if value <= Decimal::ZERO {
        return Err("Сумма должна быть больше нуля");
    }
    if value.normalize().scale() > AMOUNT_FRACTION_DIGITS {
        return Err("Не больше трёх знаков после запятой");
    }
    if value > max_amount() {
        return Err("Слишком большая сумма");
    }
    Ok(value.normalize())
}

/// Controller behind the create and edit transaction views
#[derive(Debug, Clone)]
pub struct TransactionForm {
    mode: FormMode,
    draft: TransactionDraft,
    /// Draft restored by `cancel`
    initial: TransactionDraft,
    errors: FieldErrors,
    delete_requested: bool,
}

impl TransactionForm {
    /// Create form, pre-selecting `category` when given
    pub fn create(category: Option<&str>, today: NaiveDate) -> Self {
        Self::with_initial(FormMode::Create, TransactionDraft::blank(category, today))
    }

    /// Edit form showing `transaction`
    pub fn edit(transaction: &Transaction) -> Self {
        Self::with_initial(
            FormMode::Edit { transaction_id: transaction.id.clone() },
            TransactionDraft::from_transaction(transaction),
        )
    }

    /// Edit form for the stored transaction with `transaction_id`
    pub fn open(finance: &Finance, transaction_id: &str) -> CoreResult<Self> {
        finance.transaction(transaction_id).map(Self::edit)
    }

    fn with_initial(mode: FormMode, initial: TransactionDraft) -> Self {
        Self {
            mode,
            draft: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            delete_requested: false,
        }
    }

    /// Replace the draft with submitted fields
    pub fn with_draft(mut self, draft: TransactionDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TransactionDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the draft differs from what the form was opened with
    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    /// Validate the draft and persist it
    ///
    /// Create mode inserts and navigates home; edit mode updates the stored
    /// transaction and returns to read-only display.
    pub fn submit(&mut self, finance: &mut Finance) -> Result<Navigation, FormError> {
        let valid = match self.draft.validate(finance.categories()) {
            Ok(valid) => valid,
            Err(errors) => {
                log::debug!("Transaction form rejected: {}", errors);
                self.errors = errors.clone();
                return Err(FormError::Invalid(errors));
            }
        };
        self.errors.clear();

        match &self.mode {
            FormMode::Create => {
                finance.add_transaction(NewTransaction {
                    title: valid.title,
                    amount: valid.amount,
                    date: valid.date,
                    category_id: valid.category_id,
                    note: valid.note,
                })?;
                self.draft = self.initial.clone();
                Ok(Navigation::home())
            }
            FormMode::Edit { transaction_id } => {
                let updated = finance.update_transaction(
                    transaction_id,
                    TransactionPatch {
                        title: Some(valid.title),
                        amount: Some(valid.amount),
                        date: Some(valid.date),
                        category_id: Some(valid.category_id),
                        note: Some(valid.note),
                    },
                )?;
                self.initial = TransactionDraft::from_transaction(&updated);
                self.draft = self.initial.clone();
                Ok(Navigation::ReadOnly)
            }
        }
    }

    /// Discard the draft without persisting anything
    pub fn cancel(&mut self) -> Navigation {
        self.draft = self.initial.clone();
        self.errors.clear();
        self.delete_requested = false;
        match self.mode {
            FormMode::Create => Navigation::Back,
            FormMode::Edit { .. } => Navigation::ReadOnly,
        }
    }

    /// Open the delete confirmation; only an edited transaction can be deleted
    pub fn request_delete(&mut self) -> CoreResult<()> {
        if !self.is_edit() {
            return Err(CoreError::InvalidOperation {
                message: "cannot delete a transaction that is not saved".to_string(),
            });
        }
        self.delete_requested = true;
        Ok(())
    }

    /// Close the delete confirmation
    pub fn abort_delete(&mut self) {
        self.delete_requested = false;
    }

    pub fn is_delete_requested(&self) -> bool {
        self.delete_requested
    }

    /// Delete the transaction after `request_delete` and navigate home
    pub fn confirm_delete(&mut self, finance: &mut Finance) -> CoreResult<Navigation> {
        let transaction_id = match &self.mode {
            FormMode::Edit { transaction_id } if self.delete_requested => transaction_id,
            _ => {
                return Err(CoreError::InvalidOperation {
                    message: "delete was not requested".to_string(),
                })
            }
        };
        finance.delete_transaction(transaction_id)?;
        self.delete_requested = false;
        Ok(Navigation::home())
    }
}

// ==================== Category Form ====================

/// Raw category form fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDraft {
    pub title: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub category_type: String,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            icon: CategoryIcon::ShoppingCart.name().to_string(),
            color: CategoryColor::Gray.token().to_string(),
            category_type: CategoryType::Expense.to_string(),
        }
    }
}

impl CategoryDraft {
    pub fn from_category(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            icon: category.icon.name().to_string(),
            color: category.color.token().to_string(),
            category_type: category.category_type.to_string(),
        }
    }
}

/// Controller behind the category dialog
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    editing: Option<String>,
    draft: CategoryDraft,
    errors: FieldErrors,
}

impl CategoryForm {
    /// Blank create dialog
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialog editing `category`
    pub fn edit(category: &Category) -> Self {
        Self {
            editing: Some(category.id.clone()),
            draft: CategoryDraft::from_category(category),
            errors: FieldErrors::new(),
        }
    }

    /// Dialog editing the stored category with `category_id`
    pub fn open(finance: &Finance, category_id: &str) -> CoreResult<Self> {
        finance.category(category_id).map(Self::edit)
    }

    pub fn with_draft(mut self, draft: CategoryDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &CategoryDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Create or update the category, then reset to a blank dialog
    ///
    /// Unknown icon and color names fall back to the catalogue defaults.
    pub fn submit(&mut self, finance: &mut Finance) -> Result<Category, FormError> {
        let mut errors = FieldErrors::new();
        let title = self.draft.title.trim().to_string();
        if title.is_empty() {
            errors.add("title", "Введите название");
        }
        let category_type = CategoryType::from_str(&self.draft.category_type)
            .map_err(|_| errors.add("type", "Выберите тип"))
            .ok();

        let category_type = match category_type {
            Some(category_type) if errors.is_empty() => category_type,
            _ => {
                log::debug!("Category form rejected: {}", errors);
                self.errors = errors.clone();
                return Err(FormError::Invalid(errors));
            }
        };
        let icon = CategoryIcon::resolve(&self.draft.icon);
        let color = CategoryColor::resolve(&self.draft.color);

        let category = match &self.editing {
            Some(id) => finance.update_category(
                id,
                CategoryPatch {
                    title: Some(title),
                    icon: Some(icon),
                    color: Some(color),
                    category_type: Some(category_type),
                },
            )?,
            None => finance.create_category(&title, icon, color, category_type)?,
        };
        *self = Self::new();
        Ok(category)
    }
}

// ==================== Tests ====================
