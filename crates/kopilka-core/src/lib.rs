//! Core finance tracking: categories, transactions, forms and routes

pub mod categories;
pub mod error;
pub mod finance;
pub mod form;
pub mod format;
pub mod models;
pub mod navigation;
pub mod transactions;
pub mod types;

pub use categories::CategoryStore;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails};
pub use finance::{CategoryTransactions, Finance, FinanceSummary};
pub use form::{
    CategoryDraft, CategoryForm, FieldErrors, FormError, FormMode, TransactionDraft,
    TransactionForm,
};
pub use format::{
    format_amount, format_date, format_date_long, transactions_count_label, AmountFormat,
    AmountTone,
};
pub use models::{Category, CategoryPatch, NewTransaction, Transaction, TransactionPatch};
pub use navigation::{Navigation, Route};
pub use transactions::{max_amount, total_amount, TransactionStore};
pub use types::{CategoryColor, CategoryIcon, CategoryType};
