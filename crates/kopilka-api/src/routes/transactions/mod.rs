//! Transaction routes - Create form, detail view, edit and delete
//!
//! Features:
//! - Create form pre-filled from `?category=<id>`, returning to the overview
//! - Read-only detail with edit (`?mode=edit`) and two-step delete
//!   (`?confirm=delete`, then a confirmed POST)
//! - Field errors shown next to the inputs on invalid submissions
//!
//! Structure:
//! - api.rs: JSON API and form submission endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_transaction_detail,
    transaction_create,
    transaction_delete,
    transaction_update,
    DeleteFormData,
    TransactionFormData,
};

pub use page::{
    page_transaction_detail,
    page_transaction_new,
    render_transaction_detail,
    render_transaction_form,
};
