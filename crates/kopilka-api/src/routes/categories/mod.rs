//! Category routes - Category list, category dialog and category transactions
//!
//! Features:
//! - Income and expense sections with transaction counts
//! - Create and edit dialog (`/categories?edit=<id>`)
//! - Delete; transactions of a deleted category stay and show as uncategorized
//! - Per-category transaction list with total and a pre-filled create link
//!
//! Structure:
//! - api.rs: JSON API and form submission endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_categories,
    api_category_transactions,
    category_delete,
    category_save,
    CategoryFormData,
    CategoryListItem,
};
pub use page::{
    page_categories,
    page_category_transactions,
    render_categories,
};
