//! Transaction endpoints - JSON API and form submissions
//!
//! Endpoints:
//! - api_transaction_detail: Get single transaction (JSON)
//! - transaction_create: Submit or cancel the create form
//! - transaction_update: Submit or cancel the edit form
//! - transaction_delete: Confirmed delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use kopilka_core::{FormError, Route, Transaction, TransactionDraft, TransactionForm};
use serde::Deserialize;

use super::page::render_transaction_form;
use crate::error::ApiResult;
use crate::routes::{core_error_page, navigate};
use crate::AppState;

/// Fields posted by the transaction form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionFormData {
    /// `save` or `cancel`
    pub action: String,
    /// Where cancelling a new transaction returns to
    pub back: String,
    pub title: String,
    pub amount: String,
    pub category_id: String,
    pub date: String,
    pub note: String,
}

impl TransactionFormData {
    fn is_cancel(&self) -> bool {
        self.action == "cancel"
    }

    fn draft(&self) -> TransactionDraft {
        TransactionDraft {
            title: self.title.clone(),
            amount: self.amount.clone(),
            category_id: self.category_id.clone(),
            date: self.date.clone(),
            note: self.note.clone(),
        }
    }
}

/// Fields posted by the delete confirmation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteFormData {
    pub confirmed: String,
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    let finance = state.finance.read().await;
    let transaction = finance.transaction(&transaction_id)?;
    Ok(Json(transaction.clone()))
}

/// Submit the create form
///
/// Success goes to the overview; cancel goes back; invalid input re-renders
/// the form with errors (422).
pub async fn transaction_create(
    State(state): State<AppState>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut finance = state.finance.write().await;
    let current = Route::NewTransaction { category: None };
    let back = Some(data.back.as_str()).filter(|b| !b.is_empty());
    let mut form = TransactionForm::create(None, chrono::Local::now().date_naive())
        .with_draft(data.draft());

    if data.is_cancel() {
        return navigate(form.cancel(), &current, back);
    }

    match form.submit(&mut finance) {
        Ok(navigation) => navigate(navigation, &current, back),
        Err(FormError::Invalid(_)) => {
            let inner_content = render_transaction_form(&finance, &form, &data.back);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                crate::render_page("Новая транзакция", "/transactions/new", &inner_content),
            )
                .into_response()
        }
        Err(FormError::Core(e)) => core_error_page(&e),
    }
}

/// Submit the edit form
///
/// Success and cancel both return to the read-only detail.
pub async fn transaction_update(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    Form(data): Form<TransactionFormData>,
) -> Response {
    let mut finance = state.finance.write().await;
    let current = Route::TransactionDetail { transaction_id: transaction_id.clone() };
    let mut form = match TransactionForm::open(&finance, &transaction_id) {
        Ok(form) => form.with_draft(data.draft()),
        Err(e) => return core_error_page(&e),
    };

    if data.is_cancel() {
        return navigate(form.cancel(), &current, None);
    }

    match form.submit(&mut finance) {
        Ok(navigation) => navigate(navigation, &current, None),
        Err(FormError::Invalid(_)) => {
            let inner_content = render_transaction_form(&finance, &form, &Route::Home.path());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                crate::render_page("Редактирование", "/transactions", &inner_content),
            )
                .into_response()
        }
        Err(FormError::Core(e)) => core_error_page(&e),
    }
}

/// Delete a transaction once the confirmation was accepted
///
/// Without `confirmed=true` the request only opens the confirmation.
pub async fn transaction_delete(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    Form(data): Form<DeleteFormData>,
) -> Response {
    let mut finance = state.finance.write().await;
    let current = Route::TransactionDetail { transaction_id: transaction_id.clone() };
    let mut form = match TransactionForm::open(&finance, &transaction_id) {
        Ok(form) => form,
        Err(e) => return core_error_page(&e),
    };

    if data.confirmed != "true" {
        return Redirect::to(&format!("{}?confirm=delete", current.path())).into_response();
    }

    let result = form
        .request_delete()
        .and_then(|_| form.confirm_delete(&mut finance));
    match result {
        Ok(navigation) => navigate(navigation, &current, None),
        Err(e) => core_error_page(&e),
    }
}
