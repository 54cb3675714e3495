//! Category endpoints - JSON API and form submissions
//!
//! Endpoints:
//! - api_categories: All categories with transaction counts (JSON)
//! - api_category_transactions: One category with its transactions (JSON)
//! - category_save: Create or update from the category dialog
//! - category_delete: Delete a category

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use kopilka_core::{Category, CategoryDraft, CategoryForm, FormError, Route, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::page::render_categories;
use crate::error::ApiResult;
use crate::routes::core_error_page;
use crate::AppState;

/// Category list item for API response
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListItem {
    #[serde(flatten)]
    pub category: Category,
    pub transaction_count: usize,
}

/// Category with its transactions, newest first
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTransactionsResponse {
    pub category: Category,
    pub transactions: Vec<Transaction>,
    pub total: Decimal,
}

/// Fields posted by the category dialog; `id` is present when editing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryFormData {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub category_type: String,
}

impl Default for CategoryFormData {
    fn default() -> Self {
        let draft = CategoryDraft::default();
        Self {
            id: String::new(),
            title: draft.title,
            icon: draft.icon,
            color: draft.color,
            category_type: draft.category_type,
        }
    }
}

impl CategoryFormData {
    fn into_parts(self) -> (Option<String>, CategoryDraft) {
        let id = Some(self.id).filter(|id| !id.trim().is_empty());
        let draft = CategoryDraft {
            title: self.title,
            icon: self.icon,
            color: self.color,
            category_type: self.category_type,
        };
        (id, draft)
    }
}

pub async fn api_categories(State(state): State<AppState>) -> Json<Vec<CategoryListItem>> {
    let finance = state.finance.read().await;
    let items = finance
        .categories()
        .list()
        .iter()
        .map(|category| CategoryListItem {
            category: category.clone(),
            transaction_count: finance.transactions().count_for_category(&category.id),
        })
        .collect();
    Json(items)
}

pub async fn api_category_transactions(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> ApiResult<Json<CategoryTransactionsResponse>> {
    let finance = state.finance.read().await;
    let view = finance.category_transactions(&category_id)?;
    Ok(Json(CategoryTransactionsResponse {
        category: view.category.clone(),
        transactions: view.transactions.into_iter().cloned().collect(),
        total: view.total,
    }))
}

/// Create or update a category, then return to the list
///
/// Invalid input re-renders the list with the dialog errors (422).
pub async fn category_save(
    State(state): State<AppState>,
    Form(data): Form<CategoryFormData>,
) -> Response {
    let mut finance = state.finance.write().await;
    let (id, draft) = data.into_parts();

    let form = match id {
        Some(id) => CategoryForm::open(&finance, &id),
        None => Ok(CategoryForm::new()),
    };
    let mut form = match form {
        Ok(form) => form.with_draft(draft),
        Err(e) => return core_error_page(&e),
    };

    match form.submit(&mut finance) {
        Ok(_) => Redirect::to(&Route::Categories.path()).into_response(),
        Err(FormError::Invalid(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            crate::render_page("Категории", "/categories", &render_categories(&finance, &form)),
        )
            .into_response(),
        Err(FormError::Core(e)) => core_error_page(&e),
    }
}

/// Delete a category; its transactions are kept
pub async fn category_delete(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Response {
    let mut finance = state.finance.write().await;
    match finance.delete_category(&category_id) {
        Ok(_) => Redirect::to(&Route::Categories.path()).into_response(),
        Err(e) => core_error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use kopilka_core::{CategoryColor, CategoryIcon};

    #[tokio::test]
    async fn test_api_categories() {
        let state = demo_state();
        let (status, body) = get(&state, "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["title"], "Зарплата");
        assert_eq!(items[0]["type"], "income");
        assert_eq!(items[0]["icon"], "Briefcase");
        assert_eq!(items[2]["color"], "orange");
        assert_eq!(items[2]["transaction_count"], 5);
    }

    #[tokio::test]
    async fn test_api_category_transactions() {
        let state = demo_state();
        let (status, body) = get(&state, "/api/categories/3/transactions").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["category"]["title"], "Продукты");
        assert_eq!(json["transactions"][0]["title"], "Пятёрочка");
        assert_eq!(json["transactions"][0]["date"], "2026-01-27");
        assert_eq!(json["total"], "-12600");

        let (status, body) = get(&state, "/api/categories/404/transactions").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "CATEGORY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_category() {
        let state = demo_state();
        let (status, location, _) = post_form(
            &state,
            "/categories",
            "title=%D0%9A%D0%B0%D1%84%D0%B5&type=expense&icon=Coffee&color=orange",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/categories"));

        let finance = state.finance.read().await;
        let (income, expense) = finance.categories().partition_by_type();
        let cafe = expense.iter().find(|c| c.title == "Кафе").unwrap();
        assert_eq!(cafe.icon, CategoryIcon::Coffee);
        assert_eq!(cafe.color, CategoryColor::Orange);
        assert!(income.iter().all(|c| c.title != "Кафе"));
    }

    #[tokio::test]
    async fn test_create_category_defaults_when_fields_missing() {
        let state = demo_state();
        let (status, _, _) = post_form(&state, "/categories", "title=Gifts").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let finance = state.finance.read().await;
        let gifts = finance.categories().list().iter().find(|c| c.title == "Gifts").unwrap();
        assert_eq!(gifts.icon, CategoryIcon::ShoppingCart);
        assert_eq!(gifts.color, CategoryColor::Gray);
        assert!(gifts.is_expense());
    }

    #[tokio::test]
    async fn test_invalid_category_rerenders_with_errors() {
        let state = demo_state();
        let (status, _, body) = post_form(&state, "/categories", "title=&type=expense").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Введите название"));
        assert_eq!(state.finance.read().await.categories().len(), 5);
    }

    #[tokio::test]
    async fn test_update_category() {
        let state = demo_state();
        let (status, _, _) = post_form(
            &state,
            "/categories",
            "id=4&title=Taxi&type=expense&icon=Car&color=unknown",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let finance = state.finance.read().await;
        let taxi = finance.categories().get("4").unwrap();
        assert_eq!(taxi.title, "Taxi");
        assert_eq!(taxi.color, CategoryColor::Gray);
        assert_eq!(finance.categories().len(), 5);
    }

    #[tokio::test]
    async fn test_delete_category_keeps_transactions() {
        let state = demo_state();
        let (status, location, _) = post_form(&state, "/categories/3/delete", "").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/categories"));
        assert_eq!(state.finance.read().await.transactions().len(), 5);

        let (_, body) = get(&state, "/").await;
        assert!(body.contains("Без категории"));

        let (status, _, _) = post_form(&state, "/categories/3/delete", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
