//! Route modules for the server
//!
//! - home: Overview page
//! - categories: Category list and dialog, category transactions
//! - transactions: Create form, detail, edit and delete
//! - components: HTML fragments shared by the pages
//!
//! Modules with both pages and endpoints follow the same layout:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and form submission endpoints
//! - page.rs: Page rendering

pub mod categories;
pub mod components;
pub mod home;
pub mod transactions;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use kopilka_core::{CoreError, Navigation, Route};
use kopilka_utils::escape_html;

/// Resolve a `back` target to a known view, defaulting to the overview
pub(crate) fn back_route(back: Option<&str>) -> Route {
    back.and_then(|target| match target.split_once('?') {
        Some((path, query)) => Route::parse(path, Some(query)),
        None => Route::parse(target, None),
    })
    .unwrap_or(Route::Home)
}

/// Turn a form controller's navigation into a 303 redirect
///
/// `ReadOnly` stays on `current`; `Back` returns to the `back` target.
pub(crate) fn navigate(navigation: Navigation, current: &Route, back: Option<&str>) -> Response {
    let target = match navigation {
        Navigation::To { route } => route.path(),
        Navigation::ReadOnly => current.path(),
        Navigation::Back => back_route(back).path(),
    };
    Redirect::to(&target).into_response()
}

/// Full page with an error message and the given status
pub(crate) fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let inner_content = format!(
        r#"<div class='max-w-lg mx-auto mt-16 bg-white rounded-xl shadow-sm p-8 text-center'>
            <p class='text-5xl mb-4'>🔍</p>
            <h2 class='text-2xl font-bold mb-2'>{}</h2>
            <p class='text-gray-500 mb-6'>{}</p>
            <a href='/' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>На главную</a>
        </div>"#,
        escape_html(title),
        escape_html(message)
    );
    (status, crate::render_page(title, "", &inner_content)).into_response()
}

/// Page for a failed store operation
pub(crate) fn core_error_page(error: &CoreError) -> Response {
    match error {
        CoreError::CategoryNotFound { .. } => {
            error_page(StatusCode::NOT_FOUND, "Категория не найдена", "Возможно, она была удалена.")
        }
        CoreError::TransactionNotFound { .. } => {
            error_page(StatusCode::NOT_FOUND, "Транзакция не найдена", "Возможно, она была удалена.")
        }
        other => {
            log::warn!("Request failed: {}", other);
            error_page(StatusCode::BAD_REQUEST, "Ошибка", &other.to_string())
        }
    }
}

/// Fallback for paths outside the route table
pub async fn not_found(uri: Uri) -> Response {
    log::debug!("No route for {}", uri);
    error_page(StatusCode::NOT_FOUND, "Страница не найдена", "Такой страницы не существует.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_back_route_accepts_known_views_only() {
        assert_eq!(back_route(Some("/categories/3")), Route::CategoryTransactions { category_id: "3".to_string() });
        assert_eq!(back_route(Some("https://example.com/")), Route::Home);
        assert_eq!(back_route(Some("/files/secret")), Route::Home);
        assert_eq!(back_route(None), Route::Home);
    }

    #[test]
    fn test_navigate_redirects() {
        let current = Route::TransactionDetail { transaction_id: "1".to_string() };

        let response = navigate(Navigation::ReadOnly, &current, None);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/transactions/1");

        let response = navigate(Navigation::home(), &current, None);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = navigate(Navigation::Back, &current, Some("/categories/3"));
        assert_eq!(response.headers()[header::LOCATION], "/categories/3");
    }
}
