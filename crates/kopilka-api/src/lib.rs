//! HTTP server rendering the finance tracker pages
//!
//! Routes are organized into modules:
//! - routes::home: Overview with totals and recent transactions
//! - routes::categories: Category list, category dialog, category transactions
//! - routes::transactions: Create form, detail view, edit and delete
//!
//! JSON endpoints live under `/api`.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use kopilka_config::Config;
use kopilka_core::{AmountFormat, Finance, FinanceSummary};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub finance: Arc<RwLock<Finance>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, finance: Finance) -> Self {
        Self {
            finance: Arc::new(RwLock::new(finance)),
            config,
        }
    }

    /// Amount rendering rules from the currency section
    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::from(&self.config.currency)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::categories::{
        api_categories, api_category_transactions, category_delete, category_save,
        page_categories, page_category_transactions,
    };
    use routes::home::page_home;
    use routes::transactions::{
        api_transaction_detail, page_transaction_detail, page_transaction_new,
        transaction_create, transaction_delete, transaction_update,
    };

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/summary", get(api_summary))
        .route("/categories", get(api_categories))
        .route("/categories/:id/transactions", get(api_category_transactions))
        .route("/transactions/:id", get(api_transaction_detail))
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api", api)
        // Page routes
        .route("/", get(page_home))
        .route("/categories", get(page_categories).post(category_save))
        .route("/categories/:id", get(page_category_transactions))
        .route("/categories/:id/delete", post(category_delete))
        .route("/transactions/new", get(page_transaction_new).post(transaction_create))
        .route("/transactions/:id", get(page_transaction_detail).post(transaction_update))
        .route("/transactions/:id/delete", post(transaction_delete))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Totals across all categories (JSON API)
async fn api_summary(State(state): State<AppState>) -> ApiResult<Json<FinanceSummary>> {
    let finance = state.finance.read().await;
    Ok(Json(finance.summary()?))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Копилка</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        kopilka_utils::escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Обзор", "🏠"),
        ("/categories", "Категории", "🗂️"),
        ("/transactions/new", "Новая транзакция", "➕"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-emerald-600'>Копилка</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-emerald-50 text-emerald-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Wrap page content with the base template and sidebar
pub fn page_response(title: &str, current_path: &str, inner_content: &str) -> String {
    base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
        nav_sidebar(current_path), inner_content))
}

/// Render a page into an HTML response
pub fn render_page(title: &str, current_path: &str, inner_content: &str) -> Html<String> {
    Html(page_response(title, current_path, inner_content))
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is stopped.
pub async fn start_server(config: Config, finance: Finance) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, finance);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Kopilka server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Overview)");
    log::info!("  - /categories (Category management)");
    log::info!("  - /categories/:id (Category transactions)");
    log::info!("  - /transactions/new (New transaction)");
    log::info!("  - /transactions/:id (Transaction detail)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    pub fn demo_state() -> AppState {
        AppState::new(Config::default(), Finance::with_demo_data().unwrap())
    }

    pub async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
        let response = create_router(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_text(response).await)
    }

    /// POST a url-encoded form; returns status, `Location` header and body
    pub async fn post_form(state: &AppState, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        (status, location, body_text(response).await)
    }
}
