//! Overview page: totals, recent transactions and category shortcuts

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use kopilka_core::{transactions_count_label, Category, CategoryType, Finance, Route};
use kopilka_utils::escape_html;

use super::components::{category_icon, transaction_list};
use super::core_error_page;
use crate::AppState;

fn summary_card(label: &str, value: &str, tone: &str) -> String {
    format!(
        r#"<div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>{}</p><p class='text-2xl font-bold {}'>{}</p></div>"#,
        label, tone, value
    )
}

fn category_link(finance: &Finance, category: &Category) -> String {
    let route = Route::CategoryTransactions { category_id: category.id.clone() };
    format!(
        r#"<a href='{}' class='flex items-center gap-3 p-3 rounded-lg hover:bg-gray-50'>
            {}
            <div><p class='font-medium'>{}</p><p class='text-xs text-gray-500'>{}</p></div>
        </a>"#,
        route.path(),
        category_icon(Some(category), "w-9 h-9"),
        escape_html(&category.title),
        transactions_count_label(finance.transactions().count_for_category(&category.id))
    )
}

/// Overview page
pub async fn page_home(State(state): State<AppState>) -> Response {
    let finance = state.finance.read().await;
    let format = state.amount_format();
    let summary = match finance.summary() {
        Ok(summary) => summary,
        Err(e) => return core_error_page(&e),
    };

    let recent = finance.transactions().recent(state.config.display.recent_transactions);
    let recent_html = transaction_list(&format, &recent, |id| finance.categories().get(id));

    let sections: Vec<String> = [CategoryType::Income, CategoryType::Expense]
        .iter()
        .map(|ty| {
            let links: Vec<String> = finance
                .categories()
                .by_type(*ty)
                .into_iter()
                .map(|c| category_link(&finance, c))
                .collect();
            format!(
                r#"<div><h4 class='text-sm font-semibold text-gray-500 uppercase mb-2'>{}</h4>{}</div>"#,
                ty.heading(),
                if links.is_empty() {
                    "<p class='text-sm text-gray-400 px-3'>Нет категорий</p>".to_string()
                } else {
                    links.join("")
                }
            )
        })
        .collect();

    let balance_tone = if summary.balance.is_sign_negative() && !summary.balance.is_zero() {
        "text-rose-600"
    } else {
        "text-emerald-600"
    };

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <h2 class='text-2xl font-bold'>Обзор</h2>
            <a href='{}' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>+ Новая транзакция</a>
        </div>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>{}{}{}</div>
        <div class='grid grid-cols-1 lg:grid-cols-3 gap-6'>
            <div class='lg:col-span-2 bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Последние транзакции</h3>
                {}
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <div class='flex items-center justify-between mb-4'>
                    <h3 class='text-lg font-semibold'>Категории</h3>
                    <a href='{}' class='text-sm text-emerald-600 hover:underline'>Все</a>
                </div>
                <div class='space-y-4'>{}</div>
            </div>
        </div>"#,
        Route::NewTransaction { category: None }.path(),
        summary_card("Доходы", &format.unsigned(summary.total_income), "text-emerald-600"),
        summary_card("Расходы", &format.unsigned(summary.total_expense), "text-rose-600"),
        summary_card("Баланс", &format.signed(summary.balance), balance_tone),
        recent_html,
        Route::Categories.path(),
        sections.join("")
    );

    crate::render_page("Обзор", "/", &inner_content).into_response()
}
