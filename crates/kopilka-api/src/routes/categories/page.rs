//! Category page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_categories: Category list with the create/edit dialog
//! - page_category_transactions: Transactions of one category
//!
//! Helper functions:
//! - render_categories: Category list content for a given dialog state

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use kopilka_core::{
    transactions_count_label, Category, CategoryColor, CategoryForm, CategoryIcon, CategoryType,
    Finance, Route,
};
use kopilka_utils::escape_html;
use serde::Deserialize;

use crate::routes::components::{category_icon, field_error, input_class, transaction_list};
use crate::routes::core_error_page;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    /// Id of the category opened in the dialog
    pub edit: Option<String>,
}

fn category_card(finance: &Finance, category: &Category) -> String {
    let route = Route::CategoryTransactions { category_id: category.id.clone() };
    let count = finance.transactions().count_for_category(&category.id);
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-4 flex items-center gap-4'>
            {}
            <a href='{}' class='flex-1 min-w-0 hover:underline'>
                <p class='font-semibold truncate'>{}</p>
                <p class='text-sm text-gray-500'>{}</p>
            </a>
            <a href='/categories?edit={}' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>Изменить</a>
            <form method='post' action='/categories/{}/delete'>
                <button type='submit' class='px-3 py-1.5 text-sm text-rose-600 border border-rose-200 rounded-lg hover:bg-rose-50'>Удалить</button>
            </form>
        </div>"#,
        category_icon(Some(category), "w-12 h-12 text-xl"),
        route.path(),
        escape_html(&category.title),
        transactions_count_label(count),
        urlencoding::encode(&category.id),
        urlencoding::encode(&category.id)
    )
}

fn category_section(finance: &Finance, category_type: CategoryType, categories: &[&Category]) -> String {
    let cards: Vec<String> = categories.iter().map(|c| category_card(finance, c)).collect();
    format!(
        r#"<section class='mb-6'>
            <h3 class='text-lg font-semibold mb-3'>{} <span class='text-gray-400 font-normal'>{}</span></h3>
            <div class='space-y-3'>{}</div>
        </section>"#,
        category_type.heading(),
        categories.len(),
        if cards.is_empty() {
            "<p class='text-gray-400'>Нет категорий</p>".to_string()
        } else {
            cards.join("")
        }
    )
}

/// Create/edit dialog
fn category_dialog(form: &CategoryForm) -> String {
    let draft = form.draft();
    let errors = form.errors();

    let (heading, id_field) = match form.editing_id() {
        Some(id) => (
            "Редактировать категорию",
            format!("<input type='hidden' name='id' value='{}'>", escape_html(id)),
        ),
        None => ("Новая категория", String::new()),
    };

    let type_options: String = [CategoryType::Expense, CategoryType::Income]
        .iter()
        .map(|ty| {
            format!(
                r#"<label class='flex items-center gap-2'><input type='radio' name='type' value='{}' {}>{}</label>"#,
                ty,
                if draft.category_type.eq_ignore_ascii_case(&ty.to_string()) { "checked" } else { "" },
                ty.label()
            )
        })
        .collect();

    let icon_options: String = CategoryIcon::SELECTABLE
        .iter()
        .map(|icon| {
            format!(
                r#"<label class='cursor-pointer' title='{}'><input type='radio' name='icon' value='{}' class='sr-only peer' {}><span class='block w-10 h-10 rounded-lg border flex items-center justify-center peer-checked:border-emerald-500 peer-checked:bg-emerald-50'>{}</span></label>"#,
                icon.name(),
                icon.name(),
                if draft.icon.eq_ignore_ascii_case(icon.name()) { "checked" } else { "" },
                icon.glyph()
            )
        })
        .collect();

    let color_options: String = CategoryColor::SELECTABLE
        .iter()
        .map(|color| {
            format!(
                r#"<label class='flex items-center gap-2 cursor-pointer'><input type='radio' name='color' value='{}' {}><span class='w-4 h-4 rounded-full {}'></span><span class='{}'>{}</span></label>"#,
                color.token(),
                if draft.color.eq_ignore_ascii_case(color.token()) { "checked" } else { "" },
                format!("bg-{}-500", color.token()),
                color.text_class(),
                color.label()
            )
        })
        .collect();

    format!(
        r#"<form method='post' action='/categories' class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            <h3 class='text-lg font-semibold'>{}</h3>
            {}
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Название</label>
                <input type='text' name='title' value='{}' class='{}'>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Тип</label>
                <div class='flex gap-4'>{}</div>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Иконка</label>
                <div class='grid grid-cols-7 gap-2'>{}</div>
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Цвет</label>
                <div class='grid grid-cols-2 gap-2'>{}</div>
            </div>
            <div class='flex gap-2 justify-end'>
                <a href='/categories' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Отмена</a>
                <button type='submit' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Сохранить</button>
            </div>
        </form>"#,
        heading,
        id_field,
        escape_html(&draft.title),
        input_class(errors, "title"),
        field_error(errors, "title"),
        type_options,
        field_error(errors, "type"),
        icon_options,
        color_options
    )
}

/// Category list content with the dialog in the given state
pub fn render_categories(finance: &Finance, form: &CategoryForm) -> String {
    let (income, expense) = finance.categories().partition_by_type();
    format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Категории</h2></div>
        <div class='grid grid-cols-1 lg:grid-cols-3 gap-6'>
            <div class='lg:col-span-2'>{}{}</div>
            <div>{}</div>
        </div>"#,
        category_section(finance, CategoryType::Income, &income),
        category_section(finance, CategoryType::Expense, &expense),
        category_dialog(form)
    )
}

/// Category list page
pub async fn page_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoriesQuery>,
) -> Response {
    let finance = state.finance.read().await;
    let form = match query.edit.as_deref() {
        Some(id) => match CategoryForm::open(&finance, id) {
            Ok(form) => form,
            Err(e) => return core_error_page(&e),
        },
        None => CategoryForm::new(),
    };
    crate::render_page("Категории", "/categories", &render_categories(&finance, &form)).into_response()
}

/// Transactions of one category
pub async fn page_category_transactions(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Response {
    let finance = state.finance.read().await;
    let format = state.amount_format();
    let view = match finance.category_transactions(&category_id) {
        Ok(view) => view,
        Err(e) => return core_error_page(&e),
    };
    let category = view.category;

    let total_label = if category.is_income() { "Всего получено" } else { "Всего потрачено" };
    let new_transaction = Route::NewTransaction { category: Some(category.id.clone()) };
    let list = transaction_list(&format, &view.transactions, |id| finance.categories().get(id));

    let inner_content = format!(
        r#"<div class='mb-4'><a href='/categories' class='text-sm text-gray-500 hover:underline'>← Категории</a></div>
        <div class='flex items-center justify-between mb-6'>
            <div class='flex items-center gap-4'>
                {}
                <div>
                    <h2 class='text-2xl font-bold'>{}</h2>
                    <p class='text-gray-500'>{} · {}</p>
                </div>
            </div>
            <a href='{}' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>+ Новая транзакция</a>
        </div>
        <div class='{} rounded-xl p-6 mb-6'>
            <p class='text-sm text-gray-600'>{}</p>
            <p class='text-3xl font-bold {}'>{}</p>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>{}</div>"#,
        category_icon(Some(category), "w-14 h-14 text-2xl"),
        escape_html(&category.title),
        category.category_type.label(),
        transactions_count_label(view.transactions.len()),
        new_transaction.path(),
        category.color.bg_class(),
        total_label,
        category.color.text_class(),
        format.unsigned(view.total),
        list
    );

    crate::render_page(&category.title, "/categories", &inner_content).into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_categories_page_sections() {
        let state = demo_state();
        let (status, body) = get(&state, "/categories").await;
        assert_eq!(status, StatusCode::OK);
        let income = body.find("Доходы").unwrap();
        let expense = body.find("Расходы").unwrap();
        let salary = body.find("Зарплата").unwrap();
        let groceries = body.find("Продукты").unwrap();
        assert!(income < salary && salary < expense && expense < groceries);
        assert!(body.contains("Новая категория"));
    }

    #[tokio::test]
    async fn test_categories_page_edit_dialog() {
        let state = demo_state();
        let (status, body) = get(&state, "/categories?edit=4").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Редактировать категорию"));
        assert!(body.contains("name='id' value='4'"));
        assert!(body.contains("value='Транспорт'"));
        assert!(body.contains("value='Car' class='sr-only peer' checked"));

        let (status, _) = get(&state, "/categories?edit=404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_category_transactions_page() {
        let state = demo_state();
        let (status, body) = get(&state, "/categories/3").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("5 транзакций"));
        assert!(body.contains("Всего потрачено"));
        assert!(body.contains("12\u{a0}600 ₽"));
        assert!(body.contains("- 2\u{a0}340 ₽"));
        assert!(body.contains("27 января"));
        assert!(body.contains("href='/transactions/new?category=3'"));
        assert!(body.find("Пятёрочка").unwrap() < body.find("Ашан").unwrap());
    }

    #[tokio::test]
    async fn test_income_category_page() {
        let state = demo_state();
        let (_, body) = get(&state, "/categories/1").await;
        assert!(body.contains("Всего получено"));
        assert!(body.contains("0 транзакций"));
        assert!(body.contains("Транзакций пока нет"));
    }

    #[tokio::test]
    async fn test_unknown_category_page() {
        let state = demo_state();
        let (status, body) = get(&state, "/categories/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Категория не найдена"));
    }
}
