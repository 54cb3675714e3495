//! Transaction page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_transaction_new: Create form, optionally pre-filled with `?category=<id>`
//! - page_transaction_detail: Read-only detail, edit form (`?mode=edit`) or
//!   delete confirmation (`?confirm=delete`)
//!
//! Helper functions:
//! - render_transaction_form: Create/edit form for a controller state
//! - render_transaction_detail: Read-only transaction card

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use kopilka_core::{
    format_date_long, AmountFormat, CategoryType, Finance, FormMode, Route, Transaction,
    TransactionForm,
};
use kopilka_utils::escape_html;
use serde::Deserialize;

use crate::routes::components::{amount_span, category_icon, category_title, field_error, input_class};
use crate::routes::core_error_page;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NewTransactionQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionDetailQuery {
    /// `edit` opens the edit form
    pub mode: Option<String>,
    /// `delete` opens the delete confirmation
    pub confirm: Option<String>,
}

fn category_options(finance: &Finance, selected: &str) -> String {
    let mut html = format!(
        "<option value='' {}>Выберите категорию</option>",
        if selected.is_empty() { "selected" } else { "" }
    );
    for category_type in [CategoryType::Expense, CategoryType::Income] {
        html.push_str(&format!("<optgroup label='{}'>", category_type.heading()));
        for category in finance.categories().by_type(category_type) {
            html.push_str(&format!(
                "<option value='{}' {}>{}</option>",
                escape_html(&category.id),
                if category.id == selected { "selected" } else { "" },
                escape_html(&category.title)
            ));
        }
        html.push_str("</optgroup>");
    }
    html
}

/// Create/edit form for the controller's current draft and errors
///
/// `back` is where cancelling a new transaction returns to.
pub fn render_transaction_form(finance: &Finance, form: &TransactionForm, back: &str) -> String {
    let draft = form.draft();
    let errors = form.errors();

    let (heading, action, delete_link) = match form.mode() {
        FormMode::Create => ("Новая транзакция", "/transactions/new".to_string(), String::new()),
        FormMode::Edit { transaction_id } => {
            let path = Route::TransactionDetail { transaction_id: transaction_id.clone() }.path();
            let delete_link = format!(
                "<a href='{}?confirm=delete' class='px-4 py-2 text-rose-600 border border-rose-200 rounded-lg hover:bg-rose-50'>Удалить</a>",
                path
            );
            ("Редактирование", path, delete_link)
        }
    };

    format!(
        r#"<div class='max-w-xl mx-auto'>
        <h2 class='text-2xl font-bold mb-6'>{}</h2>
        <form method='post' action='{}' class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            <input type='hidden' name='back' value='{}'>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Название</label>
                <input type='text' name='title' value='{}' placeholder='Например, Пятёрочка' class='{}'>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Сумма, ₽</label>
                <input type='text' inputmode='decimal' name='amount' value='{}' placeholder='0' class='{}'>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Категория</label>
                <select name='category_id' class='{}'>{}</select>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Дата</label>
                <input type='date' name='date' value='{}' class='{}'>
                {}
            </div>
            <div>
                <label class='block text-sm text-gray-600 mb-1'>Заметка</label>
                <textarea name='note' rows='3' class='w-full px-3 py-2 border rounded-lg'>{}</textarea>
            </div>
            <div class='flex gap-2 justify-between'>
                <div>{}</div>
                <div class='flex gap-2'>
                    <button type='submit' name='action' value='cancel' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Отмена</button>
                    <button type='submit' name='action' value='save' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Сохранить</button>
                </div>
            </div>
        </form>
        </div>"#,
        heading,
        action,
        escape_html(back),
        escape_html(&draft.title),
        input_class(errors, "title"),
        field_error(errors, "title"),
        escape_html(&draft.amount),
        input_class(errors, "amount"),
        field_error(errors, "amount"),
        input_class(errors, "category_id"),
        category_options(finance, &draft.category_id),
        field_error(errors, "category_id"),
        escape_html(&draft.date),
        input_class(errors, "date"),
        field_error(errors, "date"),
        escape_html(&draft.note),
        delete_link
    )
}

fn delete_confirmation(transaction: &Transaction) -> String {
    let path = Route::TransactionDetail { transaction_id: transaction.id.clone() }.path();
    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center'>
            <div class='bg-white rounded-xl shadow-2xl w-full max-w-md p-6'>
                <h3 class='text-lg font-semibold mb-2'>Удалить транзакцию?</h3>
                <p class='text-gray-500 mb-6'>«{}» будет удалена без возможности восстановления.</p>
                <form method='post' action='{}/delete' class='flex gap-2 justify-end'>
                    <input type='hidden' name='confirmed' value='true'>
                    <a href='{}' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Отмена</a>
                    <button type='submit' class='px-4 py-2 bg-rose-600 text-white rounded-lg hover:bg-rose-700'>Удалить</button>
                </form>
            </div>
        </div>"#,
        escape_html(&transaction.title),
        path,
        path
    )
}

/// Read-only transaction card
pub fn render_transaction_detail(finance: &Finance, format: &AmountFormat, form: &TransactionForm, transaction: &Transaction) -> String {
    let category = finance.categories().get(&transaction.category_id);
    let back = match category {
        Some(c) => Route::CategoryTransactions { category_id: c.id.clone() },
        None => Route::Home,
    };
    let path = Route::TransactionDetail { transaction_id: transaction.id.clone() }.path();
    let note = match transaction.note.as_deref() {
        Some(note) => format!(
            "<div class='pt-4 border-t'><p class='text-sm text-gray-500 mb-1'>Заметка</p><p>{}</p></div>",
            escape_html(note)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class='max-w-xl mx-auto'>
        <div class='mb-4'><a href='{}' class='text-sm text-gray-500 hover:underline'>← Назад</a></div>
        <div class='bg-white rounded-xl shadow-sm p-6 space-y-4'>
            <div class='flex items-center gap-4'>
                {}
                <div>
                    <h2 class='text-2xl font-bold'>{}</h2>
                    <p class='text-gray-500'>{}</p>
                </div>
            </div>
            <p>{}</p>
            <div class='pt-4 border-t'><p class='text-sm text-gray-500 mb-1'>Дата</p><p>{}</p></div>
            {}
            <div class='flex gap-2 justify-end pt-4 border-t'>
                <a href='{}?confirm=delete' class='px-4 py-2 text-rose-600 border border-rose-200 rounded-lg hover:bg-rose-50'>Удалить</a>
                <a href='{}?mode=edit' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Изменить</a>
            </div>
        </div>
        </div>
        {}"#,
        back.path(),
        category_icon(category, "w-14 h-14 text-2xl"),
        escape_html(&transaction.title),
        category_title(category),
        amount_span(format, transaction.amount, "text-3xl font-bold"),
        format_date_long(transaction.date),
        note,
        path,
        path,
        if form.is_delete_requested() { delete_confirmation(transaction) } else { String::new() }
    )
}

/// Create form
pub async fn page_transaction_new(
    State(state): State<AppState>,
    Query(query): Query<NewTransactionQuery>,
) -> Response {
    let finance = state.finance.read().await;
    let category = query.category.filter(|c| !c.is_empty());
    let back = match &category {
        Some(id) if finance.categories().contains(id) => {
            Route::CategoryTransactions { category_id: id.clone() }
        }
        _ => Route::Home,
    };
    let form = TransactionForm::create(category.as_deref(), chrono::Local::now().date_naive());
    let inner_content = render_transaction_form(&finance, &form, &back.path());
    crate::render_page("Новая транзакция", "/transactions/new", &inner_content).into_response()
}

/// Transaction detail, edit form or delete confirmation
pub async fn page_transaction_detail(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<TransactionDetailQuery>,
) -> Response {
    let finance = state.finance.read().await;
    let mut form = match TransactionForm::open(&finance, &transaction_id) {
        Ok(form) => form,
        Err(e) => return core_error_page(&e),
    };
    let transaction = match finance.transaction(&transaction_id) {
        Ok(transaction) => transaction,
        Err(e) => return core_error_page(&e),
    };

    if query.mode.as_deref() == Some("edit") {
        let inner_content = render_transaction_form(&finance, &form, &Route::Home.path());
        return crate::render_page("Редактирование", "/transactions", &inner_content).into_response();
    }

    if query.confirm.as_deref() == Some("delete") {
        if let Err(e) = form.request_delete() {
            return core_error_page(&e);
        }
    }

    let format = state.amount_format();
    let inner_content = render_transaction_detail(&finance, &format, &form, transaction);
    crate::render_page(&transaction.title, "/transactions", &inner_content).into_response()
}
