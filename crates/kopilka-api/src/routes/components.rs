//! HTML fragments shared by the pages

use kopilka_core::form::FieldErrors;
use kopilka_core::{
    format_date, AmountFormat, AmountTone, Category, CategoryColor, CategoryIcon, Route,
    Transaction,
};
use kopilka_utils::escape_html;
use rust_decimal::Decimal;

/// Title shown for transactions whose category was deleted
pub const UNCATEGORIZED: &str = "Без категории";

/// Rounded icon tile in the category's colors
pub fn category_icon(category: Option<&Category>, size: &str) -> String {
    let (icon, color) = match category {
        Some(c) => (c.icon, c.color),
        None => (CategoryIcon::FALLBACK, CategoryColor::Gray),
    };
    format!(
        r#"<div class='{} {} {} rounded-xl flex items-center justify-center' title='{}'>{}</div>"#,
        size,
        color.bg_class(),
        color.text_class(),
        icon.name(),
        icon.glyph()
    )
}

pub fn category_title(category: Option<&Category>) -> String {
    category
        .map(|c| escape_html(&c.title))
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Signed amount colored by direction
pub fn amount_span(format: &AmountFormat, amount: Decimal, class: &str) -> String {
    format!(
        r#"<span class='{} {}'>{}</span>"#,
        class,
        AmountTone::of(amount).text_class(),
        format.signed(amount)
    )
}

/// One clickable row of a transaction list
pub fn transaction_row(format: &AmountFormat, transaction: &Transaction, category: Option<&Category>) -> String {
    let route = Route::TransactionDetail { transaction_id: transaction.id.clone() };
    format!(
        r#"<a href='{}' class='flex items-center gap-4 py-3 px-2 border-b last:border-b-0 hover:bg-gray-50 rounded-lg'>
            {}
            <div class='flex-1 min-w-0'>
                <p class='font-medium truncate'>{}</p>
                <p class='text-sm text-gray-500'>{} · {}</p>
            </div>
            {}
        </a>"#,
        route.path(),
        category_icon(category, "w-10 h-10 text-lg"),
        escape_html(&transaction.title),
        format_date(transaction.date),
        category_title(category),
        amount_span(format, transaction.amount, "font-semibold whitespace-nowrap")
    )
}

/// Transaction rows, or a placeholder when there are none
pub fn transaction_list<'a, F>(format: &AmountFormat, transactions: &[&Transaction], lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a Category>,
{
    if transactions.is_empty() {
        return "<p class='text-gray-500 text-center py-8'>Транзакций пока нет</p>".to_string();
    }
    transactions
        .iter()
        .map(|t| transaction_row(format, t, lookup(&t.category_id)))
        .collect::<Vec<_>>()
        .join("")
}

/// Message under an invalid input
pub fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(
            "<p class='text-sm text-rose-600 mt-1'>{}</p>",
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Input border, red when the field is invalid
pub fn input_class(errors: &FieldErrors, field: &str) -> &'static str {
    if errors.get(field).is_some() {
        "w-full px-3 py-2 border border-rose-400 rounded-lg"
    } else {
        "w-full px-3 py-2 border rounded-lg"
    }
}
