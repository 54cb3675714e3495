//! ru-RU presentation helpers: amounts, dates and plural forms

use chrono::{Datelike, NaiveDate};
use kopilka_config::CurrencyConfig;
use kopilka_utils::group_digits;
use rust_decimal::{Decimal, RoundingStrategy};

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Amount rendering rules
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFormat {
    pub symbol: String,
    pub group_separator: String,
    pub decimal_separator: String,
    pub max_fraction_digits: u32,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::from(&CurrencyConfig::default())
    }
}

impl From<&CurrencyConfig> for AmountFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            group_separator: config.thousands_separator.clone(),
            decimal_separator: config.decimal_separator.clone(),
            max_fraction_digits: config.max_fraction_digits,
        }
    }
}

impl AmountFormat {
    fn round(&self, amount: Decimal) -> Decimal {
        amount
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }

    /// Grouped absolute value without sign or symbol: `2 340`, `1 234,5`
    pub fn number(&self, amount: Decimal) -> String {
        let text = self.round(amount.abs()).to_string();
        match text.split_once('.') {
            Some((int_part, frac_part)) => format!(
                "{}{}{}",
                group_digits(int_part, &self.group_separator),
                self.decimal_separator,
                frac_part
            ),
            None => group_digits(&text, &self.group_separator),
        }
    }

    /// Signed amount with currency: `- 2 340 ₽`, `+ 90 000 ₽`
    ///
    /// The sign follows the displayed digits, so an amount that rounds to zero
    /// shows as `+ 0 ₽`.
    pub fn signed(&self, amount: Decimal) -> String {
        let shown = self.round(amount);
        let sign = if shown.is_sign_negative() && !shown.is_zero() { "- " } else { "+ " };
        format!("{}{} {}", sign, self.number(amount), self.symbol)
    }

    /// Unsigned amount with currency: `2 340 ₽`
    pub fn unsigned(&self, amount: Decimal) -> String {
        format!("{} {}", self.number(amount), self.symbol)
    }
}

/// Format a signed amount with the default ru-RU rules
pub fn format_amount(amount: Decimal) -> String {
    AmountFormat::default().signed(amount)
}

/// Day of month and genitive month name: `27 января`
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_GENITIVE[date.month0() as usize])
}

/// Long date with year: `27 января 2026`
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{} {}", format_date(date), date.year())
}

/// Visual direction of an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTone {
    Income,
    Expense,
}

impl AmountTone {
    pub fn of(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            AmountTone::Expense
        } else {
            AmountTone::Income
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            AmountTone::Income => "text-emerald-600",
            AmountTone::Expense => "text-rose-600",
        }
    }
}

/// Pick the Russian plural form for `n`: (1 транзакция, 2 транзакции, 5 транзакций)
pub fn plural_ru<'a>(n: usize, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let rem100 = n % 100;
    let rem10 = n % 10;
    if (11..=14).contains(&rem100) {
        many
    } else if rem10 == 1 {
        one
    } else if (2..=4).contains(&rem10) {
        few
    } else {
        many
    }
}

/// `5 транзакций`
pub fn transactions_count_label(n: usize) -> String {
    format!("{} {}", n, plural_ru(n, "транзакция", "транзакции", "транзакций"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_amount_expense() {
        assert_eq!(format_amount(Decimal::from(-2340)), "- 2\u{a0}340 ₽");
    }

    #[test]
    fn test_format_amount_income_and_zero() {
        assert_eq!(format_amount(Decimal::from(90000)), "+ 90\u{a0}000 ₽");
        assert_eq!(format_amount(Decimal::ZERO), "+ 0 ₽");
        assert_eq!(format_amount(Decimal::from(-980)), "- 980 ₽");
        assert_eq!(format_amount(Decimal::from(-1234567)), "- 1\u{a0}234\u{a0}567 ₽");
    }

    #[test]
    fn test_format_amount_fractions() {
        assert_eq!(format_amount(dec("1234.50")), "+ 1\u{a0}234,5 ₽");
        assert_eq!(format_amount(dec("-0.1239")), "- 0,124 ₽");
        assert_eq!(format_amount(dec("10.000")), "+ 10 ₽");
        assert_eq!(format_amount(dec("-0.0004")), "+ 0 ₽");
    }

    #[test]
    fn test_custom_amount_format() {
        let format = AmountFormat {
            symbol: "₽".to_string(),
            group_separator: " ".to_string(),
            decimal_separator: ",".to_string(),
            max_fraction_digits: 2,
        };
        assert_eq!(format.signed(Decimal::from(-2340)), "- 2 340 ₽");
        assert_eq!(format.unsigned(Decimal::from(-2340)), "2 340 ₽");
        assert_eq!(format.number(dec("0.005")), "0,01");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();
        assert_eq!(format_date(date), "27 января");
        assert_eq!(format_date_long(date), "27 января 2026");
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(format_date(date), "1 мая");
    }

    #[test]
    fn test_amount_tone() {
        assert_eq!(AmountTone::of(Decimal::from(-1)), AmountTone::Expense);
        assert_eq!(AmountTone::of(Decimal::from(1)), AmountTone::Income);
        assert_eq!(AmountTone::Expense.text_class(), "text-rose-600");
        assert_eq!(AmountTone::Income.text_class(), "text-emerald-600");
    }

    #[test]
    fn test_plural_forms() {
        assert_eq!(transactions_count_label(1), "1 транзакция");
        assert_eq!(transactions_count_label(3), "3 транзакции");
        assert_eq!(transactions_count_label(5), "5 транзакций");
        assert_eq!(transactions_count_label(11), "11 транзакций");
        assert_eq!(transactions_count_label(21), "21 транзакция");
        assert_eq!(transactions_count_label(112), "112 транзакций");
        assert_eq!(transactions_count_label(0), "0 транзакций");
    }
}
