//! Conversion between typed amounts and their pt-BR display form.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CurrencyParseError;

/// Placeholder rendered instead of figures while values are hidden.
pub const MASKED_VALUE: &str = "••••••";

/// Runway values above this many months are displayed as `12+`.
pub const RUNWAY_DISPLAY_CAP: f64 = 12.0;

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

/// Parses free-form user input into an amount, treating every typed digit as cents.
///
/// Separators, symbols and letters are discarded, so `"R$ 1.234,56"` and `"123456"`
/// both yield `1234.56`.
pub fn parse_currency_input(raw: &str) -> Result<f64, CurrencyParseError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(CurrencyParseError::NoDigits(raw.to_string()));
    }
    let cents: u64 = digits
        .parse()
        .map_err(|_| CurrencyParseError::Overflow(raw.to_string()))?;
    Ok(cents as f64 / 100.0)
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if let Some(pos) = body.find('.') {
        let int_part = group_digits(&body[..pos], locale.grouping_separator);
        body = format!("{}{}{}", int_part, locale.decimal_separator, &body[pos + 1..]);
    } else {
        body = group_digits(&body, locale.grouping_separator);
    }
    body
}

fn group_digits(int_part: &str, separator: char) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    format!("{}{}", sign, grouped)
}

/// Formats an amount as `R$ 1.234,50`; negatives carry a leading minus sign.
pub fn format_currency(locale: &LocaleConfig, amount: f64) -> String {
    let body = format_number(locale, amount.abs(), 2);
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{} {}", locale.currency_symbol, body)
    } else {
        format!("{} {}", locale.currency_symbol, body)
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Short `dd/mm` label used in transaction listings.
pub fn format_day_month(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d/%m").to_string()
}

pub fn format_runway(months: f64) -> String {
    if months > RUNWAY_DISPLAY_CAP {
        "12+".into()
    } else {
        format!("{:.1}", months)
    }
}

pub fn mask_value() -> &'static str {
    MASKED_VALUE
}

/// Lower-case Portuguese month name for the period header.
pub fn month_name(date: impl Datelike) -> &'static str {
    match date.month() {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}
