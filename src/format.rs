use chrono::{Local, Locale, NaiveDate};
use itertools::Itertools;

/// Formats a COP price: `$ ` prefix, no decimals, `.` as thousands separator.
pub fn format_price(price: f64) -> String {
    let rounded = if price.is_finite() { price.round() } else { 0.0 };
    let digits = format!("{}", rounded.abs() as u64);
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk))
        .join(".");
    if rounded < 0.0 {
        format!("-$ {}", grouped)
    } else {
        format!("$ {}", grouped)
    }
}

/// Spanish long date, e.g. `16 de octubre de 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format_localized("%-d de %B de %Y", Locale::es_ES)
        .to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
