//! Display formatting for the pages. Money formatting itself lives in
//! `common`; this module adds the date and percent variants the views
//! need.

pub use common::model::money::{format_currency_br, format_number_br};

/// Formats an ISO date or timestamp (`YYYY-MM-DD…`) as `dd/mm/yyyy`.
/// Strings that do not look like a date come back unchanged.
pub fn format_date_br(iso: &str) -> String {
    let date = iso.split('T').next().unwrap_or(iso);
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if year.len() == 4 => format!("{}/{}/{}", day, month, year),
        _ => iso.to_string(),
    }
}

/// Formats a percentage with the Brazilian decimal comma, e.g. `71,33%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number_br(value))
}
