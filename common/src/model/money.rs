//! Monetary string handling for SolarMarket custom fields.
//!
//! Field values arrive as free text typed by staff ("R$ 1.234,56", "1234.56",
//! "0,5") or as API-normalized strings ("12.34"). Everything is converted to a
//! plain `f64` for arithmetic and only rounded at persistence points.

/// Default delimiter used inside multi-value text fields.
pub const SEPARATOR: &str = " | ";

/// Parses a potentially Brazilian-formatted monetary string into a number.
///
/// Strips an `R$` prefix. When a comma is present the string is assumed to be
/// in pt-BR convention: dots are thousands separators and the comma is the
/// decimal separator. Otherwise the string is parsed as-is. Anything
/// unparseable yields `0.0` — human-entered fields must never abort a load.
pub fn parse_money(raw: &str) -> f64 {
    let mut s = raw.trim().trim_start_matches("R$").trim().to_string();
    if s.is_empty() {
        return 0.0;
    }
    if s.contains(',') {
        s = s.replace('.', "").replace(',', ".");
    }
    // Tolerate trailing junk the same way parseFloat would.
    let numeric: &str = {
        let mut end = 0;
        for (i, c) in s.char_indices() {
            if c.is_ascii_digit() || c == '.' || (i == 0 && c == '-') {
                end = i + c.len_utf8();
            } else {
                break;
            }
        }
        &s[..end]
    };
    numeric.parse::<f64>().unwrap_or(0.0)
}

/// Rounds to two decimal places, half-up, with an epsilon nudge so values like
/// `1.005` (stored as `1.00499…`) land on the expected cent.
pub fn round_to_cents(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Formats a number in the pt-BR convention without the currency symbol,
/// e.g. `1234.5` → `"1234,50"`. Used when re-serializing legacy pipe lines.
pub fn format_number_br(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

/// Formats a number as Brazilian currency, e.g. `1234.5` → `"R$ 1.234,56"`.
/// Grouping is applied to the integer part only.
pub fn format_currency_br(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0 + 0.5).floor() as u64;
    let int_part = cents / 100;
    let frac_part = cents % 100;

    let digits = int_part.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brazilian_convention() {
        assert_eq!(parse_money("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_money("0,5"), 0.5);
        assert_eq!(parse_money("12,00"), 12.0);
    }

    #[test]
    fn parses_api_normalized_strings() {
        assert_eq!(parse_money("1234.56"), 1234.56);
        assert_eq!(parse_money("0.00"), 0.0);
        assert_eq!(parse_money("-3.5"), -3.5);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("abc"), 0.0);
        assert_eq!(parse_money("R$ "), 0.0);
    }

    #[test]
    fn rounding_is_half_up_with_epsilon() {
        assert_eq!(round_to_cents(103.0049999), 103.00);
        assert_eq!(round_to_cents(103.005), 103.01);
        assert_eq!(round_to_cents(2.675), 2.68);
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency_br(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency_br(0.0), "R$ 0,00");
        assert_eq!(format_currency_br(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency_br(-12.3), "-R$ 12,30");
    }
}
