//! Decoders for the two encodings found in SolarMarket text fields.
//!
//! Every field is tried as a JSON array first (the format all saves emit);
//! when that fails the value is treated as legacy pipe-delimited lines, one
//! item per line, with the schema inferred from the token count:
//!
//! Cost fields          | Referral field            | Fuel field
//! ---------------------|---------------------------|----------------------------------
//! 2: desc, amount      | 3..4: user, name, phone,  | 4+: user, purpose, desc, qty, p/L
//! 3: user, desc, amount|        amount             | 5+ with ISO date in column 2:
//! 4+: user, date, desc,| 5+: user, date, name,     |    user, date, purpose, desc,
//!     amount           |     phone, amount         |    qty, p/L; a missing price
//!                      |                           |    column yields a zero-cost item
//!                      |                           |    and a trailing cost column
//!                      |                           |    from legacy writers is ignored
//!
//! Lines below the minimum token count are dropped silently; a load must
//! never fail because of one malformed human-entered line. The token-count
//! heuristic is ambiguous when a description itself contains `" | "`, which
//! is why persistence always re-emits JSON.

use super::item::{CostItem, FuelItem, FuelUse, ReferralItem};
use super::money::{SEPARATOR, parse_money};

/// Splits a legacy line on the `" | "` separator, trimming parts and
/// discarding empty tokens.
pub fn split_line(line: &str) -> Vec<&str> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    line.split(SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// `true` for a `YYYY-MM-DD` shaped token. Used to disambiguate legacy fuel
/// lines, where the date column is optional.
fn is_iso_date(token: &str) -> bool {
    let b = token.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

fn lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').filter(|l| !l.trim().is_empty())
}

/// Item ids for legacy lines, which carry none: position-based and unique
/// within one parse.
fn synthetic_id(index: usize) -> i64 {
    index as i64 + 1
}

/// Parses a generic cost field (material, daily labor, expenses, tool
/// rental, meals). Empty input yields an empty list.
pub fn parse_cost_field(raw: &str) -> Vec<CostItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<CostItem>>(raw) {
        return items;
    }
    lines(raw)
        .enumerate()
        .filter_map(|(i, line)| {
            let parts = split_line(line);
            let item = match parts.len() {
                0 | 1 => return None,
                2 => CostItem {
                    id: synthetic_id(i),
                    user: None,
                    date: None,
                    description: parts[0].to_string(),
                    amount: parse_money(parts[1]),
                },
                3 => CostItem {
                    id: synthetic_id(i),
                    user: Some(parts[0].to_string()),
                    date: None,
                    description: parts[1].to_string(),
                    amount: parse_money(parts[2]),
                },
                _ => CostItem {
                    id: synthetic_id(i),
                    user: Some(parts[0].to_string()),
                    date: Some(parts[1].to_string()),
                    description: parts[2].to_string(),
                    amount: parse_money(parts[3]),
                },
            };
            Some(item)
        })
        .collect()
}

/// Parses the referral field. Lines with fewer than 3 tokens are dropped.
pub fn parse_referral_field(raw: &str) -> Vec<ReferralItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<ReferralItem>>(raw) {
        return items;
    }
    lines(raw)
        .enumerate()
        .filter_map(|(i, line)| {
            let parts = split_line(line);
            if parts.len() < 3 {
                return None;
            }
            let item = if parts.len() >= 5 {
                ReferralItem {
                    id: synthetic_id(i),
                    user: Some(parts[0].to_string()),
                    date: Some(parts[1].to_string()),
                    name: parts[2].to_string(),
                    phone: parts[3].to_string(),
                    amount: parse_money(parts[4]),
                }
            } else {
                ReferralItem {
                    id: synthetic_id(i),
                    user: Some(parts[0].to_string()),
                    date: None,
                    name: parts[1].to_string(),
                    phone: parts.get(2).copied().unwrap_or_default().to_string(),
                    amount: parts.get(3).map(|p| parse_money(p)).unwrap_or(0.0),
                }
            };
            Some(item)
        })
        .collect()
}

/// Parses the fuel field. The purpose token must be literally `Venda` or
/// `Instalação`; anything else drops the line.
pub fn parse_fuel_field(raw: &str) -> Vec<FuelItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<FuelItem>>(raw) {
        return items;
    }
    lines(raw)
        .enumerate()
        .filter_map(|(i, line)| {
            let parts = split_line(line);
            if parts.len() < 4 {
                return None;
            }
            let has_date = parts.len() >= 5 && is_iso_date(parts[1]);
            let shift = usize::from(has_date);
            // Layout: user | [date] | purpose | desc | qty | price [| cost].
            // Legacy writers appended the derived cost as a last column; it
            // is recomputed, never read. A line cut short before the price
            // column stays as a degenerate zero-cost item.
            if parts.len() < 4 + shift {
                return None;
            }
            let purpose = parts[1 + shift];
            let description = parts[2 + shift].to_string();
            let quantity = parse_money(parts[3 + shift]);
            let price_per_liter = parts.get(4 + shift).map_or(0.0, |p| parse_money(p));

            let usage = match purpose {
                "Venda" => FuelUse::Sale {
                    distance_km: quantity,
                    price_per_liter,
                },
                "Instalação" => FuelUse::Installation {
                    liters: quantity,
                    price_per_liter,
                },
                _ => return None,
            };
            Some(FuelItem {
                id: synthetic_id(i),
                user: Some(parts[0].to_string()),
                date: has_date.then(|| parts[1].to_string()),
                description,
                usage,
            })
        })
        .collect()
}

/// Encodes an item list for persistence. Always the JSON-array format; the
/// pipe encoding is never written back.
pub fn serialize_items<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_input_parse_to_empty_lists() {
        assert!(parse_cost_field("").is_empty());
        assert!(parse_cost_field("   \n  \n").is_empty());
        assert!(parse_referral_field("").is_empty());
        assert!(parse_fuel_field("").is_empty());
    }

    #[test]
    fn cost_offsets_follow_token_count() {
        let raw = "Cabo | 150,00\n\
                   jean | Disjuntor | 80,00\n\
                   ana | 2024-03-02 | Inversor | 1.200,00\n\
                   so_um_token";
        let items = parse_cost_field(raw);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].description, "Cabo");
        assert_eq!(items[0].amount, 150.0);
        assert_eq!(items[0].user, None);

        assert_eq!(items[1].user.as_deref(), Some("jean"));
        assert_eq!(items[1].date, None);
        assert_eq!(items[1].amount, 80.0);

        assert_eq!(items[2].date.as_deref(), Some("2024-03-02"));
        assert_eq!(items[2].description, "Inversor");
        assert_eq!(items[2].amount, 1200.0);
    }

    #[test]
    fn cost_line_order_is_input_order() {
        let items = parse_cost_field("b | 2,00\na | 1,00");
        assert_eq!(items[0].description, "b");
        assert_eq!(items[1].description, "a");
        assert!(items[0].id != items[1].id);
    }

    #[test]
    fn referral_offsets() {
        let raw = "jean | 2024-01-10 | Carlos | 11999990000 | 500,00\n\
                   ana | Marcos | 11888880000 | 300,00\n\
                   curto | demais";
        let items = parse_referral_field(raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Carlos");
        assert_eq!(items[0].date.as_deref(), Some("2024-01-10"));
        assert_eq!(items[1].name, "Marcos");
        assert_eq!(items[1].phone, "11888880000");
        assert_eq!(items[1].date, None);
    }

    #[test]
    fn fuel_date_column_shifts_offsets() {
        let no_date = "jean | Venda | Visita cliente | 100 | 5,00";
        let with_date = "jean | 2024-06-01 | Venda | Visita cliente | 100 | 5,00";
        for raw in [no_date, with_date] {
            let items = parse_fuel_field(raw);
            assert_eq!(items.len(), 1, "raw: {raw}");
            match items[0].usage {
                FuelUse::Sale {
                    distance_km,
                    price_per_liter,
                } => {
                    assert_eq!(distance_km, 100.0);
                    assert_eq!(price_per_liter, 5.0);
                }
                _ => panic!("expected Sale"),
            }
        }
        assert_eq!(
            parse_fuel_field(with_date)[0].date.as_deref(),
            Some("2024-06-01")
        );
    }

    #[test]
    fn fuel_line_without_price_is_zero_cost() {
        let items = parse_fuel_field("jean | Venda | Visita cliente | 100");
        assert_eq!(items.len(), 1);
        match items[0].usage {
            FuelUse::Sale {
                distance_km,
                price_per_liter,
            } => {
                assert_eq!(distance_km, 100.0);
                assert_eq!(price_per_liter, 0.0);
            }
            _ => panic!("expected Sale"),
        }
        assert_eq!(items[0].cost(), 0.0);

        let dated = parse_fuel_field("jean | 2024-06-01 | Instalação | Obra | 20");
        assert_eq!(dated.len(), 1);
        assert_eq!(dated[0].cost(), 0.0);
        assert_eq!(dated[0].date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn fuel_unknown_purpose_drops_line() {
        let raw = "jean | Passeio | Praia | 100 | 5,00";
        assert!(parse_fuel_field(raw).is_empty());
    }

    #[test]
    fn json_array_wins_over_pipe_fallback() {
        let raw = r#"[{"id":1,"user":"jean","date":"2024-02-02",
            "descricao":"Par | com | pipes","valor":10.5}]"#;
        let items = parse_cost_field(raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Par | com | pipes");
        assert_eq!(items[0].amount, 10.5);
    }

    #[test]
    fn json_round_trip_preserves_count_order_and_amounts() {
        let raw = r#"[
            {"id":10,"descricao":"A","valor":1.11},
            {"id":20,"user":"ana","date":"2024-04-04","descricao":"B","valor":2.22}
        ]"#;
        let items = parse_cost_field(raw);
        let encoded = serialize_items(&items);
        let back = parse_cost_field(&encoded);
        assert_eq!(back.len(), items.len());
        for (a, b) in items.iter().zip(&back) {
            assert_eq!(a.id, b.id);
            assert!((a.amount - b.amount).abs() < 1e-9);
        }
    }

    #[test]
    fn fuel_json_round_trip() {
        let items = vec![FuelItem {
            id: 1,
            user: Some("jean".into()),
            date: Some("2024-06-01".into()),
            description: "Obra".into(),
            usage: FuelUse::Installation {
                liters: 20.0,
                price_per_liter: 5.0,
            },
        }];
        let encoded = serialize_items(&items);
        assert!(encoded.contains("\"finalidade\":\"Instalação\""));
        let back = parse_fuel_field(&encoded);
        assert_eq!(back, items);
    }
}
