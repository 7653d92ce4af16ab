//! Cost line items stored inside SolarMarket custom fields.
//!
//! The vendor gives us opaque text slots; items are encoded as a JSON array
//! (current format) or as legacy `" | "`-delimited lines (read-only support,
//! see `parse`). Wire names keep the original Portuguese keys so data already
//! stored in production round-trips unchanged.

use serde::{Deserialize, Serialize};

/// The fixed round-trip fuel efficiency assumed for sale visits, in km per
/// liter. Shared by the editor preview and the aggregation path.
pub const FUEL_EFFICIENCY_KM_PER_LITER: f64 = 10.6;

/// A generic cost entry: description plus amount, with optional audit info
/// (who created it and when). `user`/`date` are `None` for entries written by
/// the oldest encodings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// ISO date (`YYYY-MM-DD`) of creation, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

/// A referral entry. Same shape as [`CostItem`] but identifies a person
/// (name + phone) instead of carrying a free description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferralItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

/// Purpose-specific data of a fuel entry, tagged on the wire by the literal
/// `finalidade` value. The cost is derived, never stored: stale `custo`
/// fields written by older clients are ignored on decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "finalidade")]
pub enum FuelUse {
    /// A sales visit: the car drives `distance_km` each way.
    #[serde(rename = "Venda")]
    Sale {
        #[serde(rename = "distancia")]
        distance_km: f64,
        #[serde(rename = "valorLitro")]
        price_per_liter: f64,
    },
    /// An installation: fuel is metered directly in liters.
    #[serde(rename = "Instalação")]
    Installation {
        #[serde(rename = "litros")]
        liters: f64,
        #[serde(rename = "valorLitro")]
        price_per_liter: f64,
    },
}

/// A fuel entry. At most one `Sale` and one `Installation` entry exist per
/// project; the editor enforces this, the parser does not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(flatten)]
    pub usage: FuelUse,
}

impl FuelItem {
    /// Derived cost of this entry. Sale applies the fixed round-trip
    /// efficiency constant; installation is a straight liters × price.
    pub fn cost(&self) -> f64 {
        match self.usage {
            FuelUse::Sale {
                distance_km,
                price_per_liter,
            } => (distance_km * 2.0 / FUEL_EFFICIENCY_KM_PER_LITER) * price_per_liter,
            FuelUse::Installation {
                liters,
                price_per_liter,
            } => liters * price_per_liter,
        }
    }

    /// Literal tag as it appears on the wire and in the UI.
    pub fn purpose_label(&self) -> &'static str {
        match self.usage {
            FuelUse::Sale { .. } => "Venda",
            FuelUse::Installation { .. } => "Instalação",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_cost_uses_round_trip_efficiency() {
        let item = FuelItem {
            id: 1,
            user: None,
            date: None,
            description: "Visita".into(),
            usage: FuelUse::Sale {
                distance_km: 100.0,
                price_per_liter: 5.0,
            },
        };
        // (100 * 2 / 10.6) * 5.00 ≈ 94.34
        assert!((item.cost() - 94.3396).abs() < 0.001);
    }

    #[test]
    fn installation_cost_is_liters_times_price() {
        let item = FuelItem {
            id: 2,
            user: None,
            date: None,
            description: String::new(),
            usage: FuelUse::Installation {
                liters: 20.0,
                price_per_liter: 5.0,
            },
        };
        assert_eq!(item.cost(), 100.0);
    }

    #[test]
    fn fuel_decode_ignores_stored_cost_field() {
        let json = r#"{"id":3,"user":"ana","date":"2024-05-01",
            "descricao":"Obra","finalidade":"Instalação",
            "litros":10.0,"valorLitro":6.0,"custo":999.0}"#;
        let item: FuelItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.cost(), 60.0);
        assert_eq!(item.purpose_label(), "Instalação");
    }

    #[test]
    fn cost_item_round_trips_legacy_keys() {
        let item = CostItem {
            id: 7,
            user: Some("jean".into()),
            date: Some("2024-01-31".into()),
            description: "Cabo 6mm".into(),
            amount: 250.0,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"descricao\""));
        assert!(json.contains("\"valor\""));
        let back: CostItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
