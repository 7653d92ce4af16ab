//! Vendor wire types and the assembled per-project view model.
//!
//! Three resources are fetched per project (metadata, active proposal,
//! custom fields); [`ProjectAggregate::assemble`] folds them into the view
//! model every page renders from. The aggregate is ephemeral: it is rebuilt
//! on each load and after every write, never persisted locally.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::fields::{self, Category};
use super::item::{CostItem, FuelItem, ReferralItem};
use super::kpi::Kpis;
use super::money::parse_money;
use super::parse::{parse_cost_field, parse_fuel_field, parse_referral_field};
use super::totals::{self, FuelRounding};

/// `GET /solarmarket/projects/{id}` payload (the fields we read).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProjectMeta {
    pub identifier: i64,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClientRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /solarmarket/projects/{id}/proposals` payload.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Proposal {
    #[serde(rename = "pricingTable", default)]
    pub pricing_table: Vec<PricingRow>,
    #[serde(rename = "generatedAt", default)]
    pub generated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PricingRow {
    #[serde(default)]
    pub category: String,
    #[serde(rename = "salesValue", default)]
    pub sales_value: f64,
    #[serde(rename = "totalCost", default)]
    pub total_cost: f64,
}

/// One entry of `GET /solarmarket/projects/{id}/custom-fields`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomFieldEntry {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "customField")]
    pub custom_field: CustomFieldRef,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomFieldRef {
    pub key: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
}

/// Parsed item lists, one per category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryItems {
    pub material: Vec<CostItem>,
    pub daily_labor: Vec<CostItem>,
    pub project_expenses: Vec<CostItem>,
    pub fixed_expenses: Vec<CostItem>,
    pub tool_rental: Vec<CostItem>,
    pub meals: Vec<CostItem>,
    pub referral: Vec<ReferralItem>,
    pub fuel: Vec<FuelItem>,
}

impl CategoryItems {
    /// Cost items of a plain (non-referral, non-fuel) category.
    pub fn plain(&self, category: Category) -> &[CostItem] {
        match category {
            Category::Material => &self.material,
            Category::DailyLabor => &self.daily_labor,
            Category::ProjectExpenses => &self.project_expenses,
            Category::FixedExpenses => &self.fixed_expenses,
            Category::ToolRental => &self.tool_rental,
            Category::Meals => &self.meals,
            Category::Referral | Category::Fuel => &[],
        }
    }

    /// Mutable item list of a plain category, `None` for referral/fuel.
    pub fn plain_mut(&mut self, category: Category) -> Option<&mut Vec<CostItem>> {
        match category {
            Category::Material => Some(&mut self.material),
            Category::DailyLabor => Some(&mut self.daily_labor),
            Category::ProjectExpenses => Some(&mut self.project_expenses),
            Category::FixedExpenses => Some(&mut self.fixed_expenses),
            Category::ToolRental => Some(&mut self.tool_rental),
            Category::Meals => Some(&mut self.meals),
            Category::Referral | Category::Fuel => None,
        }
    }
}

/// Per-category subtotals plus the derived roll-ups.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryTotals {
    pub material: f64,
    pub daily_labor: f64,
    pub project_expenses: f64,
    pub fixed_expenses: f64,
    pub tool_rental: f64,
    pub meals: f64,
    pub referral: f64,
    pub fuel: f64,
    /// Everything that is not material, daily labor or fuel.
    pub other: f64,
    pub grand_total: f64,
}

impl CategoryTotals {
    pub fn of(&self, category: Category) -> f64 {
        match category {
            Category::Material => self.material,
            Category::DailyLabor => self.daily_labor,
            Category::ProjectExpenses => self.project_expenses,
            Category::FixedExpenses => self.fixed_expenses,
            Category::ToolRental => self.tool_rental,
            Category::Meals => self.meals,
            Category::Referral => self.referral,
            Category::Fuel => self.fuel,
        }
    }
}

/// The computed view model for one project.
#[derive(Clone, Debug, Default)]
pub struct ProjectAggregate {
    pub id: i64,
    pub client_name: String,
    /// Proposal generation date when available, else project creation date.
    pub created_at: Option<String>,
    pub archived: bool,
    pub proposal_value: f64,
    pub kit_value: f64,
    pub items: CategoryItems,
    pub totals: CategoryTotals,
    /// Normalized raw field values by key. Money fields are kept as the
    /// vendor sent them; file fields accumulate one URL per line.
    pub raw_fields: HashMap<String, String>,
}

impl ProjectAggregate {
    /// Folds the three vendor resources into the view model.
    pub fn assemble(
        meta: &ProjectMeta,
        proposal: &Proposal,
        fields_resp: &[CustomFieldEntry],
    ) -> ProjectAggregate {
        let raw_fields = normalize_raw_fields(fields_resp);
        let raw = |key: &str| raw_fields.get(key).map(String::as_str).unwrap_or("");

        let items = CategoryItems {
            material: parse_cost_field(raw(Category::Material.list_key())),
            daily_labor: parse_cost_field(raw(Category::DailyLabor.list_key())),
            project_expenses: parse_cost_field(raw(Category::ProjectExpenses.list_key())),
            fixed_expenses: parse_cost_field(raw(Category::FixedExpenses.list_key())),
            tool_rental: parse_cost_field(raw(Category::ToolRental.list_key())),
            meals: parse_cost_field(raw(Category::Meals.list_key())),
            referral: parse_referral_field(raw(Category::Referral.list_key())),
            fuel: parse_fuel_field(raw(Category::Fuel.list_key())),
        };

        let material = totals::total_costs(&items.material);
        let daily_labor = totals::total_costs(&items.daily_labor);
        let project_expenses = totals::total_costs(&items.project_expenses);
        let fixed_expenses = totals::total_costs(&items.fixed_expenses);
        let tool_rental = totals::total_costs(&items.tool_rental);
        let meals = totals::total_costs(&items.meals);
        let referral = totals::total_referrals(&items.referral);
        let fuel = totals::total_fuel(&items.fuel, FuelRounding::default());
        let other = project_expenses + fixed_expenses + tool_rental + meals + referral;
        let grand_total = material + daily_labor + fuel + other;

        let proposal_value: f64 = proposal.pricing_table.iter().map(|r| r.sales_value).sum();
        let kit_value = proposal
            .pricing_table
            .iter()
            .find(|r| r.category == "KIT")
            .map(|r| r.total_cost)
            .unwrap_or(0.0);

        // Fallback to the manually maintained custom fields when the
        // proposal endpoint has no pricing data.
        let proposal_value = if proposal_value != 0.0 {
            proposal_value
        } else {
            parse_money(raw(fields::VALOR_TOTAL))
        };
        let kit_value = if kit_value != 0.0 {
            kit_value
        } else {
            parse_money(raw(fields::VALOR_KIT))
        };

        ProjectAggregate {
            id: meta.identifier,
            client_name: meta
                .client
                .as_ref()
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| "—".to_string()),
            created_at: proposal.generated_at.clone().or(meta.created_at.clone()),
            archived: meta.deleted_at.is_some(),
            proposal_value,
            kit_value,
            items,
            totals: CategoryTotals {
                material,
                daily_labor,
                project_expenses,
                fixed_expenses,
                tool_rental,
                meals,
                referral,
                fuel,
                other,
                grand_total,
            },
            raw_fields,
        }
    }

    pub fn kpis(&self) -> Kpis {
        Kpis::derive(self.proposal_value, self.kit_value, self.totals.grand_total)
    }

    pub fn status_label(&self) -> &'static str {
        if self.archived { "Arquivado" } else { "Ativo" }
    }
}

/// Flattens the custom-field response into a key → value map. File fields
/// may repeat per key; their URLs accumulate newline-separated instead of
/// overwriting each other.
fn normalize_raw_fields(entries: &[CustomFieldEntry]) -> HashMap<String, String> {
    let mut raw: HashMap<String, String> = HashMap::new();
    for entry in entries {
        let value = entry.value.clone().unwrap_or_default();
        let value = value.trim().to_string();
        let key = entry.custom_field.key.clone();
        if entry.custom_field.field_type == "file" {
            raw.entry(key)
                .and_modify(|existing| {
                    existing.push('\n');
                    existing.push_str(&value);
                })
                .or_insert(value);
        } else {
            raw.insert(key, value);
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, field_type: &str, value: &str) -> CustomFieldEntry {
        CustomFieldEntry {
            value: Some(value.to_string()),
            custom_field: CustomFieldRef {
                key: key.to_string(),
                field_type: field_type.to_string(),
            },
        }
    }

    fn meta() -> ProjectMeta {
        ProjectMeta {
            identifier: 4242,
            client: Some(ClientRef {
                name: Some("Nilceia".into()),
            }),
            created_at: Some("2024-01-01T00:00:00Z".into()),
            deleted_at: None,
        }
    }

    fn proposal() -> Proposal {
        Proposal {
            pricing_table: vec![
                PricingRow {
                    category: "KIT".into(),
                    sales_value: 60_000.0,
                    total_cost: 40_000.0,
                },
                PricingRow {
                    category: "SERVICO".into(),
                    sales_value: 40_000.0,
                    total_cost: 0.0,
                },
            ],
            generated_at: Some("2024-02-01T00:00:00Z".into()),
        }
    }

    #[test]
    fn assembles_totals_and_kpis() {
        let fields = vec![
            field("[cap_custos]", "textarea", "Cabo | 1.000,00\nInversor | 2.000,00"),
            field("[cap_diarias]", "textarea", "jean | Diária | 500,00"),
            field(
                "[cap_quilometragem_percorrida]",
                "textarea",
                r#"[{"id":1,"descricao":"Obra","finalidade":"Instalação","litros":20.0,"valorLitro":5.0}]"#,
            ),
            field("[cap_dados_indicador]", "textarea", "ana | Carlos | 119999 | 400,00"),
        ];
        let agg = ProjectAggregate::assemble(&meta(), &proposal(), &fields);

        assert_eq!(agg.id, 4242);
        assert_eq!(agg.client_name, "Nilceia");
        assert_eq!(agg.proposal_value, 100_000.0);
        assert_eq!(agg.kit_value, 40_000.0);
        assert_eq!(agg.totals.material, 3_000.0);
        assert_eq!(agg.totals.daily_labor, 500.0);
        assert_eq!(agg.totals.fuel, 100.0);
        assert_eq!(agg.totals.referral, 400.0);
        assert_eq!(agg.totals.other, 400.0);
        assert_eq!(agg.totals.grand_total, 4_000.0);

        let k = agg.kpis();
        assert_eq!(k.gdis_value, 60_000.0);
        assert_eq!(k.tax, 7_200.0);
        assert_eq!(k.gross_profit, 56_000.0);
        // Proposal generation date wins over project creation date.
        assert_eq!(agg.created_at.as_deref(), Some("2024-02-01T00:00:00Z"));
        assert_eq!(agg.status_label(), "Ativo");
    }

    #[test]
    fn falls_back_to_custom_fields_without_pricing_table() {
        let fields = vec![
            field("[cap_valor_total]", "money", "50000.00"),
            field("[cap_valor_kit_fotovoltaico]", "money", "20000.00"),
        ];
        let agg = ProjectAggregate::assemble(&meta(), &Proposal::default(), &fields);
        assert_eq!(agg.proposal_value, 50_000.0);
        assert_eq!(agg.kit_value, 20_000.0);
    }

    #[test]
    fn file_fields_accumulate_instead_of_overwriting() {
        let fields = vec![
            field("[cap_comprovantes]", "file", "https://a/1.pdf"),
            field("[cap_comprovantes]", "file", "https://a/2.pdf"),
        ];
        let agg = ProjectAggregate::assemble(&meta(), &Proposal::default(), &fields);
        assert_eq!(
            agg.raw_fields.get("[cap_comprovantes]").map(String::as_str),
            Some("https://a/1.pdf\nhttps://a/2.pdf")
        );
    }

    #[test]
    fn missing_fields_parse_to_empty_lists() {
        let agg = ProjectAggregate::assemble(&meta(), &proposal(), &[]);
        assert!(agg.items.material.is_empty());
        assert!(agg.items.fuel.is_empty());
        assert_eq!(agg.totals.grand_total, 0.0);
    }
}
