//! Registry of SolarMarket custom-field keys.
//!
//! The vendor API only returns fields that have a value, so discovering ids
//! from a GET is unreliable for empty projects. This static map is the source
//! of truth for every known field id, recovered from the production account.

/// Proposal-level fallback fields (used when the proposal endpoint returns no
/// pricing table).
pub const VALOR_TOTAL: &str = "[cap_valor_total]";
pub const VALOR_KIT: &str = "[cap_valor_kit_fotovoltaico]";

/// The eight cost categories managed by the editor. Each owns a text field
/// holding the encoded item list and a numeric field holding the rounded
/// category total, written back together on every save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Material,
    DailyLabor,
    ProjectExpenses,
    FixedExpenses,
    ToolRental,
    Meals,
    Referral,
    Fuel,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::ProjectExpenses,
        Category::FixedExpenses,
        Category::Material,
        Category::DailyLabor,
        Category::ToolRental,
        Category::Referral,
        Category::Meals,
        Category::Fuel,
    ];

    /// Key of the text field holding the encoded item list.
    pub fn list_key(self) -> &'static str {
        match self {
            Category::Material => "[cap_custos]",
            Category::DailyLabor => "[cap_diarias]",
            Category::ProjectExpenses => "[cap_despesas_projeto]",
            Category::FixedExpenses => "[cap_despesas_fixas_gerais]",
            Category::ToolRental => "[cap_ferram_escada_descricao]",
            Category::Meals => "[cap_alimentacao_itens]",
            Category::Referral => "[cap_dados_indicador]",
            Category::Fuel => "[cap_quilometragem_percorrida]",
        }
    }

    /// Key of the money field holding the rounded category total.
    pub fn total_key(self) -> &'static str {
        match self {
            Category::Material => "[cap_total_custos_material]",
            Category::DailyLabor => "[cap_total_diarias]",
            Category::ProjectExpenses => "[cap_total_despesas_projeto]",
            Category::FixedExpenses => "[cap_total_despesas_fixas_gerais]",
            Category::ToolRental => "[cap_aluguel_ferramentas]",
            Category::Meals => "[cap_alimentacao]",
            Category::Referral => "[cap_valor_indicacao]",
            Category::Fuel => "[cap_combustivel]",
        }
    }

    /// Display title, as shown on editor tabs and report sections.
    pub fn title(self) -> &'static str {
        match self {
            Category::Material => "Material Inst.",
            Category::DailyLabor => "Diárias/M.O.",
            Category::ProjectExpenses => "Projeto",
            Category::FixedExpenses => "Fixa/Admin",
            Category::ToolRental => "Aluguel",
            Category::Meals => "Alimentação",
            Category::Referral => "Indicação",
            Category::Fuel => "Combustível",
        }
    }
}

/// Every known custom-field key paired with its numeric id.
const ALL_FIELD_IDS: [(&str, u32); 20] = [
    ("[cap_nome_indicador]", 10073),
    ("[cap_indicacao]", 12019),
    ("[cap_rg_cliente]", 12644),
    ("[cap_combustivel]", 44994),
    ("[cap_ferram_escada_descricao]", 44991),
    ("[cap_dados_indicador]", 44996),
    ("[cap_custos]", 44974),
    ("[cap_total_custos]", 44999),
    ("[cap_total_custos_material]", 45005),
    ("[cap_aluguel_ferramentas]", 44981),
    ("[cap_quilometragem_percorrida]", 45008),
    ("[cap_despesas_projeto]", 45006),
    ("[cap_total_despesas_projeto]", 45004),
    ("[cap_despesas_fixas_gerais]", 45007),
    ("[cap_total_despesas_fixas_gerais]", 45002),
    ("[cap_diarias]", 45013),
    ("[cap_total_diarias]", 45014),
    ("[cap_valor_indicacao]", 44997),
    ("[cap_alimentacao]", 44988),
    ("[cap_alimentacao_itens]", 45029),
];

/// Resolves a field key to its numeric id, or `None` for unknown keys.
pub fn field_id(key: &str) -> Option<u32> {
    ALL_FIELD_IDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_registered_ids() {
        for cat in Category::ALL {
            assert!(field_id(cat.list_key()).is_some(), "{:?} list", cat);
            assert!(field_id(cat.total_key()).is_some(), "{:?} total", cat);
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(field_id("[cap_inexistente]"), None);
    }
}
