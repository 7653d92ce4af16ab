//! Update function for the cost editor, Elm-style: receives the state,
//! the context and a message, mutates the state and returns whether the
//! view should re-render.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::fields::Category;
use common::model::item::{CostItem, FuelItem, FuelUse, ReferralItem};
use common::model::money::{format_number_br, parse_money};
use common::model::parse::serialize_items;
use common::model::totals::{self, FuelRounding};

use crate::model;
use crate::toast::show_toast;

use super::helpers::{can_modify, next_item_id, today_iso};
use super::messages::{DraftField, Msg};
use super::state::EditorComponent;

pub fn update(component: &mut EditorComponent, ctx: &Context<EditorComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(aggregate) => {
            component.aggregate = Some(*aggregate);
            component.loading = false;
            component.saving = false;
            component.confirm_delete = None;
            true
        }
        Msg::LoadFailed(message) => {
            component.loading = false;
            component.saving = false;
            show_toast(&format!("Erro ao carregar o projeto: {}", message));
            true
        }
        Msg::SetTab(category) => {
            component.active = category;
            component.confirm_delete = None;
            component.editing = None;
            component.draft.clear();
            true
        }
        Msg::SetDraft(field, value) => {
            let draft = &mut component.draft;
            match field {
                DraftField::Description => draft.description = value,
                DraftField::Amount => draft.amount = value,
                DraftField::Name => draft.name = value,
                DraftField::Phone => draft.phone = value,
                DraftField::Purpose => draft.purpose = value,
                DraftField::Quantity => draft.quantity = value,
                DraftField::Price => draft.price = value,
            }
            // Fuel redraws for the live cost preview; the other tabs
            // keep their inputs uncontrolled enough not to need it.
            component.active == Category::Fuel
        }
        Msg::Add => {
            commit_draft(component, &ctx.props().username);
            true
        }
        Msg::BeginEdit(id) => {
            begin_edit(component, &ctx.props().username, id);
            true
        }
        Msg::CancelEdit => {
            component.editing = None;
            component.draft.clear();
            true
        }
        Msg::RequestDelete(id) => {
            component.confirm_delete = Some(id);
            true
        }
        Msg::CancelDelete => {
            component.confirm_delete = None;
            true
        }
        Msg::ConfirmDelete(id) => {
            component.confirm_delete = None;
            if component.editing == Some(id) {
                component.editing = None;
                component.draft.clear();
            }
            if let Some(agg) = component.aggregate.as_mut() {
                match component.active {
                    Category::Referral => agg.items.referral.retain(|i| i.id != id),
                    Category::Fuel => agg.items.fuel.retain(|i| i.id != id),
                    plain => {
                        if let Some(items) = agg.items.plain_mut(plain) {
                            items.retain(|i| i.id != id);
                        }
                    }
                }
            }
            true
        }
        Msg::Save => {
            let Some(agg) = component.aggregate.as_ref() else {
                return false;
            };
            if component.saving {
                return false;
            }
            component.saving = true;

            let category = component.active;
            let (encoded, total) = match category {
                Category::Referral => (
                    serialize_items(&agg.items.referral),
                    totals::total_referrals(&agg.items.referral),
                ),
                Category::Fuel => (
                    serialize_items(&agg.items.fuel),
                    totals::total_fuel(&agg.items.fuel, FuelRounding::default()),
                ),
                plain => {
                    let items = agg.items.plain(plain);
                    (serialize_items(items), totals::total_costs(items))
                }
            };

            let project_id = ctx.props().project_id;
            let link = ctx.link().clone();
            spawn_local(async move {
                match model::save_category(project_id, category, encoded, total).await {
                    Ok(()) => link.send_message(Msg::Saved),
                    Err(err) => link.send_message(Msg::SaveFailed(err.message)),
                }
            });
            true
        }
        Msg::Saved => {
            show_toast("Custos salvos com sucesso.");
            // Re-fetch instead of trusting local state; someone else may
            // have written meanwhile.
            let project_id = ctx.props().project_id;
            let link = ctx.link().clone();
            spawn_local(async move {
                match model::load_project(project_id).await {
                    Ok(agg) => link.send_message(Msg::Loaded(Box::new(agg))),
                    Err(err) => link.send_message(Msg::LoadFailed(err.message)),
                }
            });
            false
        }
        Msg::SaveFailed(message) => {
            component.saving = false;
            show_toast(&format!("Erro ao salvar: {}", message));
            true
        }
    }
}

/// Commits the draft row: appends a new item, or, when an item is being
/// edited, replaces its content in place keeping the original `id`,
/// `user` and `date`. Empty or unparseable drafts are ignored and keep
/// the draft untouched.
fn commit_draft(component: &mut EditorComponent, username: &str) {
    let editing = component.editing;
    let Some(agg) = component.aggregate.as_mut() else {
        return;
    };
    let draft = &component.draft;

    match component.active {
        Category::Referral => {
            let name = draft.name.trim().to_string();
            if name.is_empty() {
                return;
            }
            let phone = draft.phone.trim().to_string();
            let amount = parse_money(&draft.amount);
            if let Some(id) = editing {
                let Some(item) = agg.items.referral.iter_mut().find(|i| i.id == id) else {
                    return;
                };
                if !can_modify(item.user.as_deref(), username) {
                    return;
                }
                item.name = name;
                item.phone = phone;
                item.amount = amount;
            } else {
                agg.items.referral.push(ReferralItem {
                    id: next_item_id(),
                    user: Some(username.to_string()),
                    date: Some(today_iso()),
                    name,
                    phone,
                    amount,
                });
            }
        }
        Category::Fuel => {
            let quantity = parse_money(&draft.quantity);
            let price = parse_money(&draft.price);
            if quantity <= 0.0 || price <= 0.0 {
                return;
            }
            let usage = if draft.purpose == "Instalação" {
                FuelUse::Installation {
                    liters: quantity,
                    price_per_liter: price,
                }
            } else {
                FuelUse::Sale {
                    distance_km: quantity,
                    price_per_liter: price,
                }
            };
            let purpose = draft.purpose.clone();
            let description = draft.description.trim().to_string();
            if let Some(id) = editing {
                let Some(item) = agg.items.fuel.iter().find(|i| i.id == id) else {
                    return;
                };
                if !can_modify(item.user.as_deref(), username) {
                    return;
                }
                // One entry per purpose; an edit that switches the
                // purpose displaces the entry already holding it.
                agg.items.fuel.retain(|i| i.id == id || i.purpose_label() != purpose);
                if let Some(item) = agg.items.fuel.iter_mut().find(|i| i.id == id) {
                    item.description = description;
                    item.usage = usage;
                }
            } else {
                agg.items.fuel.retain(|i| i.purpose_label() != purpose);
                agg.items.fuel.push(FuelItem {
                    id: next_item_id(),
                    user: Some(username.to_string()),
                    date: Some(today_iso()),
                    description,
                    usage,
                });
            }
        }
        plain => {
            let description = draft.description.trim().to_string();
            if description.is_empty() {
                return;
            }
            let amount = parse_money(&draft.amount);
            let Some(items) = agg.items.plain_mut(plain) else {
                return;
            };
            if let Some(id) = editing {
                let Some(item) = items.iter_mut().find(|i| i.id == id) else {
                    return;
                };
                if !can_modify(item.user.as_deref(), username) {
                    return;
                }
                item.description = description;
                item.amount = amount;
            } else {
                items.push(CostItem {
                    id: next_item_id(),
                    user: Some(username.to_string()),
                    date: Some(today_iso()),
                    description,
                    amount,
                });
            }
        }
    }
    component.editing = None;
    component.draft.clear();
}

/// Loads an item into the draft row so it can be edited in place. Items
/// owned by another user are left alone.
fn begin_edit(component: &mut EditorComponent, username: &str, id: i64) {
    let Some(agg) = component.aggregate.as_ref() else {
        return;
    };
    let draft = &mut component.draft;

    match component.active {
        Category::Referral => {
            let Some(item) = agg.items.referral.iter().find(|i| i.id == id) else {
                return;
            };
            if !can_modify(item.user.as_deref(), username) {
                return;
            }
            draft.clear();
            draft.name = item.name.clone();
            draft.phone = item.phone.clone();
            draft.amount = format_number_br(item.amount);
        }
        Category::Fuel => {
            let Some(item) = agg.items.fuel.iter().find(|i| i.id == id) else {
                return;
            };
            if !can_modify(item.user.as_deref(), username) {
                return;
            }
            draft.clear();
            draft.description = item.description.clone();
            match item.usage {
                FuelUse::Sale {
                    distance_km,
                    price_per_liter,
                } => {
                    draft.purpose = "Venda".to_string();
                    draft.quantity = format_number_br(distance_km);
                    draft.price = format_number_br(price_per_liter);
                }
                FuelUse::Installation {
                    liters,
                    price_per_liter,
                } => {
                    draft.purpose = "Instalação".to_string();
                    draft.quantity = format_number_br(liters);
                    draft.price = format_number_br(price_per_liter);
                }
            }
        }
        plain => {
            let Some(item) = agg.items.plain(plain).iter().find(|i| i.id == id) else {
                return;
            };
            if !can_modify(item.user.as_deref(), username) {
                return;
            }
            draft.clear();
            draft.description = item.description.clone();
            draft.amount = format_number_br(item.amount);
        }
    }
    component.editing = Some(id);
    component.confirm_delete = None;
}

#[cfg(test)]
mod tests {
    use common::model::project::ProjectAggregate;

    use super::*;

    fn component_with(items: common::model::project::CategoryItems) -> EditorComponent {
        let mut component = EditorComponent::new();
        component.aggregate = Some(ProjectAggregate {
            items,
            ..ProjectAggregate::default()
        });
        component
    }

    fn cost_item(id: i64, user: &str, description: &str, amount: f64) -> CostItem {
        CostItem {
            id,
            user: Some(user.to_string()),
            date: Some("2024-05-01".to_string()),
            description: description.to_string(),
            amount,
        }
    }

    #[test]
    fn begin_edit_loads_owned_item_into_draft() {
        let mut items = common::model::project::CategoryItems::default();
        items.material = vec![cost_item(7, "jean", "Cabo solar", 1234.5)];
        let mut component = component_with(items);
        component.active = Category::Material;

        begin_edit(&mut component, "jean", 7);

        assert_eq!(component.editing, Some(7));
        assert_eq!(component.draft.description, "Cabo solar");
        assert_eq!(component.draft.amount, "1234,50");
    }

    #[test]
    fn begin_edit_refuses_items_of_other_users() {
        let mut items = common::model::project::CategoryItems::default();
        items.material = vec![cost_item(7, "maria", "Cabo solar", 100.0)];
        let mut component = component_with(items);
        component.active = Category::Material;

        begin_edit(&mut component, "jean", 7);

        assert_eq!(component.editing, None);
        assert!(component.draft.description.is_empty());
    }

    #[test]
    fn commit_edit_replaces_content_keeping_id_user_and_date() {
        let mut items = common::model::project::CategoryItems::default();
        items.material = vec![
            cost_item(7, "jean", "Cabo solar", 100.0),
            cost_item(8, "jean", "Inversor", 200.0),
        ];
        let mut component = component_with(items);
        component.active = Category::Material;
        component.editing = Some(7);
        component.draft.description = "Cabo solar 6mm".to_string();
        component.draft.amount = "150,00".to_string();

        commit_draft(&mut component, "jean");

        let agg = component.aggregate.as_ref().unwrap();
        assert_eq!(agg.items.material.len(), 2);
        let item = &agg.items.material[0];
        assert_eq!(item.id, 7);
        assert_eq!(item.user.as_deref(), Some("jean"));
        assert_eq!(item.date.as_deref(), Some("2024-05-01"));
        assert_eq!(item.description, "Cabo solar 6mm");
        assert_eq!(item.amount, 150.0);
        assert_eq!(component.editing, None);
        assert!(component.draft.description.is_empty());
    }

    #[test]
    fn commit_edit_refuses_items_of_other_users() {
        let mut items = common::model::project::CategoryItems::default();
        items.material = vec![cost_item(7, "maria", "Cabo solar", 100.0)];
        let mut component = component_with(items);
        component.active = Category::Material;
        component.editing = Some(7);
        component.draft.description = "Alterado".to_string();
        component.draft.amount = "999,00".to_string();

        commit_draft(&mut component, "jean");

        let agg = component.aggregate.as_ref().unwrap();
        assert_eq!(agg.items.material[0].description, "Cabo solar");
        assert_eq!(agg.items.material[0].amount, 100.0);
    }

    #[test]
    fn fuel_edit_switching_purpose_displaces_the_other_entry() {
        let mut items = common::model::project::CategoryItems::default();
        items.fuel = vec![
            FuelItem {
                id: 1,
                user: Some("jean".to_string()),
                date: Some("2024-05-01".to_string()),
                description: "Visita".to_string(),
                usage: FuelUse::Sale {
                    distance_km: 100.0,
                    price_per_liter: 5.0,
                },
            },
            FuelItem {
                id: 2,
                user: Some("jean".to_string()),
                date: Some("2024-05-02".to_string()),
                description: "Obra".to_string(),
                usage: FuelUse::Installation {
                    liters: 20.0,
                    price_per_liter: 5.0,
                },
            },
        ];
        let mut component = component_with(items);
        component.active = Category::Fuel;
        component.editing = Some(1);
        component.draft.purpose = "Instalação".to_string();
        component.draft.description = "Obra nova".to_string();
        component.draft.quantity = "30".to_string();
        component.draft.price = "6,00".to_string();

        commit_draft(&mut component, "jean");

        let agg = component.aggregate.as_ref().unwrap();
        assert_eq!(agg.items.fuel.len(), 1);
        let item = &agg.items.fuel[0];
        assert_eq!(item.id, 1);
        assert_eq!(item.date.as_deref(), Some("2024-05-01"));
        assert_eq!(item.description, "Obra nova");
        match item.usage {
            FuelUse::Installation {
                liters,
                price_per_liter,
            } => {
                assert_eq!(liters, 30.0);
                assert_eq!(price_per_liter, 6.0);
            }
            _ => panic!("expected Installation"),
        }
    }
}
