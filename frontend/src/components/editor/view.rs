//! View rendering for the cost editor.
//!
//! One tab per category. Plain categories share the description/amount
//! layout; referral and fuel get their own input rows. Deleting is a
//! two-step confirmation and items created by another user are
//! read-only.

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use common::model::fields::Category;
use common::model::item::{CostItem, FuelItem, ReferralItem, FUEL_EFFICIENCY_KM_PER_LITER};
use common::model::money::parse_money;
use common::model::project::ProjectAggregate;

use crate::app::Page;
use crate::format::{format_currency_br, format_date_br};

use super::helpers::can_modify;
use super::messages::{DraftField, Msg};
use super::state::EditorComponent;

pub fn view(component: &EditorComponent, ctx: &Context<EditorComponent>) -> Html {
    let link = ctx.link();
    let props = ctx.props();

    html! {
        <div class="editor-page">
            <header class="page-header">
                <button onclick={props.on_navigate.reform(|_| Page::Dashboard)}>
                    {"← Painel"}
                </button>
                <h1>{ format!("Custos do projeto {}", props.project_id) }</h1>
                <button
                    class="save-btn"
                    disabled={component.saving || component.aggregate.is_none()}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    { if component.saving { "Salvando..." } else { "Salvar" } }
                </button>
            </header>

            { build_tab_bar(component, link) }

            {
                if component.loading {
                    html! { <p class="loading">{"Carregando..."}</p> }
                } else if let Some(agg) = &component.aggregate {
                    build_active_tab(component, agg, ctx)
                } else {
                    html! { <p class="error">{"Não foi possível carregar o projeto."}</p> }
                }
            }
        </div>
    }
}

fn build_tab_bar(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    html! {
        <div class="tab-bar">
            {
                Category::ALL.iter().map(|cat| {
                    let cat = *cat;
                    html! {
                        <button
                            class={classes!("tab-btn", (component.active == cat).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SetTab(cat))}
                        >
                            { cat.title() }
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_active_tab(
    component: &EditorComponent,
    agg: &ProjectAggregate,
    ctx: &Context<EditorComponent>,
) -> Html {
    let total = agg.totals.of(component.active);
    let body = match component.active {
        Category::Referral => build_referral_tab(component, &agg.items.referral, ctx),
        Category::Fuel => build_fuel_tab(component, &agg.items.fuel, ctx),
        plain => build_plain_tab(component, agg.items.plain(plain), ctx),
    };

    html! {
        <div class="tab-content">
            { body }
            <p class="tab-total">
                { format!("Total {}: ", component.active.title()) }
                <strong>{ format_currency_br(total) }</strong>
            </p>
        </div>
    }
}

fn draft_input(
    link: &Scope<EditorComponent>,
    field: DraftField,
    placeholder: &'static str,
    value: String,
) -> Html {
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target().unwrap().unchecked_into();
        Msg::SetDraft(field, input.value())
    });
    html! {
        <input type="text" placeholder={placeholder} value={value} oninput={oninput} />
    }
}

/// Edit/delete cell: blank for items owned by someone else. Deleting is
/// armed on the first click and destructive on the second; editing
/// loads the item into the draft row.
fn action_cell(
    component: &EditorComponent,
    link: &Scope<EditorComponent>,
    id: i64,
    owner: Option<&str>,
    username: &str,
) -> Html {
    if !can_modify(owner, username) {
        return html! { <td class="action-cell">{"—"}</td> };
    }
    if component.confirm_delete == Some(id) {
        html! {
            <td class="action-cell confirm">
                <button onclick={link.callback(move |_| Msg::ConfirmDelete(id))}>
                    {"Confirmar"}
                </button>
                <button onclick={link.callback(|_| Msg::CancelDelete)}>
                    {"Cancelar"}
                </button>
            </td>
        }
    } else {
        html! {
            <td class="action-cell">
                <button onclick={link.callback(move |_| Msg::BeginEdit(id))}>
                    {"Editar"}
                </button>
                <button onclick={link.callback(move |_| Msg::RequestDelete(id))}>
                    {"Excluir"}
                </button>
            </td>
        }
    }
}

/// Commit button(s) of the draft row: plain add, or save/cancel while
/// an item is being edited.
fn commit_button(component: &EditorComponent, link: &Scope<EditorComponent>) -> Html {
    if component.editing.is_some() {
        html! {
            <>
                <button onclick={link.callback(|_| Msg::Add)}>{"Salvar item"}</button>
                <button onclick={link.callback(|_| Msg::CancelEdit)}>{"Cancelar"}</button>
            </>
        }
    } else {
        html! { <button onclick={link.callback(|_| Msg::Add)}>{"Adicionar"}</button> }
    }
}

fn item_date(date: Option<&str>) -> String {
    date.map(format_date_br).unwrap_or_else(|| "—".to_string())
}

fn build_plain_tab(
    component: &EditorComponent,
    items: &[CostItem],
    ctx: &Context<EditorComponent>,
) -> Html {
    let link = ctx.link();
    let username = &ctx.props().username;

    html! {
        <>
            <div class="add-row">
                { draft_input(link, DraftField::Description, "Descrição", component.draft.description.clone()) }
                { draft_input(link, DraftField::Amount, "Valor (R$)", component.draft.amount.clone()) }
                { commit_button(component, link) }
            </div>
            <table class="item-table">
                <thead>
                    <tr>
                        <th>{"Data"}</th><th>{"Usuário"}</th>
                        <th>{"Descrição"}</th><th>{"Valor"}</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        items.iter().map(|item| html! {
                            <tr>
                                <td>{ item_date(item.date.as_deref()) }</td>
                                <td>{ item.user.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                <td>{ &item.description }</td>
                                <td>{ format_currency_br(item.amount) }</td>
                                { action_cell(component, link, item.id, item.user.as_deref(), username) }
                            </tr>
                        }).collect::<Html>()
                    }
                </tbody>
            </table>
        </>
    }
}

fn build_referral_tab(
    component: &EditorComponent,
    items: &[ReferralItem],
    ctx: &Context<EditorComponent>,
) -> Html {
    let link = ctx.link();
    let username = &ctx.props().username;

    html! {
        <>
            <div class="add-row">
                { draft_input(link, DraftField::Name, "Nome do indicador", component.draft.name.clone()) }
                { draft_input(link, DraftField::Phone, "Telefone", component.draft.phone.clone()) }
                { draft_input(link, DraftField::Amount, "Valor (R$)", component.draft.amount.clone()) }
                { commit_button(component, link) }
            </div>
            <table class="item-table">
                <thead>
                    <tr>
                        <th>{"Data"}</th><th>{"Usuário"}</th><th>{"Nome"}</th>
                        <th>{"Telefone"}</th><th>{"Valor"}</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        items.iter().map(|item| html! {
                            <tr>
                                <td>{ item_date(item.date.as_deref()) }</td>
                                <td>{ item.user.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                <td>{ &item.name }</td>
                                <td>{ &item.phone }</td>
                                <td>{ format_currency_br(item.amount) }</td>
                                { action_cell(component, link, item.id, item.user.as_deref(), username) }
                            </tr>
                        }).collect::<Html>()
                    }
                </tbody>
            </table>
        </>
    }
}

fn build_fuel_tab(
    component: &EditorComponent,
    items: &[FuelItem],
    ctx: &Context<EditorComponent>,
) -> Html {
    let link = ctx.link();
    let username = &ctx.props().username;
    let draft = &component.draft;

    let is_sale = draft.purpose != "Instalação";
    let quantity_label = if is_sale { "Distância (km, ida)" } else { "Litros" };

    // Live preview of the derived cost for the values being typed.
    let quantity = parse_money(&draft.quantity);
    let price = parse_money(&draft.price);
    let preview = if is_sale {
        (quantity * 2.0 / FUEL_EFFICIENCY_KM_PER_LITER) * price
    } else {
        quantity * price
    };

    let onchange_purpose = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target().unwrap().unchecked_into();
        Msg::SetDraft(DraftField::Purpose, select.value())
    });

    html! {
        <>
            <div class="add-row">
                <select value={draft.purpose.clone()} onchange={onchange_purpose}>
                    <option value="Venda" selected={is_sale}>{"Venda"}</option>
                    <option value="Instalação" selected={!is_sale}>{"Instalação"}</option>
                </select>
                { draft_input(link, DraftField::Description, "Descrição", draft.description.clone()) }
                { draft_input(link, DraftField::Quantity, quantity_label, draft.quantity.clone()) }
                { draft_input(link, DraftField::Price, "Preço por litro (R$)", draft.price.clone()) }
                <span class="fuel-preview">{ format_currency_br(preview) }</span>
                { commit_button(component, link) }
            </div>
            <table class="item-table">
                <thead>
                    <tr>
                        <th>{"Data"}</th><th>{"Usuário"}</th><th>{"Finalidade"}</th>
                        <th>{"Descrição"}</th><th>{"Custo"}</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        items.iter().map(|item| html! {
                            <tr>
                                <td>{ item_date(item.date.as_deref()) }</td>
                                <td>{ item.user.clone().unwrap_or_else(|| "—".to_string()) }</td>
                                <td>{ item.purpose_label() }</td>
                                <td>{ &item.description }</td>
                                <td>{ format_currency_br(item.cost()) }</td>
                                { action_cell(component, link, item.id, item.user.as_deref(), username) }
                            </tr>
                        }).collect::<Html>()
                    }
                </tbody>
            </table>
        </>
    }
}
