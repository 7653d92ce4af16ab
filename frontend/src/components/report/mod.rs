//! Printable cost report.
//!
//! Two variants share this component: the full report lists every item
//! of every category, the simplified one only shows the grouped totals
//! and the financial indicators. Percentage columns are relative to the
//! proposal value ("Projeto") and to the GDIS value.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::fields::Category;
use common::model::kpi::percent_of;
use common::model::project::ProjectAggregate;

use crate::app::Page;
use crate::format::{format_currency_br, format_date_br, format_percent};
use crate::model;
use crate::toast::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct ReportProps {
    pub project_id: u64,
    /// Hides the per-item breakdown when set.
    #[prop_or_default]
    pub simplified: bool,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    Loaded(Box<ProjectAggregate>),
    Failed(String),
    Print,
}

pub struct ReportComponent {
    aggregate: Option<ProjectAggregate>,
    loading: bool,
    loaded: bool,
}

impl Component for ReportComponent {
    type Message = Msg;
    type Properties = ReportProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ReportComponent {
            aggregate: None,
            loading: true,
            loaded: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(aggregate) => {
                self.aggregate = Some(*aggregate);
                self.loading = false;
                true
            }
            Msg::Failed(message) => {
                self.loading = false;
                show_toast(&format!("Erro ao carregar o relatório: {}", message));
                true
            }
            Msg::Print => {
                if let Some(window) = web_sys::window() {
                    window.print().ok();
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let title = if props.simplified {
            "Relatório simplificado"
        } else {
            "Relatório de custos"
        };

        html! {
            <div class="report-page">
                <header class="page-header no-print">
                    <button onclick={props.on_navigate.reform(|_| Page::Dashboard)}>
                        {"← Painel"}
                    </button>
                    <h1>{ title }</h1>
                    <button onclick={link.callback(|_| Msg::Print)}>{"Imprimir"}</button>
                </header>

                {
                    if self.loading {
                        html! { <p class="loading">{"Carregando..."}</p> }
                    } else if let Some(agg) = &self.aggregate {
                        html! {
                            <>
                                { build_report_header(agg) }
                                { build_summary_table(agg) }
                                {
                                    if props.simplified {
                                        html! {}
                                    } else {
                                        build_detail(agg)
                                    }
                                }
                                { build_kpi_footer(agg) }
                            </>
                        }
                    } else {
                        html! { <p class="error">{"Não foi possível carregar o projeto."}</p> }
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let project_id = ctx.props().project_id;
            let link = ctx.link().clone();
            spawn_local(async move {
                match model::load_project(project_id).await {
                    Ok(agg) => link.send_message(Msg::Loaded(Box::new(agg))),
                    Err(err) => link.send_message(Msg::Failed(err.message)),
                }
            });
        }
    }
}

fn build_report_header(agg: &ProjectAggregate) -> Html {
    let date = agg
        .created_at
        .as_deref()
        .map(format_date_br)
        .unwrap_or_else(|| "—".to_string());

    html! {
        <div class="report-header">
            <h2>{ format!("Projeto {} — {}", agg.id, agg.client_name) }</h2>
            <p>{ format!("Data: {}  ·  Situação: {}", date, agg.status_label()) }</p>
        </div>
    }
}

fn summary_row(label: &str, value: f64, proposal: f64, gdis: f64) -> Html {
    html! {
        <tr>
            <td>{ label }</td>
            <td>{ format_currency_br(value) }</td>
            <td>{ format_percent(percent_of(value, proposal)) }</td>
            <td>{ format_percent(percent_of(value, gdis)) }</td>
        </tr>
    }
}

fn build_summary_table(agg: &ProjectAggregate) -> Html {
    let proposal = agg.proposal_value;
    let gdis = agg.kpis().gdis_value;
    // A negative "other" bucket only means overlapping manual entries;
    // the printed report floors it at zero.
    let other = agg.totals.other.max(0.0);
    let total = agg.totals.material + agg.totals.daily_labor + agg.totals.fuel + other;

    html! {
        <table class="report-summary">
            <thead>
                <tr>
                    <th>{"Categoria"}</th><th>{"Valor"}</th>
                    <th>{"% do Projeto"}</th><th>{"% do GDIS"}</th>
                </tr>
            </thead>
            <tbody>
                { summary_row("Material Inst.", agg.totals.material, proposal, gdis) }
                { summary_row("Diárias/M.O.", agg.totals.daily_labor, proposal, gdis) }
                { summary_row("Combustível", agg.totals.fuel, proposal, gdis) }
                { summary_row("Outros custos", other, proposal, gdis) }
                <tr class="report-total">
                    <td>{"Custos totais"}</td>
                    <td>{ format_currency_br(total) }</td>
                    <td>{ format_percent(percent_of(total, proposal)) }</td>
                    <td>{ format_percent(percent_of(total, gdis)) }</td>
                </tr>
            </tbody>
        </table>
    }
}

fn build_detail(agg: &ProjectAggregate) -> Html {
    html! {
        <div class="report-detail">
            {
                Category::ALL.iter().map(|cat| {
                    let cat = *cat;
                    html! {
                        <section class="report-category">
                            <h3>
                                { cat.title() }
                                { " — " }
                                { format_currency_br(agg.totals.of(cat)) }
                            </h3>
                            { build_category_items(agg, cat) }
                        </section>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_category_items(agg: &ProjectAggregate, category: Category) -> Html {
    let rows: Vec<Html> = match category {
        Category::Referral => agg
            .items
            .referral
            .iter()
            .map(|item| {
                detail_row(
                    &format!("{} ({})", item.name, item.phone),
                    item.amount,
                )
            })
            .collect(),
        Category::Fuel => agg
            .items
            .fuel
            .iter()
            .map(|item| {
                detail_row(
                    &format!("{} {}", item.purpose_label(), item.description).trim().to_string(),
                    item.cost(),
                )
            })
            .collect(),
        plain => agg
            .items
            .plain(plain)
            .iter()
            .map(|item| detail_row(&item.description, item.amount))
            .collect(),
    };

    if rows.is_empty() {
        html! { <p class="empty-category">{"Sem lançamentos."}</p> }
    } else {
        html! {
            <table class="item-table">
                <tbody>{ for rows }</tbody>
            </table>
        }
    }
}

fn detail_row(label: &str, amount: f64) -> Html {
    html! {
        <tr>
            <td>{ label }</td>
            <td>{ format_currency_br(amount) }</td>
        </tr>
    }
}

fn build_kpi_footer(agg: &ProjectAggregate) -> Html {
    let kpis = agg.kpis();

    html! {
        <table class="report-kpis">
            <tbody>
                <tr><td>{"Valor da proposta"}</td><td>{ format_currency_br(agg.proposal_value) }</td></tr>
                <tr><td>{"Kit fotovoltaico"}</td><td>{ format_currency_br(agg.kit_value) }</td></tr>
                <tr><td>{"Valor GDIS"}</td><td>{ format_currency_br(kpis.gdis_value) }</td></tr>
                <tr><td>{"Imposto (12%)"}</td><td>{ format_currency_br(kpis.tax) }</td></tr>
                <tr><td>{"Lucro bruto"}</td><td>{ format_currency_br(kpis.gross_profit) }</td></tr>
                <tr>
                    <td>{"Lucro líquido"}</td>
                    <td>
                        { format_currency_br(kpis.net_profit) }
                        { format!(" ({})", format_percent(kpis.margin_pct)) }
                    </td>
                </tr>
            </tbody>
        </table>
    }
}
