//! Project dashboard: KPI cards and the category cost breakdown, with
//! navigation to the editor and the reports.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::fields::Category;
use common::model::kpi::MarginBand;
use common::model::project::ProjectAggregate;

use crate::app::Page;
use crate::format::{format_currency_br, format_date_br, format_percent};
use crate::model;
use crate::toast::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct ProjectProps {
    /// Project to show. `None` until the user types an id (the usual
    /// entry point is the `?projeto=` query parameter).
    #[prop_or_default]
    pub project_id: Option<u64>,
    pub username: String,
    pub on_select_project: Callback<u64>,
    pub on_navigate: Callback<Page>,
    pub on_logout: Callback<()>,
}

pub enum Msg {
    SetIdInput(String),
    Load(u64),
    Loaded(Box<ProjectAggregate>),
    Failed(String),
    Refresh,
    ToggleUserForm,
    SetNewEmail(String),
    SetNewPassword(String),
    CreateUser,
    UserCreated,
    UserFailed(String),
}

pub struct ProjectComponent {
    aggregate: Option<ProjectAggregate>,
    loading: bool,
    error: Option<String>,
    id_input: String,
    loaded: bool,
    show_user_form: bool,
    new_email: String,
    new_password: String,
}

impl Component for ProjectComponent {
    type Message = Msg;
    type Properties = ProjectProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ProjectComponent {
            aggregate: None,
            loading: false,
            error: None,
            id_input: String::new(),
            loaded: false,
            show_user_form: false,
            new_email: String::new(),
            new_password: String::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetIdInput(value) => {
                self.id_input = value;
                false
            }
            Msg::Load(id) => {
                self.loading = true;
                self.error = None;
                ctx.props().on_select_project.emit(id);

                let link = ctx.link().clone();
                spawn_local(async move {
                    match model::load_project(id).await {
                        Ok(agg) => link.send_message(Msg::Loaded(Box::new(agg))),
                        Err(err) => link.send_message(Msg::Failed(err.message)),
                    }
                });
                true
            }
            Msg::Loaded(aggregate) => {
                self.aggregate = Some(*aggregate);
                self.loading = false;
                true
            }
            Msg::Failed(message) => {
                self.loading = false;
                self.error = Some(message.clone());
                show_toast(&format!("Erro ao carregar o projeto: {}", message));
                true
            }
            Msg::Refresh => {
                if let Some(id) = ctx.props().project_id {
                    ctx.link().send_message(Msg::Load(id));
                }
                false
            }
            Msg::ToggleUserForm => {
                self.show_user_form = !self.show_user_form;
                true
            }
            Msg::SetNewEmail(value) => {
                self.new_email = value;
                false
            }
            Msg::SetNewPassword(value) => {
                self.new_password = value;
                false
            }
            Msg::CreateUser => {
                if self.new_email.trim().is_empty() || self.new_password.is_empty() {
                    return false;
                }
                let email = self.new_email.trim().to_string();
                let password = self.new_password.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match crate::api::create_user(&email, &password).await {
                        Ok(()) => link.send_message(Msg::UserCreated),
                        Err(err) => link.send_message(Msg::UserFailed(err.message)),
                    }
                });
                false
            }
            Msg::UserCreated => {
                self.new_email.clear();
                self.new_password.clear();
                self.show_user_form = false;
                show_toast("Usuário criado com sucesso.");
                true
            }
            Msg::UserFailed(message) => {
                show_toast(&format!("Erro ao criar usuário: {}", message));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        html! {
            <div class="dashboard-page">
                <header class="page-header">
                    <h1>{"Painel GDIS"}</h1>
                    <span class="user-tag">{ &props.username }</span>
                    <button onclick={link.callback(|_| Msg::ToggleUserForm)}>
                        {"Novo usuário"}
                    </button>
                    <button onclick={props.on_logout.reform(|_| ())}>{"Sair"}</button>
                </header>

                { self.build_user_form(ctx) }
                { self.build_project_picker(ctx) }

                {
                    if self.loading {
                        html! { <p class="loading">{"Carregando..."}</p> }
                    } else if let Some(agg) = &self.aggregate {
                        html! {
                            <>
                                { build_project_header(agg) }
                                { build_kpi_cards(agg) }
                                { build_breakdown(agg) }
                                <div class="actions">
                                    <button onclick={link.callback(|_| Msg::Refresh)}>
                                        {"Atualizar"}
                                    </button>
                                    <button onclick={props.on_navigate.reform(|_| Page::Editor)}>
                                        {"Editar custos"}
                                    </button>
                                    <button onclick={props.on_navigate.reform(|_| Page::Report { simplified: false })}>
                                        {"Relatório"}
                                    </button>
                                    <button onclick={props.on_navigate.reform(|_| Page::Report { simplified: true })}>
                                        {"Relatório simplificado"}
                                    </button>
                                </div>
                            </>
                        }
                    } else if let Some(error) = &self.error {
                        html! { <p class="error">{ error }</p> }
                    } else {
                        html! { <p class="hint">{"Informe o número do projeto."}</p> }
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            if let Some(id) = ctx.props().project_id {
                ctx.link().send_message(Msg::Load(id));
            }
        }
    }
}

impl ProjectComponent {
    /// Account creation form. The backend only accepts it from a logged
    /// in session, so it lives here instead of on the login page.
    fn build_user_form(&self, ctx: &Context<Self>) -> Html {
        if !self.show_user_form {
            return html! {};
        }
        let link = ctx.link();
        let oninput_email = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().unchecked_into();
            Msg::SetNewEmail(input.value())
        });
        let oninput_password = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().unchecked_into();
            Msg::SetNewPassword(input.value())
        });

        html! {
            <div class="user-form">
                <input type="email" placeholder="E-mail" oninput={oninput_email} />
                <input type="password" placeholder="Senha" oninput={oninput_password} />
                <button onclick={link.callback(|_| Msg::CreateUser)}>{"Criar"}</button>
            </div>
        }
    }

    fn build_project_picker(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let oninput = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().unchecked_into();
            Msg::SetIdInput(input.value())
        });
        let id_input = self.id_input.clone();
        let onclick = link.batch_callback(move |_| {
            id_input.trim().parse::<u64>().ok().map(Msg::Load)
        });

        html! {
            <div class="project-picker">
                <input
                    type="number"
                    placeholder="Número do projeto"
                    value={self.id_input.clone()}
                    oninput={oninput}
                />
                <button onclick={onclick}>{"Abrir"}</button>
            </div>
        }
    }
}

fn build_project_header(agg: &ProjectAggregate) -> Html {
    let date = agg
        .created_at
        .as_deref()
        .map(format_date_br)
        .unwrap_or_else(|| "—".to_string());

    html! {
        <div class="project-header">
            <h2>{ format!("Projeto {} — {}", agg.id, agg.client_name) }</h2>
            <span class="project-date">{ date }</span>
            <span class={classes!("project-status", if agg.archived { "archived" } else { "active" })}>
                { agg.status_label() }
            </span>
        </div>
    }
}

fn build_kpi_cards(agg: &ProjectAggregate) -> Html {
    let kpis = agg.kpis();
    let band_class = match kpis.margin_band() {
        MarginBand::Good => "kpi-good",
        MarginBand::Warning => "kpi-warning",
        MarginBand::Bad => "kpi-bad",
    };

    html! {
        <div class="kpi-cards">
            { kpi_card("Valor da proposta", format_currency_br(agg.proposal_value), "") }
            { kpi_card("Kit fotovoltaico", format_currency_br(agg.kit_value), "") }
            { kpi_card("Valor GDIS", format_currency_br(kpis.gdis_value), "") }
            { kpi_card(
                "Imposto (12%)",
                format!("{} ({})", format_currency_br(kpis.tax), format_percent(kpis.tax_pct)),
                "",
            ) }
            { kpi_card("Custos totais", format_currency_br(agg.totals.grand_total), "") }
            { kpi_card("Lucro bruto", format_currency_br(kpis.gross_profit), "") }
            { kpi_card(
                "Lucro líquido",
                format!(
                    "{} ({})",
                    format_currency_br(kpis.net_profit),
                    format_percent(kpis.margin_pct)
                ),
                band_class,
            ) }
        </div>
    }
}

fn kpi_card(title: &str, value: String, extra_class: &'static str) -> Html {
    html! {
        <div class={classes!("kpi-card", extra_class)}>
            <span class="kpi-title">{ title }</span>
            <span class="kpi-value">{ value }</span>
        </div>
    }
}

fn build_breakdown(agg: &ProjectAggregate) -> Html {
    html! {
        <table class="breakdown">
            <thead>
                <tr><th>{"Categoria"}</th><th>{"Total"}</th></tr>
            </thead>
            <tbody>
                {
                    Category::ALL.iter().map(|cat| html! {
                        <tr>
                            <td>{ cat.title() }</td>
                            <td>{ format_currency_br(agg.totals.of(*cat)) }</td>
                        </tr>
                    }).collect::<Html>()
                }
                <tr class="breakdown-total">
                    <td>{"Total"}</td>
                    <td>{ format_currency_br(agg.totals.grand_total) }</td>
                </tr>
            </tbody>
        </table>
    }
}
