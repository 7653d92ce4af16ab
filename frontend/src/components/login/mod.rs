//! Login page: a credentials form that opens a backend session and
//! stores it in the browser.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::requests::SessionUser;

use crate::api;
use crate::session;
use crate::toast::show_toast;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginProps {
    /// Called with the short username after a successful login.
    pub on_login: Callback<String>,
}

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    Succeeded { token: String, email: String },
    Failed(String),
}

pub struct LoginComponent {
    email: String,
    password: String,
    busy: bool,
    error: Option<String>,
}

impl Component for LoginComponent {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        LoginComponent {
            email: String::new(),
            password: String::new(),
            busy: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetEmail(email) => {
                self.email = email;
                false
            }
            Msg::SetPassword(password) => {
                self.password = password;
                false
            }
            Msg::Submit => {
                if self.busy || self.email.is_empty() || self.password.is_empty() {
                    return false;
                }
                self.busy = true;
                self.error = None;

                let email = self.email.clone();
                let password = self.password.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::login(&email, &password).await {
                        Ok(resp) => link.send_message(Msg::Succeeded {
                            token: resp.token,
                            email: resp.email,
                        }),
                        Err(err) => link.send_message(Msg::Failed(err.message)),
                    }
                });
                true
            }
            Msg::Succeeded { token, email } => {
                let user = SessionUser { email };
                let username = user.username().to_string();
                session::store(&token, &username);
                show_toast("Login realizado com sucesso.");
                ctx.props().on_login.emit(username);
                false
            }
            Msg::Failed(message) => {
                self.busy = false;
                self.error = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let oninput_email = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().unchecked_into();
            Msg::SetEmail(input.value())
        });
        let oninput_password = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target().unwrap().unchecked_into();
            Msg::SetPassword(input.value())
        });
        let onkeydown = link.batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then_some(Msg::Submit)
        });

        html! {
            <div class="login-page">
                <div class="login-card">
                    <h1>{"GDIS Solar"}</h1>
                    <input
                        type="email"
                        placeholder="E-mail"
                        value={self.email.clone()}
                        oninput={oninput_email}
                    />
                    <input
                        type="password"
                        placeholder="Senha"
                        value={self.password.clone()}
                        oninput={oninput_password}
                        onkeydown={onkeydown}
                    />
                    {
                        if let Some(error) = &self.error {
                            html! { <p class="login-error">{ error }</p> }
                        } else {
                            html! {}
                        }
                    }
                    <button
                        disabled={self.busy}
                        onclick={link.callback(|_| Msg::Submit)}
                    >
                        { if self.busy { "Entrando..." } else { "Entrar" } }
                    </button>
                </div>
            </div>
        }
    }
}
