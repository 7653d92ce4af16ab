//! Application root: holds the session user and the active page.
//!
//! There is no router; pages switch on an enum and the project id comes
//! from the `?projeto=` query parameter when the app is opened from a
//! SolarMarket project screen.

use web_sys::UrlSearchParams;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::editor::EditorComponent;
use crate::components::login::LoginComponent;
use crate::components::project::ProjectComponent;
use crate::components::report::ReportComponent;
use crate::session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Editor,
    Report { simplified: bool },
}

pub enum Msg {
    Navigate(Page),
    LoggedIn(String),
    SelectProject(u64),
    Logout,
    SessionInvalid,
}

pub struct App {
    page: Page,
    username: Option<String>,
    project_id: Option<u64>,
    checked: bool,
}

/// Reads the project id from the `?projeto=` query parameter.
fn project_id_from_query() -> Option<u64> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get("projeto")?.parse().ok()
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let username = session::username();
        let page = if username.is_some() {
            Page::Dashboard
        } else {
            Page::Login
        };
        App {
            page,
            username,
            project_id: project_id_from_query(),
            checked: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                self.page = page;
                true
            }
            Msg::LoggedIn(username) => {
                self.username = Some(username);
                self.page = Page::Dashboard;
                true
            }
            Msg::SelectProject(id) => {
                self.project_id = Some(id);
                true
            }
            Msg::Logout => {
                session::clear();
                self.username = None;
                self.page = Page::Login;
                true
            }
            Msg::SessionInvalid => {
                session::clear();
                self.username = None;
                self.page = Page::Login;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let username = self.username.clone().unwrap_or_default();

        match (&self.page, self.project_id) {
            (Page::Login, _) => html! {
                <LoginComponent on_login={link.callback(Msg::LoggedIn)} />
            },
            (Page::Dashboard, project_id) => html! {
                <ProjectComponent
                    project_id={project_id}
                    username={username}
                    on_select_project={link.callback(Msg::SelectProject)}
                    on_navigate={link.callback(Msg::Navigate)}
                    on_logout={link.callback(|_| Msg::Logout)}
                />
            },
            (Page::Editor, Some(project_id)) => html! {
                <EditorComponent
                    project_id={project_id}
                    username={username}
                    on_navigate={link.callback(Msg::Navigate)}
                />
            },
            (Page::Report { simplified }, Some(project_id)) => html! {
                <ReportComponent
                    project_id={project_id}
                    simplified={*simplified}
                    on_navigate={link.callback(Msg::Navigate)}
                />
            },
            // Editor and report need a project; fall back to the dashboard.
            (_, None) => html! {
                <ProjectComponent
                    project_id={None::<u64>}
                    username={username}
                    on_select_project={link.callback(Msg::SelectProject)}
                    on_navigate={link.callback(Msg::Navigate)}
                    on_logout={link.callback(|_| Msg::Logout)}
                />
            },
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        // Validate the stored token once; a stale session drops back to
        // the login page instead of failing on the first data fetch.
        if first_render && !self.checked {
            self.checked = true;
            if session::token().is_some() {
                let link = ctx.link().clone();
                spawn_local(async move {
                    if let Err(err) = crate::api::me().await {
                        if err.status == 401 {
                            link.send_message(Msg::SessionInvalid);
                        }
                    }
                });
            }
        }
    }
}
