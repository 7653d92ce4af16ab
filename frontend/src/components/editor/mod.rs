//! Cost editor: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! On first render the project aggregate is fetched; every save writes
//! the active category's encoded list plus its rounded total and then
//! re-fetches the whole project.

use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::EditorProps;
pub use state::EditorComponent;

use crate::model;

impl Component for EditorComponent {
    type Message = Msg;
    type Properties = EditorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        EditorComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let project_id = ctx.props().project_id;
            let link = ctx.link().clone();
            spawn_local(async move {
                match model::load_project(project_id).await {
                    Ok(agg) => link.send_message(Msg::Loaded(Box::new(agg))),
                    Err(err) => link.send_message(Msg::LoadFailed(err.message)),
                }
            });
        }
    }
}
