use yew::prelude::*;

use crate::app::Page;

/// Properties for the cost editor page.
#[derive(Properties, PartialEq, Clone)]
pub struct EditorProps {
    pub project_id: u64,
    /// Short username stamped on every item created here. Items created
    /// by someone else are read-only.
    pub username: String,
    pub on_navigate: Callback<Page>,
}
