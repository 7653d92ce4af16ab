//! State container for the cost editor.

use common::model::fields::Category;
use common::model::project::ProjectAggregate;

/// Draft values of the "new item" row. All inputs are kept as raw
/// strings; numbers are only parsed when the item is added.
#[derive(Clone, Debug)]
pub struct Draft {
    pub description: String,
    pub amount: String,
    pub name: String,
    pub phone: String,
    /// `"Venda"` or `"Instalação"`, matching the wire tag.
    pub purpose: String,
    pub quantity: String,
    pub price: String,
}

impl Draft {
    pub fn new() -> Self {
        Draft {
            description: String::new(),
            amount: String::new(),
            name: String::new(),
            phone: String::new(),
            purpose: "Venda".to_string(),
            quantity: String::new(),
            price: String::new(),
        }
    }

    /// Resets the text inputs after an item is added. The purpose
    /// selection is kept.
    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.name.clear();
        self.phone.clear();
        self.quantity.clear();
        self.price.clear();
    }
}

pub struct EditorComponent {
    /// `None` until the first load finishes.
    pub aggregate: Option<ProjectAggregate>,
    pub active: Category,
    pub draft: Draft,
    /// Item id currently loaded into the draft for in-place editing.
    /// `None` while the draft row is adding a new item.
    pub editing: Option<i64>,
    /// Item id armed for deletion, waiting for the confirming click.
    pub confirm_delete: Option<i64>,
    pub saving: bool,
    pub loading: bool,
    /// Guard to avoid running first-render initialization more than once.
    pub loaded: bool,
}

impl EditorComponent {
    pub fn new() -> Self {
        EditorComponent {
            aggregate: None,
            active: Category::Material,
            draft: Draft::new(),
            editing: None,
            confirm_delete: None,
            saving: false,
            loading: true,
            loaded: false,
        }
    }
}
