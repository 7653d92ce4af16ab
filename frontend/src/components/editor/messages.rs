use common::model::fields::Category;
use common::model::project::ProjectAggregate;

/// Which draft input changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Description,
    Amount,
    Name,
    Phone,
    Purpose,
    Quantity,
    Price,
}

pub enum Msg {
    Loaded(Box<ProjectAggregate>),
    LoadFailed(String),
    SetTab(Category),
    SetDraft(DraftField, String),
    /// Adds the draft as a new item, or replaces the item being edited.
    Add,
    /// Loads an owned item into the draft row for in-place editing.
    BeginEdit(i64),
    CancelEdit,
    /// First click on a delete button: arms the confirmation.
    RequestDelete(i64),
    /// Second click: actually removes the item.
    ConfirmDelete(i64),
    CancelDelete,
    Save,
    Saved,
    SaveFailed(String),
}
