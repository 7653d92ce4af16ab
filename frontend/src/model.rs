//! Load and save orchestration on top of the API client.
//!
//! Loading fetches the three vendor resources and folds them into a
//! [`ProjectAggregate`]; pages re-run the load after every successful
//! write instead of patching local state.

use futures::future::join_all;

use common::model::fields::{field_id, Category};
use common::model::money::round_to_cents;
use common::model::project::ProjectAggregate;

use crate::api::{self, ApiError};

/// Fetches metadata, proposals and custom fields and assembles the view
/// model. The project record is confirmed first; the other two fetches
/// run in parallel. The most recent proposal is the active one.
pub async fn load_project(id: u64) -> Result<ProjectAggregate, ApiError> {
    let meta = api::get_project(id).await?;
    let (proposals, fields) =
        futures::try_join!(api::get_proposals(id), api::get_custom_fields(id))?;

    let proposal = proposals.into_iter().last().unwrap_or_default();
    Ok(ProjectAggregate::assemble(&meta, &proposal, &fields))
}

/// Writes several custom fields concurrently. Any failure fails the
/// batch; fields already written stay written, the caller re-fetches to
/// see the actual state.
pub async fn update_fields(
    project_id: u64,
    updates: Vec<(u32, String)>,
) -> Result<(), ApiError> {
    let results = join_all(
        updates
            .into_iter()
            .map(|(fid, value)| api::update_custom_field(project_id, fid, value)),
    )
    .await;
    for result in results {
        result?;
    }
    Ok(())
}

/// Persists one category: the encoded item list and the rounded total
/// go out together.
pub async fn save_category(
    project_id: u64,
    category: Category,
    encoded_items: String,
    total: f64,
) -> Result<(), ApiError> {
    let mut updates = Vec::with_capacity(2);
    if let Some(fid) = field_id(category.list_key()) {
        updates.push((fid, encoded_items));
    }
    if let Some(fid) = field_id(category.total_key()) {
        updates.push((fid, format!("{:.2}", round_to_cents(total))));
    }
    update_fields(project_id, updates).await
}
