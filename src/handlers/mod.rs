pub mod equipment;
pub mod health;
pub mod projects;
pub mod workers;

pub use equipment::{create_equipment, list_equipment};
pub use health::health_handler;
pub use projects::{create_project, delete_project, list_projects};
pub use workers::{create_worker, delete_worker, list_workers};

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value as JsonValue;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Collection, Document, DocumentId, StoredDocument};

/// Read a whole collection in wire form
async fn list_documents(
    state: &AppState,
    collection: Collection,
) -> Result<Vec<JsonValue>, ApiError> {
    let documents = state
        .store
        .find_all(collection)
        .await
        .map_err(|e| ApiError::new(collection, e))?;

    Ok(documents.into_iter().map(StoredDocument::into_wire).collect())
}

/// Unwrap a JSON body, reporting a rejection under the collection's envelope
fn take_body(
    collection: Collection,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<Document, ApiError> {
    let Json(document) = payload.map_err(|rejection| ApiError::new(collection, rejection))?;
    Ok(document)
}

fn parse_id(collection: Collection, id: &str) -> Result<DocumentId, ApiError> {
    id.parse().map_err(|e| ApiError::new(collection, e))
}
