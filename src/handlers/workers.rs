use super::{list_documents, parse_id, take_body};
use crate::error::{ApiError, FlaggedErrorResponse};
use crate::models::{MessageResponse, WorkersResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::{Collection, Document};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// GET /workers handler - List every employee
#[utoipa::path(
    get,
    path = routes::WORKERS,
    responses(
        (status = 200, description = "All employees", body = WorkersResponse),
        (status = 500, description = "Database error", body = FlaggedErrorResponse)
    ),
    tag = "workers"
)]
pub async fn list_workers(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<WorkersResponse>), ApiError> {
    let employees = list_documents(&state, Collection::Workers).await?;

    tracing::debug!("Listed {} employees", employees.len());
    Ok((
        StatusCode::OK,
        Json(WorkersResponse {
            success: true,
            employees,
        }),
    ))
}

/// POST /workers handler - Store the request body as a new employee
#[utoipa::path(
    post,
    path = routes::WORKERS,
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Employee added", body = MessageResponse),
        (status = 400, description = "Database reported an empty id", body = MessageResponse),
        (status = 500, description = "Malformed body or DB error", body = FlaggedErrorResponse)
    ),
    tag = "workers"
)]
pub async fn create_worker(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let document = take_body(Collection::Workers, payload)?;

    let id = state
        .store
        .insert_one(Collection::Workers, document)
        .await
        .map_err(|e| ApiError::new(Collection::Workers, e))?;

    if !id.is_reported() {
        tracing::warn!("Employee insert reported no usable id: {}", id.to_wire());
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::failed("Failed to add employee")),
        ));
    }

    tracing::info!("Added employee with id: {}", id.to_wire());
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Employee added successfully")),
    ))
}

/// DELETE /workers/{id} handler - Remove one employee
#[utoipa::path(
    delete,
    path = routes::WORKER_ITEM,
    params(
        ("id" = String, Path, description = "24-character hex identifier of the employee")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Malformed id or database error", body = FlaggedErrorResponse)
    ),
    tag = "workers"
)]
pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(Collection::Workers, &id_str)?;

    let deleted = state
        .store
        .delete_one(Collection::Workers, &id)
        .await
        .map_err(|e| ApiError::new(Collection::Workers, e))?;

    if deleted == 0 {
        return Err(ApiError::not_found(Collection::Workers));
    }

    tracing::info!("Deleted employee with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse::ok("Employee deleted successfully")),
    ))
}
