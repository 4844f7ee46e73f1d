use super::{list_documents, parse_id, take_body};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{CreatedResponse, ProjectsResponse, SuccessResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::{Collection, Document};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// GET /projects handler - List every project
///
/// Unlike the other collections, project responses carry no `success` flag.
#[utoipa::path(
    get,
    path = routes::PROJECTS,
    responses(
        (status = 200, description = "All projects", body = ProjectsResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ProjectsResponse>), ApiError> {
    let projects = list_documents(&state, Collection::Projects).await?;

    tracing::debug!("Listed {} projects", projects.len());
    Ok((StatusCode::OK, Json(ProjectsResponse { projects })))
}

/// POST /projects handler - Store the request body as a new project
#[utoipa::path(
    post,
    path = routes::PROJECTS,
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Project created", body = CreatedResponse),
        (status = 500, description = "Malformed body or database error", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let document = take_body(Collection::Projects, payload)?;

    let id = state
        .store
        .insert_one(Collection::Projects, document)
        .await
        .map_err(|e| ApiError::new(Collection::Projects, e))?
        .to_wire();

    tracing::info!("Created project with id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// DELETE /projects/{id} handler - Remove one project
#[utoipa::path(
    delete,
    path = routes::PROJECT_ITEM,
    params(
        ("id" = String, Path, description = "24-character hex identifier of the project")
    ),
    responses(
        (status = 200, description = "Project deleted", body = SuccessResponse),
        (status = 404, description = "Project not found", body = SuccessResponse),
        (status = 500, description = "Malformed id or database error", body = ErrorResponse)
    ),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let id = parse_id(Collection::Projects, &id_str)?;

    let deleted = state
        .store
        .delete_one(Collection::Projects, &id)
        .await
        .map_err(|e| ApiError::new(Collection::Projects, e))?;

    if deleted == 0 {
        return Err(ApiError::not_found(Collection::Projects));
    }

    tracing::info!("Deleted project with id: {}", id);
    Ok((StatusCode::OK, Json(SuccessResponse { success: true })))
}
