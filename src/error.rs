use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::store::{Collection, InvalidIdentifier};

/// Error body used by `/projects`
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error body used by `/workers` and `/equipment`
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct FlaggedErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// What went wrong while serving a request
#[derive(Debug)]
pub enum ErrorKind {
    /// Path segment is not a well-formed identifier
    InvalidIdentifier(InvalidIdentifier),
    /// Request body could not be read as a JSON object
    MalformedBody(String),
    /// Delete matched no document
    NotFound,
    /// Database operation error
    StorageFailure(anyhow::Error),
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidIdentifier(_)
            | ErrorKind::MalformedBody(_)
            | ErrorKind::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidIdentifier> for ErrorKind {
    fn from(err: InvalidIdentifier) -> Self {
        ErrorKind::InvalidIdentifier(err)
    }
}

impl From<JsonRejection> for ErrorKind {
    fn from(rejection: JsonRejection) -> Self {
        ErrorKind::MalformedBody(rejection.body_text())
    }
}

impl From<anyhow::Error> for ErrorKind {
    fn from(err: anyhow::Error) -> Self {
        ErrorKind::StorageFailure(err)
    }
}

/// Error returned by the collection handlers
///
/// The status code depends only on the kind. The body follows the envelope of
/// the collection that failed: `/projects` answers `{error}` while the other
/// collections answer `{success: false, error}`.
#[derive(Debug)]
pub struct ApiError {
    pub collection: Collection,
    pub kind: ErrorKind,
}

impl ApiError {
    pub fn new(collection: Collection, kind: impl Into<ErrorKind>) -> Self {
        Self {
            collection,
            kind: kind.into(),
        }
    }

    pub fn not_found(collection: Collection) -> Self {
        Self::new(collection, ErrorKind::NotFound)
    }
}

/// Singular entity name used in response messages
pub fn entity_name(collection: Collection) -> &'static str {
    match collection {
        Collection::Workers => "Employee",
        Collection::Projects => "Project",
        Collection::Equipment => "Equipment",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let collection = self.collection;

        let error_message = match self.kind {
            ErrorKind::NotFound => {
                tracing::info!("{} not found", entity_name(collection));
                let body = match collection {
                    Collection::Projects => serde_json::json!({ "success": false }),
                    _ => serde_json::json!({
                        "success": false,
                        "msg": format!("{} not found", entity_name(collection)),
                    }),
                };
                return (status, Json(body)).into_response();
            }
            ErrorKind::InvalidIdentifier(err) => err.to_string(),
            ErrorKind::MalformedBody(message) => message,
            ErrorKind::StorageFailure(err) => format!("{:#}", err),
        };

        tracing::error!(
            "Request on {} failed: {}",
            collection.name(),
            error_message
        );

        match collection {
            Collection::Projects => (
                status,
                Json(ErrorResponse {
                    error: error_message,
                }),
            )
                .into_response(),
            Collection::Workers | Collection::Equipment => (
                status,
                Json(FlaggedErrorResponse {
                    success: false,
                    error: error_message,
                }),
            )
                .into_response(),
        }
    }
}
