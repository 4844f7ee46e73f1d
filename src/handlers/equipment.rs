use super::{list_documents, take_body};
use crate::error::{ApiError, FlaggedErrorResponse};
use crate::models::{EquipmentResponse, MessageResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::{Collection, Document};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// GET /equipment handler - List every piece of equipment
#[utoipa::path(
    get,
    path = routes::EQUIPMENT,
    responses(
        (status = 200, description = "All equipment", body = EquipmentResponse),
        (status = 500, description = "Database error", body = FlaggedErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn list_equipment(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EquipmentResponse>), ApiError> {
    let equipment = list_documents(&state, Collection::Equipment).await?;

    tracing::debug!("Listed {} equipment items", equipment.len());
    Ok((
        StatusCode::OK,
        Json(EquipmentResponse {
            success: true,
            equipment,
        }),
    ))
}

/// POST /equipment handler - Store the request body as new equipment
#[utoipa::path(
    post,
    path = routes::EQUIPMENT,
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Equipment added", body = MessageResponse),
        (status = 400, description = "Database reported an empty id", body = MessageResponse),
        (status = 500, description = "Malformed body or DB error", body = FlaggedErrorResponse)
    ),
    tag = "equipment"
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let document = take_body(Collection::Equipment, payload)?;

    let id = state
        .store
        .insert_one(Collection::Equipment, document)
        .await
        .map_err(|e| ApiError::new(Collection::Equipment, e))?;

    if !id.is_reported() {
        tracing::warn!("Equipment insert reported no usable id: {}", id.to_wire());
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::failed("Failed to add equipment")),
        ));
    }

    tracing::info!("Added equipment with id: {}", id.to_wire());
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Equipment added successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{failing_app, is_object_id_hex, memory_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_equipment_empty() {
        let (status, body) = send(memory_app(), "GET", "/equipment", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "equipment": []}));
    }

    #[tokio::test]
    async fn test_add_then_list_equipment() {
        let app = memory_app();

        let (status, body) = send(
            app.clone(),
            "POST",
            "/equipment",
            Some(r#"{"name":"Excavator","hours":1200}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"success": true, "msg": "Equipment added successfully"})
        );

        let (status, body) = send(app, "GET", "/equipment", None).await;
        assert_eq!(status, StatusCode::OK);
        let items = body["equipment"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert!(is_object_id_hex(&items[0]["_id"]));
        assert_eq!(items[0]["name"], json!("Excavator"));
        assert_eq!(items[0]["hours"], json!(1200));
    }

    #[tokio::test]
    async fn test_add_equipment_supplied_id() {
        let (status, body) = send(
            memory_app(),
            "POST",
            "/equipment",
            Some(r#"{"_id":"e-1","name":"Crane"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"success": true, "msg": "Equipment added successfully"})
        );
    }

    #[tokio::test]
    async fn test_add_equipment_null_id() {
        let (status, body) = send(
            memory_app(),
            "POST",
            "/equipment",
            Some(r#"{"_id":null,"name":"Crane"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "msg": "Failed to add equipment"}));
    }

    #[tokio::test]
    async fn test_add_equipment_malformed_body() {
        let (status, body) =
            send(memory_app(), "POST", "/equipment", Some("\"just a string\"")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_equipment_has_no_delete_route() {
        let app = memory_app();
        let response = tower::ServiceExt::oneshot(
            app,
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/equipment/65a1f0c2e4b0a1b2c3d4e5f6")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_equipment_database_failure() {
        let (status, body) = send(failing_app(), "GET", "/equipment", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "error": "server selection timeout"})
        );

        let (status, body) =
            send(failing_app(), "POST", "/equipment", Some(r#"{"name":"Crane"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
    }
}
