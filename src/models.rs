use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Response type for GET /workers
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkersResponse {
    pub success: bool,
    pub employees: Vec<JsonValue>,
}

/// Response type for GET /equipment
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct EquipmentResponse {
    pub success: bool,
    pub equipment: Vec<JsonValue>,
}

/// Response type for GET /projects
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<JsonValue>,
}

/// Outcome of a worker or equipment mutation
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub msg: String,
}

impl MessageResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
        }
    }
}

/// Response type for POST /projects
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

/// Response type for DELETE /projects/{id}
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}
