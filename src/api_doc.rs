use utoipa::OpenApi;

use crate::error::{ErrorResponse, FlaggedErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    CreatedResponse, EquipmentResponse, MessageResponse, ProjectsResponse, SuccessResponse,
    WorkersResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "workforce-api",
        version = "0.1.0",
        description = "CRUD endpoints for workers, projects and equipment backed by MongoDB"
    ),
    paths(
        handlers::health::health_handler,
        handlers::workers::list_workers,
        handlers::workers::create_worker,
        handlers::workers::delete_worker,
        handlers::projects::list_projects,
        handlers::projects::create_project,
        handlers::projects::delete_project,
        handlers::equipment::list_equipment,
        handlers::equipment::create_equipment
    ),
    components(
        schemas(
            WorkersResponse,
            ProjectsResponse,
            EquipmentResponse,
            MessageResponse,
            CreatedResponse,
            SuccessResponse,
            ErrorResponse,
            FlaggedErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "workers", description = "Employee records"),
        (name = "projects", description = "Project records"),
        (name = "equipment", description = "Equipment records")
    )
)]
pub struct ApiDoc;
