// Route path constants and router assembly

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::handlers;
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const WORKERS: &str = "/workers";
pub const WORKER_ITEM: &str = "/workers/{id}";
pub const PROJECTS: &str = "/projects";
pub const PROJECT_ITEM: &str = "/projects/{id}";
pub const EQUIPMENT: &str = "/equipment";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Largest accepted request body, matching MongoDB's 16 MiB document limit
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router with CORS, tracing and API docs
pub fn router(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(
            WORKERS,
            get(handlers::list_workers).post(handlers::create_worker),
        )
        .route(WORKER_ITEM, delete(handlers::delete_worker))
        .route(
            PROJECTS,
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(PROJECT_ITEM, delete(handlers::delete_project))
        .route(
            EQUIPMENT,
            get(handlers::list_equipment).post(handlers::create_equipment),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::memory_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_cors_allows_configured_origin_with_credentials() {
        let response = memory_app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/workers")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_cors_preflight_mirrors_requested_headers() {
        let response = memory_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/workers")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(
                        header::ACCESS_CONTROL_REQUEST_HEADERS,
                        "authorization,x-request-id",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization,x-request-id"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_other_origins() {
        let response = memory_app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/projects")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn test_unknown_update_route_is_not_served() {
        let response = memory_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/workers/65a1f0c2e4b0a1b2c3d4e5f6")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
