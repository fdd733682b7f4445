//! Main application router.

use crate::{
    controllers::{health_controller, root_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    responses::detail,
    state::AppState,
};
use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::Response,
    Router,
};
use shaku::HasComponent;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use userdir_config::ServerConfig;
use userdir_repository::DatabasePoolInterface;
use userdir_service::UserService;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router from a Shaku module.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: HasComponent<dyn UserService> + HasComponent<dyn DatabasePoolInterface>,
{
    create_router_with_state(AppState::from_module(module), server_config)
}

/// Creates the main application router from prebuilt state.
pub fn create_router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(root_controller::router())
        .merge(user_controller::router())
        .merge(health_controller::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(middleware::map_response(framework_error_detail))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with user endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not Found")
}

/// Gives the bodiless 405 and 408 responses produced by axum and
/// `TimeoutLayer` the same `{"detail"}` body as every other error.
async fn framework_error_detail(response: Response) -> Response {
    let reason = match response.status() {
        StatusCode::METHOD_NOT_ALLOWED => "Method Not Allowed",
        StatusCode::REQUEST_TIMEOUT => "Request Timeout",
        _ => return response,
    };

    let mut mapped = detail(response.status(), reason);
    if let Some(allow) = response.headers().get(header::ALLOW) {
        mapped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    mapped
}
