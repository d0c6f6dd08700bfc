// --- File: crates/services/quadra_backend/src/router.rs ---
//! Assembles the full application router.

use axum::{routing::get, Router};
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use quadra_common::QuadraError;
use quadra_config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app_state::AppState;
use crate::health::{detailed_health_handler, health_handler, live_handler, ready_handler};

/// Routes under `/api`, without static files or middleware.
pub fn api_router(state: &AppState) -> Router {
    let health_router = Router::new()
        .route("/health", get(health_handler))
        .route("/health/detailed", get(detailed_health_handler))
        .route("/health/ready", get(ready_handler))
        .route("/health/live", get(live_handler))
        .with_state(state.health_checks.clone());

    Router::new()
        .route("/", get(|| async { "Quadra API" }))
        .merge(quadra_booking::routes::routes(state.bookings.clone()))
        .merge(quadra_admin::routes(
            state.credentials.clone(),
            state.bookings.clone(),
        ))
        .merge(health_router)
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, QuadraError> {
    let origins = if config.allows_any() {
        AllowOrigin::from(Any)
    } else {
        let parsed = config
            .origins()
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    QuadraError::ConfigError(format!("invalid CORS origin '{}': {}", origin, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(parsed)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

/// The complete application: `/api`, Swagger UI (with `openapi`), the static
/// calendar UI as fallback, request tracing and CORS.
pub fn build_app(state: &AppState) -> Result<Router, QuadraError> {
    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router(state));

    #[cfg(feature = "openapi")]
    {
        use quadra_admin::doc::AdminApiDoc;
        use quadra_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Quadra API",
                version = "0.1.0",
                description = "Court booking service"
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        openapi_doc.merge(AdminApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let static_dir = &state.config.static_files.dir;
    info!("Serving static files from {}", static_dir);

    Ok(app
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors)?))
}
