// ============================
// crates/backend-lib/src/router.rs
// ============================
//! Router construction and HTTP layers.
use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::CorsSettings;
use crate::handlers;
use crate::roster::Roster;
use crate::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the application router
pub fn create_router<R: Roster + 'static>(state: AppState<R>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let static_files = ServeDir::new(&state.settings.static_dir);
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        .route("/", get(handlers::root))
        .route("/activities", get(handlers::list_activities::<R>))
        .route("/activities/{activity}/signup", post(handlers::signup::<R>))
        .route(
            "/activities/{activity}/unregister",
            delete(handlers::unregister::<R>),
        )
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

/// Build the CORS layer from settings. Origins that fail to parse were
/// already rejected by `Settings::validate` and are skipped here.
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if settings.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
