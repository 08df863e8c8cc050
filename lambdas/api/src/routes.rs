use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/schema", get(handlers::schema))
        .route("/test", get(handlers::diagnostics))
        .route(
            "/api/medicines",
            post(handlers::create_medicine).get(handlers::list_medicines),
        )
        .route(
            "/api/prescriptions",
            post(handlers::create_prescription).get(handlers::list_prescriptions),
        )
        .route(
            "/api/staff",
            post(handlers::create_staff).get(handlers::list_staff),
        )
        .route(
            "/api/suppliers",
            post(handlers::create_supplier).get(handlers::list_suppliers),
        )
        .with_state(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

// Any origin with credentials: the request's own origin, method and headers
// are echoed back, since a literal `*` is not allowed alongside credentials.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
