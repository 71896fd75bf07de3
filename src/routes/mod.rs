// src/routes/mod.rs

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{auth, config::Config, AppState};

pub mod health;
pub mod kpi;
pub mod validate;

pub fn cors(cfg: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(auth::API_KEY_HEADER),
        ])
}

/// Full application router: protected KPI routes plus the public probe.
pub fn router(state: AppState, cfg: &Config) -> Router {
    let protected = Router::new()
        .route("/daily", post(kpi::get_daily))
        .route("/monthly", post(kpi::get_monthly))
        .route_layer(middleware::from_fn_with_state(
            state.api_key.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/healthz", get(health::healthz))
        .merge(protected)
        .with_state(state)
        .layer(TimeoutLayer::new(cfg.request_timeout))
        .layer(cors(cfg))
        .layer(TraceLayer::new_for_http())
}
