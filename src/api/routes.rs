//! API Routes
//!
//! Configures the Axum router. Every path is served with and without its
//! trailing slash.

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_comment, get_film, health_handler, list_comments, list_films, method_not_allowed,
    stats_handler, unknown_route, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /films/` - All films with comment counts (cached)
/// - `GET /films/:film_id/` - One film with its comment count (cached)
/// - `GET /films/:film_id/comments/` - Comments for a film, oldest first
/// - `POST /comments/` - Create a comment, invalidating the cache
/// - `GET /stats/` - Cache statistics
/// - `GET /health/` - Store connectivity check
///
/// Unknown paths and unsupported methods answer in the error envelope.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes: [(&str, MethodRouter<AppState>); 6] = [
        ("/films", get(list_films)),
        ("/films/:film_id", get(get_film)),
        ("/films/:film_id/comments", get(list_comments)),
        ("/comments", post(create_comment)),
        ("/stats", get(stats_handler)),
        ("/health", get(health_handler)),
    ];

    routes
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            with_optional_slash(router, path, handler.fallback(method_not_allowed))
        })
        .fallback(unknown_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn with_optional_slash(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}
