//! API Handlers
//!
//! Reads go through the cache-aside accessor; writes persist to the store and
//! then invalidate.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use tracing::info;

use crate::cache::{
    film_key, new_shared_cache, CacheAside, CachePolicy, Invalidator, KeyClass, SharedCache,
    FILMS_LIST_KEY,
};
use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{Comment, CreateCommentRequest, FilmSummary, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cache: SharedCache,
    pub reader: CacheAside,
    pub invalidator: Invalidator,
    pub policy: CachePolicy,
}

impl AppState {
    /// Wires the accessor and invalidator to the given cache instance.
    pub fn new(store: Store, cache: SharedCache, policy: CachePolicy) -> Self {
        Self {
            reader: CacheAside::new(cache.clone()),
            invalidator: Invalidator::new(cache.clone()),
            store,
            cache,
            policy,
        }
    }

    /// State with a fresh, empty cache.
    pub fn with_store(store: Store, policy: CachePolicy) -> Self {
        Self::new(store, new_shared_cache(), policy)
    }
}

/// Film ids arrive as raw path segments; anything non-numeric names no film.
fn parse_film_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("Film with ID \"{}\" does not exist", raw)))
}

/// Handler for GET /films/
pub async fn list_films(State(state): State<AppState>) -> Result<Json<Vec<FilmSummary>>> {
    let store = state.store.clone();
    let films = state
        .reader
        .fetch(
            FILMS_LIST_KEY,
            state.policy.ttl_for(KeyClass::FilmList),
            || async move { store.film_summaries().await.map_err(ApiError::from) },
        )
        .await?;

    Ok(Json(films))
}

/// Handler for GET /films/:film_id/
pub async fn get_film(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<FilmSummary>> {
    let film_id = parse_film_id(&raw_id)?;
    let store = state.store.clone();

    let film = state
        .reader
        .fetch(
            &film_key(film_id),
            state.policy.ttl_for(KeyClass::FilmDetail),
            || async move {
                store
                    .film_summary(film_id)
                    .await?
                    .ok_or_else(|| ApiError::film_not_found(film_id))
            },
        )
        .await?;

    Ok(Json(film))
}

/// Handler for GET /films/:film_id/comments/
///
/// Not cached; always read from the store.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Comment>>> {
    let film_id = parse_film_id(&raw_id)?;

    if state.store.find_film(film_id).await?.is_none() {
        return Err(ApiError::film_not_found(film_id));
    }

    Ok(Json(state.store.comments_for_film(film_id).await?))
}

/// Handler for POST /comments/
///
/// validate, persist, invalidate, respond. The response is only sent once
/// invalidation has completed.
pub async fn create_comment(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>)> {
    let Json(request) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let new_comment = request.validate().map_err(ApiError::Validation)?;

    let comment = state
        .store
        .create_comment(new_comment.film_id, &new_comment.text)
        .await?
        .ok_or_else(|| ApiError::film_not_found(new_comment.film_id))?;

    state.invalidator.invalidate_all().await;
    info!(comment_id = comment.id, film_id = comment.film_id, "comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Handler for GET /stats/
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health/
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::unhealthy(err.to_string())),
        ),
    }
}

/// Fallback for paths no route matches
pub async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::UnknownRoute(uri.path().to_string())
}

/// Fallback for a known path called with the wrong method
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
