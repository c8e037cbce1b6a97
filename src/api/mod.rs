//! API Module
//!
//! HTTP handlers and routing for the film catalog.
//!
//! # Endpoints
//! - `GET /films/` - List films (cached)
//! - `GET /films/:film_id/` - Film detail (cached)
//! - `GET /films/:film_id/comments/` - Comments for a film
//! - `POST /comments/` - Create a comment
//! - `GET /stats/` - Cache statistics
//! - `GET /health/` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
