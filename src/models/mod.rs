//! Request, response and record models
//!
//! Store records, the cached derived views, and the DTOs used for
//! serializing/deserializing HTTP bodies.

pub mod film;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use film::{Comment, Film, FilmSummary};
pub use requests::{CreateCommentRequest, NewComment, MAX_COMMENT_LENGTH};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
