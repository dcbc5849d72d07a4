//! Data transfer objects for the application layer.

mod review_dto;
mod session_dto;

pub use review_dto::{SubmitReviewRequest, build_payload};
pub use session_dto::{ResolvedSession, TokenSource};
