//! Use case implementations.

mod resolve_session_use_case;
mod submit_review_use_case;

pub use resolve_session_use_case::ResolveSessionUseCase;
pub use submit_review_use_case::SubmitReviewUseCase;
