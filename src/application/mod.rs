//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services used by the screens.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ResolvedSession, SubmitReviewRequest, TokenSource};
pub use use_cases::{ResolveSessionUseCase, SubmitReviewUseCase};
