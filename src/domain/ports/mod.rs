mod review_port;
mod session_port;
mod token_storage_port;

pub use review_port::{ReviewPayload, ReviewPort, ReviewReceipt};
pub use session_port::SessionPort;
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::review_port::mock::{MockReviewPort, MockReviewResponse};
    pub use super::session_port::MockSessionPort;
    pub use super::token_storage_port::mock::MockTokenStorage;
}
