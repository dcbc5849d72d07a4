//! Review submission use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SubmitReviewRequest, build_payload};
use crate::application::services::image_encoder;
use crate::domain::errors::ReviewError;
use crate::domain::ports::{ReviewPort, ReviewReceipt};

/// Validates a review, encodes its images and sends it to the backend.
#[derive(Clone)]
pub struct SubmitReviewUseCase {
    review_port: Arc<dyn ReviewPort>,
}

impl SubmitReviewUseCase {
    /// Creates new submit use case.
    #[must_use]
    pub const fn new(review_port: Arc<dyn ReviewPort>) -> Self {
        Self { review_port }
    }

    /// Executes the submission.
    ///
    /// Validation runs before any file is read or request is sent.
    ///
    /// # Errors
    /// Returns error if validation, encoding or the backend call fails.
    pub async fn execute(&self, request: SubmitReviewRequest) -> Result<ReviewReceipt, ReviewError> {
        let SubmitReviewRequest {
            form,
            images,
            user_id,
            token,
        } = request;

        let missing = form.missing_required();
        if !missing.is_empty() {
            debug!(?missing, "Submission blocked: required fields empty");
            return Err(ReviewError::missing_fields(missing));
        }

        if let Err(value) = form.parsed_start_date() {
            debug!(value = %value, "Submission blocked: invalid date");
            return Err(ReviewError::InvalidDate { value });
        }

        let Some(user_id) = user_id else {
            debug!("Submission blocked: no session");
            return Err(ReviewError::LoginRequired);
        };

        debug!(count = images.len(), "Encoding images");
        let image_files = image_encoder::encode_all(&images).await.map_err(|e| {
            warn!(error = %e, "Image encoding failed");
            e
        })?;

        let payload = build_payload(form, image_files, &user_id);

        let receipt = self
            .review_port
            .submit_review(token.as_ref(), &payload)
            .await
            .map_err(|e| {
                warn!(error = %e, "Review submission failed");
                e
            })?;

        info!(
            user_id = %user_id,
            review_id = receipt.review_id.as_deref().unwrap_or("-"),
            images = payload.image_files.len(),
            "Review submitted"
        );

        Ok(receipt)
    }

    /// Pings the storage initialization endpoint. Failures are only logged.
    pub async fn ensure_storage(&self) {
        match self.review_port.ensure_storage().await {
            Ok(()) => debug!("Storage initialization ping succeeded"),
            Err(e) => debug!(error = %e, "Storage initialization ping failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ReviewField, ReviewForm, UserId};
    use crate::domain::ports::mocks::{MockReviewPort, MockReviewResponse};
    use std::path::PathBuf;
    use test_case::test_case;

    fn complete_form() -> ReviewForm {
        ReviewForm::new()
            .with(ReviewField::Platform, "coupang")
            .with(ReviewField::ProductName, "Air fryer")
            .with(ReviewField::Price, "89000")
            .with(ReviewField::ReviewTitle, "Crispy")
            .with(ReviewField::ReviewContent, "Fries come out crispy.")
    }

    fn user() -> Option<UserId> {
        UserId::new("user-123")
    }

    #[test_case(ReviewField::Platform ; "platform")]
    #[test_case(ReviewField::ProductName ; "product_name")]
    #[test_case(ReviewField::ReviewTitle ; "review_title")]
    #[test_case(ReviewField::ReviewContent ; "review_content")]
    #[tokio::test]
    async fn test_missing_field_blocks_network_call(field: ReviewField) {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let request = SubmitReviewRequest::new(complete_form().with(field, "")).with_user(user());
        let result = use_case.execute(request).await;

        assert!(matches!(result, Err(ReviewError::MissingFields { ref fields }) if fields == &vec![field]));
        assert_eq!(port.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_checked_before_session() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let result = use_case
            .execute(SubmitReviewRequest::new(ReviewForm::new()))
            .await;

        assert!(matches!(result, Err(ReviewError::MissingFields { .. })));
        assert_eq!(port.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_no_session_blocks_network_call() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let result = use_case
            .execute(SubmitReviewRequest::new(complete_form()))
            .await;

        assert!(matches!(result, Err(ReviewError::LoginRequired)));
        assert_eq!(port.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_date_blocks_network_call() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let form = complete_form().with(ReviewField::StartDate, "2024-13-01");
        let result = use_case
            .execute(SubmitReviewRequest::new(form).with_user(user()))
            .await;

        assert!(matches!(result, Err(ReviewError::InvalidDate { .. })));
        assert_eq!(port.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_submission_sends_payload() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("box.jpg");
        std::fs::write(&image, b"abc").unwrap();

        let request = SubmitReviewRequest::new(complete_form())
            .with_images(vec![image])
            .with_user(user());
        let receipt = use_case.execute(request).await.unwrap();

        assert_eq!(receipt.review_id.as_deref(), Some("rev-1"));
        let submissions = port.submissions.lock();
        assert_eq!(submissions.len(), 1);
        let payload = &submissions[0];
        assert_eq!(payload.user_id, "user-123");
        assert_eq!(payload.product_name, "Air fryer");
        assert_eq!(payload.price, "89000");
        assert_eq!(payload.image_files, vec!["data:image/jpeg;base64,YWJj".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_message_passed_through() {
        let port = Arc::new(MockReviewPort::new(MockReviewResponse::Rejected {
            status: 400,
            error: Some("Duplicate review".to_string()),
        }));
        let use_case = SubmitReviewUseCase::new(port.clone());

        let err = use_case
            .execute(SubmitReviewRequest::new(complete_form()).with_user(user()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Duplicate review");
        assert_eq!(port.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_image_stops_before_sending() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        let request = SubmitReviewRequest::new(complete_form())
            .with_images(vec![PathBuf::from("/nonexistent/missing.png")])
            .with_user(user());
        let result = use_case.execute(request).await;

        assert!(matches!(result, Err(ReviewError::ImageEncoding { .. })));
        assert_eq!(port.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_ensure_storage_pings_backend() {
        let port = Arc::new(MockReviewPort::accepting());
        let use_case = SubmitReviewUseCase::new(port.clone());

        use_case.ensure_storage().await;

        assert_eq!(*port.storage_pings.lock(), 1);
    }

    #[tokio::test]
    async fn test_ensure_storage_swallows_failure() {
        let port = Arc::new(MockReviewPort::new(MockReviewResponse::NetworkFailure(
            "offline".to_string(),
        )));
        port.ensure_storage()
            .await
            .expect_err("backend is offline");
        let use_case = SubmitReviewUseCase::new(port.clone());

        use_case.ensure_storage().await;

        assert_eq!(*port.storage_pings.lock(), 2);
        assert_eq!(port.submission_count(), 0);
    }
}
