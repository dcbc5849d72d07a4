//! Review submission DTOs.

use std::path::PathBuf;

use crate::domain::entities::{AccessToken, ReviewForm, UserId};
use crate::domain::ports::ReviewPayload;

/// Everything the submit use case needs, captured at the moment of submission.
#[derive(Debug, Clone)]
pub struct SubmitReviewRequest {
    /// Form values.
    pub form: ReviewForm,
    /// Selected image files, in selection order.
    pub images: Vec<PathBuf>,
    /// Resolved user id, if the session lookup has finished.
    pub user_id: Option<UserId>,
    /// Token to attach to the request.
    pub token: Option<AccessToken>,
}

impl SubmitReviewRequest {
    /// Creates a request without images or session.
    #[must_use]
    pub const fn new(form: ReviewForm) -> Self {
        Self {
            form,
            images: Vec::new(),
            user_id: None,
            token: None,
        }
    }

    /// Sets the images.
    #[must_use]
    pub fn with_images(mut self, images: Vec<PathBuf>) -> Self {
        self.images = images;
        self
    }

    /// Sets the user id.
    #[must_use]
    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the token.
    #[must_use]
    pub fn with_token(mut self, token: Option<AccessToken>) -> Self {
        self.token = token;
        self
    }
}

/// Builds the wire payload from form values, encoded images and the user id.
#[must_use]
pub fn build_payload(form: ReviewForm, image_files: Vec<String>, user_id: &UserId) -> ReviewPayload {
    ReviewPayload {
        platform: form.platform,
        product_name: form.product_name,
        option_name: form.option_name,
        price: form.price,
        shipping_fee: form.shipping_fee,
        seller: form.seller,
        start_date: form.start_date,
        review_title: form.review_title,
        review_content: form.review_content,
        image_files,
        user_id: user_id.as_str().to_string(),
    }
}
