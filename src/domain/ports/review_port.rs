//! Review backend port definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::AccessToken;
use crate::domain::errors::ReviewError;

/// JSON body of a review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub platform: String,
    pub product_name: String,
    pub option_name: String,
    pub price: String,
    pub shipping_fee: String,
    pub seller: String,
    pub start_date: String,
    pub review_title: String,
    pub review_content: String,
    /// Images as `data:` URLs, in selection order.
    pub image_files: Vec<String>,
    pub user_id: String,
}

/// Backend acknowledgement of an accepted review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    /// Review id, when the backend returns one.
    pub review_id: Option<String>,
    /// Raw success payload.
    pub body: serde_json::Value,
}

impl ReviewReceipt {
    /// Builds a receipt from the success body, looking for `id` or `data.id`.
    #[must_use]
    pub fn from_body(body: serde_json::Value) -> Self {
        let review_id = body
            .get("id")
            .or_else(|| body.get("data").and_then(|d| d.get("id")))
            .and_then(|id| match id {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        Self { review_id, body }
    }
}

/// Port for the review backend.
#[async_trait]
pub trait ReviewPort: Send + Sync {
    /// Submits a review.
    async fn submit_review(
        &self,
        token: Option<&AccessToken>,
        payload: &ReviewPayload,
    ) -> Result<ReviewReceipt, ReviewError>;

    /// Asks the backend to make sure image storage exists.
    async fn ensure_storage(&self) -> Result<(), ReviewError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_camel_case_keys() {
        let payload = ReviewPayload {
            platform: "gmarket".to_string(),
            product_name: "Mug".to_string(),
            option_name: String::new(),
            price: "9900".to_string(),
            shipping_fee: "0".to_string(),
            seller: String::new(),
            start_date: "2024-05-01".to_string(),
            review_title: "Nice".to_string(),
            review_content: "Holds coffee.".to_string(),
            image_files: vec!["data:image/png;base64,AAAA".to_string()],
            user_id: "u-1".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["productName"], "Mug");
        assert_eq!(json["shippingFee"], "0");
        assert_eq!(json["startDate"], "2024-05-01");
        assert_eq!(json["imageFiles"][0], "data:image/png;base64,AAAA");
        assert_eq!(json["userId"], "u-1");
        assert!(json.get("product_name").is_none());
    }

    #[test]
    fn test_receipt_extracts_id() {
        let receipt = ReviewReceipt::from_body(serde_json::json!({ "id": 42 }));
        assert_eq!(receipt.review_id.as_deref(), Some("42"));

        let receipt = ReviewReceipt::from_body(serde_json::json!({ "data": { "id": "abc" } }));
        assert_eq!(receipt.review_id.as_deref(), Some("abc"));

        let receipt = ReviewReceipt::from_body(serde_json::json!({ "ok": true }));
        assert!(receipt.review_id.is_none());
    }
}
