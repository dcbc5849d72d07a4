//! Review form entity and field metadata.

use std::fmt;

use chrono::NaiveDate;

/// Date format accepted for the review start date.
pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Shopping platform a review was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Coupang.
    Coupang,
    /// Gmarket.
    Gmarket,
    /// 11st.
    Elevenst,
}

impl Platform {
    /// All selectable platforms in display order.
    pub const ALL: [Self; 3] = [Self::Coupang, Self::Gmarket, Self::Elevenst];

    /// Returns the wire value sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coupang => "coupang",
            Self::Gmarket => "gmarket",
            Self::Elevenst => "11st",
        }
    }

    /// Returns human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Coupang => "Coupang",
            Self::Gmarket => "Gmarket",
            Self::Elevenst => "11st",
        }
    }

    /// Parses a wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Editable fields of the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewField {
    /// Platform the product was bought on.
    Platform,
    /// Product name.
    ProductName,
    /// Product option name.
    OptionName,
    /// Price paid.
    Price,
    /// Shipping fee paid.
    ShippingFee,
    /// Seller name.
    Seller,
    /// Date the review was written.
    StartDate,
    /// Review title.
    ReviewTitle,
    /// Review body.
    ReviewContent,
}

impl ReviewField {
    /// All fields in form order.
    pub const ALL: [Self; 9] = [
        Self::Platform,
        Self::ProductName,
        Self::OptionName,
        Self::Price,
        Self::ShippingFee,
        Self::Seller,
        Self::StartDate,
        Self::ReviewTitle,
        Self::ReviewContent,
    ];

    /// Fields that must be non-empty before submission.
    pub const REQUIRED: [Self; 4] = [
        Self::Platform,
        Self::ProductName,
        Self::ReviewTitle,
        Self::ReviewContent,
    ];

    /// Returns the field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::ProductName => "Product name",
            Self::OptionName => "Option name",
            Self::Price => "Price",
            Self::ShippingFee => "Shipping fee",
            Self::Seller => "Seller",
            Self::StartDate => "Review date",
            Self::ReviewTitle => "Review title",
            Self::ReviewContent => "Review content",
        }
    }

    /// Returns the placeholder shown for an empty field.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Platform => "Select a platform",
            Self::ProductName => "Enter the product name",
            Self::OptionName => "Enter the option name",
            Self::Price => "Enter the price",
            Self::ShippingFee => "Enter the shipping fee",
            Self::Seller => "Enter the seller",
            Self::StartDate => "YYYY-MM-DD",
            Self::ReviewTitle => "Enter the review title",
            Self::ReviewContent => "Enter the review content",
        }
    }

    /// Returns whether the field is required.
    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Review form values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    /// Platform wire value, empty when unset.
    pub platform: String,
    /// Product name.
    pub product_name: String,
    /// Option name.
    pub option_name: String,
    /// Price.
    pub price: String,
    /// Shipping fee.
    pub shipping_fee: String,
    /// Seller.
    pub seller: String,
    /// Start date in `YYYY-MM-DD`.
    pub start_date: String,
    /// Review title.
    pub review_title: String,
    /// Review content.
    pub review_content: String,
}

impl ReviewForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns value of a field.
    #[must_use]
    pub fn get(&self, field: ReviewField) -> &str {
        match field {
            ReviewField::Platform => &self.platform,
            ReviewField::ProductName => &self.product_name,
            ReviewField::OptionName => &self.option_name,
            ReviewField::Price => &self.price,
            ReviewField::ShippingFee => &self.shipping_fee,
            ReviewField::Seller => &self.seller,
            ReviewField::StartDate => &self.start_date,
            ReviewField::ReviewTitle => &self.review_title,
            ReviewField::ReviewContent => &self.review_content,
        }
    }

    /// Sets value of a field.
    pub fn set(&mut self, field: ReviewField, value: impl Into<String>) {
        let slot = match field {
            ReviewField::Platform => &mut self.platform,
            ReviewField::ProductName => &mut self.product_name,
            ReviewField::OptionName => &mut self.option_name,
            ReviewField::Price => &mut self.price,
            ReviewField::ShippingFee => &mut self.shipping_fee,
            ReviewField::Seller => &mut self.seller,
            ReviewField::StartDate => &mut self.start_date,
            ReviewField::ReviewTitle => &mut self.review_title,
            ReviewField::ReviewContent => &mut self.review_content,
        };
        *slot = value.into();
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: ReviewField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns selected platform, if the stored value is a known one.
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        Platform::from_wire(&self.platform)
    }

    /// Returns required fields that are still empty, in form order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<ReviewField> {
        ReviewField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Parses the start date. Empty means no date.
    ///
    /// # Errors
    /// Returns the raw value if it is not a valid `YYYY-MM-DD` date.
    pub fn parsed_start_date(&self) -> Result<Option<NaiveDate>, String> {
        if self.start_date.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&self.start_date, START_DATE_FORMAT)
            .map(Some)
            .map_err(|_| self.start_date.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn complete_form() -> ReviewForm {
        ReviewForm::new()
            .with(ReviewField::Platform, "coupang")
            .with(ReviewField::ProductName, "Kettle")
            .with(ReviewField::ReviewTitle, "Boils fast")
            .with(ReviewField::ReviewContent, "Works as advertised.")
    }

    #[test]
    fn test_complete_form_has_no_missing_fields() {
        assert!(complete_form().missing_required().is_empty());
    }

    #[test_case(ReviewField::Platform ; "platform")]
    #[test_case(ReviewField::ProductName ; "product_name")]
    #[test_case(ReviewField::ReviewTitle ; "review_title")]
    #[test_case(ReviewField::ReviewContent ; "review_content")]
    fn test_missing_required_field(field: ReviewField) {
        let form = complete_form().with(field, "");
        assert_eq!(form.missing_required(), vec![field]);
    }

    #[test]
    fn test_optional_fields_not_required() {
        let form = complete_form()
            .with(ReviewField::OptionName, "")
            .with(ReviewField::Price, "")
            .with(ReviewField::Seller, "");
        assert!(form.missing_required().is_empty());
        assert!(!ReviewField::Seller.is_required());
    }

    #[test]
    fn test_platform_wire_values() {
        assert_eq!(Platform::from_wire("11st"), Some(Platform::Elevenst));
        assert_eq!(Platform::from_wire("amazon"), None);
        assert_eq!(complete_form().platform(), Some(Platform::Coupang));
    }

    #[test]
    fn test_start_date_parsing() {
        let form = complete_form();
        assert_eq!(form.parsed_start_date(), Ok(None));

        let form = form.with(ReviewField::StartDate, "2024-02-29");
        assert!(form.parsed_start_date().unwrap().is_some());

        let form = form.with(ReviewField::StartDate, "2023-02-29");
        assert_eq!(form.parsed_start_date(), Err("2023-02-29".to_string()));
    }
}
