//! UI screens.

mod app;
mod notification_popup;
mod review_form_screen;
mod review_list_screen;

pub use app::{App, Route};
pub use notification_popup::NotificationPopup;
pub use review_form_screen::{
    FormFocus, PickerOptions, ReviewDraft, ReviewFormAction, ReviewFormScreen, SessionStatus,
};
pub use review_list_screen::{ReviewListAction, ReviewListScreen, SubmittedReview};
