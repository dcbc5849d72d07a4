//! Reviewdesk - a terminal client for submitting product reviews.
//!
//! This crate provides a review submission form with clean architecture:
//! session lookup, image attachment, validation and a TUI interface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "reviewdesk";
