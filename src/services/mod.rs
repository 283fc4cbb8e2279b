//! Service layer for business logic.
//!
//! Separates business logic from UI handlers for better testability and maintainability.

pub mod clipboard_service;
pub mod preview_service;

pub use clipboard_service::{ClipboardError, ClipboardImage, ClipboardService};
pub use preview_service::PreviewService;
