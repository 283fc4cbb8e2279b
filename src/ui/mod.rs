//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - `slint::spawn_local`: async UI work that must stay on the main thread (file dialog)
//! - `rayon::spawn`: CPU-bound work (decoding, threshold/morphology renders, clipboard reads)
//! - `slint::invoke_from_event_loop`: hands results from rayon back to the UI thread
//! - `slint::Timer::single_shot`: trailing runs of throttled preview requests

pub mod handlers;
pub mod image_display;
pub mod preview;
mod state_helpers;

pub use handlers::setup_handlers;
pub use state_helpers::*;
