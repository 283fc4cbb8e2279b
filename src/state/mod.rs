//! State management for the preview application.

use crate::config::PREVIEW_THROTTLE;
use crate::throttle::Throttle;
use std::sync::{Arc, Mutex};

pub mod preview;

pub use preview::{PreviewKind, PreviewParams, PreviewState, RenderTicket, SourceImage};

/// Application-wide state container.
#[derive(Clone)]
pub struct AppState {
    pub preview: Arc<Mutex<PreviewState>>,
    /// Rate limiter for the threshold preview.
    pub threshold_throttle: Arc<Mutex<Throttle>>,
    /// Rate limiter for the morphology preview.
    pub morphology_throttle: Arc<Mutex<Throttle>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            preview: Arc::new(Mutex::new(PreviewState::new())),
            threshold_throttle: Arc::new(Mutex::new(Throttle::new(
                "threshold",
                PREVIEW_THROTTLE,
            ))),
            morphology_throttle: Arc::new(Mutex::new(Throttle::new(
                "morphology",
                PREVIEW_THROTTLE,
            ))),
        }
    }

    pub fn throttle(&self, kind: PreviewKind) -> Arc<Mutex<Throttle>> {
        match kind {
            PreviewKind::Threshold => self.threshold_throttle.clone(),
            PreviewKind::Morphology => self.morphology_throttle.clone(),
        }
    }
}
