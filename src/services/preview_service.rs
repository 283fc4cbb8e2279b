//! Service for computing preview images.
//!
//! Jobs are captured on the UI thread, rendered on a worker, then checked
//! against the current state before being displayed.

use crate::state::{PreviewKind, PreviewParams, PreviewState, RenderTicket, SourceImage};
use crate::transform;
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// A render captured from the current state.
pub struct PreviewJob {
    ticket: RenderTicket,
    source: Arc<SourceImage>,
    params: PreviewParams,
}

/// RGBA8 output of a finished job.
pub struct RenderedPreview {
    pub ticket: RenderTicket,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PreviewJob {
    /// Runs the transform. CPU-bound; call from a worker thread.
    pub fn render(self) -> RenderedPreview {
        let start = Instant::now();
        let output = match self.params {
            PreviewParams::Threshold(params) => transform::threshold(&self.source.pixels, params),
            PreviewParams::Morphology(params) => transform::morphology(&self.source.pixels, params),
        };
        debug!(
            "Rendered {:?} preview with {:?} in {:?}",
            self.params.kind(),
            self.params,
            start.elapsed()
        );

        let (width, height) = output.dimensions();
        RenderedPreview {
            ticket: self.ticket,
            data: output.into_raw(),
            width,
            height,
        }
    }
}

/// Service for creating and accepting preview renders.
#[derive(Clone)]
pub struct PreviewService {
    state: Arc<Mutex<PreviewState>>,
}

impl PreviewService {
    /// Creates a new preview service.
    pub fn new(state: Arc<Mutex<PreviewState>>) -> Self {
        Self { state }
    }

    /// Captures a job for `kind`, or `None` when no image is loaded.
    pub fn job(&self, kind: PreviewKind) -> Option<PreviewJob> {
        let mut state = self.state.lock().ok()?;
        let (ticket, source, params) = state.issue(kind)?;
        Some(PreviewJob {
            ticket,
            source,
            params,
        })
    }

    /// Returns true if no later job for the same preview has been issued.
    ///
    /// Workers check this before rendering so queued jobs that were overtaken
    /// during a slider drag are skipped.
    pub fn is_current(&self, job: &PreviewJob) -> bool {
        self.state
            .lock()
            .map(|state| state.is_latest_issue(job.ticket))
            .unwrap_or(false)
    }

    /// Returns true if a finished render is still current and may be shown.
    pub fn accept(&self, rendered: &RenderedPreview) -> bool {
        self.state
            .lock()
            .map(|mut state| state.accept(rendered.ticket))
            .unwrap_or(false)
    }
}
