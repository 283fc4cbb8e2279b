//! Preview state: the current source image and both parameter sets.

use crate::params::{MorphologyOp, MorphologyParams, ThresholdParams};
use image::RgbaImage;
use log::{debug, info};
use std::sync::Arc;

/// The two independent previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Threshold,
    Morphology,
}

impl PreviewKind {
    fn index(self) -> usize {
        match self {
            PreviewKind::Threshold => 0,
            PreviewKind::Morphology => 1,
        }
    }
}

/// A decoded image the previews are computed from.
pub struct SourceImage {
    pub pixels: RgbaImage,
    pub label: String,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage, label: impl Into<String>) -> Self {
        Self {
            pixels,
            label: label.into(),
        }
    }
}

/// Parameters captured for a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewParams {
    Threshold(ThresholdParams),
    Morphology(MorphologyParams),
}

impl PreviewParams {
    pub fn kind(&self) -> PreviewKind {
        match self {
            PreviewParams::Threshold(_) => PreviewKind::Threshold,
            PreviewParams::Morphology(_) => PreviewKind::Morphology,
        }
    }
}

/// Identifies which source and which request a render belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    pub kind: PreviewKind,
    pub generation: u64,
    pub sequence: u64,
}

/// Holds the current image, slider parameters and render bookkeeping.
#[derive(Default)]
pub struct PreviewState {
    source: Option<Arc<SourceImage>>,
    generation: u64,
    threshold: ThresholdParams,
    morphology: MorphologyParams,
    issued: [u64; 2],
    shown: [u64; 2],
    loads_started: u64,
}

impl PreviewState {
    /// Creates an empty state with default slider positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the source image and returns its generation.
    pub fn set_source(&mut self, source: SourceImage) -> u64 {
        self.generation += 1;
        info!(
            "Loaded source #{} '{}' ({}x{})",
            self.generation,
            source.label,
            source.pixels.width(),
            source.pixels.height()
        );
        self.source = Some(Arc::new(source));
        self.shown = [0; 2];
        self.generation
    }

    pub fn threshold(&self) -> ThresholdParams {
        self.threshold
    }

    pub fn morphology(&self) -> MorphologyParams {
        self.morphology
    }

    /// Updates threshold parameters from raw slider values.
    ///
    /// Returns true if the stored parameters changed.
    pub fn set_threshold(&mut self, low: i32, high: i32) -> bool {
        let params = ThresholdParams::new(low, high);
        let changed = params != self.threshold;
        self.threshold = params;
        changed
    }

    /// Updates morphology parameters from raw slider values.
    ///
    /// Returns true if the stored parameters changed.
    pub fn set_morphology(&mut self, kernel_size: i32, iterations: i32, op: MorphologyOp) -> bool {
        let params = MorphologyParams::new(kernel_size, iterations, op);
        let changed = params != self.morphology;
        self.morphology = params;
        changed
    }

    /// Captures what a render of `kind` needs right now.
    ///
    /// Returns `None` when no image is loaded.
    pub fn issue(
        &mut self,
        kind: PreviewKind,
    ) -> Option<(RenderTicket, Arc<SourceImage>, PreviewParams)> {
        let source = self.source.clone()?;
        self.issued[kind.index()] += 1;
        let ticket = RenderTicket {
            kind,
            generation: self.generation,
            sequence: self.issued[kind.index()],
        };
        let params = match kind {
            PreviewKind::Threshold => PreviewParams::Threshold(self.threshold),
            PreviewKind::Morphology => PreviewParams::Morphology(self.morphology),
        };
        Some((ticket, source, params))
    }

    /// Returns true while no later render of the same preview has been issued.
    pub fn is_latest_issue(&self, ticket: RenderTicket) -> bool {
        ticket.generation == self.generation && ticket.sequence == self.issued[ticket.kind.index()]
    }

    /// Registers an image load about to start and returns its ticket.
    pub fn begin_load(&mut self) -> u64 {
        self.loads_started += 1;
        self.loads_started
    }

    /// Returns true if no load was started after the one holding `ticket`.
    pub fn is_latest_load(&self, ticket: u64) -> bool {
        ticket == self.loads_started
    }

    /// Decides whether a finished render may be displayed.
    ///
    /// Renders for an older image, or older than one already shown, are dropped.
    pub fn accept(&mut self, ticket: RenderTicket) -> bool {
        let slot = ticket.kind.index();
        if ticket.generation != self.generation || ticket.sequence <= self.shown[slot] {
            debug!("Dropping stale {:?} render {:?}", ticket.kind, ticket);
            return false;
        }
        self.shown[slot] = ticket.sequence;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(label: &str) -> SourceImage {
        SourceImage::new(RgbaImage::new(4, 4), label)
    }

    #[test]
    fn no_image_means_no_render() {
        let mut state = PreviewState::new();
        assert!(state.issue(PreviewKind::Threshold).is_none());
        assert!(state.issue(PreviewKind::Morphology).is_none());
    }

    #[test]
    fn each_accepted_image_bumps_generation_once() {
        let mut state = PreviewState::new();
        assert_eq!(state.set_source(source("a.png")), 1);
        assert_eq!(state.set_source(source("b.png")), 2);
        let (ticket, source, _) = state.issue(PreviewKind::Threshold).unwrap();
        assert_eq!(ticket.generation, 2);
        assert_eq!(source.label, "b.png");
    }

    #[test]
    fn renders_for_previous_image_are_dropped() {
        let mut state = PreviewState::new();
        state.set_source(source("a.png"));
        let (old, _, _) = state.issue(PreviewKind::Threshold).unwrap();
        state.set_source(source("b.png"));
        let (new, _, _) = state.issue(PreviewKind::Threshold).unwrap();

        assert!(!state.accept(old));
        assert!(state.accept(new));
    }

    #[test]
    fn out_of_order_render_is_dropped() {
        let mut state = PreviewState::new();
        state.set_source(source("a.png"));
        let (first, _, _) = state.issue(PreviewKind::Morphology).unwrap();
        let (second, _, _) = state.issue(PreviewKind::Morphology).unwrap();

        assert!(state.accept(second));
        assert!(!state.accept(first));
    }

    #[test]
    fn older_load_is_superseded_by_newer_one() {
        let mut state = PreviewState::new();
        let slow = state.begin_load();
        let fast = state.begin_load();

        assert!(state.is_latest_load(fast));
        assert!(!state.is_latest_load(slow));

        state.set_source(source("fast.png"));
        assert!(!state.is_latest_load(slow));
    }

    #[test]
    fn queued_render_is_outdated_by_later_issue() {
        let mut state = PreviewState::new();
        state.set_source(source("a.png"));
        let (first, _, _) = state.issue(PreviewKind::Morphology).unwrap();
        assert!(state.is_latest_issue(first));

        let (second, _, _) = state.issue(PreviewKind::Morphology).unwrap();
        let (other, _, _) = state.issue(PreviewKind::Threshold).unwrap();
        assert!(!state.is_latest_issue(first));
        assert!(state.is_latest_issue(second));
        assert!(state.is_latest_issue(other));

        state.set_source(source("b.png"));
        assert!(!state.is_latest_issue(second));
    }

    #[test]
    fn previews_are_independent() {
        let mut state = PreviewState::new();
        state.set_source(source("a.png"));
        let morphology_before = state.morphology();

        assert!(state.set_threshold(10, 20));
        assert_eq!(state.morphology(), morphology_before);

        let threshold_before = state.threshold();
        assert!(state.set_morphology(7, 4, MorphologyOp::Erode));
        assert_eq!(state.threshold(), threshold_before);

        let (t, _, t_params) = state.issue(PreviewKind::Threshold).unwrap();
        let (m, _, m_params) = state.issue(PreviewKind::Morphology).unwrap();
        assert_eq!(t.sequence, 1);
        assert_eq!(m.sequence, 1);
        assert_eq!(t_params, PreviewParams::Threshold(ThresholdParams { low: 10, high: 20 }));
        assert_eq!(m_params.kind(), PreviewKind::Morphology);
        assert!(state.accept(m));
        assert!(state.accept(t));
    }

    #[test]
    fn unchanged_parameters_report_no_change() {
        let mut state = PreviewState::new();
        assert!(!state.set_threshold(177, 200));
        assert!(!state.set_morphology(3, 1, MorphologyOp::Dilate));
        assert!(state.set_threshold(177, 900));
        assert_eq!(state.threshold().high, 255);
        assert!(!state.set_threshold(177, 255));
    }
}
