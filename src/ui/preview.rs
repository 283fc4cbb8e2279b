//! Throttled preview recomputation.
//!
//! Slider callbacks and image loads call [`request_preview`]. The per-preview
//! throttle decides whether to render now or arm a single-shot timer for the
//! trailing run; rendering happens on rayon and the result comes back through
//! `slint::invoke_from_event_loop`.

use crate::services::PreviewService;
use crate::state::{AppState, PreviewKind};
use crate::throttle::ThrottleDecision;
use log::debug;
use std::time::{Duration, Instant};

/// Requests a recomputation of one preview, subject to its rate limit.
pub fn request_preview(ui: slint::Weak<crate::AppWindow>, app_state: &AppState, kind: PreviewKind) {
    let decision = match app_state.throttle(kind).lock() {
        Ok(mut throttle) => throttle.request(Instant::now()),
        Err(_) => return,
    };

    match decision {
        ThrottleDecision::Run => spawn_render(ui, app_state, kind),
        ThrottleDecision::Defer(delay) => schedule_trailing(ui, app_state.clone(), kind, delay),
        ThrottleDecision::Coalesced => {}
    }
}

fn schedule_trailing(
    ui: slint::Weak<crate::AppWindow>,
    app_state: AppState,
    kind: PreviewKind,
    delay: Duration,
) {
    slint::Timer::single_shot(delay, move || {
        let polled = match app_state.throttle(kind).lock() {
            Ok(mut throttle) => throttle.poll(Instant::now()),
            Err(_) => return,
        };
        match polled {
            Ok(true) => spawn_render(ui, &app_state, kind),
            Ok(false) => {}
            // timer fired early
            Err(remaining) => schedule_trailing(ui, app_state, kind, remaining),
        }
    });
}

/// Renders on a worker thread and displays the result if it is still current.
///
/// No-op when no image is loaded.
fn spawn_render(ui: slint::Weak<crate::AppWindow>, app_state: &AppState, kind: PreviewKind) {
    let service = PreviewService::new(app_state.preview.clone());
    let Some(job) = service.job(kind) else {
        return;
    };

    rayon::spawn(move || {
        if !service.is_current(&job) {
            debug!("Skipping overtaken {:?} render", kind);
            return;
        }
        let rendered = job.render();

        let _ = slint::invoke_from_event_loop(move || {
            if !service.accept(&rendered) {
                return;
            }
            if let Some(ui) = ui.upgrade() {
                let image = crate::image_loader::create_slint_image(
                    &rendered.data,
                    rendered.width,
                    rendered.height,
                );
                crate::ui::set_preview_image(&ui, rendered.ticket.kind, image);
            }
        });
    });
}
