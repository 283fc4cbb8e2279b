use slint::ComponentHandle;
use std::path::PathBuf;

use crate::state::AppState;
use crate::ui::image_display::{ImageOrigin, load_and_display_image};

fn startup_image_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    args.into_iter()
        .skip(1)
        .filter_map(|arg| {
            let arg_str = arg.to_string_lossy();
            if arg_str.starts_with('-') {
                None
            } else {
                Some(PathBuf::from(arg))
            }
        })
        .find(|path| crate::file_utils::is_supported_image(path))
}

/// Opens files dropped onto the window.
fn setup_drop_handler(app: &crate::AppWindow, app_state: &AppState) {
    use i_slint_backend_winit::WinitWindowAccessor;
    use i_slint_backend_winit::{EventResult, winit::event::WindowEvent};

    let ui_handle = app.as_weak();
    let app_state = app_state.clone();

    app.window().on_winit_window_event(move |_window, event| {
        if let WindowEvent::DroppedFile(path) = event {
            if crate::file_utils::is_supported_image(path) {
                load_and_display_image(
                    ui_handle.clone(),
                    ImageOrigin::Path(path.clone()),
                    "Failed to load dropped image",
                    app_state.clone(),
                );
            } else {
                log::warn!("Ignoring dropped file: {}", path.display());
            }
        }

        EventResult::Propagate
    });
}

pub fn configure_startup_opening(app: &crate::AppWindow, app_state: &AppState) {
    setup_drop_handler(app, app_state);

    if let Some(path) = startup_image_from_args(std::env::args_os()) {
        load_and_display_image(
            app.as_weak(),
            ImageOrigin::Path(path),
            "Failed to load startup image",
            app_state.clone(),
        );
    }
}
