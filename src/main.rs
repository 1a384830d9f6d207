mod ui;

use std::path::PathBuf;

use anyhow::Context as _;
use gpui::{AppContext, Application, WindowOptions};
use tracing::{error, info, warn};

use clear_bg::monitor::enumerate_monitors;
use clear_bg::overlay::{OverlayBackend, UnavailableBackend};
use clear_bg::{OverlaySettings, logging};

use crate::ui::DebugPanel;

/// Environment variable overriding the settings file location.
const SETTINGS_ENV: &str = "CLEAR_BG_SETTINGS";
const DEFAULT_SETTINGS_FILE: &str = "clear_bg.json";

fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// The native overlay backend for the panel window, or an inert one when the
/// platform has none.
fn native_backend(window: &gpui::Window) -> Box<dyn OverlayBackend> {
    #[cfg(windows)]
    {
        match clear_bg::overlay::Win32Backend::from_window(window) {
            Ok(backend) => return Box::new(backend),
            Err(e) => warn!("native overlay unavailable: {e:#}"),
        }
    }
    #[cfg(not(windows))]
    warn!("no native overlay backend on this platform; geometry stays on fallback values");

    let size = window.viewport_size();
    let width: f32 = size.width.into();
    let height: f32 = size.height.into();
    Box::new(UnavailableBackend::new(width as i32, height as i32))
}

fn main() -> anyhow::Result<()> {
    let path = settings_path();
    let settings = OverlaySettings::load(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    logging::init(settings.debug_mode);
    info!(path = %path.display(), "=== ClearBG overlay ===");

    let monitors = enumerate_monitors();
    info!("found {} monitor(s)", monitors.len());
    for (i, mon) in monitors.iter().enumerate() {
        info!(
            "  [{}] {}: {}x{} at ({}, {}){}",
            i,
            mon.name,
            mon.width(),
            mon.height(),
            mon.bounds.left,
            mon.bounds.top,
            if mon.primary { " primary" } else { "" },
        );
    }

    Application::new().run(move |app: &mut gpui::App| {
        let monitors = monitors.clone();
        let settings = settings.clone();

        let opened = app.open_window(
            WindowOptions {
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("ClearBG".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            move |window, cx| {
                let backend = native_backend(window);
                cx.new(move |_| DebugPanel::new(monitors, backend, settings))
            },
        );
        if let Err(e) = opened {
            error!("failed to open the panel window: {e:#}");
            app.quit();
        }
    });

    Ok(())
}
