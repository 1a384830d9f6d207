use std::cell::Cell;
use std::rc::Rc;

use gpui::prelude::*;
use gpui::{Bounds, FontWeight, Pixels, div, px, rgb};
use tracing::warn;

use clear_bg::geometry::RegionPair;
use clear_bg::monitor::MonitorInfo;
use clear_bg::overlay::{OverlayBackend, OverlayFacade, OverlayPhase, SampleOutcome};
use clear_bg::{OverlayError, OverlaySettings};

use crate::ui::components::{button, checkbox, switch, threshold_slider};
use crate::ui::host::PanelHost;
use crate::ui::monitor_list::monitor_list;

/// Facade type the panel drives.
pub type PanelFacade = OverlayFacade<Box<dyn OverlayBackend>, PanelHost>;

/// Debug panel for the overlay.
///
/// Owns the [`OverlayFacade`] and pumps its frame tick from `render`, so
/// the overlay advances once per composed frame of the panel window.
pub struct DebugPanel {
    pub monitors: Vec<MonitorInfo>,
    pub facade: PanelFacade,
    /// Second handle on the facade's host, used to feed it window state.
    host: PanelHost,
    /// Last activation error, shown until the next successful activation.
    last_error: Option<OverlayError>,
    /// Start-up activation runs on the first frame, once the host knows the
    /// window size.
    bootstrapped: bool,
    /// Cached bounds of the slider track, written during prepaint.
    pub slider_bounds: Rc<Cell<Option<Bounds<Pixels>>>>,
}

impl DebugPanel {
    pub fn new(
        monitors: Vec<MonitorInfo>,
        backend: Box<dyn OverlayBackend>,
        settings: OverlaySettings,
    ) -> Self {
        let host = PanelHost::new(monitors.len());
        let facade = OverlayFacade::new(backend, host.clone(), settings);
        Self {
            monitors,
            facade,
            host,
            last_error: None,
            bootstrapped: false,
            slider_bounds: Rc::new(Cell::new(None)),
        }
    }

    fn phase(&self) -> OverlayPhase {
        self.facade
            .controller()
            .map_or(OverlayPhase::Inactive, |c| c.phase())
    }

    fn toggle_overlay(&mut self) {
        if self.phase() == OverlayPhase::Inactive {
            self.last_error = self.facade.activate().err();
        } else {
            self.facade.deactivate();
        }
    }

    /// Move the overlay by `step` monitors from the current one.
    fn step_monitor(&mut self, step: i32) {
        let current = self.facade.current_monitor_index();
        if current >= 0 {
            self.facade.set_monitor_index(current + step);
        }
    }

    pub fn apply_threshold(&mut self, threshold: f32, cx: &mut gpui::Context<Self>) {
        if (self.facade.settings().click_through_threshold - threshold).abs() > f32::EPSILON {
            self.facade.set_click_through_threshold(threshold);
            cx.notify();
        }
    }
}

fn format_region(label: &str, region: &RegionPair) -> String {
    let ui = &region.ui;
    let world = &region.world;
    format!(
        "{label}  ui: ({:.0}, {:.0}) → ({:.0}, {:.0})  world: ({:.2}, {:.2}) → ({:.2}, {:.2})",
        ui.left, ui.bottom, ui.right, ui.top, world.left, world.bottom, world.right, world.top
    )
}

fn format_sample(sample: Option<SampleOutcome>, click_through: bool) -> String {
    match sample {
        Some(SampleOutcome::Forwarded { x, y, alpha }) => format!(
            "pixel ({x}, {y}) alpha {alpha:.2} → click-through {}",
            if click_through { "on" } else { "off" }
        ),
        Some(SampleOutcome::Skipped(reason)) => format!("sampling skipped: {reason:?}"),
        None => "not sampling".to_string(),
    }
}

impl Render for DebugPanel {
    fn render(
        &mut self,
        window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl IntoElement {
        // ── Advance the overlay by one frame ─────────────────────────────
        self.host.sync_with_window(window);
        if !std::mem::replace(&mut self.bootstrapped, true) {
            self.last_error = self.facade.bootstrap().err();
        }
        if let Err(e) = self.facade.tick() {
            warn!("overlay activation aborted: {e}");
            self.last_error = Some(e);
        }

        let phase = self.phase();
        if matches!(phase, OverlayPhase::Activating | OverlayPhase::Active) {
            window.request_animation_frame();
        }
        let is_active = phase == OverlayPhase::Active;

        // ── Snapshot values for the builders below ───────────────────────
        let settings = self.facade.settings().clone();
        let current = usize::try_from(self.facade.current_monitor_index()).ok();
        let screen = self.facade.screen_region();
        let taskbar = self.facade.taskbar_region();
        let frame_time = self.facade.performance_stats();
        let (sample, click_through) = self.facade.controller().map_or((None, false), |c| {
            (c.last_sample(), c.backend().is_click_through_enabled())
        });

        let mon_list = monitor_list(&self.monitors, current, is_active, cx);
        let slider = threshold_slider(settings.click_through_threshold, &self.slider_bounds, cx);

        let status = match (&self.last_error, phase) {
            (Some(e), OverlayPhase::Inactive) => format!("Activation failed: {e}"),
            (_, OverlayPhase::Activating) => "Waiting for the main camera…".to_string(),
            (_, OverlayPhase::Active) => match current {
                Some(i) => format!("Overlay on monitor {}", i + 1),
                None => "Overlay on".to_string(),
            },
            _ => "Normal window mode".to_string(),
        };

        // ── Activation panel ─────────────────────────────────────────────
        let activation_panel = div()
            .flex()
            .items_center()
            .justify_between()
            .w_full()
            .max_w(px(500.0))
            .px_4()
            .py_4()
            .rounded(px(12.0))
            .bg(if is_active { rgb(0x1e3a1e) } else { rgb(0x1e1e1e) })
            .border_1()
            .border_color(if is_active { rgb(0x4CAF50) } else { rgb(0x333333) })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(2.0))
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .text_color(rgb(0xffffff))
                            .child("Transparent overlay"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(if self.last_error.is_some() && !is_active {
                                rgb(0xE57373)
                            } else if is_active {
                                rgb(0x81C784)
                            } else {
                                rgb(0x888888)
                            })
                            .child(status),
                    ),
            )
            .child(switch(
                is_active,
                phase == OverlayPhase::Activating,
                cx.listener(|this, _, _window, cx| {
                    this.toggle_overlay();
                    cx.notify();
                }),
            ));

        // ── Window options ───────────────────────────────────────────────
        let options = div()
            .flex()
            .items_center()
            .justify_between()
            .w_full()
            .max_w(px(500.0))
            .child(checkbox(
                "Always on top",
                settings.always_on_top,
                is_active,
                cx.listener(|this, checked: &bool, _window, cx| {
                    this.facade.always_on_top(!*checked);
                    cx.notify();
                }),
            ))
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(button(
                        "◀ Previous",
                        is_active && current.is_some_and(|i| i > 0),
                        cx.listener(|this, _, _window, cx| {
                            this.step_monitor(-1);
                            cx.notify();
                        }),
                    ))
                    .child(button(
                        "Next ▶",
                        is_active && current.is_some_and(|i| i + 1 < self.monitors.len()),
                        cx.listener(|this, _, _window, cx| {
                            this.step_monitor(1);
                            cx.notify();
                        }),
                    )),
            );

        // ── Geometry readouts ────────────────────────────────────────────
        let readout = |text: String| {
            div()
                .text_xs()
                .font_family("monospace")
                .text_color(rgb(0xaaaaaa))
                .child(text)
        };
        let frame_text = if frame_time < 0.0 {
            format!("frame time: n/a ({frame_time})")
        } else {
            format!("frame time: {frame_time:.2} ms")
        };
        let readouts = div()
            .flex()
            .flex_col()
            .gap_1()
            .w_full()
            .max_w(px(500.0))
            .child(readout(format_region("screen ", &screen)))
            .child(readout(format_region("taskbar", &taskbar)))
            .child(readout(frame_text))
            .child(readout(format!(
                "host: {} fps target, background {}",
                self.host.target_fps(),
                if self.host.runs_in_background() { "on" } else { "off" }
            )))
            .child(readout(format_sample(sample, click_through)));

        let sep = || div().w_full().max_w(px(500.0)).h(px(1.0)).bg(rgb(0x333333));

        // ── Assemble the full layout ─────────────────────────────────────
        div()
            .flex()
            .flex_col()
            .gap_5()
            .size_full()
            .p_6()
            .items_center()
            .bg(rgb(0x0e0e0e))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap_1()
                    .child(
                        div()
                            .text_2xl()
                            .font_weight(FontWeight::BOLD)
                            .text_color(rgb(0xffffff))
                            .child("ClearBG"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(0x888888))
                            .child("Desktop overlay debug panel"),
                    ),
            )
            .child(sep())
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .w_full()
                    .max_w(px(500.0))
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::MEDIUM)
                            .text_color(rgb(0xcccccc))
                            .child(format!("Monitors ({})", self.monitors.len())),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(0x666666))
                            .child(if is_active {
                                "Click a monitor to move the overlay"
                            } else {
                                "Enable the overlay to switch monitors"
                            }),
                    ),
            )
            .child(mon_list)
            .child(options)
            .child(sep())
            .child(slider)
            .child(sep())
            .child(activation_panel)
            .child(readouts)
    }
}
