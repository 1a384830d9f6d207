use gpui::prelude::*;
use gpui::{FontWeight, MouseButton, div, px, rgb};

use clear_bg::monitor::MonitorInfo;

use crate::ui::controller::DebugPanel;

/// Build the monitor section: one row per connected monitor.
///
/// The row of the overlay's current monitor is highlighted. Clicking another
/// row moves the overlay there, but only while it is active; the controller
/// ignores monitor changes otherwise.
pub fn monitor_list(
    monitors: &[MonitorInfo],
    current: Option<usize>,
    overlay_active: bool,
    cx: &mut gpui::Context<DebugPanel>,
) -> impl IntoElement + use<> {
    let mut list = div().flex().flex_col().gap_2().w_full().max_w(px(500.0));

    for (i, mon) in monitors.iter().enumerate() {
        let is_current = current == Some(i);

        let display_name = if mon.name.is_empty() {
            format!("Monitor {}", i + 1)
        } else {
            format!("{} ({})", mon.name.replace("\\\\.\\", ""), i + 1)
        };
        let resolution = format!("{}x{}", mon.width(), mon.height());
        let work_area = format!(
            "work: {}x{} at ({}, {})",
            mon.work.width(),
            mon.work.height(),
            mon.work.left,
            mon.work.top
        );

        let index = i as i32;
        let row = div()
            .flex()
            .items_center()
            .gap_3()
            .px_4()
            .py_3()
            .w_full()
            .rounded(px(8.0))
            .bg(if is_current { rgb(0x1e3a1e) } else { rgb(0x1e1e1e) })
            .border_1()
            .border_color(if is_current { rgb(0x4CAF50) } else { rgb(0x333333) })
            .when(overlay_active && !is_current, |row| {
                row.cursor_pointer().on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, _, _window, cx| {
                        this.facade.set_monitor_index(index);
                        cx.notify();
                    }),
                )
            })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(2.0))
                    .flex_grow()
                    .child(
                        div()
                            .text_color(rgb(0xffffff))
                            .font_weight(FontWeight::MEDIUM)
                            .child(format!("🖥️ {display_name}")),
                    )
                    .child(
                        div()
                            .flex()
                            .gap_3()
                            .child(div().text_sm().text_color(rgb(0x888888)).child(resolution))
                            .child(div().text_sm().text_color(rgb(0x666666)).child(work_area)),
                    ),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(rgb(0x4CAF50))
                    .child(match (mon.primary, is_current && overlay_active) {
                        (_, true) => "● overlay",
                        (true, false) => "primary",
                        (false, false) => "",
                    }),
            );

        list = list.child(row);
    }

    list
}
