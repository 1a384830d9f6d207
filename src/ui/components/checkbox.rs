use gpui::prelude::*;
use gpui::{MouseButton, div, px, rgb};

/// A labelled checkbox.
///
/// Stops mouse event propagation so an enclosing row does not also fire its
/// handler. A disabled checkbox is dimmed and ignores clicks.
pub fn checkbox(
    label: &str,
    checked: bool,
    enabled: bool,
    on_click: impl Fn(&bool, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    let accent = if enabled { rgb(0x4CAF50) } else { rgb(0x2e5230) };

    div()
        .flex()
        .items_center()
        .gap_2()
        .when(enabled, |row| {
            row.cursor_pointer()
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    cx.stop_propagation();
                    on_click(&checked, window, cx);
                })
        })
        .child(
            div()
                .flex()
                .items_center()
                .justify_center()
                .w(px(20.0))
                .h(px(20.0))
                .rounded(px(4.0))
                .bg(if checked { accent } else { rgb(0x2a2a2a) })
                .border_1()
                .border_color(if checked { accent } else { rgb(0x666666) })
                .child(
                    div()
                        .text_color(rgb(0xffffff))
                        .child(if checked { "✓" } else { "" }),
                ),
        )
        .child(
            div()
                .text_sm()
                .text_color(if enabled { rgb(0xcccccc) } else { rgb(0x666666) })
                .child(label.to_string()),
        )
}
