use gpui::prelude::*;
use gpui::{MouseButton, div, px, rgb};

/// A small text button, dimmed and inert when disabled.
pub fn button(
    label: &str,
    enabled: bool,
    on_click: impl Fn(&gpui::MouseDownEvent, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    div()
        .px_3()
        .py_1()
        .rounded(px(6.0))
        .bg(rgb(0x2a2a2a))
        .text_sm()
        .text_color(if enabled { rgb(0xcccccc) } else { rgb(0x555555) })
        .when(enabled, |b| {
            b.cursor_pointer().on_mouse_down(MouseButton::Left, on_click)
        })
        .child(label.to_string())
}
