use gpui::prelude::*;
use gpui::{MouseButton, div, px, rgb};

/// A toggle switch: a pill-shaped track with a knob that slides between the
/// *off* (left) and *on* (right) positions.
///
/// `busy` renders the knob half-way and ignores clicks, for states that are
/// still settling.
pub fn switch(
    checked: bool,
    busy: bool,
    on_click: impl Fn(&bool, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    let knob_offset = match (busy, checked) {
        (true, _) => px(12.0),
        (false, true) => px(20.0),
        (false, false) => px(4.0),
    };

    div()
        .flex()
        .items_center()
        .w(px(44.0))
        .h(px(24.0))
        .rounded(px(12.0))
        .bg(match (busy, checked) {
            (true, _) => rgb(0x8a6d1f),
            (false, true) => rgb(0x4CAF50),
            (false, false) => rgb(0x333333),
        })
        .border_1()
        .border_color(if checked { rgb(0x4CAF50) } else { rgb(0x555555) })
        .when(!busy, |track| {
            track
                .cursor_pointer()
                .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                    on_click(&checked, window, cx);
                })
        })
        .child(
            div()
                .w(px(16.0))
                .h(px(16.0))
                .rounded_full()
                .bg(rgb(0xffffff))
                .ml(knob_offset),
        )
}
