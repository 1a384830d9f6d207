use std::cell::Cell;
use std::rc::Rc;

use gpui::prelude::*;
use gpui::{Bounds, FontWeight, MouseButton, Pixels, div, px, rgb};

use crate::ui::controller::DebugPanel;

/// Width of the slider track in pixels.
const SLIDER_WIDTH: f32 = 400.0;

/// Quick-select thresholds, in percent.
const PRESETS: [u8; 5] = [5, 10, 25, 50, 75];

/// Build the click-through threshold section.
///
/// Pixels whose alpha is below the threshold let clicks through to the
/// desktop. Includes the current percentage, a draggable track and a row of
/// preset buttons.
pub fn threshold_slider(
    threshold: f32,
    slider_bounds: &Rc<Cell<Option<Bounds<Pixels>>>>,
    cx: &mut gpui::Context<DebugPanel>,
) -> impl IntoElement + use<> {
    let threshold = threshold.clamp(0.0, 1.0);
    let knob_position = threshold * SLIDER_WIDTH;

    let mut presets = div().flex().gap_2().mt_1();
    for percent in PRESETS {
        presets = presets.child(preset_btn(percent, threshold, cx));
    }

    div()
        .flex()
        .flex_col()
        .gap_2()
        .w_full()
        .max_w(px(500.0))
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .child(
                    div()
                        .text_base()
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(rgb(0xcccccc))
                        .child("Click-through below alpha:"),
                )
                .child(
                    div()
                        .px_3()
                        .py_1()
                        .bg(rgb(0x2a2a2a))
                        .rounded(px(6.0))
                        .text_base()
                        .font_weight(FontWeight::BOLD)
                        .text_color(rgb(0x4CAF50))
                        .child(format!("{}%", (threshold * 100.0).round() as u8)),
                ),
        )
        .child(
            div()
                .flex()
                .items_center()
                .gap_3()
                .child(div().text_sm().text_color(rgb(0x666666)).child("0%"))
                .child(slider_track(knob_position, slider_bounds, cx))
                .child(div().text_sm().text_color(rgb(0x666666)).child("100%")),
        )
        .child(presets)
}

/// The interactive track. A wrapper captures the track bounds during
/// prepaint so window-space mouse positions can be mapped onto it.
fn slider_track(
    knob_position: f32,
    slider_bounds: &Rc<Cell<Option<Bounds<Pixels>>>>,
    cx: &mut gpui::Context<DebugPanel>,
) -> impl IntoElement + use<> {
    div()
        .on_children_prepainted({
            let bounds_cell = slider_bounds.clone();
            move |bounds, _window, _cx| {
                if let Some(b) = bounds.first() {
                    bounds_cell.set(Some(*b));
                }
            }
        })
        .child(
            div()
                .relative()
                .w(px(SLIDER_WIDTH))
                .h(px(28.0))
                .flex()
                .items_center()
                .cursor_pointer()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, ev: &gpui::MouseDownEvent, _window, cx| {
                        if let Some(value) = threshold_from_mouse(ev.position.x, &this.slider_bounds) {
                            this.apply_threshold(value, cx);
                        }
                    }),
                )
                .on_mouse_move(cx.listener(move |this, ev: &gpui::MouseMoveEvent, _window, cx| {
                    if ev.pressed_button != Some(MouseButton::Left) {
                        return;
                    }
                    if let Some(value) = threshold_from_mouse(ev.position.x, &this.slider_bounds) {
                        this.apply_threshold(value, cx);
                    }
                }))
                .child(
                    div()
                        .absolute()
                        .left(px(0.0))
                        .top(px(10.0))
                        .w(px(SLIDER_WIDTH))
                        .h(px(8.0))
                        .rounded(px(4.0))
                        .bg(rgb(0x333333)),
                )
                .child(
                    div()
                        .absolute()
                        .left(px(0.0))
                        .top(px(10.0))
                        .w(px(knob_position))
                        .h(px(8.0))
                        .rounded(px(4.0))
                        .bg(rgb(0x4CAF50)),
                )
                .child(
                    div()
                        .absolute()
                        .left(px(knob_position - 8.0))
                        .top(px(6.0))
                        .w(px(16.0))
                        .h(px(16.0))
                        .rounded_full()
                        .bg(rgb(0xffffff))
                        .border_2()
                        .border_color(rgb(0x4CAF50)),
                ),
        )
}

/// Map a window-space mouse X onto `[0, 1]` along the captured track.
///
/// Returns `None` until the track has been painted once.
fn threshold_from_mouse(
    mouse_x: Pixels,
    slider_bounds: &Rc<Cell<Option<Bounds<Pixels>>>>,
) -> Option<f32> {
    let bounds = slider_bounds.get()?;
    let origin_x: f32 = bounds.origin.x.into();
    let width: f32 = bounds.size.width.into();
    if width <= 0.0 {
        return None;
    }
    let mx: f32 = mouse_x.into();
    // Snap to whole percent.
    Some((((mx - origin_x) / width).clamp(0.0, 1.0) * 100.0).round() / 100.0)
}

fn preset_btn(
    percent: u8,
    current: f32,
    cx: &mut gpui::Context<DebugPanel>,
) -> impl IntoElement + use<> {
    let target = f32::from(percent) / 100.0;
    let is_current = (current - target).abs() < 0.005;

    div()
        .px_3()
        .py_1()
        .rounded(px(6.0))
        .bg(if is_current { rgb(0x4CAF50) } else { rgb(0x2a2a2a) })
        .text_sm()
        .text_color(if is_current { rgb(0xffffff) } else { rgb(0x888888) })
        .cursor_pointer()
        .on_mouse_down(
            MouseButton::Left,
            cx.listener(move |this, _, _window, cx| this.apply_threshold(target, cx)),
        )
        .child(format!("{percent}%"))
}
