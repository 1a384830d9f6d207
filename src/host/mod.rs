//! The rendering runtime the overlay runs inside.

pub mod camera;

use std::time::Duration;

use glam::Vec2;

use crate::geometry::CanvasRoot;

pub use camera::{
    CameraClearState, CameraHandle, ClearFlags, OrthographicCamera, OverlayCamera, Rgba, SurfaceId,
};

/// Services the host application provides to the overlay controller.
///
/// Screen positions use render-surface pixels with a bottom-left origin.
pub trait OverlayHost {
    /// The camera currently tagged as main, if any.
    fn main_camera(&self) -> Option<CameraHandle>;

    /// The UI root overlay content is laid out in.
    fn ui_root(&self) -> Option<CanvasRoot>;

    fn display_count(&self) -> usize;

    /// Render-surface resolution in pixels.
    fn surface_size(&self) -> (u32, u32);

    fn pointer_position(&self) -> Vec2;

    /// Allocate the surface used to read rendered pixels back.
    fn allocate_readback(&mut self) -> Box<dyn PixelReadback>;

    /// Monotonic host clock.
    fn time(&self) -> Duration;

    fn set_target_frame_rate(&mut self, fps: u32);

    fn set_run_in_background(&mut self, enabled: bool);

    /// Embedded or preview contexts cannot move or re-style the real window.
    fn is_preview(&self) -> bool {
        false
    }

    /// Prepare UI roots that appeared since the last scene change.
    fn convert_ui_roots(&mut self) {}
}

/// Reads single pixels of the last composed frame.
pub trait PixelReadback {
    /// Alpha of pixel `(x, y)`, bottom-left origin.
    fn read_alpha(&mut self, x: u32, y: u32) -> f32;
}

/// Full-frame read-back: the host copies the whole composed frame into an
/// RGBA8 buffer (top row first) and pixels are looked up in memory.
#[derive(Clone, Debug)]
pub struct FrameBufferReadback {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl FrameBufferReadback {
    /// A fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replace the frame. Ignored when `rgba` does not match the frame size.
    pub fn copy_frame(&mut self, rgba: &[u8]) -> bool {
        if rgba.len() != self.rgba.len() {
            return false;
        }
        self.rgba.copy_from_slice(rgba);
        true
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for px in self.rgba.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Set pixel `(x, y)` in bottom-left-origin coordinates.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(offset) = self.offset(x, y) {
            self.rgba[offset..offset + 4].copy_from_slice(&color);
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = (self.height - 1 - y) as usize;
        Some((row * self.width as usize + x as usize) * 4)
    }
}

impl PixelReadback for FrameBufferReadback {
    fn read_alpha(&mut self, x: u32, y: u32) -> f32 {
        self.offset(x, y)
            .map(|offset| f32::from(self.rgba[offset + 3]) / 255.0)
            .unwrap_or(0.0)
    }
}
