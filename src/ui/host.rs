use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clear_bg::geometry::CanvasRoot;
use clear_bg::host::{CameraHandle, OrthographicCamera, OverlayHost, PixelReadback};
use glam::Vec2;
use tracing::debug;

/// World units from the centre of the panel to its top edge.
const CAMERA_HALF_HEIGHT: f32 = 5.0;

/// Alpha the panel paints everywhere; it has an opaque background.
const PANEL_ALPHA: f32 = 1.0;

struct PanelState {
    /// Device pixels, the unit the native backend reports monitors in.
    viewport: Vec2,
    /// Device pixels per logical pixel.
    scale_factor: f32,
    /// Bottom-left origin, like every other screen position.
    pointer: Vec2,
    camera: Rc<RefCell<OrthographicCamera>>,
    display_count: usize,
    target_fps: u32,
    run_in_background: bool,
}

/// [`OverlayHost`] backed by the gpui control window.
///
/// Cloning shares the state; the panel keeps one clone to feed window
/// geometry and the pointer into it, the overlay facade owns the other.
#[derive(Clone)]
pub struct PanelHost {
    state: Rc<RefCell<PanelState>>,
    started: Instant,
}

impl PanelHost {
    pub fn new(display_count: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(PanelState {
                viewport: Vec2::ZERO,
                scale_factor: 1.0,
                pointer: Vec2::ZERO,
                camera: Rc::new(RefCell::new(OrthographicCamera::new(
                    0.0,
                    0.0,
                    CAMERA_HALF_HEIGHT,
                ))),
                display_count: display_count.max(1),
                target_fps: 0,
                run_in_background: false,
            })),
            started: Instant::now(),
        }
    }

    /// Pull the viewport size and pointer position out of `window`.
    pub fn sync_with_window(&self, window: &gpui::Window) {
        let size = window.viewport_size();
        let mouse = window.mouse_position();
        self.set_window_geometry(
            Vec2::new(size.width.into(), size.height.into()),
            Vec2::new(mouse.x.into(), mouse.y.into()),
            window.scale_factor(),
        );
    }

    /// Record the window size and a top-left origin pointer, both in
    /// logical pixels, converting them to device pixels.
    pub fn set_window_geometry(&self, logical_size: Vec2, logical_mouse: Vec2, scale_factor: f32) {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let viewport = logical_size * scale;

        let mut state = self.state.borrow_mut();
        if state.viewport != viewport {
            state.viewport = viewport;
            state.camera.borrow_mut().set_viewport(viewport.x, viewport.y);
        }
        if state.scale_factor != scale {
            debug!(scale, "panel scale factor changed");
            state.scale_factor = scale;
        }
        state.pointer = Vec2::new(logical_mouse.x, logical_size.y - logical_mouse.y) * scale;
    }

    pub fn target_fps(&self) -> u32 {
        self.state.borrow().target_fps
    }

    pub fn runs_in_background(&self) -> bool {
        self.state.borrow().run_in_background
    }
}

impl OverlayHost for PanelHost {
    fn main_camera(&self) -> Option<CameraHandle> {
        let camera: CameraHandle = self.state.borrow().camera.clone();
        Some(camera)
    }

    fn ui_root(&self) -> Option<CanvasRoot> {
        let state = self.state.borrow();
        Some(
            CanvasRoot::new(state.viewport.x, state.viewport.y)
                .with_scale_factor(state.scale_factor),
        )
    }

    fn display_count(&self) -> usize {
        self.state.borrow().display_count
    }

    fn surface_size(&self) -> (u32, u32) {
        let viewport = self.state.borrow().viewport.round();
        (viewport.x as u32, viewport.y as u32)
    }

    fn pointer_position(&self) -> Vec2 {
        self.state.borrow().pointer
    }

    fn allocate_readback(&mut self) -> Box<dyn PixelReadback> {
        Box::new(PanelReadback {
            state: self.state.clone(),
        })
    }

    fn time(&self) -> Duration {
        self.started.elapsed()
    }

    fn set_target_frame_rate(&mut self, fps: u32) {
        debug!(fps, "panel frame rate target");
        self.state.borrow_mut().target_fps = fps;
    }

    fn set_run_in_background(&mut self, enabled: bool) {
        self.state.borrow_mut().run_in_background = enabled;
    }
}

/// Reads the panel's own frame, which tracks the window size.
struct PanelReadback {
    state: Rc<RefCell<PanelState>>,
}

impl PixelReadback for PanelReadback {
    fn read_alpha(&mut self, x: u32, y: u32) -> f32 {
        let viewport = self.state.borrow().viewport;
        if (x as f32) < viewport.x && (y as f32) < viewport.y {
            PANEL_ALPHA
        } else {
            0.0
        }
    }
}
