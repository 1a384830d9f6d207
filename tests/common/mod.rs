#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use clear_bg::geometry::CanvasRoot;
use clear_bg::host::{
    CameraClearState, CameraHandle, ClearFlags, FrameBufferReadback, OrthographicCamera,
    OverlayHost, PixelReadback, Rgba, SurfaceId,
};
use clear_bg::monitor::{MonitorMetrics, PixelBounds};
use clear_bg::overlay::{OverlayBackend, OverlayController};
use clear_bg::settings::OverlaySettings;
use glam::Vec2;

pub const SURFACE: (u32, u32) = (1920, 1040);

/// Primary 1080p monitor with a 40 px bottom taskbar.
pub fn primary_monitor() -> MonitorMetrics {
    MonitorMetrics::from_bounds(
        SURFACE.0 as i32,
        SURFACE.1 as i32,
        PixelBounds::new(0, 0, 1920, 1080),
        PixelBounds::new(0, 0, 1920, 1040),
    )
}

/// Secondary monitor to the right of the primary, taskbar on top.
pub fn secondary_monitor() -> MonitorMetrics {
    MonitorMetrics::from_bounds(
        SURFACE.0 as i32,
        SURFACE.1 as i32,
        PixelBounds::new(1920, 0, 3840, 1080),
        PixelBounds::new(1920, 40, 3840, 1080),
    )
}

/// The state a game camera has before the overlay touches it.
pub fn scene_clear_state() -> CameraClearState {
    CameraClearState {
        clear_flags: ClearFlags::Skybox,
        background: Rgba::new(0.19, 0.3, 0.47, 1.0),
        target_surface: Some(SurfaceId(7)),
    }
}

pub fn scene_camera() -> Rc<RefCell<OrthographicCamera>> {
    Rc::new(RefCell::new(
        OrthographicCamera::new(SURFACE.0 as f32, SURFACE.1 as f32, 5.0)
            .with_clear_state(scene_clear_state()),
    ))
}

// ─── Backend ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct BackendLog {
    pub init_calls: Vec<usize>,
    pub set_active_calls: Vec<bool>,
    pub monitor_calls: Vec<usize>,
    pub always_on_top_calls: Vec<bool>,
    pub alphas: Vec<(f32, f32)>,
    pub updates: u32,
    pub active: bool,
    pub click_through: bool,
    /// Makes `set_overlay_active(true)` leave the overlay off.
    pub refuse_engage: bool,
}

pub struct MockBackend {
    pub log: Rc<RefCell<BackendLog>>,
    pub init_ok: bool,
    pub monitors: Vec<MonitorMetrics>,
    pub frame_ms: f32,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(BackendLog::default())),
            init_ok: true,
            monitors: vec![primary_monitor(), secondary_monitor()],
            frame_ms: 16.6,
        }
    }

    pub fn failing() -> Self {
        Self {
            init_ok: false,
            ..Self::new()
        }
    }
}

impl OverlayBackend for MockBackend {
    fn init_overlay(&mut self, monitor_index: usize) -> bool {
        let mut log = self.log.borrow_mut();
        log.init_calls.push(monitor_index);
        log.active = self.init_ok;
        self.init_ok
    }

    fn set_overlay_active(&mut self, enable: bool) {
        let mut log = self.log.borrow_mut();
        log.set_active_calls.push(enable);
        log.active = enable && !log.refuse_engage;
    }

    fn is_overlay_active(&self) -> bool {
        self.log.borrow().active
    }

    fn set_monitor_index(&mut self, monitor_index: usize) {
        self.log.borrow_mut().monitor_calls.push(monitor_index);
    }

    fn monitor_data(&self, monitor_index: usize) -> MonitorMetrics {
        self.monitors
            .get(monitor_index)
            .copied()
            .unwrap_or_else(|| MonitorMetrics::fallback(SURFACE.0 as i32, SURFACE.1 as i32))
    }

    fn set_always_on_top(&mut self, enable: bool) {
        self.log.borrow_mut().always_on_top_calls.push(enable);
    }

    fn set_click_through(&mut self, enable: bool) {
        self.log.borrow_mut().click_through = enable;
    }

    fn update_click_through_from_alpha(&mut self, alpha: f32, threshold: f32) {
        let mut log = self.log.borrow_mut();
        log.alphas.push((alpha, threshold));
        log.click_through = alpha < threshold;
    }

    fn performance_stats(&self) -> f32 {
        self.frame_ms
    }

    fn overlay_update(&mut self) {
        self.log.borrow_mut().updates += 1;
    }

    fn is_click_through_enabled(&self) -> bool {
        self.log.borrow().click_through
    }
}

// ─── Host ───────────────────────────────────────────────────────────────────

pub struct HostState {
    pub camera: Option<Rc<RefCell<OrthographicCamera>>>,
    pub has_ui_root: bool,
    pub displays: usize,
    pub surface: (u32, u32),
    pub pointer: Vec2,
    pub now: Duration,
    pub preview: bool,
    /// Frame copied into every read-back surface on allocation.
    pub frame: FrameBufferReadback,
    pub allocations: usize,
    pub target_fps: Option<u32>,
    pub run_in_background: bool,
    pub ui_conversions: usize,
}

#[derive(Clone)]
pub struct MockHost {
    pub state: Rc<RefCell<HostState>>,
    /// Read-back surfaces currently alive.
    pub live_readbacks: Rc<Cell<usize>>,
    /// Pixels read, in order.
    pub reads: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl MockHost {
    pub fn new() -> Self {
        let mut frame = FrameBufferReadback::new(SURFACE.0, SURFACE.1);
        frame.fill([0, 0, 0, 255]);
        Self {
            state: Rc::new(RefCell::new(HostState {
                camera: Some(scene_camera()),
                has_ui_root: true,
                displays: 2,
                surface: SURFACE,
                pointer: Vec2::new(100.0, 100.0),
                now: Duration::ZERO,
                preview: false,
                frame,
                allocations: 0,
                target_fps: None,
                run_in_background: false,
                ui_conversions: 0,
            })),
            live_readbacks: Rc::new(Cell::new(0)),
            reads: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn without_camera() -> Self {
        let host = Self::new();
        host.state.borrow_mut().camera = None;
        host
    }

    pub fn preview() -> Self {
        let host = Self::new();
        host.state.borrow_mut().preview = true;
        host
    }

    pub fn camera(&self) -> Option<Rc<RefCell<OrthographicCamera>>> {
        self.state.borrow().camera.clone()
    }

    pub fn advance(&self, by: Duration) {
        self.state.borrow_mut().now += by;
    }

    pub fn set_pointer(&self, x: f32, y: f32) {
        self.state.borrow_mut().pointer = Vec2::new(x, y);
    }
}

impl OverlayHost for MockHost {
    fn main_camera(&self) -> Option<CameraHandle> {
        self.state
            .borrow()
            .camera
            .clone()
            .map(|camera| -> CameraHandle { camera })
    }

    fn ui_root(&self) -> Option<CanvasRoot> {
        let state = self.state.borrow();
        state
            .has_ui_root
            .then(|| CanvasRoot::new(state.surface.0 as f32, state.surface.1 as f32))
    }

    fn display_count(&self) -> usize {
        self.state.borrow().displays
    }

    fn surface_size(&self) -> (u32, u32) {
        self.state.borrow().surface
    }

    fn pointer_position(&self) -> Vec2 {
        self.state.borrow().pointer
    }

    fn allocate_readback(&mut self) -> Box<dyn PixelReadback> {
        let mut state = self.state.borrow_mut();
        state.allocations += 1;
        self.live_readbacks.set(self.live_readbacks.get() + 1);
        Box::new(CountedReadback {
            frame: state.frame.clone(),
            live: self.live_readbacks.clone(),
            reads: self.reads.clone(),
        })
    }

    fn time(&self) -> Duration {
        self.state.borrow().now
    }

    fn set_target_frame_rate(&mut self, fps: u32) {
        self.state.borrow_mut().target_fps = Some(fps);
    }

    fn set_run_in_background(&mut self, enabled: bool) {
        self.state.borrow_mut().run_in_background = enabled;
    }

    fn is_preview(&self) -> bool {
        self.state.borrow().preview
    }

    fn convert_ui_roots(&mut self) {
        self.state.borrow_mut().ui_conversions += 1;
    }
}

struct CountedReadback {
    frame: FrameBufferReadback,
    live: Rc<Cell<usize>>,
    reads: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl PixelReadback for CountedReadback {
    fn read_alpha(&mut self, x: u32, y: u32) -> f32 {
        self.reads.borrow_mut().push((x, y));
        self.frame.read_alpha(x, y)
    }
}

impl Drop for CountedReadback {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub fn controller(
    backend: MockBackend,
    host: MockHost,
) -> OverlayController<MockBackend, MockHost> {
    OverlayController::new(backend, host, OverlaySettings::default())
}
