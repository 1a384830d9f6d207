use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::backend::OverlayBackend;
use super::sampler::{ClickThroughSampler, SampleOutcome};
use crate::error::{OverlayError, ProjectorKind};
use crate::geometry::{ProjectionContext, Projector, RegionPair, WorldProjector, translator};
use crate::host::{CameraClearState, CameraHandle, OverlayCamera, OverlayHost, PixelReadback};
use crate::monitor::MonitorMetrics;
use crate::settings::OverlaySettings;

/// A geometry query over metrics and a projection context.
pub type RegionQuery = fn(&MonitorMetrics, ProjectionContext<'_>) -> RegionPair;

/// Lifecycle phase of the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Inactive,
    /// Backend is up; waiting for the host to provide a camera.
    Activating,
    Active,
    /// Resources are being released.
    Deactivating,
}

/// Lifecycle state machine of the overlay.
///
/// Owns everything the overlay allocates (read-back surface, sampler,
/// captured camera state) and hands all of it back on deactivation or
/// teardown. The camera itself belongs to the host; only a weak reference is
/// kept.
pub struct OverlayController<B, H> {
    backend: B,
    host: H,
    settings: OverlaySettings,
    phase: OverlayPhase,
    target_monitor: usize,
    metrics: MonitorMetrics,
    camera: Option<Weak<RefCell<dyn OverlayCamera>>>,
    original_camera_state: Option<CameraClearState>,
    readback: Option<Box<dyn PixelReadback>>,
    sampler: Option<ClickThroughSampler>,
    last_sample: Option<SampleOutcome>,
    activation_started: Option<Duration>,
    /// `init_overlay` has succeeded at least once.
    backend_ready: bool,
    /// The backend currently has the overlay switched on.
    overlay_engaged: bool,
    /// Scene-change notifications are honoured until teardown.
    scene_hooked: bool,
}

impl<B: OverlayBackend, H: OverlayHost> OverlayController<B, H> {
    pub fn new(backend: B, host: H, settings: OverlaySettings) -> Self {
        let metrics = fallback_metrics(&host);
        Self {
            backend,
            host,
            settings: settings.normalized(),
            phase: OverlayPhase::Inactive,
            target_monitor: 0,
            metrics,
            camera: None,
            original_camera_state: None,
            readback: None,
            sampler: None,
            last_sample: None,
            activation_started: None,
            backend_ready: false,
            overlay_engaged: false,
            scene_hooked: true,
        }
    }

    /// Start activating with `settings`. Only valid while inactive.
    ///
    /// Completes immediately when the host already has a camera; otherwise
    /// the controller stays in [`OverlayPhase::Activating`] and [`tick`]
    /// keeps polling until the camera wait times out.
    ///
    /// [`tick`]: OverlayController::tick
    pub fn initialize(&mut self, settings: OverlaySettings) -> Result<(), OverlayError> {
        if self.phase != OverlayPhase::Inactive {
            debug!(phase = ?self.phase, "overlay already activating or active");
            return Ok(());
        }
        self.settings = settings.normalized();
        self.begin_activation()
    }

    pub fn set_overlay_enabled(&mut self, enable: bool) -> Result<(), OverlayError> {
        match (enable, self.phase) {
            (true, OverlayPhase::Inactive) => self.begin_activation(),
            (false, OverlayPhase::Active | OverlayPhase::Activating) => {
                self.release();
                info!("overlay disabled (normal window mode)");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Move the overlay to another monitor. Returns whether the switch
    /// happened.
    pub fn change_monitor(&mut self, index: i32) -> bool {
        if self.host.is_preview() {
            warn!(index, "monitor switching is unavailable in a preview host");
            return false;
        }
        if self.phase != OverlayPhase::Active {
            warn!(index, phase = ?self.phase, "ignoring monitor change; overlay is not active");
            return false;
        }

        let monitor = clamp_monitor_index(index, self.host.display_count());
        self.target_monitor = monitor;
        self.backend.set_monitor_index(monitor);
        self.metrics = self.backend.monitor_data(monitor);
        info!(monitor, "switched overlay monitor");
        true
    }

    pub fn set_always_on_top_enabled(&mut self, enable: bool) {
        self.settings.always_on_top = enable;
        if self.phase != OverlayPhase::Active || self.host.is_preview() {
            return;
        }
        self.backend.set_always_on_top(enable);
    }

    pub fn set_click_through_threshold(&mut self, threshold: f32) {
        self.settings.click_through_threshold = threshold.clamp(0.0, 1.0);
        if let Some(sampler) = self.sampler.as_mut() {
            sampler.set_threshold(threshold);
        }
    }

    /// Release everything and stop listening to the host. Safe from any
    /// phase and safe to repeat.
    pub fn teardown(&mut self) {
        let hooked = std::mem::replace(&mut self.scene_hooked, false);
        if self.phase != OverlayPhase::Inactive {
            self.release();
        }
        if hooked {
            info!("overlay controller disposed");
        }
    }

    /// The host loaded a new scene.
    pub fn on_host_scene_changed(&mut self) {
        if !self.scene_hooked || self.phase != OverlayPhase::Active {
            return;
        }

        if self.camera().is_none() {
            match self.host.main_camera() {
                Some(camera) => {
                    self.adopt_camera(&camera);
                    info!("re-acquired main camera after scene change");
                }
                None => warn!("main camera is gone after scene change"),
            }
        }

        if self.settings.auto_convert_ui_roots {
            self.host.convert_ui_roots();
        }
    }

    /// Advance one frame. Call once per composed frame.
    pub fn tick(&mut self) -> Result<(), OverlayError> {
        match self.phase {
            OverlayPhase::Activating => self.poll_camera(),
            OverlayPhase::Active => {
                self.last_sample = self.run_frame();
                Ok(())
            }
            OverlayPhase::Inactive | OverlayPhase::Deactivating => Ok(()),
        }
    }

    /// Average frame time reported by the backend; `-1` in a preview host,
    /// `0` while the overlay is not active.
    pub fn frame_time_ms(&self) -> f32 {
        if self.host.is_preview() {
            return -1.0;
        }
        if self.phase != OverlayPhase::Active {
            return 0.0;
        }
        self.backend.performance_stats()
    }

    pub fn screen_region(&self) -> RegionPair {
        self.region(translator::screen_region)
    }

    pub fn taskbar_region(&self) -> RegionPair {
        self.region(translator::taskbar_region)
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == OverlayPhase::Active
    }

    pub fn target_monitor(&self) -> usize {
        self.target_monitor
    }

    pub fn metrics(&self) -> &MonitorMetrics {
        &self.metrics
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// The overlay camera, if the host still has it.
    pub fn camera(&self) -> Option<CameraHandle> {
        self.camera.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_readback(&self) -> bool {
        self.readback.is_some()
    }

    pub fn sampler(&self) -> Option<&ClickThroughSampler> {
        self.sampler.as_ref()
    }

    pub fn last_sample(&self) -> Option<SampleOutcome> {
        self.last_sample
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_parts(self) -> (B, H) {
        (self.backend, self.host)
    }

    fn begin_activation(&mut self) -> Result<(), OverlayError> {
        let monitor = clamp_monitor_index(self.settings.target_display, self.host.display_count());
        self.target_monitor = monitor;

        if !self.host.is_preview() {
            let ready = if self.backend_ready {
                self.backend.set_monitor_index(monitor);
                self.backend.set_overlay_active(true);
                self.backend.is_overlay_active()
            } else {
                self.backend.init_overlay(monitor)
            };
            if !ready {
                error!(monitor, "overlay initialization failed");
                return Err(OverlayError::BackendUnavailable { monitor });
            }
            self.backend_ready = true;
            self.overlay_engaged = true;
            self.backend.set_always_on_top(self.settings.always_on_top);
            info!(monitor, "overlay plugin initialized");
        }

        self.phase = OverlayPhase::Activating;
        self.activation_started = Some(self.host.time());
        self.poll_camera()
    }

    fn poll_camera(&mut self) -> Result<(), OverlayError> {
        if let Some(camera) = self.host.main_camera() {
            return self.complete_activation(camera);
        }

        let now = self.host.time();
        let waited = now.saturating_sub(self.activation_started.unwrap_or(now));
        if waited >= self.settings.camera_timeout() {
            error!(?waited, "cannot initialize the overlay without a main camera");
            self.release();
            return Err(OverlayError::ProjectorMissing(ProjectorKind::Camera));
        }
        Ok(())
    }

    fn complete_activation(&mut self, camera: CameraHandle) -> Result<(), OverlayError> {
        if self.host.ui_root().is_none() {
            error!("overlay UI root is missing");
            self.release();
            return Err(OverlayError::ProjectorMissing(ProjectorKind::UiRoot));
        }

        self.adopt_camera(&camera);
        let preview = self.host.is_preview();
        if !preview && self.readback.is_none() {
            self.readback = Some(self.host.allocate_readback());
        }
        self.host.set_target_frame_rate(self.settings.target_fps);
        self.host.set_run_in_background(true);

        self.metrics = if preview {
            fallback_metrics(&self.host)
        } else {
            self.backend.monitor_data(self.target_monitor)
        };
        self.activation_started = None;
        self.phase = OverlayPhase::Active;

        if !preview {
            self.sampler = Some(ClickThroughSampler::new(self.settings.click_through_threshold));
        }
        info!(
            monitor = self.target_monitor,
            "overlay fully initialized with transparency and pixel-based click-through"
        );
        Ok(())
    }

    /// Remember the camera's clear state and switch it to transparent
    /// clearing.
    fn adopt_camera(&mut self, camera: &CameraHandle) {
        match camera.try_borrow_mut() {
            Ok(mut cam) => {
                self.original_camera_state = Some(cam.clear_state());
                if !self.host.is_preview() {
                    cam.set_clear_state(CameraClearState::transparent());
                    cam.set_hdr(false);
                }
            }
            Err(_) => warn!("main camera is borrowed elsewhere; leaving its state untouched"),
        }
        self.camera = Some(Rc::downgrade(camera));
    }

    /// Release sequence shared by deactivation, aborted activation and
    /// teardown. The sampler stops before the surface goes away, and the
    /// metrics fall back only after the camera and surface are restored.
    fn release(&mut self) {
        self.phase = OverlayPhase::Deactivating;

        self.sampler = None;
        self.last_sample = None;

        if let Some(original) = self.original_camera_state.take() {
            if let Some(camera) = self.camera() {
                match camera.try_borrow_mut() {
                    Ok(mut cam) => cam.set_clear_state(original),
                    Err(_) => warn!("main camera is borrowed elsewhere; clear state not restored"),
                }
            }
        }
        self.camera = None;

        self.readback = None;

        if self.overlay_engaged {
            self.backend.set_overlay_active(false);
            self.overlay_engaged = false;
        }

        self.metrics = fallback_metrics(&self.host);
        self.activation_started = None;
        self.phase = OverlayPhase::Inactive;
    }

    fn run_frame(&mut self) -> Option<SampleOutcome> {
        if self.host.is_preview() || self.camera().is_none() || !self.backend.is_overlay_active() {
            return None;
        }
        self.backend.overlay_update();

        let pointer = self.host.pointer_position();
        let surface_size = self.host.surface_size();
        let (Some(sampler), Some(readback)) = (self.sampler.as_mut(), self.readback.as_mut()) else {
            return None;
        };
        Some(sampler.step(&mut self.backend, &mut **readback, pointer, surface_size))
    }

    /// Run `query` against the current metrics, through the overlay camera
    /// when active and through fallback geometry otherwise.
    pub fn region(&self, query: RegionQuery) -> RegionPair {
        if self.phase == OverlayPhase::Active {
            if let (Some(camera), Some(ui_root)) = (self.camera(), self.host.ui_root()) {
                if let Ok(camera) = camera.try_borrow() {
                    let projector = Projector {
                        camera: &*camera,
                        ui_root: &ui_root,
                    };
                    return query(&self.metrics, ProjectionContext::Active(projector));
                }
            }
        }
        fallback_region(&self.host, query)
    }
}

/// Geometry when no overlay projector is available: the host surface stands
/// in for the work area and the host's main camera, if any, provides world
/// space.
pub fn fallback_region<H: OverlayHost + ?Sized>(host: &H, query: RegionQuery) -> RegionPair {
    let metrics = fallback_metrics(host);
    let camera = host.main_camera();
    let borrowed = camera.as_ref().and_then(|c| c.try_borrow().ok());
    let projector = borrowed.as_deref().map(|c| c as &dyn WorldProjector);
    query(&metrics, ProjectionContext::Fallback(projector))
}

fn fallback_metrics<H: OverlayHost + ?Sized>(host: &H) -> MonitorMetrics {
    let (width, height) = host.surface_size();
    MonitorMetrics::fallback(width as i32, height as i32)
}

/// Clamp a requested monitor index to `[0, display_count - 1]`.
pub fn clamp_monitor_index(index: i32, display_count: usize) -> usize {
    let last = display_count.saturating_sub(1);
    usize::try_from(index).map_or(0, |i| i.min(last))
}
