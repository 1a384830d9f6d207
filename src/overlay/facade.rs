use tracing::{info, warn};

use super::backend::OverlayBackend;
use super::controller::{OverlayController, OverlayPhase, RegionQuery, fallback_region};
use crate::error::OverlayError;
use crate::geometry::{RegionPair, translator};
use crate::host::OverlayHost;
use crate::settings::OverlaySettings;

/// Returned by [`OverlayFacade::current_monitor_index`] before any activation.
pub const NO_MONITOR: i32 = -1;
/// Returned by [`OverlayFacade::performance_stats`] before any activation.
pub const STATS_UNINITIALIZED: f32 = -2.0;

enum Slot<B, H> {
    /// No activation requested yet; the parts wait for the controller.
    Idle { backend: B, host: H },
    Running(OverlayController<B, H>),
    /// Only observed mid-transition.
    Vacant,
}

/// Single access point for UI buttons, debug panels and other callers.
///
/// The application creates one and keeps it for the life of the process. The
/// controller is built on the first [`activate`](OverlayFacade::activate);
/// until then geometry queries answer from the host's fallback geometry.
/// Dropping the facade tears the controller down.
pub struct OverlayFacade<B: OverlayBackend, H: OverlayHost> {
    settings: OverlaySettings,
    slot: Slot<B, H>,
}

impl<B: OverlayBackend, H: OverlayHost> OverlayFacade<B, H> {
    pub fn new(backend: B, host: H, settings: OverlaySettings) -> Self {
        Self {
            settings: settings.normalized(),
            slot: Slot::Idle { backend, host },
        }
    }

    /// Start-up hook: activates right away when `auto_initialize` is set.
    pub fn bootstrap(&mut self) -> Result<(), OverlayError> {
        if self.settings.debug_mode {
            info!("debug mode is enabled");
        }
        if !self.settings.auto_initialize {
            return Ok(());
        }
        self.activate()
    }

    /// Turn the overlay on, creating the controller on first use.
    pub fn activate(&mut self) -> Result<(), OverlayError> {
        if let Slot::Running(controller) = &mut self.slot {
            return controller.set_overlay_enabled(true);
        }

        match std::mem::replace(&mut self.slot, Slot::Vacant) {
            Slot::Idle { backend, host } => {
                let mut controller = OverlayController::new(backend, host, self.settings.clone());
                let result = controller.initialize(self.settings.clone());
                self.slot = Slot::Running(controller);
                result
            }
            other => {
                self.slot = other;
                Ok(())
            }
        }
    }

    pub fn deactivate(&mut self) {
        if let Slot::Running(controller) = &mut self.slot {
            if let Err(e) = controller.set_overlay_enabled(false) {
                warn!("failed to disable the overlay: {e}");
            }
        }
    }

    pub fn set_monitor_index(&mut self, index: i32) {
        if let Slot::Running(controller) = &mut self.slot {
            controller.change_monitor(index);
        }
    }

    /// Target monitor, or [`NO_MONITOR`] when no controller exists.
    pub fn current_monitor_index(&self) -> i32 {
        match &self.slot {
            Slot::Running(controller) => controller.target_monitor() as i32,
            _ => NO_MONITOR,
        }
    }

    pub fn always_on_top(&mut self, enable: bool) {
        if let Slot::Running(controller) = &mut self.slot {
            self.settings.always_on_top = enable;
            controller.set_always_on_top_enabled(enable);
        }
    }

    pub fn set_click_through_threshold(&mut self, threshold: f32) {
        self.settings.click_through_threshold = threshold.clamp(0.0, 1.0);
        if let Slot::Running(controller) = &mut self.slot {
            controller.set_click_through_threshold(threshold);
        }
    }

    /// Frame time in milliseconds; [`STATS_UNINITIALIZED`] without a
    /// controller, `-1` in a preview host.
    pub fn performance_stats(&self) -> f32 {
        match &self.slot {
            Slot::Running(controller) => controller.frame_time_ms(),
            _ => STATS_UNINITIALIZED,
        }
    }

    pub fn screen_region(&self) -> RegionPair {
        self.region(translator::screen_region)
    }

    pub fn taskbar_region(&self) -> RegionPair {
        self.region(translator::taskbar_region)
    }

    /// Forward the frame tick to the controller.
    pub fn tick(&mut self) -> Result<(), OverlayError> {
        match &mut self.slot {
            Slot::Running(controller) => controller.tick(),
            _ => Ok(()),
        }
    }

    pub fn notify_scene_changed(&mut self) {
        if let Slot::Running(controller) = &mut self.slot {
            controller.on_host_scene_changed();
        }
    }

    /// Active with a live camera.
    pub fn is_initialized(&self) -> bool {
        self.controller()
            .is_some_and(|c| c.phase() == OverlayPhase::Active && c.camera().is_some())
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    pub fn controller(&self) -> Option<&OverlayController<B, H>> {
        match &self.slot {
            Slot::Running(controller) => Some(controller),
            _ => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut OverlayController<B, H>> {
        match &mut self.slot {
            Slot::Running(controller) => Some(controller),
            _ => None,
        }
    }

    pub fn host(&self) -> Option<&H> {
        match &self.slot {
            Slot::Idle { host, .. } => Some(host),
            Slot::Running(controller) => Some(controller.host()),
            Slot::Vacant => None,
        }
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        match &mut self.slot {
            Slot::Idle { host, .. } => Some(host),
            Slot::Running(controller) => Some(controller.host_mut()),
            Slot::Vacant => None,
        }
    }

    /// Tear the controller down and return to the pre-activation state.
    pub fn teardown(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Vacant) {
            Slot::Running(mut controller) => {
                controller.teardown();
                let (backend, host) = controller.into_parts();
                self.slot = Slot::Idle { backend, host };
            }
            other => self.slot = other,
        }
    }

    fn region(&self, query: RegionQuery) -> RegionPair {
        match &self.slot {
            Slot::Running(controller) => controller.region(query),
            Slot::Idle { host, .. } => fallback_region(host, query),
            Slot::Vacant => RegionPair::default(),
        }
    }
}

impl<B: OverlayBackend, H: OverlayHost> Drop for OverlayFacade<B, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
