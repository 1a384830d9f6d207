use crate::monitor::MonitorMetrics;

/// Native compositing backend: window transparency, click-through and
/// monitor placement at the OS level.
///
/// Calls are synchronous and cheap. A backend that cannot do something
/// returns `false` or a default value instead of failing.
pub trait OverlayBackend {
    /// Prepare the host window as an overlay on `monitor_index`.
    fn init_overlay(&mut self, monitor_index: usize) -> bool;

    fn set_overlay_active(&mut self, enable: bool);

    fn is_overlay_active(&self) -> bool;

    fn set_monitor_index(&mut self, monitor_index: usize);

    fn monitor_data(&self, monitor_index: usize) -> MonitorMetrics;

    fn set_always_on_top(&mut self, enable: bool);

    fn set_click_through(&mut self, enable: bool);

    /// Enable click-through when `alpha` is below `threshold`.
    fn update_click_through_from_alpha(&mut self, alpha: f32, threshold: f32);

    /// Average frame time in milliseconds.
    fn performance_stats(&self) -> f32;

    /// Per-frame pump, called while the overlay is active.
    fn overlay_update(&mut self) {}

    fn primary_monitor_index(&self) -> usize {
        0
    }

    fn is_click_through_enabled(&self) -> bool;
}

impl<B: OverlayBackend + ?Sized> OverlayBackend for Box<B> {
    fn init_overlay(&mut self, monitor_index: usize) -> bool {
        (**self).init_overlay(monitor_index)
    }

    fn set_overlay_active(&mut self, enable: bool) {
        (**self).set_overlay_active(enable)
    }

    fn is_overlay_active(&self) -> bool {
        (**self).is_overlay_active()
    }

    fn set_monitor_index(&mut self, monitor_index: usize) {
        (**self).set_monitor_index(monitor_index)
    }

    fn monitor_data(&self, monitor_index: usize) -> MonitorMetrics {
        (**self).monitor_data(monitor_index)
    }

    fn set_always_on_top(&mut self, enable: bool) {
        (**self).set_always_on_top(enable)
    }

    fn set_click_through(&mut self, enable: bool) {
        (**self).set_click_through(enable)
    }

    fn update_click_through_from_alpha(&mut self, alpha: f32, threshold: f32) {
        (**self).update_click_through_from_alpha(alpha, threshold)
    }

    fn performance_stats(&self) -> f32 {
        (**self).performance_stats()
    }

    fn overlay_update(&mut self) {
        (**self).overlay_update()
    }

    fn primary_monitor_index(&self) -> usize {
        (**self).primary_monitor_index()
    }

    fn is_click_through_enabled(&self) -> bool {
        (**self).is_click_through_enabled()
    }
}

/// Backend for platforms without a native overlay implementation. Every
/// activation fails, so the controller stays on fallback geometry.
#[derive(Debug, Default)]
pub struct UnavailableBackend {
    surface: (i32, i32),
}

impl UnavailableBackend {
    pub fn new(surface_width: i32, surface_height: i32) -> Self {
        Self {
            surface: (surface_width, surface_height),
        }
    }
}

impl OverlayBackend for UnavailableBackend {
    fn init_overlay(&mut self, _monitor_index: usize) -> bool {
        false
    }

    fn set_overlay_active(&mut self, _enable: bool) {}

    fn is_overlay_active(&self) -> bool {
        false
    }

    fn set_monitor_index(&mut self, _monitor_index: usize) {}

    fn monitor_data(&self, _monitor_index: usize) -> MonitorMetrics {
        MonitorMetrics::fallback(self.surface.0, self.surface.1)
    }

    fn set_always_on_top(&mut self, _enable: bool) {}

    fn set_click_through(&mut self, _enable: bool) {}

    fn update_click_through_from_alpha(&mut self, _alpha: f32, _threshold: f32) {}

    fn performance_stats(&self) -> f32 {
        0.0
    }

    fn is_click_through_enabled(&self) -> bool {
        false
    }
}
