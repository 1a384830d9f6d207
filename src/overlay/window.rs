use std::collections::VecDeque;
use std::ffi::c_void;
use std::time::Instant;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetClientRect, GetWindowLongPtrW, HWND_NOTOPMOST, HWND_TOPMOST, LWA_ALPHA,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_SHOWWINDOW, SetLayeredWindowAttributes,
    SetWindowLongPtrW, SetWindowPos, WS_EX_LAYERED, WS_EX_TRANSPARENT,
};

use super::backend::OverlayBackend;
use crate::monitor::{MonitorInfo, MonitorMetrics, enumerate_monitors};

/// Number of frame intervals averaged by [`OverlayBackend::performance_stats`].
const FRAME_WINDOW: usize = 120;

/// Overlay backend driving the application's own Win32 window.
///
/// The window is:
/// * Glass-extended over the whole client area (`DwmExtendFrameIntoClientArea`)
///   so cleared-to-transparent pixels show the desktop.
/// * Layered (`WS_EX_LAYERED`) while the overlay is on.
/// * Click-through (`WS_EX_TRANSPARENT`) whenever the pixel under the cursor is
///   transparent enough.
/// * Optionally topmost (`HWND_TOPMOST`).
/// * Sized to the work area of the target monitor.
pub struct Win32Backend {
    hwnd: HWND,
    monitors: Vec<MonitorInfo>,
    monitor_index: usize,
    active: bool,
    click_through: bool,
    /// Extended style before the overlay touched the window.
    original_ex_style: Option<isize>,
    last_frame: Option<Instant>,
    frame_times: VecDeque<f32>,
}

impl Win32Backend {
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            monitors: Vec::new(),
            monitor_index: 0,
            active: false,
            click_through: false,
            original_ex_style: None,
            last_frame: None,
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
        }
    }

    /// Attach to the Win32 window behind `window`.
    pub fn from_window(window: &impl HasWindowHandle) -> anyhow::Result<Self> {
        let handle = window.window_handle()?;
        let RawWindowHandle::Win32(win32) = handle.as_raw() else {
            anyhow::bail!("host window is not a Win32 window");
        };
        Ok(Self::new(HWND(win32.hwnd.get() as *mut c_void)))
    }

    pub fn monitors(&self) -> &[MonitorInfo] {
        &self.monitors
    }

    // ─── Window styling ─────────────────────────────────────────────────────

    fn ex_style(&self) -> isize {
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) }
    }

    fn set_ex_style(&self, style: isize) {
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, style);
        }
    }

    /// Extend the glass frame over the whole client area, or collapse it.
    fn extend_frame(&self, full: bool) {
        let margins = if full {
            MARGINS {
                cxLeftWidth: -1,
                cxRightWidth: -1,
                cyTopHeight: -1,
                cyBottomHeight: -1,
            }
        } else {
            MARGINS::default()
        };
        if let Err(e) = unsafe { DwmExtendFrameIntoClientArea(self.hwnd, &margins) } {
            warn!("DwmExtendFrameIntoClientArea failed: {e}");
        }
    }

    /// Turn the window into the overlay. Rolls the styling back if the
    /// window cannot be placed on the target monitor.
    fn engage(&mut self) -> bool {
        let original = *self.original_ex_style.get_or_insert_with(|| self.ex_style());
        self.set_ex_style(original | WS_EX_LAYERED.0 as isize);
        // A layered window stays invisible until its attributes are set.
        let opaque = unsafe { SetLayeredWindowAttributes(self.hwnd, COLORREF(0), 255, LWA_ALPHA) };
        if let Err(e) = opaque {
            warn!("SetLayeredWindowAttributes failed: {e}");
        }
        self.extend_frame(true);
        let placed = self.place_on_monitor(self.monitor_index);
        if !placed {
            self.disengage();
        }
        placed
    }

    fn disengage(&mut self) {
        if let Some(original) = self.original_ex_style.take() {
            self.set_ex_style(original);
        }
        self.extend_frame(false);
        self.click_through = false;
    }

    /// Move and resize the window onto the monitor's work area.
    fn place_on_monitor(&self, index: usize) -> bool {
        let Some(monitor) = self.monitors.get(index) else {
            return false;
        };
        let work = monitor.work;
        let placed = unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                work.left,
                work.top,
                work.width(),
                work.height(),
                SWP_NOACTIVATE | SWP_SHOWWINDOW,
            )
        };
        match placed {
            Ok(()) => true,
            Err(e) => {
                warn!(index, "failed to place overlay window: {e}");
                false
            }
        }
    }

    fn surface_size(&self) -> (i32, i32) {
        let mut rect = RECT::default();
        match unsafe { GetClientRect(self.hwnd, &mut rect) } {
            Ok(()) => (rect.right - rect.left, rect.bottom - rect.top),
            Err(_) => (0, 0),
        }
    }
}

impl OverlayBackend for Win32Backend {
    fn init_overlay(&mut self, monitor_index: usize) -> bool {
        self.monitors = enumerate_monitors();
        if self.monitors.is_empty() {
            warn!("no monitors detected; overlay cannot be placed");
            return false;
        }
        self.monitor_index = monitor_index.min(self.monitors.len() - 1);
        self.active = self.engage();
        if self.active {
            info!(monitor = self.monitor_index, "win32 overlay engaged");
        }
        self.active
    }

    fn set_overlay_active(&mut self, enable: bool) {
        if enable == self.active {
            return;
        }
        if enable {
            self.active = self.engage();
        } else {
            self.disengage();
            self.active = false;
        }
        self.last_frame = None;
        self.frame_times.clear();
    }

    fn is_overlay_active(&self) -> bool {
        self.active
    }

    fn set_monitor_index(&mut self, monitor_index: usize) {
        if monitor_index >= self.monitors.len() {
            debug!(monitor_index, "ignoring unknown monitor");
            return;
        }
        self.monitor_index = monitor_index;
        if self.active {
            self.place_on_monitor(monitor_index);
        }
    }

    fn monitor_data(&self, monitor_index: usize) -> MonitorMetrics {
        let (width, height) = self.surface_size();
        match self.monitors.get(monitor_index) {
            Some(monitor) => MonitorMetrics::from_bounds(width, height, monitor.bounds, monitor.work),
            None => MonitorMetrics::fallback(width, height),
        }
    }

    fn set_always_on_top(&mut self, enable: bool) {
        let insert_after = if enable { HWND_TOPMOST } else { HWND_NOTOPMOST };
        let result = unsafe {
            SetWindowPos(
                self.hwnd,
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        };
        if let Err(e) = result {
            warn!(enable, "failed to change topmost state: {e}");
        }
    }

    fn set_click_through(&mut self, enable: bool) {
        if enable == self.click_through {
            return;
        }
        let transparent = WS_EX_TRANSPARENT.0 as isize;
        let style = self.ex_style();
        self.set_ex_style(if enable {
            style | transparent
        } else {
            style & !transparent
        });
        self.click_through = enable;
    }

    fn update_click_through_from_alpha(&mut self, alpha: f32, threshold: f32) {
        self.set_click_through(alpha < threshold);
    }

    fn performance_stats(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    fn overlay_update(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame.replace(now) {
            if self.frame_times.len() == FRAME_WINDOW {
                self.frame_times.pop_front();
            }
            self.frame_times
                .push_back(now.duration_since(last).as_secs_f32() * 1000.0);
        }
    }

    fn primary_monitor_index(&self) -> usize {
        self.monitors.iter().position(|m| m.primary).unwrap_or(0)
    }

    fn is_click_through_enabled(&self) -> bool {
        self.click_through
    }
}
