use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Thickness of the taskbar synthesized when no native metrics are available.
pub const DEFAULT_TASKBAR_HEIGHT: i32 = 40;

/// A rectangle in desktop pixels (top-left origin, `bottom > top`).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelBounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Top-left corner.
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.left, self.top)
    }

    pub fn contains(&self, other: &PixelBounds) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Monitor edge the taskbar is docked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskbarSide {
    Bottom,
    Top,
    Left,
    Right,
}

/// Geometry snapshot of one monitor as reported by the native backend.
///
/// The layout matches the backend's C struct so the value can cross the FFI
/// boundary unchanged. A snapshot is never edited after it is produced; a
/// monitor switch replaces it wholesale.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorMetrics {
    /// Render-surface width (may differ from the monitor resolution).
    pub screen_width: i32,
    /// Render-surface height.
    pub screen_height: i32,
    /// Full monitor rectangle in desktop coordinates.
    pub monitor: PixelBounds,
    /// Monitor area excluding the taskbar.
    pub work: PixelBounds,
    /// Taskbar rectangle.
    pub taskbar: PixelBounds,
    /// Taskbar thickness in pixels.
    pub taskbar_edge: i32,
}

impl MonitorMetrics {
    /// Metrics for a `width x height` surface with a 40 px taskbar on the
    /// bottom edge. Used whenever the native backend cannot be queried.
    pub fn fallback(width: i32, height: i32) -> Self {
        let monitor = PixelBounds::new(0, 0, width, height);
        let taskbar_top = height - DEFAULT_TASKBAR_HEIGHT;
        Self {
            screen_width: width,
            screen_height: height,
            monitor,
            work: PixelBounds::new(0, 0, width, taskbar_top),
            taskbar: PixelBounds::new(0, taskbar_top, width, height),
            taskbar_edge: DEFAULT_TASKBAR_HEIGHT,
        }
    }

    /// Build metrics from the monitor and work rectangles, deriving the
    /// taskbar from the strip of the monitor the work area leaves uncovered.
    ///
    /// An auto-hidden taskbar leaves no strip; it is then reported as a
    /// zero-height rectangle on the bottom edge.
    pub fn from_bounds(
        screen_width: i32,
        screen_height: i32,
        monitor: PixelBounds,
        work: PixelBounds,
    ) -> Self {
        let (taskbar, taskbar_edge) = if work.bottom < monitor.bottom {
            (
                PixelBounds::new(monitor.left, work.bottom, monitor.right, monitor.bottom),
                monitor.bottom - work.bottom,
            )
        } else if work.top > monitor.top {
            (
                PixelBounds::new(monitor.left, monitor.top, monitor.right, work.top),
                work.top - monitor.top,
            )
        } else if work.left > monitor.left {
            (
                PixelBounds::new(monitor.left, monitor.top, work.left, monitor.bottom),
                work.left - monitor.left,
            )
        } else if work.right < monitor.right {
            (
                PixelBounds::new(work.right, monitor.top, monitor.right, monitor.bottom),
                monitor.right - work.right,
            )
        } else {
            (
                PixelBounds::new(monitor.left, monitor.bottom, monitor.right, monitor.bottom),
                0,
            )
        };

        Self {
            screen_width,
            screen_height,
            monitor,
            work,
            taskbar,
            taskbar_edge,
        }
    }

    /// Edge of the monitor the taskbar is attached to.
    pub fn taskbar_side(&self) -> TaskbarSide {
        let tb = &self.taskbar;
        if tb.width() >= tb.height() {
            if tb.top <= self.monitor.top && tb.bottom < self.monitor.bottom {
                TaskbarSide::Top
            } else {
                TaskbarSide::Bottom
            }
        } else if tb.left <= self.monitor.left {
            TaskbarSide::Left
        } else {
            TaskbarSide::Right
        }
    }
}

/// Information about a connected display monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Device name reported by the OS (e.g. `\\.\DISPLAY1`).
    pub name: String,
    /// Full monitor rectangle in virtual-screen space.
    pub bounds: PixelBounds,
    /// Work area (monitor minus taskbar).
    pub work: PixelBounds,
    /// Whether this is the primary display.
    pub primary: bool,
}

impl MonitorInfo {
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }
}
