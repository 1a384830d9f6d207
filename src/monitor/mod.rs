pub mod enumerate;
pub mod types;

pub use enumerate::enumerate_monitors;
pub use types::{DEFAULT_TASKBAR_HEIGHT, MonitorInfo, MonitorMetrics, PixelBounds, TaskbarSide};
