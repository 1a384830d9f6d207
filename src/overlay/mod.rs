pub mod backend;
pub mod controller;
pub mod facade;
pub mod sampler;
#[cfg(windows)]
pub mod window;

pub use backend::{OverlayBackend, UnavailableBackend};
pub use controller::{OverlayController, OverlayPhase, clamp_monitor_index};
pub use facade::{NO_MONITOR, OverlayFacade, STATS_UNINITIALIZED};
pub use sampler::{ClickThroughSampler, SampleOutcome, SkipReason};
#[cfg(windows)]
pub use window::Win32Backend;

