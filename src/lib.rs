//! Desktop overlay support: translate monitor metrics into UI and world
//! rectangles, and manage the overlay lifecycle over a native compositing
//! backend.

pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod monitor;
pub mod overlay;
pub mod settings;

pub use error::{OverlayError, ProjectorKind};
pub use geometry::{RectRegion, RegionPair};
pub use monitor::MonitorMetrics;
pub use overlay::{OverlayBackend, OverlayController, OverlayFacade, OverlayPhase};
pub use settings::OverlaySettings;
