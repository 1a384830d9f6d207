pub mod projection;
pub mod rect;
pub mod translator;

pub use projection::{CanvasRoot, LocalProjector, ProjectionContext, Projector, WorldProjector};
pub use rect::{RectRegion, RegionPair, SurfaceRect};
pub use translator::{screen_region, surface_scale, taskbar_region, to_surface_pixels};
