use glam::{Vec2, Vec3};

/// Screen to world transform of a camera.
///
/// Screen points are in render-surface pixels with a bottom-left origin; `z`
/// is the distance from the camera along its view axis.
pub trait WorldProjector {
    fn screen_to_world(&self, screen: Vec3) -> Vec3;

    fn near_clip_plane(&self) -> f32;
}

/// Screen to local transform of a UI root.
pub trait LocalProjector {
    fn screen_to_local(&self, screen: Vec2) -> Vec2;
}

/// A live camera and UI root pair.
#[derive(Clone, Copy)]
pub struct Projector<'a> {
    pub camera: &'a dyn WorldProjector,
    pub ui_root: &'a dyn LocalProjector,
}

/// What a geometry query can project through.
#[derive(Clone, Copy)]
pub enum ProjectionContext<'a> {
    /// Overlay is running with its own camera and UI root.
    Active(Projector<'a>),
    /// No active projector; an optional best-effort default camera.
    Fallback(Option<&'a dyn WorldProjector>),
}

/// Screen-space canvas covering the whole render surface.
///
/// Local coordinates are centered on the surface and divided by the canvas
/// scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRoot {
    pub size: Vec2,
    pub scale_factor: f32,
}

impl CanvasRoot {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

impl LocalProjector for CanvasRoot {
    fn screen_to_local(&self, screen: Vec2) -> Vec2 {
        let scale = if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (screen - self.size / 2.0) / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_is_center_origin() {
        let canvas = CanvasRoot::new(1920.0, 1080.0);
        assert_eq!(canvas.screen_to_local(Vec2::new(960.0, 540.0)), Vec2::ZERO);
        assert_eq!(
            canvas.screen_to_local(Vec2::ZERO),
            Vec2::new(-960.0, -540.0)
        );
    }

    #[test]
    fn canvas_scale_factor_shrinks_local_units() {
        let canvas = CanvasRoot::new(1920.0, 1080.0).with_scale_factor(2.0);
        assert_eq!(
            canvas.screen_to_local(Vec2::new(1920.0, 1080.0)),
            Vec2::new(480.0, 270.0)
        );
    }
}
