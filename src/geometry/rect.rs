use glam::Vec2;

/// A rectangle in UI or world space. Y grows upward, so `top >= bottom` for
/// any well-formed region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectRegion {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub size: Vec2,
}

impl RectRegion {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            size: Vec2::new(right - left, top - bottom),
        }
    }

    /// Region spanned by a bottom-left and a top-right corner.
    pub fn from_corners(bottom_left: Vec2, top_right: Vec2) -> Self {
        Self::new(bottom_left.x, top_right.y, top_right.x, bottom_left.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// The same region expressed in UI-local and in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegionPair {
    pub ui: RectRegion,
    pub world: RectRegion,
}

/// A rectangle in render-surface pixels, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SurfaceRect {
    pub fn offset(self, delta: Vec2) -> Self {
        Self {
            left: self.left + delta.x,
            top: self.top + delta.y,
            right: self.right + delta.x,
            bottom: self.bottom + delta.y,
        }
    }

    /// Bottom-left and top-right corners in bottom-left-origin screen space.
    pub fn screen_corners(&self, surface_height: f32) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left, surface_height - self.bottom),
            Vec2::new(self.right, surface_height - self.top),
        )
    }
}
