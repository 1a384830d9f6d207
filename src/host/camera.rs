use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::geometry::WorldProjector;

/// Shared handle to a host-owned camera. The controller only keeps a
/// [`std::rc::Weak`] to it.
pub type CameraHandle = Rc<RefCell<dyn OverlayCamera>>;

/// Straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// How a camera clears its target before drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClearFlags {
    #[default]
    Skybox,
    SolidColor,
    DepthOnly,
    Nothing,
}

/// Identifier of an off-screen render target owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// The camera state the overlay overrides while active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraClearState {
    pub clear_flags: ClearFlags,
    pub background: Rgba,
    /// `None` renders straight to the window.
    pub target_surface: Option<SurfaceId>,
}

impl CameraClearState {
    /// Clear to fully transparent black and render to the window, so the
    /// compositor sees the alpha channel.
    pub const fn transparent() -> Self {
        Self {
            clear_flags: ClearFlags::SolidColor,
            background: Rgba::TRANSPARENT,
            target_surface: None,
        }
    }
}

/// A host camera the overlay can reconfigure and project through.
pub trait OverlayCamera: WorldProjector {
    fn clear_state(&self) -> CameraClearState;

    fn set_clear_state(&mut self, state: CameraClearState);

    fn set_hdr(&mut self, enabled: bool);
}

/// Orthographic camera looking down +Z at a viewport of `viewport` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec3,
    /// Half the visible height in world units.
    pub half_height: f32,
    pub viewport: Vec2,
    pub near_clip: f32,
    pub clear: CameraClearState,
    pub hdr: bool,
}

impl OrthographicCamera {
    pub fn new(viewport_width: f32, viewport_height: f32, half_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -10.0),
            half_height,
            viewport: Vec2::new(viewport_width, viewport_height),
            near_clip: 0.3,
            clear: CameraClearState::default(),
            hdr: true,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_clear_state(mut self, clear: CameraClearState) -> Self {
        self.clear = clear;
        self
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    fn units_per_pixel(&self) -> f32 {
        if self.viewport.y > 0.0 {
            2.0 * self.half_height / self.viewport.y
        } else {
            0.0
        }
    }
}

impl WorldProjector for OrthographicCamera {
    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let upp = self.units_per_pixel();
        let offset = (screen.truncate() - self.viewport / 2.0) * upp;
        Vec3::new(
            self.position.x + offset.x,
            self.position.y + offset.y,
            self.position.z + screen.z,
        )
    }

    fn near_clip_plane(&self) -> f32 {
        self.near_clip
    }
}

impl OverlayCamera for OrthographicCamera {
    fn clear_state(&self) -> CameraClearState {
        self.clear
    }

    fn set_clear_state(&mut self, state: CameraClearState) {
        self.clear = state;
    }

    fn set_hdr(&mut self, enabled: bool) {
        self.hdr = enabled;
    }
}
