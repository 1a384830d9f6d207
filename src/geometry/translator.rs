//! Monitor metrics to UI/world rectangles.
//!
//! Desktop metrics use a top-left origin; UI and world rectangles are y-up.
//! Every flip between the two happens here. Queries never fail: degenerate
//! input degrades to unit scale or to the fallback geometry.

use glam::{IVec2, Vec2};
use tracing::debug;

use super::projection::{ProjectionContext, Projector, WorldProjector};
use super::rect::{RectRegion, RegionPair, SurfaceRect};
use crate::monitor::{MonitorMetrics, PixelBounds, TaskbarSide};

/// Camera distance used when projecting through an active overlay camera.
pub const PROJECTION_DEPTH: f32 = 1.0;

/// Visible desktop area (the work area) in UI and world space.
///
/// In [`ProjectionContext::Fallback`] only the surface resolution of
/// `metrics` is used; the surface itself stands in for the work area.
pub fn screen_region(metrics: &MonitorMetrics, ctx: ProjectionContext<'_>) -> RegionPair {
    match ctx {
        ProjectionContext::Active(projector) => {
            let rect = to_surface_pixels(metrics.work, metrics.monitor.origin(), surface_scale(metrics));
            project(rect, metrics.screen_height as f32, projector)
        }
        ProjectionContext::Fallback(camera) => {
            let fallback = MonitorMetrics::fallback(metrics.screen_width, metrics.screen_height);
            let rect = to_surface_pixels(fallback.monitor, fallback.monitor.origin(), Vec2::ONE);
            project_fallback(rect, &fallback, camera)
        }
    }
}

/// Taskbar rectangle in UI and world space.
pub fn taskbar_region(metrics: &MonitorMetrics, ctx: ProjectionContext<'_>) -> RegionPair {
    match ctx {
        ProjectionContext::Active(projector) => {
            let rect = to_surface_pixels(metrics.taskbar, metrics.work.origin(), surface_scale(metrics))
                .offset(taskbar_edge_correction(metrics));
            project(rect, metrics.screen_height as f32, projector)
        }
        ProjectionContext::Fallback(camera) => {
            let fallback = MonitorMetrics::fallback(metrics.screen_width, metrics.screen_height);
            let rect = to_surface_pixels(fallback.taskbar, fallback.monitor.origin(), Vec2::ONE);
            project_fallback(rect, &fallback, camera)
        }
    }
}

/// Anisotropic scale from work-area pixels to render-surface pixels.
///
/// A zero or negative work area is a backend contract violation; it maps to
/// unit scale.
pub fn surface_scale(metrics: &MonitorMetrics) -> Vec2 {
    let work_width = metrics.work.width();
    let work_height = metrics.work.height();
    if work_width <= 0 || work_height <= 0 {
        debug!(work = ?metrics.work, "degenerate work area; using unit scale");
        return Vec2::ONE;
    }
    Vec2::new(
        metrics.screen_width as f32 / work_width as f32,
        metrics.screen_height as f32 / work_height as f32,
    )
}

/// Translate `rect` so that `origin` becomes the surface origin, then scale.
pub fn to_surface_pixels(rect: PixelBounds, origin: IVec2, scale: Vec2) -> SurfaceRect {
    SurfaceRect {
        left: (rect.left - origin.x) as f32 * scale.x,
        top: (rect.top - origin.y) as f32 * scale.y,
        right: (rect.right - origin.x) as f32 * scale.x,
        bottom: (rect.bottom - origin.y) as f32 * scale.y,
    }
}

/// Scaling the work area onto the surface pushes the taskbar just past the
/// surface edge; shift it back by its thickness, toward the interior.
fn taskbar_edge_correction(metrics: &MonitorMetrics) -> Vec2 {
    let edge = metrics.taskbar_edge as f32;
    match metrics.taskbar_side() {
        TaskbarSide::Bottom => Vec2::new(0.0, -edge),
        TaskbarSide::Top => Vec2::new(0.0, edge),
        TaskbarSide::Left => Vec2::new(edge, 0.0),
        TaskbarSide::Right => Vec2::new(-edge, 0.0),
    }
}

fn project(rect: SurfaceRect, surface_height: f32, projector: Projector<'_>) -> RegionPair {
    let (bottom_left, top_right) = rect.screen_corners(surface_height);

    let world_bl = projector.camera.screen_to_world(bottom_left.extend(PROJECTION_DEPTH));
    let world_tr = projector.camera.screen_to_world(top_right.extend(PROJECTION_DEPTH));

    RegionPair {
        ui: RectRegion::from_corners(
            projector.ui_root.screen_to_local(bottom_left),
            projector.ui_root.screen_to_local(top_right),
        ),
        world: RectRegion::from_corners(world_bl.truncate(), world_tr.truncate()),
    }
}

fn project_fallback(
    rect: SurfaceRect,
    metrics: &MonitorMetrics,
    camera: Option<&dyn WorldProjector>,
) -> RegionPair {
    let (bottom_left, top_right) = rect.screen_corners(metrics.screen_height as f32);
    let half = Vec2::new(metrics.screen_width as f32, metrics.screen_height as f32) / 2.0;
    let ui = RectRegion::from_corners(bottom_left - half, top_right - half);

    let world = match camera {
        Some(camera) => {
            let depth = camera.near_clip_plane() + 1.0;
            RectRegion::from_corners(
                camera.screen_to_world(bottom_left.extend(depth)).truncate(),
                camera.screen_to_world(top_right.extend(depth)).truncate(),
            )
        }
        None => ui,
    };

    RegionPair { ui, world }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::projection::CanvasRoot;
    use crate::host::OrthographicCamera;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_well_formed(region: &RectRegion) {
        assert!(region.right >= region.left, "{region:?}");
        assert!(region.top >= region.bottom, "{region:?}");
        assert!(region.size.x >= 0.0 && region.size.y >= 0.0, "{region:?}");
    }

    fn active<'a>(camera: &'a OrthographicCamera, canvas: &'a CanvasRoot) -> ProjectionContext<'a> {
        ProjectionContext::Active(Projector {
            camera,
            ui_root: canvas,
        })
    }

    #[test]
    fn scale_maps_work_area_onto_surface() {
        let metrics = MonitorMetrics {
            screen_width: 1920,
            screen_height: 1080,
            monitor: PixelBounds::new(0, 0, 1600, 900),
            work: PixelBounds::new(0, 0, 1600, 900),
            taskbar: PixelBounds::new(0, 860, 1600, 900),
            taskbar_edge: 40,
        };
        let scale = surface_scale(&metrics);
        assert_close(scale.x, 1.2);
        assert_close(scale.y, 1.2);

        let rect = to_surface_pixels(metrics.taskbar, metrics.work.origin(), scale);
        assert_close(rect.left, 0.0);
        assert_close(rect.top, 1032.0);
        assert_close(rect.right, 1920.0);
        assert_close(rect.bottom, 1080.0);
    }

    #[test]
    fn degenerate_work_area_uses_unit_scale() {
        let mut metrics = MonitorMetrics::fallback(1920, 1080);
        metrics.work = PixelBounds::new(100, 100, 100, 500);
        assert_eq!(surface_scale(&metrics), Vec2::ONE);

        let camera = OrthographicCamera::new(1920.0, 1080.0, 5.0);
        let canvas = CanvasRoot::new(1920.0, 1080.0);
        let region = screen_region(&metrics, active(&camera, &canvas));
        assert!(region.ui.left.is_finite() && region.world.top.is_finite());
    }

    #[test]
    fn fallback_without_camera_mirrors_ui_into_world() {
        let metrics = MonitorMetrics::fallback(1920, 1080);

        let screen = screen_region(&metrics, ProjectionContext::Fallback(None));
        assert_eq!(screen.ui, RectRegion::new(-960.0, 540.0, 960.0, -540.0));
        assert_eq!(screen.ui.center(), Vec2::ZERO);
        assert_eq!(screen.world, screen.ui);

        let taskbar = taskbar_region(&metrics, ProjectionContext::Fallback(None));
        assert_eq!(taskbar.ui, RectRegion::new(-960.0, -500.0, 960.0, -540.0));
        assert_eq!(taskbar.ui.size, Vec2::new(1920.0, 40.0));
        assert_eq!(taskbar.world, taskbar.ui);
    }

    #[test]
    fn fallback_ignores_monitor_geometry_beyond_surface_size() {
        let metrics = MonitorMetrics::from_bounds(
            1920,
            1080,
            PixelBounds::new(2560, 0, 5120, 1440),
            PixelBounds::new(2560, 0, 5120, 1392),
        );
        let screen = screen_region(&metrics, ProjectionContext::Fallback(None));
        assert_eq!(screen.ui.size, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn fallback_with_default_camera_projects_world() {
        let camera = OrthographicCamera::new(1920.0, 1080.0, 5.0);
        let metrics = MonitorMetrics::fallback(1920, 1080);
        let screen = screen_region(&metrics, ProjectionContext::Fallback(Some(&camera as &dyn WorldProjector)));
        assert_close(screen.world.top, 5.0);
        assert_close(screen.world.bottom, -5.0);
        assert_close(screen.world.right, 960.0 * 10.0 / 1080.0);
        assert_close(screen.world.center().x, 0.0);
    }

    #[test]
    fn active_screen_region_spans_surface_for_bottom_taskbar() {
        let camera = OrthographicCamera::new(1920.0, 1080.0, 5.0);
        let canvas = CanvasRoot::new(1920.0, 1080.0);
        let metrics = MonitorMetrics::fallback(1920, 1080);

        let screen = screen_region(&metrics, active(&camera, &canvas));
        assert_close(screen.ui.left, -960.0);
        assert_close(screen.ui.right, 960.0);
        assert_close(screen.ui.top, 540.0);
        assert_close(screen.ui.bottom, -540.0);
        assert_close(screen.world.top, 5.0);
        assert_well_formed(&screen.world);
    }

    #[test]
    fn active_taskbar_is_pulled_back_onto_surface() {
        let camera = OrthographicCamera::new(1920.0, 1040.0, 5.0);
        let canvas = CanvasRoot::new(1920.0, 1040.0);
        let metrics = MonitorMetrics::from_bounds(
            1920,
            1040,
            PixelBounds::new(0, 0, 1920, 1080),
            PixelBounds::new(0, 0, 1920, 1040),
        );

        let taskbar = taskbar_region(&metrics, active(&camera, &canvas));
        assert_close(taskbar.ui.bottom, -520.0);
        assert_close(taskbar.ui.top, -480.0);
        assert_close(taskbar.ui.size.x, 1920.0);
        assert_close(taskbar.ui.size.y, 40.0);
        assert_close(taskbar.world.bottom, -5.0);
    }

    #[test]
    fn active_top_taskbar_moves_down() {
        let camera = OrthographicCamera::new(1920.0, 1040.0, 5.0);
        let canvas = CanvasRoot::new(1920.0, 1040.0);
        let metrics = MonitorMetrics::from_bounds(
            1920,
            1040,
            PixelBounds::new(0, 0, 1920, 1080),
            PixelBounds::new(0, 40, 1920, 1080),
        );

        let taskbar = taskbar_region(&metrics, active(&camera, &canvas));
        assert_close(taskbar.ui.top, 520.0);
        assert_close(taskbar.ui.bottom, 480.0);
    }

    #[test]
    fn regions_are_well_formed_across_layouts() {
        let layouts = [
            (1920, 1080, PixelBounds::new(0, 0, 1920, 1080), PixelBounds::new(0, 0, 1920, 1040)),
            (2560, 1440, PixelBounds::new(-2560, 0, 0, 1440), PixelBounds::new(-2560, 48, 0, 1440)),
            (1280, 720, PixelBounds::new(0, 0, 3840, 2160), PixelBounds::new(96, 0, 3840, 2160)),
            (800, 600, PixelBounds::new(1920, 300, 3200, 1324), PixelBounds::new(1920, 300, 3140, 1324)),
        ];
        for (w, h, monitor, work) in layouts {
            let metrics = MonitorMetrics::from_bounds(w, h, monitor, work);
            let camera = OrthographicCamera::new(w as f32, h as f32, 5.0)
                .with_position(Vec3::new(3.0, -2.0, -10.0));
            let canvas = CanvasRoot::new(w as f32, h as f32).with_scale_factor(1.5);

            for ctx in [active(&camera, &canvas), ProjectionContext::Fallback(Some(&camera as &dyn WorldProjector))] {
                for region in [screen_region(&metrics, ctx), taskbar_region(&metrics, ctx)] {
                    assert_well_formed(&region.ui);
                    assert_well_formed(&region.world);
                }
            }
        }
    }
}
