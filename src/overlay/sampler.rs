use glam::Vec2;

use super::backend::OverlayBackend;
use crate::host::PixelReadback;

/// Why a frame produced no click-through update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    OverlayInactive,
    EmptySurface,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleOutcome {
    Forwarded { x: u32, y: u32, alpha: f32 },
    Skipped(SkipReason),
}

/// Per-frame click-through driver.
///
/// The controller owns one while the overlay is active and calls
/// [`ClickThroughSampler::step`] once per composed frame. Dropping it is the
/// cancellation point; the controller does so before releasing the surface.
#[derive(Debug)]
pub struct ClickThroughSampler {
    threshold: f32,
    samples: u64,
    last_alpha: Option<f32>,
}

impl ClickThroughSampler {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            samples: 0,
            last_alpha: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.clamp(0.0, 1.0);
    }

    /// Number of alpha values forwarded so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn last_alpha(&self) -> Option<f32> {
        self.last_alpha
    }

    /// Sample the pixel under `pointer` and forward its alpha.
    pub fn step<B: OverlayBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        surface: &mut dyn PixelReadback,
        pointer: Vec2,
        surface_size: (u32, u32),
    ) -> SampleOutcome {
        if !backend.is_overlay_active() {
            return SampleOutcome::Skipped(SkipReason::OverlayInactive);
        }
        let Some((x, y)) = clamp_to_surface(pointer, surface_size.0, surface_size.1) else {
            return SampleOutcome::Skipped(SkipReason::EmptySurface);
        };

        let alpha = surface.read_alpha(x, y);
        backend.update_click_through_from_alpha(alpha, self.threshold);
        self.samples += 1;
        self.last_alpha = Some(alpha);
        SampleOutcome::Forwarded { x, y, alpha }
    }
}

/// Clamp a pointer position into `[0, width-1] x [0, height-1]`.
///
/// `None` for an empty surface, which has no readable pixel.
pub fn clamp_to_surface(pointer: Vec2, width: u32, height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let clamp = |v: f32, len: u32| {
        if v.is_nan() {
            0
        } else {
            v.clamp(0.0, (len - 1) as f32) as u32
        }
    };
    Some((clamp(pointer.x, width), clamp(pointer.y, height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_pointers() {
        assert_eq!(clamp_to_surface(Vec2::new(-50.0, -1.0), 1920, 1080), Some((0, 0)));
        assert_eq!(
            clamp_to_surface(Vec2::new(5000.0, 1080.0), 1920, 1080),
            Some((1919, 1079))
        );
        assert_eq!(clamp_to_surface(Vec2::new(f32::NAN, 10.5), 4, 20), Some((0, 10)));
        assert_eq!(clamp_to_surface(Vec2::new(3.0, 3.0), 0, 1080), None);
    }

    #[test]
    fn threshold_is_kept_in_unit_range() {
        let mut sampler = ClickThroughSampler::new(2.0);
        assert_eq!(sampler.threshold(), 1.0);
        sampler.set_threshold(-0.5);
        assert_eq!(sampler.threshold(), 0.0);
    }
}
