//! Viewport dimensions in logical units plus the device pixel ratio.

/// Upper bound for the device pixel ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Lower bound for the device pixel ratio.
pub const MIN_PIXEL_RATIO: f32 = 0.01;

/// Relative slack absorbed when converting logical sizes back to pixels.
const DEVICE_ROUNDING: f32 = 1e-5;

/// Logical drawing area and its mapping to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Device pixels per logical unit.
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport, clamping the pixel ratio into
    /// [`MIN_PIXEL_RATIO`]..=[`MAX_PIXEL_RATIO`] and negative sizes to zero.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() {
            pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Build a viewport whose device size is exactly `device_width` x `device_height`.
    pub fn from_device(device_width: u32, device_height: u32, pixel_ratio: f32) -> Self {
        let probe = Self::new(0.0, 0.0, pixel_ratio);
        Self::new(
            device_width as f32 / probe.pixel_ratio,
            device_height as f32 / probe.pixel_ratio,
            probe.pixel_ratio,
        )
    }

    /// Size of the backing pixel buffer, `floor(logical * ratio)`.
    ///
    /// A size built by [`Viewport::from_device`] maps back to the exact pixel
    /// grid for any ratio, despite the float division.
    pub fn device_size(&self) -> (usize, usize) {
        (
            to_device(self.width, self.pixel_ratio),
            to_device(self.height, self.pixel_ratio),
        )
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }

    pub fn is_empty(&self) -> bool {
        let (w, h) = self.device_size();
        w == 0 || h == 0
    }
}

fn to_device(logical: f32, pixel_ratio: f32) -> usize {
    let pixels = logical * pixel_ratio;
    (pixels + pixels * DEVICE_ROUNDING).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_clamped() {
        assert_eq!(Viewport::new(10.0, 10.0, 3.0).pixel_ratio, MAX_PIXEL_RATIO);
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).pixel_ratio, MIN_PIXEL_RATIO);
        assert_eq!(Viewport::new(10.0, 10.0, f32::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn test_from_device_round_trips_device_size() {
        let viewport = Viewport::from_device(120, 80, 0.25);
        assert_eq!(viewport.width, 480.0);
        assert_eq!(viewport.height, 320.0);
        assert_eq!(viewport.device_size(), (120, 80));
    }

    #[test]
    fn test_from_device_exact_for_any_ratio() {
        for ratio in [0.1, 0.3, 0.33, 0.7, 1.1, 1.3, 1.7] {
            for w in 1..400 {
                let viewport = Viewport::from_device(w, 2 * w, ratio);
                assert_eq!(
                    viewport.device_size(),
                    (w as usize, 2 * w as usize),
                    "ratio {ratio}, width {w}"
                );
            }
        }
    }

    #[test]
    fn test_device_size_still_floors() {
        assert_eq!(Viewport::new(10.9, 7.5, 1.0).device_size(), (10, 7));
        assert_eq!(Viewport::new(99.0, 50.0, 0.3).device_size(), (29, 15));
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0.0, 100.0, 1.0).is_empty());
        assert!(Viewport::new(-5.0, 100.0, 1.0).is_empty());
        assert!(!Viewport::new(4.0, 4.0, 0.5).is_empty());
    }
}
