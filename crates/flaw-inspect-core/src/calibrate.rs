//! Pixel-to-millimeter calibration.
//!
//! The scale factor is derived once at startup from the camera optics when
//! they are known, and otherwise falls back to a screen-resolution constant.
//! There is no error path: any non-positive input selects the fallback.

/// Fallback scale when optics are unknown: 25.4 mm / 96 pixels per inch.
pub const DEFAULT_MM_PER_PIXEL: f64 = 0.026_458_333_3;

/// Immutable per-run calibration, shared read-only by the dimension
/// estimator.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationContext {
    scale_factor: f64,
}

impl CalibrationContext {
    /// Use an already-known scale factor. Non-positive values fall back to
    /// the default, keeping the positivity invariant.
    pub fn from_scale(scale_factor: f64) -> Self {
        if scale_factor > 0.0 {
            Self { scale_factor }
        } else {
            Self::default()
        }
    }

    /// Millimeters per pixel, always strictly positive.
    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

impl Default for CalibrationContext {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_MM_PER_PIXEL,
        }
    }
}

/// Derive the scale factor from camera optics and the captured frame size.
///
/// With a positive field of view (degrees) and camera-to-object distance
/// (millimeters), the image-plane diagonal in millimeters is
/// `2 * distance * tan(fov / 2)`; dividing by the frame diagonal in pixels
/// yields millimeters per pixel. Any other input returns the fixed
/// [`DEFAULT_MM_PER_PIXEL`] fallback.
pub fn calibrate(
    fov_degrees: f64,
    distance_mm: f64,
    frame_width: u32,
    frame_height: u32,
) -> CalibrationContext {
    if fov_degrees <= 0.0 || distance_mm <= 0.0 || frame_width == 0 || frame_height == 0 {
        return CalibrationContext::default();
    }

    let half_fov = (fov_degrees / 2.0).to_radians();
    let diagonal_mm = (2.0 * distance_mm * half_fov.tan()).abs();
    let diagonal_px =
        ((frame_width as f64).powi(2) + (frame_height as f64).powi(2)).sqrt();

    CalibrationContext {
        scale_factor: diagonal_mm / diagonal_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn valid_optics_yield_positive_scale() {
        let cal = calibrate(60.0, 400.0, 640, 480);
        assert!(cal.scale_factor() > 0.0);

        // 2 * 400 * tan(30 deg) / 800
        let expected = 2.0 * 400.0 * 30f64.to_radians().tan() / 800.0;
        assert_relative_eq!(cal.scale_factor(), expected, max_relative = 1e-12);
    }

    #[test]
    fn non_positive_optics_fall_back_to_default() {
        assert_eq!(
            calibrate(0.0, 400.0, 640, 480).scale_factor(),
            DEFAULT_MM_PER_PIXEL
        );
        assert_eq!(
            calibrate(60.0, 0.0, 640, 480).scale_factor(),
            DEFAULT_MM_PER_PIXEL
        );
        assert_eq!(
            calibrate(-10.0, -5.0, 640, 480).scale_factor(),
            DEFAULT_MM_PER_PIXEL
        );
    }

    #[test]
    fn degenerate_frame_falls_back_to_default() {
        assert_eq!(
            calibrate(60.0, 400.0, 0, 480).scale_factor(),
            DEFAULT_MM_PER_PIXEL
        );
    }
}
