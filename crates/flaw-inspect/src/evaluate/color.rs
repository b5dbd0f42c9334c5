//! Surface color defect evaluation.

use log::debug;
use serde::{Deserialize, Serialize};

use flaw_inspect_core::contour_area;
use flaw_inspect_vision::{
    brighten, ellipse_kernel, find_contours, in_range, morph_close, morph_open, rgb_to_hsv,
};

use super::{DefectEvaluator, DefectKind, Evaluation, RegionContext};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ColorParams {
    /// Brightness boost applied before the HSV conversion.
    pub brighten: u8,
    /// Lower inclusive HSV bound of the anomalous-surface window.
    pub hsv_low: [u8; 3],
    /// Upper inclusive HSV bound of the anomalous-surface window.
    pub hsv_high: [u8; 3],
    /// Odd size of the elliptical structuring element.
    pub kernel_size: usize,
    /// Exclusive lower area bound for a contour to count as an anomaly.
    pub anomaly_min_area: f64,
    /// Exclusive upper area bound for a contour to count as an anomaly.
    pub anomaly_max_area: f64,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            brighten: 20,
            hsv_low: [0, 0, 0],
            hsv_high: [174, 73, 255],
            kernel_size: 5,
            anomaly_min_area: 2000.0,
            anomaly_max_area: 10000.0,
        }
    }
}

/// Flags surface discoloration: the brightened frame is thresholded
/// against the anomalous-color window, cleaned up, and any resulting
/// contour with area strictly inside the anomaly band marks a defect.
/// Zero qualifying contours means no defect evidence.
#[derive(Clone, Debug, Default)]
pub struct ColorEvaluator {
    params: ColorParams,
}

impl ColorEvaluator {
    pub fn new(params: ColorParams) -> Self {
        Self { params }
    }
}

impl DefectEvaluator for ColorEvaluator {
    fn kind(&self) -> DefectKind {
        DefectKind::Color
    }

    fn evaluate(&self, ctx: &RegionContext<'_>) -> Evaluation {
        let boosted = brighten(ctx.frame, self.params.brighten);
        let hsv = rgb_to_hsv(&boosted);
        let mask = in_range(&hsv, self.params.hsv_low, self.params.hsv_high);
        let kernel = ellipse_kernel(self.params.kernel_size);
        let mask = morph_open(&mask, &kernel);
        let mask = morph_close(&mask, &kernel);

        let anomalous = find_contours(&mask).iter().any(|c| {
            let area = contour_area(c);
            area > self.params.anomaly_min_area && area < self.params.anomaly_max_area
        });

        if anomalous {
            debug!("anomalous color contour inside ({}, {})",
                self.params.anomaly_min_area, self.params.anomaly_max_area);
            Evaluation::flagged(self.kind(), ctx)
        } else {
            Evaluation::clear(self.kind())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::CandidateRegion;
    use flaw_inspect_core::{ColorImage, Rect};

    fn region_over(frame: &ColorImage) -> CandidateRegion {
        CandidateRegion {
            bounds: Rect {
                x: 0,
                y: 0,
                width: frame.width as u32,
                height: frame.height as u32,
            },
            contour: Vec::new(),
        }
    }

    fn evaluate(frame: &ColorImage) -> Evaluation {
        let region = region_over(frame);
        let ctx = RegionContext {
            frame,
            region: &region,
            contours: &[],
        };
        ColorEvaluator::default().evaluate(&ctx)
    }

    #[test]
    fn pale_patch_in_anomaly_band_is_flagged() {
        // A whole 100x60 low-saturation frame masks to one contour of
        // ~5800 px^2, inside the (2000, 10000) band.
        let mut frame = ColorImage::new(100, 60);
        frame.data.fill(120);
        let eval = evaluate(&frame);
        assert!(eval.defect);
        assert!(eval.snapshot.is_some());
    }

    #[test]
    fn saturated_surface_is_clear() {
        // Pure red saturates past the S<=73 window: nothing masks.
        let mut frame = ColorImage::new(100, 60);
        for px in frame.data.chunks_exact_mut(3) {
            px.copy_from_slice(&[255, 0, 0]);
        }
        assert!(!evaluate(&frame).defect);
    }

    #[test]
    fn large_uniform_surface_is_clear() {
        // One big contour beyond the anomaly band is not a defect.
        let mut frame = ColorImage::new(200, 150);
        frame.data.fill(120);
        assert!(!evaluate(&frame).defect);
    }
}
