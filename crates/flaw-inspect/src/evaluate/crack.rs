//! Crack defect evaluation via edge-contour analysis.

use log::debug;
use serde::{Deserialize, Serialize};

use flaw_inspect_core::contour_area;
use flaw_inspect_vision::{box_blur, detect_edges, find_contours, rgb_to_gray};

use super::{DefectEvaluator, DefectKind, Evaluation, RegionContext};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CrackParams {
    /// Odd size of the noise-suppression blur window.
    pub blur_size: usize,
    /// Lower hysteresis threshold for the edge detector.
    pub low_threshold: f64,
    /// Upper hysteresis threshold as a multiple of `low_threshold`.
    pub ratio: f64,
    /// Inclusive edge-contour area band expected from an intact surface.
    pub clear_min_area: f64,
    pub clear_max_area: f64,
}

impl Default for CrackParams {
    fn default() -> Self {
        Self {
            blur_size: 7,
            low_threshold: 130.0,
            ratio: 3.0,
            clear_min_area: 9.0,
            clear_max_area: 20.0,
        }
    }
}

/// Flags surface cracks: the blurred grayscale frame is run through the
/// edge detector and any edge contour whose area falls outside the
/// intact-surface band marks a defect. An intact surface yields either no
/// edge contours or only small regular ones inside the band.
#[derive(Clone, Debug, Default)]
pub struct CrackEvaluator {
    params: CrackParams,
}

impl CrackEvaluator {
    pub fn new(params: CrackParams) -> Self {
        Self { params }
    }
}

impl DefectEvaluator for CrackEvaluator {
    fn kind(&self) -> DefectKind {
        DefectKind::Crack
    }

    fn evaluate(&self, ctx: &RegionContext<'_>) -> Evaluation {
        let gray = rgb_to_gray(ctx.frame);
        let blurred = box_blur(&gray, self.params.blur_size);
        let edges = detect_edges(
            &blurred,
            self.params.low_threshold,
            self.params.low_threshold * self.params.ratio,
        );

        let cracked = find_contours(&edges).iter().any(|c| {
            let area = contour_area(c);
            area < self.params.clear_min_area || area > self.params.clear_max_area
        });

        if cracked {
            debug!(
                "edge contour outside [{}, {}]",
                self.params.clear_min_area, self.params.clear_max_area
            );
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

    fn evaluate_with(frame: &ColorImage, params: CrackParams) -> Evaluation {
        let region = CandidateRegion {
            bounds: Rect {
                x: 0,
                y: 0,
                width: frame.width as u32,
                height: frame.height as u32,
            },
            contour: Vec::new(),
        };
        let ctx = RegionContext {
            frame,
            region: &region,
            contours: &[],
        };
        CrackEvaluator::new(params).evaluate(&ctx)
    }

    #[test]
    fn uniform_surface_has_no_crack() {
        let mut frame = ColorImage::new(40, 40);
        frame.data.fill(180);
        assert!(!evaluate_with(&frame, CrackParams::default()).defect);
    }

    #[test]
    fn sharp_fissure_is_flagged() {
        // Bright surface with a dark vertical gap. The 7x7 blur softens
        // the step, so a sensitized lower threshold is needed to seed
        // hysteresis; the resulting thin edge contours fall outside the
        // intact-surface band.
        let mut frame = ColorImage::new(40, 40);
        frame.data.fill(220);
        for y in 0..40 {
            for x in 18..22 {
                frame.set_pixel(x, y, [10, 10, 10]);
            }
        }
        let params = CrackParams {
            low_threshold: 50.0,
            ..CrackParams::default()
        };
        let eval = evaluate_with(&frame, params);
        assert!(eval.defect);
        assert!(eval.snapshot.is_some());
    }

    #[test]
    fn default_thresholds_ignore_a_soft_step() {
        // After the 7x7 blur a plain intensity step stays below the
        // default upper hysteresis threshold, so no edges seed at all.
        let mut frame = ColorImage::new(40, 40);
        frame.data.fill(220);
        for y in 0..40 {
            for x in 0..20 {
                frame.set_pixel(x, y, [20, 20, 20]);
            }
        }
        assert!(!evaluate_with(&frame, CrackParams::default()).defect);
    }
}
