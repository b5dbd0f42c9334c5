//! Foreground region extraction.
//!
//! Objects on the belt are segmented with a fixed HSV window, cleaned with
//! one round of morphological opening and closing, and traced into
//! contours. Bounding boxes inside the accepted area range become
//! candidate regions; everything else in the frame is ignored. The full
//! contour list is kept alongside because the orientation evaluator
//! inspects the scene contours, not only the accepted region's boundary.

use serde::{Deserialize, Serialize};

use flaw_inspect_core::{bounding_rect, ColorImage, Contour, Rect};
use flaw_inspect_vision::{ellipse_kernel, find_contours, in_range, morph_close, morph_open, rgb_to_hsv};

/// Segmentation parameters with the reference belt setup as defaults.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ExtractionParams {
    /// Lower inclusive HSV bound of the foreground window.
    pub hsv_low: [u8; 3],
    /// Upper inclusive HSV bound of the foreground window.
    pub hsv_high: [u8; 3],
    /// Odd size of the elliptical structuring element.
    pub kernel_size: usize,
    /// Minimum accepted bounding-box area, in square pixels.
    pub min_region_area: f64,
    /// Maximum accepted bounding-box area, in square pixels.
    pub max_region_area: f64,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            hsv_low: [0, 0, 47],
            hsv_high: [179, 255, 255],
            kernel_size: 5,
            min_region_area: 9000.0,
            max_region_area: 50000.0,
        }
    }
}

/// One candidate object instance in a frame. Lives only for the frame it
/// was extracted from.
#[derive(Clone, Debug)]
pub struct CandidateRegion {
    pub bounds: Rect,
    pub contour: Contour,
}

/// Extraction output: the accepted regions plus every contour the frame
/// produced.
#[derive(Clone, Debug, Default)]
pub struct RegionExtraction {
    pub regions: Vec<CandidateRegion>,
    pub contours: Vec<Contour>,
}

/// Segment the frame and gate contours by bounding-box area.
pub fn extract_regions(frame: &ColorImage, params: &ExtractionParams) -> RegionExtraction {
    if frame.is_empty() {
        return RegionExtraction::default();
    }

    let hsv = rgb_to_hsv(frame);
    let mask = in_range(&hsv, params.hsv_low, params.hsv_high);
    let kernel = ellipse_kernel(params.kernel_size);
    let mask = morph_open(&mask, &kernel);
    let mask = morph_close(&mask, &kernel);

    let contours = find_contours(&mask);
    let regions = contours
        .iter()
        .filter_map(|contour| {
            let bounds = bounding_rect(contour);
            let area = bounds.area();
            (area >= params.min_region_area && area <= params.max_region_area).then(|| {
                CandidateRegion {
                    bounds,
                    contour: contour.clone(),
                }
            })
        })
        .collect();

    RegionExtraction { regions, contours }
}
