//! Oriented dimension estimation in physical units.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use flaw_inspect_core::{round_half_up, CalibrationContext, Contour};
use flaw_inspect_vision::min_area_rect;

/// A region whose contour cannot produce a measurable rectangle is skipped;
/// no telemetry is emitted for it and the run continues.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    #[error("contour with {points} point(s) yields no enclosing rectangle")]
    InsufficientGeometry { points: usize },
}

/// Oriented object size in millimeters, rounded half-up to two decimals.
/// Invariant: `length >= width`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
}

/// Unit normalization applied after pixel-to-millimeter scaling, matching
/// the reference measurement convention.
const UNIT_SCALE: f64 = 10.0;

/// Measure the two adjacent edges of an enclosing rotated rectangle.
///
/// Edge lengths are taken between corners 0-1 and 1-2, scaled by the
/// calibration factor and the fixed x10 normalization, rounded half-up to
/// two decimals, and ordered so the longer edge is the length.
pub fn estimate_from_corners(
    corners: &[Point2<f64>; 4],
    calibration: &CalibrationContext,
) -> Dimensions {
    let scale = calibration.scale_factor() * UNIT_SCALE;
    let edge_a = round_half_up((corners[1] - corners[0]).norm() * scale, 2);
    let edge_b = round_half_up((corners[2] - corners[1]).norm() * scale, 2);

    if edge_a >= edge_b {
        Dimensions {
            length: edge_a,
            width: edge_b,
        }
    } else {
        Dimensions {
            length: edge_b,
            width: edge_a,
        }
    }
}

/// Estimate the dimensions of a region from its contour.
pub fn estimate(
    contour: &Contour,
    calibration: &CalibrationContext,
) -> Result<Dimensions, GeometryError> {
    let corners = min_area_rect(contour).ok_or(GeometryError::InsufficientGeometry {
        points: contour.len(),
    })?;
    Ok(estimate_from_corners(&corners, calibration))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(pts: [(f64, f64); 4]) -> [Point2<f64>; 4] {
        pts.map(|(x, y)| Point2::new(x, y))
    }

    #[test]
    fn reference_rectangle_with_unit_scale() {
        let c = corners([(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        let dims = estimate_from_corners(&c, &CalibrationContext::from_scale(1.0));
        assert_eq!(
            dims,
            Dimensions {
                length: 100.0,
                width: 50.0
            }
        );
    }

    #[test]
    fn length_is_never_smaller_than_width() {
        // First edge shorter than the second.
        let c = corners([(0.0, 0.0), (0.0, 5.0), (10.0, 5.0), (10.0, 0.0)]);
        let dims = estimate_from_corners(&c, &CalibrationContext::from_scale(1.0));
        assert!(dims.length >= dims.width);
        assert_eq!(dims.length, 100.0);
    }

    #[test]
    fn degenerate_contour_is_insufficient_geometry() {
        let contour: Contour = vec![Point2::new(0, 0), Point2::new(5, 0)];
        let err = estimate(&contour, &CalibrationContext::from_scale(1.0)).unwrap_err();
        assert_eq!(err, GeometryError::InsufficientGeometry { points: 2 });
    }

    #[test]
    fn contour_estimate_matches_corner_estimate() {
        let contour: Contour = vec![
            Point2::new(0, 0),
            Point2::new(10, 0),
            Point2::new(10, 5),
            Point2::new(0, 5),
        ];
        let dims = estimate(&contour, &CalibrationContext::from_scale(1.0)).expect("dims");
        assert_eq!(
            dims,
            Dimensions {
                length: 100.0,
                width: 50.0
            }
        );
    }
}
