//! Orientation defect evaluation via principal-axis analysis.

use log::debug;
use serde::{Deserialize, Serialize};

use flaw_inspect_core::contour_area;
use flaw_inspect_vision::principal_axis_angle;

use super::{DefectEvaluator, DefectKind, Evaluation, RegionContext};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrientationParams {
    /// Minimum contour area for a scene contour to qualify as the object
    /// of interest, in square pixels.
    pub min_contour_area: f64,
    /// Principal-axis angles below this (radians from horizontal) are
    /// considered correctly oriented.
    pub max_angle_rad: f64,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            min_contour_area: 9000.0,
            max_angle_rad: 0.5,
        }
    }
}

/// Flags objects whose dominant principal axis tilts away from the belt
/// direction. Inspects the first scene contour large enough to be the
/// object; when none qualifies there is no defect evidence.
#[derive(Clone, Debug, Default)]
pub struct OrientationEvaluator {
    params: OrientationParams,
}

impl OrientationEvaluator {
    pub fn new(params: OrientationParams) -> Self {
        Self { params }
    }
}

impl DefectEvaluator for OrientationEvaluator {
    fn kind(&self) -> DefectKind {
        DefectKind::Orientation
    }

    fn evaluate(&self, ctx: &RegionContext<'_>) -> Evaluation {
        let Some(contour) = ctx
            .contours
            .iter()
            .find(|c| contour_area(c) >= self.params.min_contour_area)
        else {
            return Evaluation::clear(self.kind());
        };

        let angle = principal_axis_angle(contour);
        debug!("principal axis angle {angle:.3} rad");
        if angle < self.params.max_angle_rad {
            Evaluation::clear(self.kind())
        } else {
            Evaluation::flagged(self.kind(), ctx)
        }
    }
}
