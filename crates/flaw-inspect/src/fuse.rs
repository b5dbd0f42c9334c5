//! Classification fusion.
//!
//! Combines the independent evaluator verdicts for one object into a
//! single record. Fusion is a pure union: one flag per defect category,
//! order-independent, with no precedence between categories.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::evaluate::{DefectKind, Evaluation};

/// Everything the pipeline knows about one inspected object.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct InspectionRecord {
    /// 1-based position of the object in the run.
    pub object_number: u64,
    pub dimensions: Dimensions,
    pub orientation_defect: bool,
    pub color_defect: bool,
    pub crack_defect: bool,
    /// Capture time in nanoseconds since the Unix epoch, when known.
    pub timestamp_ns: Option<i64>,
}

impl InspectionRecord {
    pub fn is_defect_free(&self) -> bool {
        !(self.orientation_defect || self.color_defect || self.crack_defect)
    }

    /// Labels of the flagged categories in a fixed category order.
    pub fn defect_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.orientation_defect {
            labels.push(DefectKind::Orientation.label());
        }
        if self.color_defect {
            labels.push(DefectKind::Color.label());
        }
        if self.crack_defect {
            labels.push(DefectKind::Crack.label());
        }
        labels
    }

    /// Human-readable verdict: the flagged labels joined by single spaces,
    /// or "No Defect" when every flag is clear.
    pub fn classification(&self) -> String {
        let labels = self.defect_labels();
        if labels.is_empty() {
            "No Defect".to_owned()
        } else {
            labels.join(" ")
        }
    }
}

/// Fold evaluator verdicts into one record. A repeated verdict for the same
/// category cannot clear an earlier flag, and verdict order does not matter.
pub fn fuse(
    object_number: u64,
    dimensions: Dimensions,
    evaluations: &[Evaluation],
    timestamp_ns: Option<i64>,
) -> InspectionRecord {
    let mut record = InspectionRecord {
        object_number,
        dimensions,
        timestamp_ns,
        ..InspectionRecord::default()
    };
    for eval in evaluations {
        match eval.kind {
            DefectKind::Orientation => record.orientation_defect |= eval.defect,
            DefectKind::Color => record.color_defect |= eval.defect,
            DefectKind::Crack => record.crack_defect |= eval.defect,
        }
    }
    record
}
