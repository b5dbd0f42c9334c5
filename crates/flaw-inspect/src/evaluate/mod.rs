//! Defect evaluation.
//!
//! Three independent classifiers share the [`DefectEvaluator`] contract:
//! each consumes the read-only region context and returns exactly one flag
//! per region per frame, plus an optional annotated snapshot for audit.
//! They derive their own masks and share no intermediate detection state.
//! "No qualifying contour" is always negative evidence, never an error.

mod color;
mod crack;
mod orientation;

pub use color::{ColorEvaluator, ColorParams};
pub use crack::{CrackEvaluator, CrackParams};
pub use orientation::{OrientationEvaluator, OrientationParams};

use flaw_inspect_core::{ColorImage, Contour};

use crate::regions::CandidateRegion;

/// The three defect categories this pipeline knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefectKind {
    Orientation,
    Color,
    Crack,
}

impl DefectKind {
    pub fn label(&self) -> &'static str {
        match self {
            DefectKind::Orientation => "Orientation",
            DefectKind::Color => "Color",
            DefectKind::Crack => "Crack",
        }
    }
}

/// Read-only inputs one evaluator sees: the sampled frame, the accepted
/// region under inspection, and every contour the extractor produced for
/// the frame (the orientation evaluator works on scene contours).
#[derive(Clone, Copy, Debug)]
pub struct RegionContext<'a> {
    pub frame: &'a ColorImage,
    pub region: &'a CandidateRegion,
    pub contours: &'a [Contour],
}

/// One evaluator's verdict for one region.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub kind: DefectKind,
    pub defect: bool,
    /// Region crop for audit when a defect was found.
    pub snapshot: Option<ColorImage>,
}

impl Evaluation {
    pub(crate) fn clear(kind: DefectKind) -> Self {
        Self {
            kind,
            defect: false,
            snapshot: None,
        }
    }

    pub(crate) fn flagged(kind: DefectKind, ctx: &RegionContext<'_>) -> Self {
        Self {
            kind,
            defect: true,
            snapshot: Some(ctx.frame.crop(&ctx.region.bounds)),
        }
    }
}

/// Contract shared by the three defect classifiers.
pub trait DefectEvaluator {
    fn kind(&self) -> DefectKind;
    fn evaluate(&self, ctx: &RegionContext<'_>) -> Evaluation;
}
