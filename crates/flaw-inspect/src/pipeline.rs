//! Frame-sampling inspection orchestrator.
//!
//! The pipeline owns the evaluators, the calibration, and the telemetry
//! sink. Frames arrive in belt order; every `frame_interval`-th frame is
//! inspected and the rest are dropped unexamined. One record is published
//! per accepted region, and a failed publish aborts the run.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use flaw_inspect_core::{CalibrationContext, ColorImage};
use flaw_inspect_telemetry::TelemetryError;

use crate::dimensions::{self, Dimensions};
use crate::evaluate::{
    ColorEvaluator, ColorParams, CrackEvaluator, CrackParams, DefectEvaluator, DefectKind,
    OrientationEvaluator, OrientationParams, RegionContext,
};
use crate::fuse::{fuse, InspectionRecord};
use crate::regions::{extract_regions, ExtractionParams};
use crate::telemetry::TelemetrySink;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("telemetry delivery failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Tuning for one inspection run.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PipelineParams {
    /// Inspect every n-th frame; the belt moves slowly enough that
    /// intermediate frames show the same object.
    pub frame_interval: u64,
    pub extraction: ExtractionParams,
    pub orientation: OrientationParams,
    pub color: ColorParams,
    pub crack: CrackParams,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            frame_interval: 40,
            extraction: ExtractionParams::default(),
            orientation: OrientationParams::default(),
            color: ColorParams::default(),
            crack: CrackParams::default(),
        }
    }
}

/// Ordered frame supplier. An empty frame ends the stream early, matching
/// capture devices that signal exhaustion with a zero-sized buffer.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<ColorImage>;
}

impl<I: Iterator<Item = ColorImage>> FrameSource for I {
    fn next_frame(&mut self) -> Option<ColorImage> {
        self.next()
    }
}

/// Everything produced for one accepted region: the published record plus
/// the audit crops for operators to review.
#[derive(Clone, Debug)]
pub struct InspectionOutcome {
    pub record: InspectionRecord,
    /// Region crops captured by the evaluators that flagged a defect.
    pub snapshots: Vec<(DefectKind, ColorImage)>,
    /// Region crop kept when every evaluator came back clear.
    pub clean_crop: Option<ColorImage>,
}

/// Totals reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_seen: u64,
    pub objects_inspected: u64,
}

/// The inspection pipeline. Generic over the sink so tests and dry runs
/// can observe records without a live store.
pub struct InspectionPipeline<S: TelemetrySink> {
    params: PipelineParams,
    calibration: CalibrationContext,
    orientation: OrientationEvaluator,
    color: ColorEvaluator,
    crack: CrackEvaluator,
    sink: S,
    frames_seen: u64,
    object_count: u64,
    last_dimensions: Option<Dimensions>,
}

impl<S: TelemetrySink> InspectionPipeline<S> {
    pub fn new(mut params: PipelineParams, calibration: CalibrationContext, sink: S) -> Self {
        // An interval of 0 would never sample; treat it as every frame.
        params.frame_interval = params.frame_interval.max(1);
        let orientation = OrientationEvaluator::new(params.orientation.clone());
        let color = ColorEvaluator::new(params.color.clone());
        let crack = CrackEvaluator::new(params.crack.clone());
        Self {
            params,
            calibration,
            orientation,
            color,
            crack,
            sink,
            frames_seen: 0,
            object_count: 0,
            last_dimensions: None,
        }
    }

    #[inline]
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    #[inline]
    pub fn objects_inspected(&self) -> u64 {
        self.object_count
    }

    /// Dimensions of the most recently inspected object.
    #[inline]
    pub fn last_dimensions(&self) -> Option<Dimensions> {
        self.last_dimensions
    }

    /// Ingest one frame. Off-cadence frames return no outcomes; on-cadence
    /// frames yield one outcome per accepted region, each published to the
    /// sink before the next region is inspected.
    pub fn process_frame(
        &mut self,
        frame: &ColorImage,
    ) -> Result<Vec<InspectionOutcome>, PipelineError> {
        self.frames_seen += 1;
        if self.frames_seen % self.params.frame_interval != 0 {
            return Ok(Vec::new());
        }

        let extraction = extract_regions(frame, &self.params.extraction);
        let mut outcomes = Vec::with_capacity(extraction.regions.len());

        for region in &extraction.regions {
            let dims = match dimensions::estimate(&region.contour, &self.calibration) {
                Ok(dims) => dims,
                Err(err) => {
                    warn!("skipping region at {:?}: {err}", region.bounds);
                    continue;
                }
            };

            self.object_count += 1;
            let ctx = RegionContext {
                frame,
                region,
                contours: &extraction.contours,
            };
            let evaluations = [
                self.orientation.evaluate(&ctx),
                self.color.evaluate(&ctx),
                self.crack.evaluate(&ctx),
            ];

            let record = fuse(self.object_count, dims, &evaluations, now_ns());
            info!(
                "object {}: {} ({} mm x {} mm)",
                record.object_number,
                record.classification(),
                record.dimensions.length,
                record.dimensions.width
            );
            self.sink.publish(&record)?;
            self.last_dimensions = Some(dims);

            let clean_crop = record
                .is_defect_free()
                .then(|| frame.crop(&region.bounds));
            let snapshots = evaluations
                .into_iter()
                .filter_map(|e| Some((e.kind, e.snapshot?)))
                .collect();

            outcomes.push(InspectionOutcome {
                record,
                snapshots,
                clean_crop,
            });
        }

        Ok(outcomes)
    }

    /// Drain a frame source. `on_outcome` sees every outcome and may return
    /// `false` to stop the run between frames; an empty frame also ends the
    /// stream.
    pub fn run<F>(
        &mut self,
        mut source: impl FrameSource,
        mut on_outcome: F,
    ) -> Result<RunSummary, PipelineError>
    where
        F: FnMut(&InspectionOutcome) -> bool,
    {
        'frames: while let Some(frame) = source.next_frame() {
            if frame.is_empty() {
                break;
            }
            for outcome in self.process_frame(&frame)? {
                if !on_outcome(&outcome) {
                    break 'frames;
                }
            }
        }

        let summary = RunSummary {
            frames_seen: self.frames_seen,
            objects_inspected: self.object_count,
        };
        info!(
            "run complete: {} frames seen, {} objects inspected",
            summary.frames_seen, summary.objects_inspected
        );
        Ok(summary)
    }
}

fn now_ns() -> Option<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_nanos()).ok())
}
