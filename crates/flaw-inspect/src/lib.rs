//! Product flaw inspection for objects moving across a fixed field of view.
//!
//! The pipeline samples frames at a fixed cadence, extracts candidate
//! object regions, measures their physical dimensions against a one-shot
//! pixel-to-millimeter calibration, runs three independent defect
//! evaluators (orientation, surface color, surface cracking), fuses the
//! flags into one classification, and ships a line-protocol record per
//! inspected object to a time-series store.
//!
//! ## Quickstart
//!
//! ```no_run
//! use flaw_inspect::{InfluxSink, InspectionPipeline, PipelineParams};
//! use flaw_inspect_core::calibrate;
//! use flaw_inspect_telemetry::{InfluxClient, InfluxConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InfluxClient::new(InfluxConfig::default());
//! client.create_database()?;
//!
//! let calibration = calibrate(60.0, 400.0, 640, 480);
//! let mut pipeline = InspectionPipeline::new(
//!     PipelineParams::default(),
//!     calibration,
//!     InfluxSink::new(client),
//! );
//!
//! let frame = flaw_inspect_core::ColorImage::new(640, 480);
//! let outcomes = pipeline.process_frame(&frame)?;
//! println!("inspected {} objects", outcomes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`regions`]: foreground region extraction and the candidate gate.
//! - [`dimensions`]: oriented length/width estimation in millimeters.
//! - [`evaluate`]: the three defect evaluators behind one trait.
//! - [`fuse`]: classification fusion into an [`InspectionRecord`].
//! - [`telemetry`]: the delivery seam ([`TelemetrySink`]) and record
//!   serialization.
//! - [`pipeline`]: the frame-sampling orchestrator.

pub mod dimensions;
pub mod evaluate;
pub mod fuse;
pub mod pipeline;
pub mod regions;
pub mod telemetry;

pub use dimensions::{Dimensions, GeometryError};
pub use evaluate::{
    ColorEvaluator, ColorParams, CrackEvaluator, CrackParams, DefectEvaluator, DefectKind,
    Evaluation, OrientationEvaluator, OrientationParams, RegionContext,
};
pub use fuse::{fuse, InspectionRecord};
pub use pipeline::{
    FrameSource, InspectionOutcome, InspectionPipeline, PipelineError, PipelineParams, RunSummary,
};
pub use regions::{extract_regions, CandidateRegion, ExtractionParams, RegionExtraction};
pub use telemetry::{record_to_point, InfluxSink, LogSink, TelemetrySink};
