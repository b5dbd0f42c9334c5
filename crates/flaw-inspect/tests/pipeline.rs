//! End-to-end pipeline tests over synthetic belt frames.

use std::cell::RefCell;
use std::rc::Rc;

use flaw_inspect::{InspectionPipeline, InspectionRecord, PipelineError, PipelineParams, TelemetrySink};
use flaw_inspect_core::{CalibrationContext, ColorImage, Rect};
use flaw_inspect_telemetry::TelemetryError;

/// Sink that records everything published, shared with the test body.
#[derive(Clone, Default)]
struct MemorySink {
    records: Rc<RefCell<Vec<InspectionRecord>>>,
}

impl TelemetrySink for MemorySink {
    fn publish(&mut self, record: &InspectionRecord) -> Result<(), TelemetryError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

/// Sink that rejects every record, as an unreachable store would.
struct FailingSink;

impl TelemetrySink for FailingSink {
    fn publish(&mut self, _record: &InspectionRecord) -> Result<(), TelemetryError> {
        Err(TelemetryError::Status {
            status: 503,
            body: "store unavailable".to_owned(),
        })
    }
}

/// A dark 240x160 belt frame carrying one bright 120x90 object.
fn object_frame() -> ColorImage {
    let mut frame = ColorImage::new(240, 160);
    let bounds = Rect {
        x: 40,
        y: 30,
        width: 120,
        height: 90,
    };
    for y in bounds.y..bounds.y + bounds.height as i32 {
        for x in bounds.x..bounds.x + bounds.width as i32 {
            frame.set_pixel(x as usize, y as usize, [200, 200, 200]);
        }
    }
    frame
}

fn params_every_frame() -> PipelineParams {
    PipelineParams {
        frame_interval: 1,
        ..PipelineParams::default()
    }
}

#[test]
fn clean_object_is_measured_and_published() {
    let sink = MemorySink::default();
    let records = sink.records.clone();
    let mut pipeline = InspectionPipeline::new(
        params_every_frame(),
        CalibrationContext::from_scale(1.0),
        sink,
    );

    let outcomes = pipeline.process_frame(&object_frame()).expect("frame");
    assert_eq!(outcomes.len(), 1);

    let outcome = &outcomes[0];
    assert!(outcome.record.is_defect_free());
    assert_eq!(outcome.record.classification(), "No Defect");
    assert!(outcome.snapshots.is_empty());
    assert!(outcome.clean_crop.is_some());

    // 120x90 px at 1 mm/px with the x10 normalization, minus the corner
    // rounding the morphological open introduces.
    let dims = outcome.record.dimensions;
    assert!(dims.length >= dims.width);
    assert!((1150.0..=1210.0).contains(&dims.length), "length {}", dims.length);
    assert!((850.0..=910.0).contains(&dims.width), "width {}", dims.width);

    let published = records.borrow();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].object_number, 1);
    assert!(published[0].timestamp_ns.is_some());
}

#[test]
fn sampling_cadence_skips_intermediate_frames() {
    let sink = MemorySink::default();
    let records = sink.records.clone();
    let mut pipeline = InspectionPipeline::new(
        PipelineParams::default(), // every 40th frame
        CalibrationContext::from_scale(1.0),
        sink,
    );

    let frames = (0..80).map(|_| object_frame());
    let summary = pipeline.run(frames, |_| true).expect("run");

    assert_eq!(summary.frames_seen, 80);
    assert_eq!(summary.objects_inspected, 2);

    let published = records.borrow();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].object_number, 1);
    assert_eq!(published[1].object_number, 2);
}

#[test]
fn callback_can_stop_the_run() {
    let sink = MemorySink::default();
    let mut pipeline = InspectionPipeline::new(
        params_every_frame(),
        CalibrationContext::from_scale(1.0),
        sink,
    );

    let frames = (0..10).map(|_| object_frame());
    let summary = pipeline.run(frames, |_| false).expect("run");

    // The first frame produced an outcome and the callback halted there.
    assert_eq!(summary.frames_seen, 1);
    assert_eq!(summary.objects_inspected, 1);
}

#[test]
fn failed_publish_aborts_the_run() {
    let mut pipeline = InspectionPipeline::new(
        params_every_frame(),
        CalibrationContext::from_scale(1.0),
        FailingSink,
    );

    let err = pipeline.process_frame(&object_frame()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Telemetry(TelemetryError::Status { status: 503, .. })
    ));
}

#[test]
fn empty_regions_publish_nothing() {
    let sink = MemorySink::default();
    let records = sink.records.clone();
    let mut pipeline = InspectionPipeline::new(
        params_every_frame(),
        CalibrationContext::from_scale(1.0),
        sink,
    );

    let dark = ColorImage::new(240, 160);
    let outcomes = pipeline.process_frame(&dark).expect("frame");
    assert!(outcomes.is_empty());
    assert!(records.borrow().is_empty());
}
