//! Record-to-telemetry mapping and delivery sinks.

use log::info;

use flaw_inspect_telemetry::{InfluxClient, InfluxConfig, Point, TelemetryError};

use crate::fuse::InspectionRecord;

/// Measurement name for inspection records.
const MEASUREMENT: &str = "Defect";

/// Map one inspection record to a line-protocol point. Defect flags are
/// encoded as 0/1 integer fields, dimensions as floats; the capture
/// timestamp is attached when known.
pub fn record_to_point(record: &InspectionRecord) -> Point {
    let mut point = Point::new(MEASUREMENT)
        .field("objectNumber", record.object_number as i64)
        .field("crackDefect", record.crack_defect)
        .field("orientationDefect", record.orientation_defect)
        .field("colorDefect", record.color_defect)
        .field("lengthMm", record.dimensions.length)
        .field("widthMm", record.dimensions.width);
    if let Some(ts) = record.timestamp_ns {
        point = point.timestamp(ts);
    }
    point
}

/// Destination for per-object inspection records. The pipeline publishes
/// exactly one record per accepted object.
pub trait TelemetrySink {
    fn publish(&mut self, record: &InspectionRecord) -> Result<(), TelemetryError>;
}

/// Sink backed by a blocking InfluxDB client.
pub struct InfluxSink {
    client: InfluxClient,
}

impl InfluxSink {
    pub fn new(client: InfluxClient) -> Self {
        Self { client }
    }

    /// Connect the sink and ensure the target database exists.
    pub fn connect(config: InfluxConfig) -> Result<Self, TelemetryError> {
        let client = InfluxClient::new(config);
        client.create_database()?;
        Ok(Self { client })
    }
}

impl TelemetrySink for InfluxSink {
    fn publish(&mut self, record: &InspectionRecord) -> Result<(), TelemetryError> {
        self.client.write_point(&record_to_point(record))
    }
}

/// Dry-run sink: logs each encoded record instead of delivering it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn publish(&mut self, record: &InspectionRecord) -> Result<(), TelemetryError> {
        let line = record_to_point(record).encode()?;
        info!("telemetry (dry run): {line}");
        Ok(())
    }
}
