//! Telemetry serialization and delivery for inspection records.
//!
//! [`Point`] builds a wire-exact InfluxDB line-protocol record;
//! [`InfluxClient`] provisions the target database and posts encoded
//! points over blocking HTTP. No retries: a failed write surfaces the
//! transport error to the caller.

mod point;
mod publisher;

pub use point::{EncodeError, FieldValue, Point};
pub use publisher::{InfluxClient, InfluxConfig, TelemetryError};
