//! Line-protocol point builder.
//!
//! Assembly format: `measurement[,tag=val,...] field=val[,...] [timestamp]`.
//! Tags are comma-prefixed straight after the measurement with no space, a
//! single space separates tags from fields, and the optional timestamp is
//! space-separated after the fields.

use std::fmt::Write;

/// Preconditions a point must satisfy before it may be sent.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("no measurement set on the point")]
    MissingMeasurement,
    #[error("no fields added to the point")]
    NoFields,
}

/// A field value: strings are double-quoted on the wire, numerics are not.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Integer(v as i64)
    }
}

/// One line-protocol record under construction. Tags and fields keep their
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct Point {
    measurement: Option<String>,
    tags: Vec<(String, String)>,
    fields: Vec<(String, FieldValue)>,
    timestamp: Option<i64>,
}

/// Escape `,` and ` ` (and `=` unless encoding a measurement name) with a
/// backslash prefix.
fn escape(raw: &str, measurement: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            ',' | ' ' => {
                out.push('\\');
                out.push(c);
            }
            '=' if !measurement => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

impl Point {
    pub fn new(measurement: &str) -> Self {
        Self {
            measurement: Some(escape(measurement, true)),
            ..Self::default()
        }
    }

    /// Append a tag. Tag values go on the wire unquoted.
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((escape(key, false), escape(value, false)));
        self
    }

    /// Append a field.
    pub fn field(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((escape(key, false), value.into()));
        self
    }

    /// Set the optional integer timestamp.
    pub fn timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Render the point as a line-protocol record.
    ///
    /// Fails when no measurement was set or no fields were added; these are
    /// independent checks and an invalid point must not be sent.
    pub fn encode(&self) -> Result<String, EncodeError> {
        let measurement = self
            .measurement
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(EncodeError::MissingMeasurement)?;
        if self.fields.is_empty() {
            return Err(EncodeError::NoFields);
        }

        let mut line = String::from(measurement);
        for (key, value) in &self.tags {
            let _ = write!(line, ",{key}={value}");
        }

        for (i, (key, value)) in self.fields.iter().enumerate() {
            line.push(if i == 0 { ' ' } else { ',' });
            match value {
                FieldValue::String(s) => {
                    let _ = write!(line, "{key}=\"{}\"", escape(s, false));
                }
                FieldValue::Integer(v) => {
                    let _ = write!(line, "{key}={v}");
                }
                FieldValue::Float(v) => {
                    let _ = write!(line, "{key}={v}");
                }
            }
        }

        if let Some(ts) = self.timestamp {
            let _ = write!(line, " {ts}");
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reference_record() {
        let line = Point::new("temp")
            .tag("unit", "c")
            .field("value", 25i64)
            .encode()
            .expect("encode");
        assert_eq!(line, "temp,unit=c value=25");
    }

    #[test]
    fn string_field_values_are_escaped_then_quoted() {
        let line = Point::new("m").field("note", "a,b").encode().expect("encode");
        assert_eq!(line, r#"m note="a\,b""#);
    }

    #[test]
    fn measurement_escapes_comma_and_space_but_not_equals() {
        let line = Point::new("my meas,urement=x")
            .field("v", 1i64)
            .encode()
            .expect("encode");
        assert_eq!(line, r"my\ meas\,urement=x v=1");
    }

    #[test]
    fn tag_keys_and_values_escape_equals_too() {
        let line = Point::new("m")
            .tag("k=1", "v 2,3")
            .field("f", 1i64)
            .encode()
            .expect("encode");
        assert_eq!(line, r"m,k\=1=v\ 2\,3 f=1");
    }

    #[test]
    fn timestamp_is_space_separated_after_fields() {
        let line = Point::new("m")
            .field("f", 1i64)
            .timestamp(1_465_839_830_100_400_200)
            .encode()
            .expect("encode");
        assert_eq!(line, "m f=1 1465839830100400200");
    }

    #[test]
    fn zero_fields_is_invalid_even_with_tags() {
        let err = Point::new("m").tag("unit", "c").encode().unwrap_err();
        assert_eq!(err, EncodeError::NoFields);
    }

    #[test]
    fn missing_measurement_is_invalid() {
        let err = Point::default().field("f", 1i64).encode().unwrap_err();
        assert_eq!(err, EncodeError::MissingMeasurement);
    }

    #[test]
    fn float_fields_use_standard_decimal_formatting() {
        let line = Point::new("m").field("w", 50.25f64).encode().expect("encode");
        assert_eq!(line, "m w=50.25");
    }
}
