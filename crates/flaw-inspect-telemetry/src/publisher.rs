//! Blocking HTTP delivery to an InfluxDB-compatible store.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::point::{EncodeError, Point};

/// Delivery failures surfaced to the pipeline. No retry is attempted here;
/// the caller decides whether a failed write aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Connection parameters for the time-series store.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InfluxConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8086,
            database: "Defect".to_owned(),
        }
    }
}

impl InfluxConfig {
    fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Synchronous client over the store's HTTP API.
pub struct InfluxClient {
    config: InfluxConfig,
    http: reqwest::blocking::Client,
}

impl InfluxClient {
    pub fn new(config: InfluxConfig) -> Self {
        Self {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    #[inline]
    pub fn database(&self) -> &str {
        &self.config.database
    }

    fn check(&self, response: reqwest::blocking::Response) -> Result<(), TelemetryError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Create the configured database. Creating one that already exists is
    /// not an error at this layer.
    pub fn create_database(&self) -> Result<(), TelemetryError> {
        let url = format!("{}/query", self.config.base_url());
        debug!("ensuring database {:?}", self.config.database);
        // The store reads `q` from a form-encoded body, not a raw one.
        let response = self
            .http
            .post(&url)
            .form(&[("q", create_statement(&self.config.database))])
            .send()?;
        self.check(response)
    }

    /// Encode and write one point to the configured database.
    pub fn write_point(&self, point: &Point) -> Result<(), TelemetryError> {
        let line = point.encode()?;
        self.write_raw(line)
    }

    /// Write an already-encoded line-protocol record.
    pub fn write_raw(&self, line: String) -> Result<(), TelemetryError> {
        let url = format!("{}/write?db={}", self.config.base_url(), self.config.database);
        debug!("writing point: {line}");
        let response = self.http.post(&url).body(line).send()?;
        self.check(response)
    }
}

fn create_statement(database: &str) -> String {
    format!("CREATE DATABASE \"{database}\"")
}
