//! Core types and utilities for conveyor flaw inspection.
//!
//! This crate is intentionally small. It holds the in-memory frame buffer
//! types, pixel geometry, the pixel-to-millimeter calibration engine, and
//! decimal rounding. It does *not* depend on any concrete vision backend.

mod calibrate;
mod geometry;
mod image;
mod logger;
mod round;

pub use calibrate::{calibrate, CalibrationContext, DEFAULT_MM_PER_PIXEL};
pub use geometry::{bounding_rect, contour_area, Contour, Rect};
pub use image::{ColorImage, ColorImageView, Plane};
pub use round::round_half_up;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
