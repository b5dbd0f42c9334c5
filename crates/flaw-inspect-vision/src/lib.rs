//! Pure-Rust vision primitives over in-memory frame buffers.
//!
//! Everything here is a deterministic function of its inputs: color-space
//! conversion, range thresholding, elliptical morphology, contour
//! extraction, shape analysis, blurring, and edge detection. None of these
//! operations fail on a well-formed frame; an empty result (no mask pixels,
//! no contours) is valid negative evidence for the callers.

mod blur;
mod color;
mod contours;
mod edges;
mod morphology;
mod shape;
mod threshold;

pub use blur::box_blur;
pub use color::{brighten, rgb_to_gray, rgb_to_hsv, HsvImage};
pub use contours::find_contours;
pub use edges::detect_edges;
pub use morphology::{dilate, ellipse_kernel, erode, morph_close, morph_open, Kernel};
pub use shape::{convex_hull, min_area_rect, principal_axis_angle};
pub use threshold::in_range;
