//! Color-space conversion and brightness adjustment.

use flaw_inspect_core::{ColorImage, Plane};

/// Interleaved HSV buffer with the OpenCV 8-bit convention:
/// H in [0, 180), S and V in [0, 255].
#[derive(Clone, Debug, Default)]
pub struct HsvImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // row-major HSV, len = w*h*3
}

impl HsvImage {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Convert RGB to single-channel luma (ITU-R BT.601 weights).
pub fn rgb_to_gray(frame: &ColorImage) -> Plane {
    let mut out = Plane::new(frame.width, frame.height);
    for (dst, rgb) in out.data.iter_mut().zip(frame.data.chunks_exact(3)) {
        let luma = 0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32;
        *dst = (luma + 0.5) as u8;
    }
    out
}

/// Convert RGB to HSV with H scaled into [0, 180).
pub fn rgb_to_hsv(frame: &ColorImage) -> HsvImage {
    let mut data = Vec::with_capacity(frame.data.len());
    for rgb in frame.data.chunks_exact(3) {
        let (r, g, b) = (rgb[0] as f32, rgb[1] as f32, rgb[2] as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };
        let h_deg = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

        data.push((h_deg / 2.0 + 0.5) as u8 % 180);
        data.push((s + 0.5) as u8);
        data.push((v + 0.5) as u8);
    }
    HsvImage {
        width: frame.width,
        height: frame.height,
        data,
    }
}

/// Add a constant to every channel with saturation.
pub fn brighten(frame: &ColorImage, delta: u8) -> ColorImage {
    ColorImage {
        width: frame.width,
        height: frame.height,
        data: frame.data.iter().map(|&v| v.saturating_add(delta)).collect(),
    }
}
