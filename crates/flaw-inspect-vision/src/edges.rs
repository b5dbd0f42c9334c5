//! Canny-style edge detection: Sobel gradients, direction-quantized
//! non-maximum suppression, and two-threshold hysteresis.
//!
//! Border handling clamps coordinates in the gradient pass and skips the
//! outermost 1-pixel frame in NMS so neighbor lookups stay in bounds.

use flaw_inspect_core::Plane;

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

const TAN_22_5_DEG: f64 = 0.414_213_562_37;

struct Gradients {
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<f64>,
}

fn sobel_gradients(gray: &Plane) -> Gradients {
    let (w, h) = (gray.width, gray.height);
    let mut gx = vec![0i32; w * h];
    let mut gy = vec![0i32; w * h];
    let mut mag = vec![0f64; w * h];

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for (ky, row_x) in SOBEL_X.iter().enumerate() {
                let row_y = &SOBEL_Y[ky];
                for kx in 0..3 {
                    let v = gray.get_clamped(x + kx as i32 - 1, y + ky as i32 - 1) as i32;
                    sum_x += v * row_x[kx];
                    sum_y += v * row_y[kx];
                }
            }
            let idx = y as usize * w + x as usize;
            gx[idx] = sum_x;
            gy[idx] = sum_y;
            mag[idx] = ((sum_x * sum_x + sum_y * sum_y) as f64).sqrt();
        }
    }
    Gradients { gx, gy, mag }
}

/// Detect edges with hysteresis thresholds `low` and `high`.
///
/// A pixel survives NMS when its gradient magnitude is not exceeded by the
/// two neighbors along the quantized gradient direction; survivors above
/// `high` seed the edge map and survivors above `low` are kept when
/// 8-connected to a seed. Returns a 0/255 mask.
pub fn detect_edges(gray: &Plane, low: f64, high: f64) -> Plane {
    let (w, h) = (gray.width, gray.height);
    let mut edges = Plane::new(w, h);
    if w < 3 || h < 3 {
        return edges;
    }

    let grad = sobel_gradients(gray);

    // 0 = suppressed, 1 = weak, 2 = strong
    let mut grade = vec![0u8; w * h];
    let mut seeds = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let mag = grad.mag[idx];
            if mag < low {
                continue;
            }

            let gx = grad.gx[idx];
            let gy = grad.gy[idx];
            let abs_gx = gx.abs() as f64;
            let abs_gy = gy.abs() as f64;
            let same_sign = (gx >= 0 && gy >= 0) || (gx <= 0 && gy <= 0);

            let (n1, n2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (grad.mag[idx - 1], grad.mag[idx + 1])
                } else if same_sign {
                    (grad.mag[idx - w + 1], grad.mag[idx + w - 1])
                } else {
                    (grad.mag[idx - w - 1], grad.mag[idx + w + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (grad.mag[idx - w], grad.mag[idx + w])
            } else if same_sign {
                (grad.mag[idx - w + 1], grad.mag[idx + w - 1])
            } else {
                (grad.mag[idx - w - 1], grad.mag[idx + w + 1])
            };

            // Asymmetric tie-break so a two-pixel plateau from a hard
            // intensity step keeps exactly one ridge pixel.
            if mag < n1 || mag <= n2 {
                continue;
            }

            if mag >= high {
                grade[idx] = 2;
                seeds.push(idx);
            } else {
                grade[idx] = 1;
            }
        }
    }

    // Hysteresis: grow strong edges through connected weak pixels.
    while let Some(idx) = seeds.pop() {
        edges.data[idx] = 255;
        let (x, y) = (idx % w, idx / w);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx < 1 || ny < 1 || nx >= w as i32 - 1 || ny >= h as i32 - 1 {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if grade[nidx] == 1 && edges.data[nidx] == 0 {
                    grade[nidx] = 2;
                    seeds.push(nidx);
                }
            }
        }
    }

    edges
}
