//! Binary morphology with arbitrary structuring elements.

use flaw_inspect_core::Plane;

/// Structuring element: a set of `(dx, dy)` offsets around the anchor.
#[derive(Clone, Debug)]
pub struct Kernel {
    offsets: Vec<(i32, i32)>,
}

impl Kernel {
    #[inline]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }
}

/// Filled elliptical structuring element of the given odd size, matching
/// the OpenCV row-scan construction (a 5x5 ellipse has full middle rows and
/// a single center pixel on the top and bottom rows).
pub fn ellipse_kernel(size: usize) -> Kernel {
    debug_assert!(size % 2 == 1, "structuring element size must be odd");
    let r = (size as i32 - 1) / 2;
    let inv_r2 = if r > 0 { 1.0 / (r as f64 * r as f64) } else { 0.0 };

    let mut offsets = Vec::new();
    for dy in -r..=r {
        let dx_max = if dy.abs() == r {
            0
        } else {
            let dy2 = dy as f64 * dy as f64;
            (r as f64 * (1.0 - dy2 * inv_r2).max(0.0).sqrt() + 0.5) as i32
        };
        for dx in -dx_max..=dx_max {
            offsets.push((dx, dy));
        }
    }
    Kernel { offsets }
}

fn morph(mask: &Plane, kernel: &Kernel, take_min: bool) -> Plane {
    let mut out = Plane::new(mask.width, mask.height);
    for y in 0..mask.height as i32 {
        for x in 0..mask.width as i32 {
            let mut acc = if take_min { 255u8 } else { 0u8 };
            for &(dx, dy) in kernel.offsets() {
                let v = mask.get_clamped(x + dx, y + dy);
                acc = if take_min { acc.min(v) } else { acc.max(v) };
            }
            out.set(x as usize, y as usize, acc);
        }
    }
    out
}

/// Minimum filter over the structuring element (shrinks foreground).
pub fn erode(mask: &Plane, kernel: &Kernel) -> Plane {
    morph(mask, kernel, true)
}

/// Maximum filter over the structuring element (grows foreground).
pub fn dilate(mask: &Plane, kernel: &Kernel) -> Plane {
    morph(mask, kernel, false)
}

/// Erode then dilate: removes foreground speckle.
pub fn morph_open(mask: &Plane, kernel: &Kernel) -> Plane {
    dilate(&erode(mask, kernel), kernel)
}

/// Dilate then erode: fills small foreground holes.
pub fn morph_close(mask: &Plane, kernel: &Kernel) -> Plane {
    erode(&dilate(mask, kernel), kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_5x5_matches_reference_shape() {
        let kernel = ellipse_kernel(5);
        let mut grid = [[0u8; 5]; 5];
        for &(dx, dy) in kernel.offsets() {
            grid[(dy + 2) as usize][(dx + 2) as usize] = 1;
        }
        let expected = [
            [0, 0, 1, 0, 0],
            [1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1],
            [0, 0, 1, 0, 0],
        ];
        assert_eq!(grid, expected);
    }

    #[test]
    fn open_removes_isolated_pixel() {
        let mut mask = Plane::new(9, 9);
        mask.set(4, 4, 255);
        let opened = morph_open(&mask, &ellipse_kernel(5));
        assert!(opened.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn close_fills_small_hole() {
        let mut mask = Plane::new(11, 11);
        for y in 2..9 {
            for x in 2..9 {
                mask.set(x, y, 255);
            }
        }
        mask.set(5, 5, 0);
        let closed = morph_close(&mask, &ellipse_kernel(5));
        assert_eq!(closed.get(5, 5), 255);
    }
}
