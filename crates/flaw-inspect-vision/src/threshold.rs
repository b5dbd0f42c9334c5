//! Range thresholding of HSV frames.

use flaw_inspect_core::Plane;

use crate::color::HsvImage;

/// Binary mask of pixels whose H, S and V all lie within the inclusive
/// `[low, high]` window. Foreground is 255, background 0.
pub fn in_range(hsv: &HsvImage, low: [u8; 3], high: [u8; 3]) -> Plane {
    let mut mask = Plane::new(hsv.width, hsv.height);
    for (dst, px) in mask.data.iter_mut().zip(hsv.data.chunks_exact(3)) {
        let inside = (0..3).all(|c| px[c] >= low[c] && px[c] <= high[c]);
        if inside {
            *dst = 255;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let hsv = HsvImage {
            width: 3,
            height: 1,
            data: vec![0, 0, 47, 0, 0, 46, 179, 255, 255],
        };
        let mask = in_range(&hsv, [0, 0, 47], [179, 255, 255]);
        assert_eq!(mask.data, vec![255, 0, 255]);
    }
}
