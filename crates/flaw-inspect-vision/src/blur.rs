//! Normalized box blur.

use flaw_inspect_core::Plane;

/// Mean filter with a square `size` x `size` window (odd size, border
/// replicate). Used to suppress sensor noise before edge detection.
pub fn box_blur(gray: &Plane, size: usize) -> Plane {
    debug_assert!(size % 2 == 1, "blur kernel size must be odd");
    let r = (size as i32 - 1) / 2;
    let norm = (size * size) as u32;

    let mut out = Plane::new(gray.width, gray.height);
    for y in 0..gray.height as i32 {
        for x in 0..gray.width as i32 {
            let mut sum = 0u32;
            for dy in -r..=r {
                for dx in -r..=r {
                    sum += gray.get_clamped(x + dx, y + dy) as u32;
                }
            }
            out.set(x as usize, y as usize, ((sum + norm / 2) / norm) as u8);
        }
    }
    out
}
