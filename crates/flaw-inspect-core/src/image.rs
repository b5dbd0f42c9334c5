use crate::Rect;

/// Borrowed view of an interleaved RGB frame.
#[derive(Clone, Copy, Debug)]
pub struct ColorImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB, len = w*h*3
}

/// Owned interleaved RGB frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Owned single-channel buffer: grayscale images, binary masks, and the
/// individual channels of an HSV decomposition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ColorImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// End-of-stream sentinel: a frame with no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn view(&self) -> ColorImageView<'_> {
        ColorImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Copy of the frame restricted to `rect`, clamped to the frame bounds.
    /// Used for per-object audit snapshots.
    pub fn crop(&self, rect: &Rect) -> ColorImage {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = ((rect.x + rect.width as i32).max(0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height as i32).max(0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return ColorImage::default();
        }

        let mut out = ColorImage::new(x1 - x0, y1 - y0);
        for y in y0..y1 {
            let src = (y * self.width + x0) * 3..(y * self.width + x1) * 3;
            let dst = ((y - y0) * out.width) * 3..((y - y0) * out.width + out.width) * 3;
            out.data[dst].copy_from_slice(&self.data[src]);
        }
        out
    }
}

impl Plane {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    /// Value at clamped coordinates (border replicate).
    #[inline]
    pub fn get_clamped(&self, x: i32, y: i32) -> u8 {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_clamps_to_frame_bounds() {
        let mut img = ColorImage::new(4, 4);
        img.set_pixel(3, 3, [7, 8, 9]);

        let crop = img.crop(&Rect {
            x: 2,
            y: 2,
            width: 10,
            height: 10,
        });
        assert_eq!(crop.width, 2);
        assert_eq!(crop.height, 2);
        assert_eq!(crop.pixel(1, 1), [7, 8, 9]);
    }

    #[test]
    fn crop_outside_frame_is_empty() {
        let img = ColorImage::new(4, 4);
        let crop = img.crop(&Rect {
            x: 10,
            y: 10,
            width: 2,
            height: 2,
        });
        assert!(crop.is_empty());
    }
}
