use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closed pixel boundary of one foreground component, ordered along the
/// border.
pub type Contour = Vec<Point2<i32>>;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Enclosed contour area via the shoelace formula.
///
/// Matches the usual convention for traced pixel boundaries: a single point
/// or a straight run of pixels has zero area.
pub fn contour_area(contour: &Contour) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in contour.iter().enumerate() {
        let q = &contour[(i + 1) % contour.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (twice_area.abs() as f64) / 2.0
}

/// Tight axis-aligned bounding box of a contour.
pub fn bounding_rect(contour: &Contour) -> Rect {
    let Some(first) = contour.first() else {
        return Rect::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in contour {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_contour(w: i32, h: i32) -> Contour {
        vec![
            Point2::new(0, 0),
            Point2::new(w, 0),
            Point2::new(w, h),
            Point2::new(0, h),
        ]
    }

    #[test]
    fn shoelace_area_of_rectangle() {
        assert_eq!(contour_area(&rect_contour(10, 5)), 50.0);
    }

    #[test]
    fn degenerate_contours_have_zero_area() {
        assert_eq!(contour_area(&vec![Point2::new(3, 4)]), 0.0);
        assert_eq!(contour_area(&vec![Point2::new(0, 0), Point2::new(9, 0)]), 0.0);
    }

    #[test]
    fn bounding_rect_is_tight() {
        let r = bounding_rect(&rect_contour(10, 5));
        assert_eq!(
            r,
            Rect {
                x: 0,
                y: 0,
                width: 11,
                height: 6
            }
        );
    }
}
