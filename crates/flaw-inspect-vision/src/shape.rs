//! Shape analysis: convex hulls, minimum-area enclosing rectangles, and
//! principal-axis orientation.

use flaw_inspect_core::Contour;
use nalgebra::{Point2, Vector2};

/// Convex hull via Andrew's monotone chain, in counterclockwise order.
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut pts: Vec<Point2<f64>> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let cross = |o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut lower: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Minimum-area enclosing rotated rectangle of a contour.
///
/// Rotating calipers over the convex hull: the optimal rectangle has one
/// side collinear with a hull edge. Returns the four corners in order
/// around the rectangle, or `None` when the contour is degenerate (fewer
/// than three distinct hull points), in which case no measurable rectangle
/// exists.
pub fn min_area_rect(contour: &Contour) -> Option<[Point2<f64>; 4]> {
    let points: Vec<Point2<f64>> = contour
        .iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();
    let hull = convex_hull(&points);
    if hull.len() < 3 {
        return None;
    }

    let mut best_area = f64::INFINITY;
    let mut best: Option<[Point2<f64>; 4]> = None;

    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let edge = b - a;
        let len = edge.norm();
        if len == 0.0 {
            continue;
        }
        let dir = edge / len;
        let perp = Vector2::new(-dir.y, dir.x);

        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let u = dir.dot(&p.coords);
            let v = perp.dot(&p.coords);
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        let area = (u_max - u_min) * (v_max - v_min);
        if area < best_area {
            best_area = area;
            let corner = |u: f64, v: f64| Point2::from(dir * u + perp * v);
            best = Some([
                corner(u_min, v_min),
                corner(u_max, v_min),
                corner(u_max, v_max),
                corner(u_min, v_max),
            ]);
        }
    }

    best
}

/// Angle of the dominant principal axis of the contour's point set,
/// relative to the horizontal, in radians.
///
/// Closed-form eigen-decomposition of the 2x2 point covariance; the result
/// lies in (-pi/2, pi/2], which keeps the value deterministic (an explicit
/// eigenvector would carry an arbitrary sign).
pub fn principal_axis_angle(contour: &Contour) -> f64 {
    if contour.len() < 2 {
        return 0.0;
    }
    let n = contour.len() as f64;
    let mean_x = contour.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let mean_y = contour.iter().map(|p| p.y as f64).sum::<f64>() / n;

    let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
    for p in contour {
        let dx = p.x as f64 - mean_x;
        let dy = p.y as f64 - mean_y;
        cxx += dx * dx;
        cxy += dx * dy;
        cyy += dy * dy;
    }

    0.5 * (2.0 * cxy).atan2(cxx - cyy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contour(points: &[(i32, i32)]) -> Contour {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn min_area_rect_recovers_axis_aligned_rectangle() {
        let c = contour(&[(0, 0), (10, 0), (10, 5), (0, 5)]);
        let corners = min_area_rect(&c).expect("rect");

        let e1 = (corners[1] - corners[0]).norm();
        let e2 = (corners[2] - corners[1]).norm();
        let (long, short) = if e1 > e2 { (e1, e2) } else { (e2, e1) };
        assert_relative_eq!(long, 10.0, epsilon = 1e-9);
        assert_relative_eq!(short, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn min_area_rect_handles_rotated_square() {
        // Square rotated 45 degrees: diamond with diagonals of length 10.
        let c = contour(&[(5, 0), (10, 5), (5, 10), (0, 5)]);
        let corners = min_area_rect(&c).expect("rect");
        let e1 = (corners[1] - corners[0]).norm();
        let e2 = (corners[2] - corners[1]).norm();
        let side = 50f64.sqrt();
        assert_relative_eq!(e1, side, epsilon = 1e-9);
        assert_relative_eq!(e2, side, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_contours_have_no_rect() {
        assert!(min_area_rect(&contour(&[(1, 1)])).is_none());
        assert!(min_area_rect(&contour(&[(0, 0), (5, 0), (9, 0)])).is_none());
    }

    #[test]
    fn principal_axis_of_horizontal_cloud_is_flat() {
        let c = contour(&[(0, 0), (5, 1), (10, 0), (15, 1), (20, 0)]);
        assert!(principal_axis_angle(&c).abs() < 0.1);
    }

    #[test]
    fn principal_axis_of_diagonal_cloud_is_tilted() {
        let c = contour(&[(0, 0), (5, 5), (10, 10), (15, 15)]);
        assert_relative_eq!(
            principal_axis_angle(&c),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-9
        );
    }
}
