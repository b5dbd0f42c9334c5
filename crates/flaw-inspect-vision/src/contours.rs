//! Contour extraction from binary masks.
//!
//! Components are discovered in row-major scan order and the outer boundary
//! of each 8-connected foreground component is traced with Moore-neighbor
//! following, so every returned contour is an ordered closed pixel boundary.
//! Hole boundaries are not reported (full outer retrieval).

use flaw_inspect_core::{Contour, Plane};
use nalgebra::Point2;

// Moore neighborhood in clockwise order.
const DIRS: [(i32, i32); 8] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
];

#[inline]
fn dir_index(dx: i32, dy: i32) -> usize {
    DIRS.iter().position(|&d| d == (dx, dy)).unwrap_or(6)
}

#[inline]
fn is_fg(mask: &Plane, x: i32, y: i32) -> bool {
    x >= 0
        && y >= 0
        && (x as usize) < mask.width
        && (y as usize) < mask.height
        && mask.get(x as usize, y as usize) > 0
}

/// Extract the outer boundary of every foreground component.
pub fn find_contours(mask: &Plane) -> Vec<Contour> {
    let mut visited = vec![false; mask.width * mask.height];
    let mut contours = Vec::new();

    for y in 0..mask.height {
        for x in 0..mask.width {
            if mask.get(x, y) == 0 || visited[y * mask.width + x] {
                continue;
            }
            contours.push(trace_boundary(mask, x as i32, y as i32));
            flood_mark(mask, x, y, &mut visited);
        }
    }
    contours
}

/// Moore-neighbor tracing from the component's first scan-order pixel.
/// Terminates with Jacob's criterion: re-entering the start pixel with the
/// same next move as the initial one.
fn trace_boundary(mask: &Plane, sx: i32, sy: i32) -> Contour {
    let start = Point2::new(sx, sy);
    let mut contour = vec![start];

    // The pixel west of the scan-order start is always background.
    let mut backtrack = Point2::new(sx - 1, sy);
    let mut current = start;
    let mut first_next: Option<Point2<i32>> = None;

    let max_steps = 4 * mask.width * mask.height + 8;
    for _ in 0..max_steps {
        let db = dir_index(backtrack.x - current.x, backtrack.y - current.y);

        let mut next = None;
        let mut prev = backtrack;
        for i in 1..=8 {
            let (dx, dy) = DIRS[(db + i) % 8];
            let q = Point2::new(current.x + dx, current.y + dy);
            if is_fg(mask, q.x, q.y) {
                next = Some((q, prev));
                break;
            }
            prev = q;
        }

        let Some((q, new_backtrack)) = next else {
            break; // isolated pixel
        };
        if current == start {
            match first_next {
                Some(f) if f == q => break,
                Some(_) => {}
                None => first_next = Some(q),
            }
        }
        backtrack = new_backtrack;
        current = q;
        contour.push(current);
    }

    contour
}

/// Mark every pixel of the 8-connected component containing `(x, y)`.
fn flood_mark(mask: &Plane, x: usize, y: usize, visited: &mut [bool]) {
    let mut stack = vec![(x as i32, y as i32)];
    visited[y * mask.width + x] = true;
    while let Some((cx, cy)) = stack.pop() {
        for &(dx, dy) in &DIRS {
            let (nx, ny) = (cx + dx, cy + dy);
            if !is_fg(mask, nx, ny) {
                continue;
            }
            let idx = ny as usize * mask.width + nx as usize;
            if !visited[idx] {
                visited[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
}
