//! Bresenham line walk between two beads

use crate::{GridPoint, point};

/// All beads on the line from `from` to `to`, both endpoints included.
///
/// Identical endpoints give a single point.
pub fn line_points(from: GridPoint, to: GridPoint) -> Vec<GridPoint> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    let mut out = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        out.push(point(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    out
}
