//! Midpoint circle rasterization
//!
//! Walks one octant of the circle from (radius, 0) toward the diagonal and
//! mirrors every step into the other seven octants. Integer-only, O(radius).

use super::grid::{Grid, PlaneId};
use crate::{GridPoint, point};

/// One octant of the outline, relative to the center: (x, y) with x >= y >= 0.
///
/// Decision variable starts at `1 - radius`; each step increments y and
/// decrements x whenever the midpoint falls outside the circle.
pub fn octant(radius: u32) -> Vec<GridPoint> {
    let mut x = radius as i32;
    let mut y = 0i32;
    let mut error = 1 - x;
    let mut out = Vec::with_capacity(radius as usize + 1);

    while x >= y {
        out.push(point(x, y));
        y += 1;
        if error < 0 {
            error += 2 * y + 1;
        } else {
            x -= 1;
            error += 2 * (y - x + 1);
        }
    }
    out
}

/// The eight reflections of an octant offset around `center`
#[inline]
fn reflections(center: GridPoint, o: GridPoint) -> [GridPoint; 8] {
    [
        point(center.x + o.x, center.y + o.y),
        point(center.x + o.y, center.y + o.x),
        point(center.x - o.x, center.y + o.y),
        point(center.x - o.y, center.y + o.x),
        point(center.x - o.x, center.y - o.y),
        point(center.x - o.y, center.y - o.x),
        point(center.x + o.x, center.y - o.y),
        point(center.x + o.y, center.y - o.x),
    ]
}

/// Every point the rasterizer emits, in emission order, with no bounds check.
///
/// Points on the axes and diagonals appear more than once; radius 0 yields
/// the center eight times.
pub fn outline_points(center: GridPoint, radius: u32) -> impl Iterator<Item = GridPoint> {
    octant(radius)
        .into_iter()
        .flat_map(move |o| reflections(center, o))
}

/// Distinct outline points, sorted (row-major)
pub fn circle_outline(center: GridPoint, radius: u32) -> Vec<GridPoint> {
    let mut points: Vec<GridPoint> = outline_points(center, radius).collect();
    points.sort_by_key(|p| (p.y, p.x));
    points.dedup();
    points
}

/// Rasterize a circle outline onto `plane`, calling `paint` for each point
/// inside `grid`. Off-grid points are dropped here and never reach `paint`.
///
/// Returns the number of `paint` calls.
pub fn rasterize_circle_outline<F>(
    grid: &Grid,
    center: GridPoint,
    radius: u32,
    plane: PlaneId,
    mut paint: F,
) -> usize
where
    F: FnMut(GridPoint, PlaneId),
{
    let mut painted = 0;
    for p in outline_points(center, radius) {
        if grid.contains(p) {
            paint(p, plane);
            painted += 1;
        }
    }
    painted
}
