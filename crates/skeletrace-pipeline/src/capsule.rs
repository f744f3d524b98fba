//! Signed distance to weighted capsules.
//!
//! A capsule is the convex hull of two circles: the swept area of a
//! stroke between two skeleton nodes whose weights give the radii at
//! each end. [`capsule_distance`] is the building block for rendering a
//! skeleton graph back into area, and [`coverage_ratio`] uses it to
//! measure how much of the original foreground the graph explains.

use crate::binarize::BinaryMask;
use crate::graph::SkeletonGraph;
use crate::types::Point;

/// Signed distance from `p` to the capsule spanning `p1` (radius `r1`)
/// and `p2` (radius `r2`).
///
/// Negative inside, zero on the boundary, positive outside. The
/// projection accounts for the radius taper: in the segment basis the
/// boundary is a line tilted by `(r1 - r2) / length`, so the closest
/// boundary point shifts toward the smaller end. When `p1 == p2` the
/// capsule degenerates to the circle of radius `r1`.
#[must_use]
pub fn capsule_distance(p1: Point, p2: Point, r1: f64, r2: f64, p: Point) -> f64 {
    let length = p1.distance(p2);
    if length == 0.0 {
        return p.distance(p1) - r1;
    }

    let unit_x = (p2.x - p1.x) / length;
    let unit_y = (p2.y - p1.y) / length;

    let vx = p.x - p1.x;
    let vy = p.y - p1.y;
    let v_sqr = vx.mul_add(vx, vy * vy);

    // Coordinates of p in the segment basis. The max() guards against a
    // slightly negative Pythagorean remainder from rounding.
    let x_p = vx.mul_add(unit_x, vy * unit_y);
    let y_p = x_p.mul_add(-x_p, v_sqr).max(0.0).sqrt();

    // Project along the boundary normal onto the segment line.
    let t = -y_p / length;
    let proj_x = t.mul_add(r1 - r2, x_p);
    let a = (proj_x / length).clamp(0.0, 1.0);

    let proj = Point::new(
        a.mul_add(p2.x - p1.x, p1.x),
        a.mul_add(p2.y - p1.y, p1.y),
    );
    p.distance(proj) - a.mul_add(r2, (1.0 - a) * r1)
}

/// Fraction of `mask`'s foreground pixels whose centers fall inside the
/// capsule cover of `graph`.
///
/// Every edge contributes the capsule between its endpoints; a node
/// without edges (a fully-collapsed component) contributes the circle of
/// its own weight. Returns 1.0 for a mask with no foreground.
#[must_use]
pub fn coverage_ratio(mask: &BinaryMask, graph: &SkeletonGraph) -> f64 {
    let mut capsules: Vec<(Point, Point, f64, f64)> = Vec::new();
    for (a, b) in graph.edges() {
        if let (Some(na), Some(nb)) = (graph.node(a), graph.node(b)) {
            capsules.push((na.position, nb.position, na.weight, nb.weight));
        }
    }
    for (index, node) in graph.nodes() {
        if graph.degree(index) == 0 {
            capsules.push((node.position, node.position, node.weight, node.weight));
        }
    }

    let mut foreground = 0usize;
    let mut covered = 0usize;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.value(x, y) == 0 {
                continue;
            }
            foreground += 1;
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if capsules
                .iter()
                .any(|&(p1, p2, r1, r2)| capsule_distance(p1, p2, r1, r2, center) <= 0.0)
            {
                covered += 1;
            }
        }
    }

    if foreground == 0 {
        1.0
    } else {
        covered as f64 / foreground as f64
    }
}
