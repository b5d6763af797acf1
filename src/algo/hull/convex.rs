//! Monotone-chain convex hull

use geo::Coord;

fn cross(o: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of a lexicographically sorted, deduplicated point slice.
///
/// Returns indices into `points`, counterclockwise starting from the
/// lexicographically smallest point. Collinear boundary points are
/// excluded and the first index is not repeated at the end.
pub(crate) fn convex_hull(points: &[Coord<f64>]) -> Vec<usize> {
    let n = points.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut lower: Vec<usize> = Vec::new();
    for i in 0..n {
        while lower.len() >= 2
            && cross(
                points[lower[lower.len() - 2]],
                points[lower[lower.len() - 1]],
                points[i],
            ) <= 0.0
        {
            lower.pop();
        }
        lower.push(i);
    }

    let mut upper: Vec<usize> = Vec::new();
    for i in (0..n).rev() {
        while upper.len() >= 2
            && cross(
                points[upper[upper.len() - 2]],
                points[upper[upper.len() - 1]],
                points[i],
            ) <= 0.0
        {
            upper.pop();
        }
        upper.push(i);
    }

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
