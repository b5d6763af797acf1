//! Isochrone shape construction
//!
//! A convex hull over the reached-point cloud, refined concavely toward
//! interior points. The cloud must be sorted lexicographically by (x, y)
//! and exactly deduplicated before either stage runs.

mod concave;
mod convex;

pub(crate) use concave::concave_hull;
pub(crate) use convex::convex_hull;

use geo::Coord;

/// Build the isochrone ring for a reached-point cloud.
///
/// Returns the refined hull as coordinates, counterclockwise, without a
/// closing duplicate. Degenerate clouds pass through unrefined.
pub(crate) fn build_ring(
    points: &[Coord<f64>],
    concavity: f64,
    length_threshold: f64,
) -> Vec<Coord<f64>> {
    let hull = convex_hull(points);
    let ring = if hull.len() >= 3 {
        concave_hull(points, &hull, concavity, length_threshold)
    } else {
        hull
    };
    ring.into_iter().map(|i| points[i]).collect()
}
