//! Isochrone orchestration
//!
//! Builds the graph once, expands every start vertex to the largest
//! cutoff, then derives per-cutoff network records and shapes by
//! clipping. Starts are processed in parallel over the shared read-only
//! graph; output order matches input order.

use geo::{Contains, Coord, LineString, Point, Polygon};
use log::{debug, info};
use rayon::prelude::*;

use crate::algo::{coverage, hull};
use crate::model::{
    EdgeColumns, Graph, IsochroneConfig, IsochroneResult, IsochroneShape, NetworkEdge,
};
use crate::routing::dijkstra::bounded_dijkstra;
use crate::{Error, VertexId};

/// Compute reachable networks and isochrone shapes with default hull
/// parameters.
///
/// One record per (start, cutoff, reached edge) lands in `network`; one
/// ring per (start, cutoff) lands in `isochrone`, tagged with the
/// original cutoff value. Unknown start vertices and impassable edge
/// directions degrade silently.
///
/// # Errors
///
/// Returns an error only when the edge columns have mismatched lengths.
pub fn compute_isochrone(
    edges: &EdgeColumns<'_>,
    start_vertices: &[VertexId],
    cutoffs: &[f64],
    only_minimum_cover: bool,
) -> Result<IsochroneResult, Error> {
    let config = IsochroneConfig {
        only_minimum_cover,
        ..IsochroneConfig::default()
    };
    compute_isochrone_with(edges, start_vertices, cutoffs, &config)
}

/// Same as [`compute_isochrone`], with explicit hull parameters.
///
/// # Errors
///
/// Returns an error only when the edge columns have mismatched lengths.
pub fn compute_isochrone_with(
    edges: &EdgeColumns<'_>,
    start_vertices: &[VertexId],
    cutoffs: &[f64],
    config: &IsochroneConfig,
) -> Result<IsochroneResult, Error> {
    edges.validate()?;

    // Unusable cutoff values degrade silently like malformed edges
    let mut cutoffs: Vec<f64> = cutoffs
        .iter()
        .copied()
        .filter(|c| c.is_finite() && *c > 0.0)
        .collect();
    cutoffs.sort_by(|a, b| b.total_cmp(a));

    if cutoffs.is_empty() || start_vertices.is_empty() {
        return Ok(IsochroneResult::default());
    }

    let graph = Graph::build(edges);
    info!(
        "Computing isochrones for {} start vertices at {} cutoffs over {} edges",
        start_vertices.len(),
        cutoffs.len(),
        edges.len()
    );

    let per_start: Vec<(Vec<NetworkEdge>, Vec<IsochroneShape>)> = start_vertices
        .par_iter()
        .map(|&start_id| isochrone_for_start(edges, &graph, start_id, &cutoffs, config))
        .collect();

    let mut result = IsochroneResult::default();
    for (network, shapes) in per_start {
        result.network.extend(network);
        result.isochrone.extend(shapes);
    }
    Ok(result)
}

/// One start vertex: expand once at the largest cutoff, then clip per
/// cutoff in descending order.
fn isochrone_for_start(
    edges: &EdgeColumns<'_>,
    graph: &Graph,
    start_id: VertexId,
    cutoffs: &[f64],
    config: &IsochroneConfig,
) -> (Vec<NetworkEdge>, Vec<IsochroneShape>) {
    let Some(start) = graph.index_of(start_id) else {
        debug!("Start vertex {start_id} is not part of the network, skipping");
        return (Vec::new(), Vec::new());
    };

    let max_cutoff = cutoffs[0];
    let dist = bounded_dijkstra(graph, start, max_cutoff);
    let coverages = coverage::resolve(graph, edges, &dist, max_cutoff);
    debug!(
        "Start {start_id}: {} edges reached within {max_cutoff}",
        coverages.len()
    );

    let mut network = Vec::new();
    let mut shapes = Vec::new();

    for &cutoff in cutoffs {
        let mut records: Vec<NetworkEdge> = coverages
            .iter()
            .filter_map(|cov| {
                let (end_perc, start_cost, end_cost) = coverage::clip_to_cutoff(cov, cutoff)?;
                Some(NetworkEdge {
                    start_id,
                    edge_id: edges.edge_ids[cov.edge],
                    start_perc: 0.0,
                    end_perc,
                    start_cost,
                    end_cost,
                    geometry: coverage::clipped_geometry(
                        &edges.geometries[cov.edge],
                        cov.forward,
                        end_perc,
                    ),
                })
            })
            .collect();

        let mut cloud: Vec<Coord<f64>> = records
            .iter()
            .flat_map(|record| record.geometry.0.iter().copied())
            .collect();
        cloud.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
        cloud.dedup();

        let ring = hull::build_ring(&cloud, config.concavity, config.length_threshold);

        if config.only_minimum_cover {
            if let Some(polygon) = ring_polygon(&ring) {
                records.retain(|record| !dominated(&polygon, &record.geometry));
            }
        }

        network.extend(records);
        shapes.push(IsochroneShape {
            start_id,
            cutoff,
            shape: LineString::from(ring),
        });
    }

    (network, shapes)
}

fn ring_polygon(ring: &[Coord<f64>]) -> Option<Polygon<f64>> {
    (ring.len() >= 3).then(|| Polygon::new(LineString::from(ring.to_vec()), vec![]))
}

/// A record is dominated when its whole clipped geometry lies interior
/// to the polygon. Requiring every vertex to be strictly interior keeps
/// records that touch the ring, so the edges bordering the shape always
/// survive the minimum-cover filter.
fn dominated(polygon: &Polygon<f64>, geometry: &LineString<f64>) -> bool {
    geometry
        .0
        .iter()
        .all(|c| polygon.contains(&Point::new(c.x, c.y)))
        && polygon.contains(geometry)
}
