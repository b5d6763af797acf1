//! Reached-edge coverage
//!
//! Resolves the distance labels of one expansion into at most one
//! coverage record per input edge, clips records to smaller cutoffs and
//! cuts edge geometry at the covered fraction.

use geo::{Coord, LineString};

use crate::model::{EdgeColumns, Graph};

/// Coverage of one input edge, measured along the traversal direction at
/// the largest cutoff.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coverage {
    /// Row of the edge in the input table
    pub edge: usize,
    /// True when the edge was traversed source to target
    pub forward: bool,
    /// Accumulated cost at which traversal enters the edge
    pub start_cost: f64,
    /// Cost of traversing the whole arc
    pub arc_cost: f64,
    /// Accumulated cost where traversal ends (the far endpoint, or the
    /// largest cutoff when the budget expired on the edge)
    pub end_cost: f64,
    /// Fraction of the arc covered, in the cost domain
    pub covered: f64,
}

fn full(edge: usize, forward: bool, start_cost: f64, arc_cost: f64) -> Coverage {
    Coverage {
        edge,
        forward,
        start_cost,
        arc_cost,
        end_cost: start_cost + arc_cost,
        covered: 1.0,
    }
}

fn partial(edge: usize, forward: bool, start_cost: f64, arc_cost: f64, cutoff: f64) -> Coverage {
    Coverage {
        edge,
        forward,
        start_cost,
        arc_cost,
        end_cost: cutoff,
        covered: (cutoff - start_cost) / arc_cost,
    }
}

/// Resolve the labels of one expansion into per-edge coverage.
///
/// Each edge contributes at most one record. Candidate directions are
/// considered in a fixed order: a fully covered forward arc, a fully
/// covered reverse arc, then the partially covered directions. When both
/// directions are fully covered, the one lying on the shortest-path tree
/// (`dist[head] == dist[tail] + cost`) wins; forward wins ties.
pub(crate) fn resolve(
    graph: &Graph,
    edges: &EdgeColumns<'_>,
    dist: &[f64],
    max_cutoff: f64,
) -> Vec<Coverage> {
    let mut coverages = Vec::new();

    for row in 0..edges.len() {
        let (fwd, rev) = graph.arc_pairs[row];
        let src = graph.index_by_id[&edges.sources[row]];
        let tgt = graph.index_by_id[&edges.targets[row]];
        let ds = dist[src];
        let dt = dist[tgt];

        let fwd_cost = fwd.map(|a| graph.arcs[a].cost);
        let rev_cost = rev.map(|a| graph.arcs[a].cost);

        // An unreached tail compares as infinity, failing every bound
        let full_fwd = fwd_cost.filter(|w| ds + w <= max_cutoff);
        let full_rev = rev_cost.filter(|w| dt + w <= max_cutoff);

        let coverage = match (full_fwd, full_rev) {
            (Some(wf), Some(wr)) => {
                let fwd_on_tree = dt == ds + wf;
                let rev_on_tree = ds == dt + wr;
                if rev_on_tree && !fwd_on_tree {
                    Some(full(row, false, dt, wr))
                } else {
                    Some(full(row, true, ds, wf))
                }
            }
            (Some(wf), None) => Some(full(row, true, ds, wf)),
            (None, Some(wr)) => Some(full(row, false, dt, wr)),
            (None, None) => {
                let part_fwd = fwd_cost.filter(|w| ds <= max_cutoff && ds + w > max_cutoff);
                let part_rev = rev_cost.filter(|w| dt <= max_cutoff && dt + w > max_cutoff);
                match (part_fwd, part_rev) {
                    (Some(wf), _) => Some(partial(row, true, ds, wf, max_cutoff)),
                    (None, Some(wr)) => Some(partial(row, false, dt, wr, max_cutoff)),
                    (None, None) => None,
                }
            }
        };

        if let Some(coverage) = coverage {
            coverages.push(coverage);
        }
    }

    coverages
}

/// Clip a coverage record to a smaller cutoff.
///
/// Returns `(end_perc, start_cost, end_cost)`, or `None` when traversal
/// only enters the edge at or past the cutoff.
pub(crate) fn clip_to_cutoff(coverage: &Coverage, cutoff: f64) -> Option<(f64, f64, f64)> {
    if coverage.start_cost >= cutoff {
        return None;
    }
    if coverage.end_cost > cutoff {
        Some((
            (cutoff - coverage.start_cost) / coverage.arc_cost,
            coverage.start_cost,
            cutoff,
        ))
    } else {
        Some((coverage.covered, coverage.start_cost, coverage.end_cost))
    }
}

/// Geometry of a record: the prefix of the edge polyline in traversal
/// direction, cut at `fraction` of its planar length.
pub(crate) fn clipped_geometry(
    line: &LineString<f64>,
    forward: bool,
    fraction: f64,
) -> LineString<f64> {
    if forward {
        clip_line(line, fraction)
    } else {
        let reversed = LineString::from(line.0.iter().rev().copied().collect::<Vec<_>>());
        clip_line(&reversed, fraction)
    }
}

/// Prefix of a polyline covering `fraction` of its planar length.
///
/// The fraction lives in the cost domain; interpolating it over the
/// polyline's length treats cost as proportional to length within the
/// edge, which holds closely for street segments.
fn clip_line(line: &LineString<f64>, fraction: f64) -> LineString<f64> {
    let coords = &line.0;
    if coords.len() < 2 || fraction >= 1.0 {
        return line.clone();
    }

    let total: f64 = coords
        .windows(2)
        .map(|pair| segment_length(pair[0], pair[1]))
        .sum();
    if total <= 0.0 {
        return line.clone();
    }

    let target = fraction * total;
    let mut out = vec![coords[0]];
    let mut travelled = 0.0;

    for pair in coords.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let segment = segment_length(a, b);
        if segment <= 0.0 {
            continue;
        }
        if travelled + segment < target {
            out.push(b);
            travelled += segment;
            continue;
        }
        let t = (target - travelled) / segment;
        out.push(Coord {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        });
        break;
    }

    LineString::from(out)
}

fn segment_length(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}
