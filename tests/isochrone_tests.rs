//! End-to-end tests for the isochrone engine.

use geo::{line_string, Coord, LineString};
use isoreach::prelude::*;

fn edge(
    id: i64,
    source: i64,
    target: i64,
    cost: f64,
    reverse_cost: f64,
    geometry: LineString<f64>,
) -> (i64, i64, i64, f64, f64, f64, LineString<f64>) {
    (id, source, target, cost, reverse_cost, 1.0, geometry)
}

fn table(rows: Vec<(i64, i64, i64, f64, f64, f64, LineString<f64>)>) -> EdgeData {
    let mut data = EdgeData::default();
    for (id, source, target, cost, reverse_cost, length, geometry) in rows {
        data.edge_ids.push(id);
        data.sources.push(source);
        data.targets.push(target);
        data.costs.push(cost);
        data.reverse_costs.push(reverse_cost);
        data.lengths.push(length);
        data.geometries.push(geometry);
    }
    data
}

fn two_edge_chain() -> EdgeData {
    table(vec![
        edge(1, 10, 20, 5.0, 5.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 20, 30, 5.0, 5.0, line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]),
    ])
}

#[test]
fn two_edge_chain_with_partial_cover() {
    let data = two_edge_chain();
    let result = compute_isochrone(&data.columns(), &[10], &[7.0], false).unwrap();

    assert_eq!(result.network.len(), 2);

    let first = &result.network[0];
    assert_eq!(first.start_id, 10);
    assert_eq!(first.edge_id, 1);
    assert_eq!(first.start_perc, 0.0);
    assert_eq!(first.end_perc, 1.0);
    assert_eq!(first.start_cost, 0.0);
    assert_eq!(first.end_cost, 5.0);
    assert_eq!(
        first.geometry,
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]
    );

    let second = &result.network[1];
    assert_eq!(second.edge_id, 2);
    assert!((second.end_perc - 0.4).abs() < 1e-12);
    assert_eq!(second.start_cost, 5.0);
    assert_eq!(second.end_cost, 7.0);
    let tip = second.geometry.0.last().unwrap();
    assert!((tip.x - 1.4).abs() < 1e-12);
    assert_eq!(tip.y, 0.0);

    // the reached chain is collinear: the ring collapses to its extremes
    assert_eq!(result.isochrone.len(), 1);
    let shape = &result.isochrone[0];
    assert_eq!(shape.start_id, 10);
    assert_eq!(shape.cutoff, 7.0);
    assert_eq!(shape.shape.0.first(), Some(&Coord { x: 0.0, y: 0.0 }));
    let far = shape.shape.0.last().unwrap();
    assert!((far.x - 1.4).abs() < 1e-12);
}

#[test]
fn bidirectional_asymmetry() {
    let data = table(vec![edge(
        1,
        10,
        20,
        1.0,
        100.0,
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
    )]);
    let result = compute_isochrone(&data.columns(), &[10, 20], &[10.0], false).unwrap();

    assert_eq!(result.network.len(), 2);

    let from_source = &result.network[0];
    assert_eq!(from_source.start_id, 10);
    assert_eq!(from_source.end_perc, 1.0);
    assert_eq!(from_source.start_cost, 0.0);
    assert_eq!(from_source.end_cost, 1.0);

    let from_target = &result.network[1];
    assert_eq!(from_target.start_id, 20);
    assert!((from_target.end_perc - 0.1).abs() < 1e-12);
    assert_eq!(from_target.start_cost, 0.0);
    assert_eq!(from_target.end_cost, 10.0);
    // traversal runs against the natural direction, from the target end
    assert_eq!(from_target.geometry.0[0], Coord { x: 1.0, y: 0.0 });
    assert!((from_target.geometry.0[1].x - 0.9).abs() < 1e-12);
}

#[test]
fn unknown_start_vertex_yields_empty_result() {
    let data = two_edge_chain();
    let result = compute_isochrone(&data.columns(), &[99], &[7.0], false).unwrap();
    assert!(result.network.is_empty());
    assert!(result.isochrone.is_empty());
}

#[test]
fn multi_cutoff_clipping() {
    let data = table(vec![edge(
        1,
        10,
        20,
        100.0,
        -1.0,
        line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
    )]);
    let result = compute_isochrone(&data.columns(), &[10], &[25.0, 50.0, 75.0], false).unwrap();

    // one record per cutoff, emitted in descending cutoff order
    let percs: Vec<f64> = result.network.iter().map(|r| r.end_perc).collect();
    assert_eq!(percs, vec![0.75, 0.5, 0.25]);
    for record in &result.network {
        assert_eq!(record.edge_id, 1);
        assert_eq!(record.start_perc, 0.0);
        assert_eq!(record.start_cost, 0.0);
        assert!((record.end_cost - 100.0 * record.end_perc).abs() < 1e-9);
    }

    let cutoffs: Vec<f64> = result.isochrone.iter().map(|s| s.cutoff).collect();
    assert_eq!(cutoffs, vec![75.0, 50.0, 25.0]);
}

#[test]
fn empty_starts_or_cutoffs() {
    let data = two_edge_chain();
    let result = compute_isochrone(&data.columns(), &[], &[7.0], false).unwrap();
    assert_eq!(result, IsochroneResult::default());

    let result = compute_isochrone(&data.columns(), &[10], &[], false).unwrap();
    assert_eq!(result, IsochroneResult::default());

    // unusable cutoff values degrade to the empty set as well
    let result = compute_isochrone(&data.columns(), &[10], &[-5.0, f64::NAN], false).unwrap();
    assert_eq!(result, IsochroneResult::default());
}

#[test]
fn duplicate_cutoff_values_produce_duplicate_rows() {
    let data = two_edge_chain();
    let result = compute_isochrone(&data.columns(), &[10], &[7.0, 7.0], false).unwrap();

    // cutoff entries stay 1:1 with the input list, like duplicate starts
    assert_eq!(result.network.len(), 4);
    assert_eq!(result.isochrone.len(), 2);
    assert_eq!(result.isochrone[0], result.isochrone[1]);
}

#[test]
fn duplicate_parallel_edges_are_independent() {
    let data = table(vec![
        edge(1, 10, 20, 5.0, 5.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 10, 20, 7.0, 7.0, line_string![(x: 0.0, y: 0.0), (x: 0.5, y: 0.3), (x: 1.0, y: 0.0)]),
    ]);
    let result = compute_isochrone(&data.columns(), &[10], &[20.0], false).unwrap();

    let ids: Vec<i64> = result.network.iter().map(|r| r.edge_id).collect();
    assert_eq!(ids, vec![1, 2]);
    // labels come from the cheaper edge; each edge keeps its own cost
    assert_eq!(result.network[0].end_cost, 5.0);
    assert_eq!(result.network[1].end_cost, 7.0);
}

fn spoke_network() -> EdgeData {
    // four inner spokes from a center, four outer continuations
    table(vec![
        edge(1, 1, 11, 1.0, -1.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 1, 12, 1.0, -1.0, line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)]),
        edge(3, 1, 13, 1.0, -1.0, line_string![(x: 0.0, y: 0.0), (x: -1.0, y: 0.0)]),
        edge(4, 1, 14, 1.0, -1.0, line_string![(x: 0.0, y: 0.0), (x: 0.0, y: -1.0)]),
        edge(5, 11, 21, 1.0, -1.0, line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]),
        edge(6, 12, 22, 1.0, -1.0, line_string![(x: 0.0, y: 1.0), (x: 0.0, y: 2.0)]),
        edge(7, 13, 23, 1.0, -1.0, line_string![(x: -1.0, y: 0.0), (x: -2.0, y: 0.0)]),
        edge(8, 14, 24, 1.0, -1.0, line_string![(x: 0.0, y: -1.0), (x: 0.0, y: -2.0)]),
    ])
}

#[test]
fn minimum_cover_drops_interior_edges() {
    let data = spoke_network();

    let all = compute_isochrone(&data.columns(), &[1], &[2.0], false).unwrap();
    assert_eq!(all.network.len(), 8);

    let trimmed = compute_isochrone(&data.columns(), &[1], &[2.0], true).unwrap();
    let ids: Vec<i64> = trimmed.network.iter().map(|r| r.edge_id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);

    // the polygon itself is unaffected by the filter
    assert_eq!(all.isochrone, trimmed.isochrone);
    assert_eq!(all.isochrone[0].shape.0.len(), 4);
}

#[test]
fn reachability_is_monotone_across_cutoffs() {
    let data = spoke_network();
    let columns = data.columns();

    let small = compute_isochrone(&columns, &[1], &[1.5], false).unwrap();
    let large = compute_isochrone(&columns, &[1], &[2.0], false).unwrap();

    for record in &small.network {
        let wider = large
            .network
            .iter()
            .find(|r| r.edge_id == record.edge_id)
            .expect("edge reached at the smaller cutoff must stay reached");
        assert_eq!(record.start_perc, wider.start_perc);
        assert!(record.end_perc <= wider.end_perc + 1e-12);
        assert_eq!(record.start_cost, wider.start_cost);
    }
}

#[test]
fn direction_uniqueness_per_edge_and_cutoff() {
    // a cycle reachable from both sides: each edge appears once
    let data = table(vec![
        edge(1, 10, 20, 2.0, 2.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 20, 30, 2.0, 2.0, line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
        edge(3, 30, 10, 2.0, 2.0, line_string![(x: 1.0, y: 1.0), (x: 0.0, y: 0.0)]),
    ]);
    let result = compute_isochrone(&data.columns(), &[10], &[10.0], false).unwrap();

    let mut ids: Vec<i64> = result.network.iter().map(|r| r.edge_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), result.network.len());
}

#[test]
fn cost_consistency() {
    let data = spoke_network();
    let result = compute_isochrone(&data.columns(), &[1], &[1.5], false).unwrap();
    assert!(!result.network.is_empty());
    for record in &result.network {
        let expected = record.start_cost + 1.0 * (record.end_perc - record.start_perc);
        assert!((record.end_cost - expected).abs() < 1e-9);
        assert!(record.start_cost >= 0.0);
        assert!(record.end_cost <= 1.5 + 1e-12);
    }
}

#[test]
fn mirrored_network_yields_identical_coverage() {
    let original = table(vec![
        edge(1, 10, 20, 3.0, 50.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 20, 30, 4.0, 60.0, line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]),
    ]);
    // swap cost/reverse_cost, swap source/target, reverse geometry
    let mirrored = table(vec![
        edge(1, 20, 10, 50.0, 3.0, line_string![(x: 1.0, y: 0.0), (x: 0.0, y: 0.0)]),
        edge(2, 30, 20, 60.0, 4.0, line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 0.0)]),
    ]);

    for cutoff in [5.0, 10.0] {
        let a = compute_isochrone(&original.columns(), &[10], &[cutoff], false).unwrap();
        let b = compute_isochrone(&mirrored.columns(), &[10], &[cutoff], false).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let data = spoke_network();
    let columns = data.columns();
    let starts = [1, 11, 99];
    let cutoffs = [2.0, 1.25];

    let first = compute_isochrone(&columns, &starts, &cutoffs, false).unwrap();
    let second = compute_isochrone(&columns, &starts, &cutoffs, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn isolated_start_emits_empty_shape_rows() {
    // vertex 40 exists but its only edge is impassable both ways
    let data = table(vec![
        edge(1, 10, 20, 5.0, 5.0, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
        edge(2, 40, 50, -1.0, -1.0, line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0)]),
    ]);
    let result = compute_isochrone(&data.columns(), &[40], &[7.0], false).unwrap();
    assert!(result.network.is_empty());
    assert_eq!(result.isochrone.len(), 1);
    assert!(result.isochrone[0].shape.0.is_empty());
}

#[test]
fn mismatched_columns_error() {
    let data = two_edge_chain();
    let columns = EdgeColumns {
        sources: &data.sources[..1],
        ..data.columns()
    };
    assert!(compute_isochrone(&columns, &[10], &[7.0], false).is_err());
}
