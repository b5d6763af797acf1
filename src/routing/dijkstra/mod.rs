//! Bounded Dijkstra expansion
//!
//! Single-start expansion over the directional arcs, bounded by the
//! largest cutoff. Partial coverage of the arcs crossing the boundary is
//! resolved from the final labels by the coverage pass.

mod state;

use std::collections::BinaryHeap;

use crate::model::Graph;
use state::State;

/// Distance labels from one start vertex, bounded by `max_cost`.
///
/// Returns one label per dense vertex index; `f64::INFINITY` marks a
/// vertex the frontier never reached within the bound.
pub fn bounded_dijkstra(graph: &Graph, start: usize, max_cost: f64) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.vertex_count()];
    let mut heap = BinaryHeap::new();

    dist[start] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if cost > dist[node] {
            continue;
        }

        for arc in graph.arcs_from(node) {
            // Defensive: the builder already drops impassable directions
            if !arc.cost.is_finite() || arc.cost < 0.0 {
                continue;
            }
            let next = cost + arc.cost;
            // Never grow the queue past the largest cutoff
            if next > max_cost {
                continue;
            }
            if next < dist[arc.head] {
                dist[arc.head] = next;
                heap.push(State {
                    cost: next,
                    node: arc.head,
                });
            }
        }
    }

    dist
}
