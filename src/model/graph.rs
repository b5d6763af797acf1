//! Compact routing graph
//!
//! The edge table is translated once per call into a CSR adjacency:
//! vertex ids are densified to contiguous indices and every passable
//! direction of every edge becomes one directional arc, bucketed by its
//! tail vertex.

use hashbrown::HashMap;
use log::debug;

use crate::model::EdgeColumns;
use crate::{Cost, VertexId};

/// Directed traversal of an input edge in one of its two directions.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    /// Dense index of the vertex this arc leads to
    pub head: usize,
    /// Traversal cost
    pub cost: Cost,
    /// Row of the owning edge in the input table
    pub edge: usize,
    /// True if the arc follows the edge's natural direction
    pub forward: bool,
}

/// Adjacency in CSR form over dense vertex indices.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Arc offsets per vertex, length `vertex_count() + 1`
    pub head: Vec<usize>,
    /// Arcs sorted by tail vertex
    pub arcs: Vec<Arc>,
    /// Original vertex id to dense index
    pub index_by_id: HashMap<VertexId, usize>,
    /// Dense index to original vertex id
    pub id_by_index: Vec<VertexId>,
    /// Per edge row, arc indices of the (forward, reverse) directions
    pub arc_pairs: Vec<(Option<usize>, Option<usize>)>,
}

/// A direction is passable when its cost is a finite non-negative number.
fn passable(cost: Cost) -> bool {
    cost.is_finite() && cost >= 0.0
}

impl Graph {
    /// Build the adjacency from the edge columns.
    ///
    /// Vertex ids are assigned dense indices in ascending-id order, so
    /// the layout is independent of edge order for a fixed vertex set.
    pub fn build(edges: &EdgeColumns<'_>) -> Self {
        let mut ids: Vec<VertexId> = Vec::with_capacity(edges.len() * 2);
        ids.extend_from_slice(edges.sources);
        ids.extend_from_slice(edges.targets);
        ids.sort_unstable();
        ids.dedup();

        let index_by_id: HashMap<VertexId, usize> =
            ids.iter().enumerate().map(|(idx, &id)| (id, idx)).collect();
        let vertex_count = ids.len();

        // Count outgoing arcs per tail, then prefix-sum into offsets
        let mut head = vec![0usize; vertex_count + 1];
        for row in 0..edges.len() {
            if passable(edges.costs[row]) {
                head[index_by_id[&edges.sources[row]] + 1] += 1;
            }
            if passable(edges.reverse_costs[row]) {
                head[index_by_id[&edges.targets[row]] + 1] += 1;
            }
        }
        for v in 0..vertex_count {
            head[v + 1] += head[v];
        }

        let total = head[vertex_count];
        let mut arcs = vec![
            Arc {
                head: 0,
                cost: 0.0,
                edge: 0,
                forward: false,
            };
            total
        ];
        let mut cursor = head.clone();
        let mut arc_pairs = vec![(None, None); edges.len()];

        for row in 0..edges.len() {
            let src = index_by_id[&edges.sources[row]];
            let tgt = index_by_id[&edges.targets[row]];
            if passable(edges.costs[row]) {
                let pos = cursor[src];
                cursor[src] += 1;
                arcs[pos] = Arc {
                    head: tgt,
                    cost: edges.costs[row],
                    edge: row,
                    forward: true,
                };
                arc_pairs[row].0 = Some(pos);
            }
            if passable(edges.reverse_costs[row]) {
                let pos = cursor[tgt];
                cursor[tgt] += 1;
                arcs[pos] = Arc {
                    head: src,
                    cost: edges.reverse_costs[row],
                    edge: row,
                    forward: false,
                };
                arc_pairs[row].1 = Some(pos);
            }
        }

        debug!(
            "Built routing graph: {} vertices, {} arcs from {} edges",
            vertex_count,
            total,
            edges.len()
        );

        Graph {
            head,
            arcs,
            index_by_id,
            id_by_index: ids,
            arc_pairs,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.id_by_index.len()
    }

    /// Outgoing arcs of a dense vertex index.
    pub fn arcs_from(&self, vertex: usize) -> &[Arc] {
        &self.arcs[self.head[vertex]..self.head[vertex + 1]]
    }

    /// Dense index for an original vertex id, if the vertex exists.
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }
}
