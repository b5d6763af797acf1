//! Concave refinement of a convex hull
//!
//! Iteratively pulls hull segments inward toward cloud points that pass
//! the concavity test, the procedure popularized by mapbox/concaveman.
//! Candidate lookup runs over a bulk-loaded R-tree of the cloud; a
//! second R-tree over the current hull segments rejects splices that
//! would self-intersect.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use geo::Coord;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Cloud point carrying its index for the R-tree.
#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedPoint {
    coords: [f64; 2],
    index: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Hull segment entry; `id` is the arena index of the node at the
/// segment tail, which keeps entries unique under removal.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HullSegment {
    a: [f64; 2],
    b: [f64; 2],
    id: usize,
}

impl RTreeObject for HullSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a, self.b)
    }
}

/// Node of the circular hull list. Nodes are only ever inserted.
struct Node {
    point: usize,
    prev: usize,
    next: usize,
}

/// Refine a convex hull toward the cloud's interior points.
///
/// `points` must be sorted and deduplicated; `hull` holds CCW indices
/// into it. Returns the refined ring as point indices, CCW, without a
/// closing duplicate.
pub(crate) fn concave_hull(
    points: &[Coord<f64>],
    hull: &[usize],
    concavity: f64,
    length_threshold: f64,
) -> Vec<usize> {
    if hull.len() < 3 || points.len() == hull.len() {
        return hull.to_vec();
    }
    let sq_concavity = concavity.max(0.0).powi(2);
    let sq_len_threshold = length_threshold * length_threshold;

    let mut nodes: Vec<Node> = hull
        .iter()
        .enumerate()
        .map(|(i, &point)| Node {
            point,
            prev: (i + hull.len() - 1) % hull.len(),
            next: (i + 1) % hull.len(),
        })
        .collect();
    let mut on_hull = FixedBitSet::with_capacity(points.len());
    for &point in hull {
        on_hull.insert(point);
    }

    let tree = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .map(|(index, c)| IndexedPoint {
                coords: [c.x, c.y],
                index,
            })
            .collect(),
    );
    let mut seg_tree = RTree::bulk_load(
        (0..nodes.len())
            .map(|id| segment_entry(points, &nodes, id))
            .collect(),
    );

    let mut queue: VecDeque<usize> = (0..nodes.len()).collect();

    while let Some(id) = queue.pop_front() {
        let a = point_of(points, &nodes, id);
        let b = point_of(points, &nodes, nodes[id].next);

        // Skip the segment if it's already short enough
        let sq_len = sq_dist(a, b);
        if sq_len < sq_len_threshold {
            continue;
        }
        let max_sq_len = sq_len / sq_concavity;

        let Some(candidate) =
            find_candidate(points, &tree, &on_hull, &nodes, id, max_sq_len, &seg_tree)
        else {
            continue;
        };

        let p = [points[candidate].x, points[candidate].y];
        if sq_dist(p, a).min(sq_dist(p, b)) <= max_sq_len {
            // Splice the candidate between the segment endpoints and
            // queue both halves for further consideration
            let next = nodes[id].next;
            let new_id = nodes.len();
            nodes.push(Node {
                point: candidate,
                prev: id,
                next,
            });
            nodes[next].prev = new_id;
            seg_tree.remove(&HullSegment { a, b, id });
            nodes[id].next = new_id;
            on_hull.insert(candidate);
            seg_tree.insert(segment_entry(points, &nodes, id));
            seg_tree.insert(segment_entry(points, &nodes, new_id));
            queue.push_back(id);
            queue.push_back(new_id);
        }
    }

    let mut ring = Vec::with_capacity(nodes.len());
    let mut id = 0;
    loop {
        ring.push(nodes[id].point);
        id = nodes[id].next;
        if id == 0 {
            break;
        }
    }
    ring
}

/// Closest eligible cloud point for the segment starting at node `id`.
///
/// Candidates are visited in ascending (segment distance, index) order;
/// the first one that is strictly closer to this segment than to the two
/// adjacent hull segments and does not introduce a self-intersection
/// wins.
fn find_candidate(
    points: &[Coord<f64>],
    tree: &RTree<IndexedPoint>,
    on_hull: &FixedBitSet,
    nodes: &[Node],
    id: usize,
    max_sq_len: f64,
    seg_tree: &RTree<HullSegment>,
) -> Option<usize> {
    let prev = nodes[id].prev;
    let next = nodes[id].next;
    let next2 = nodes[next].next;

    let g_prev = point_of(points, nodes, prev);
    let a = point_of(points, nodes, id);
    let b = point_of(points, nodes, next);
    let g_next = point_of(points, nodes, next2);

    let mut candidates: Vec<(f64, usize)> = if max_sq_len.is_finite() {
        let radius = max_sq_len.sqrt();
        let envelope = AABB::from_corners(
            [a[0].min(b[0]) - radius, a[1].min(b[1]) - radius],
            [a[0].max(b[0]) + radius, a[1].max(b[1]) + radius],
        );
        tree.locate_in_envelope_intersecting(&envelope)
            .filter(|point| !on_hull.contains(point.index))
            .filter_map(|point| {
                let d = sq_seg_dist(point.coords, a, b);
                (d <= max_sq_len).then_some((d, point.index))
            })
            .collect()
    } else {
        // concavity 0 admits the whole cloud
        tree.iter()
            .filter(|point| !on_hull.contains(point.index))
            .map(|point| (sq_seg_dist(point.coords, a, b), point.index))
            .collect()
    };
    candidates.sort_by(|x, y| x.0.total_cmp(&y.0).then_with(|| x.1.cmp(&y.1)));

    for (d, index) in candidates {
        let p = [points[index].x, points[index].y];
        // Skip points as close to the neighbouring segments as to this one
        if d >= sq_seg_dist(p, g_prev, a) || d >= sq_seg_dist(p, b, g_next) {
            continue;
        }
        if no_intersections(a, p, seg_tree) && no_intersections(p, b, seg_tree) {
            return Some(index);
        }
    }
    None
}

fn segment_entry(points: &[Coord<f64>], nodes: &[Node], id: usize) -> HullSegment {
    HullSegment {
        a: point_of(points, nodes, id),
        b: point_of(points, nodes, nodes[id].next),
        id,
    }
}

fn point_of(points: &[Coord<f64>], nodes: &[Node], id: usize) -> [f64; 2] {
    let c = points[nodes[id].point];
    [c.x, c.y]
}

fn sq_dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Squared distance from `p` to the segment `(a, b)`: perpendicular
/// inside the projection, endpoint distance outside it.
fn sq_seg_dist(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let mut x = a[0];
    let mut y = a[1];
    let mut dx = b[0] - x;
    let mut dy = b[1] - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p[0] - x) * dx + (p[1] - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b[0];
            y = b[1];
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    dx = p[0] - x;
    dy = p[1] - y;
    dx * dx + dy * dy
}

/// True when the open segment `(p, q)` crosses no current hull segment.
fn no_intersections(p: [f64; 2], q: [f64; 2], seg_tree: &RTree<HullSegment>) -> bool {
    let envelope = AABB::from_corners(
        [p[0].min(q[0]), p[1].min(q[1])],
        [p[0].max(q[0]), p[1].max(q[1])],
    );
    seg_tree
        .locate_in_envelope_intersecting(&envelope)
        .all(|segment| !crosses(segment.a, segment.b, p, q))
}

/// Proper crossing test; segments sharing an endpoint never cross.
fn crosses(p1: [f64; 2], q1: [f64; 2], p2: [f64; 2], q2: [f64; 2]) -> bool {
    if p1 == p2 || p1 == q2 || q1 == p2 || q1 == q2 {
        return false;
    }
    orient(p1, q1, p2) != orient(p1, q1, q2) && orient(p2, q2, p1) != orient(p2, q2, q1)
}

fn orient(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> i8 {
    let cross = (q[0] - p[0]) * (r[1] - p[1]) - (q[1] - p[1]) * (r[0] - p[0]);
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}
