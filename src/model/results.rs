//! Result types returned to the caller

use geo::LineString;

use crate::{Cost, EdgeId, VertexId};

/// One reached edge for one start vertex.
///
/// Traversal enters the edge at `start_perc` with accumulated cost
/// `start_cost` and runs to `end_perc` at `end_cost`; fractions are
/// measured along the direction of traversal, so `start_perc` is always
/// zero and `end_perc < 1.0` means the budget expired on the edge.
/// `geometry` is the traversed subsegment, oriented in travel direction.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEdge {
    pub start_id: VertexId,
    pub edge_id: EdgeId,
    pub start_perc: f64,
    pub end_perc: f64,
    pub start_cost: Cost,
    pub end_cost: Cost,
    pub geometry: LineString<f64>,
}

/// Isochrone ring for one (start, cutoff) pair.
///
/// The ring is counterclockwise and open: the first coordinate is not
/// repeated at the end. Degenerate clouds yield rings of 0, 1 or 2
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneShape {
    pub start_id: VertexId,
    pub cutoff: Cost,
    pub shape: LineString<f64>,
}

/// Reached network and isochrone shapes for all requested starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsochroneResult {
    pub network: Vec<NetworkEdge>,
    pub isochrone: Vec<IsochroneShape>,
}

/// Tuning knobs for the shape builder.
#[derive(Debug, Clone, Copy)]
pub struct IsochroneConfig {
    /// Drop reached edges that lie strictly inside the isochrone polygon
    pub only_minimum_cover: bool,
    /// Concave-hull aggressiveness; smaller values indent more
    pub concavity: f64,
    /// Hull segments shorter than this are never subdivided
    pub length_threshold: f64,
}

impl Default for IsochroneConfig {
    fn default() -> Self {
        Self {
            only_minimum_cover: false,
            concavity: 2.0,
            length_threshold: 0.0,
        }
    }
}
