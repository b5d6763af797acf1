//! Isochrone computation for planar road networks.
//!
//! Given a directed, weighted edge table with geometry, a set of start
//! vertices and a set of travel-cost cutoffs, the engine computes per
//! (start, cutoff) the *reachable network*, every traversable edge
//! annotated with the cost interval and the fraction of the edge actually
//! covered, and an *isochrone shape*, a concave-hull polygon over the
//! reached coordinates.
//!
//! Inputs are pre-projected planar coordinates; all distances are
//! Euclidean in the input units. The engine is deterministic: identical
//! inputs produce identical outputs.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use algo::isochrone::{compute_isochrone, compute_isochrone_with};
pub use error::Error;
pub use model::{
    EdgeColumns, EdgeData, IsochroneConfig, IsochroneResult, IsochroneShape, NetworkEdge,
};

/// Vertex identifier as supplied by the caller.
pub type VertexId = i64;
/// Edge identifier as supplied by the caller.
pub type EdgeId = i64;
/// Travel cost along an arc, in caller units.
pub type Cost = f64;
