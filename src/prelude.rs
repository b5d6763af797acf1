// Re-export key components
pub use crate::algo::isochrone::{compute_isochrone, compute_isochrone_with};
pub use crate::error::Error;
pub use crate::loading::read_edge_csv;
pub use crate::model::{
    EdgeColumns, EdgeData, Graph, IsochroneConfig, IsochroneResult, IsochroneShape, NetworkEdge,
};

// Core scalar types
pub use crate::Cost;
pub use crate::EdgeId;
pub use crate::VertexId;
