//! Data model for the isochrone engine
//!
//! Contains the edge-table input view, the compact routing graph and the
//! result types returned to the caller.

pub mod edges;
pub mod graph;
pub mod results;

pub use edges::{EdgeColumns, EdgeData};
pub use graph::{Arc, Graph};
pub use results::{IsochroneConfig, IsochroneResult, IsochroneShape, NetworkEdge};
