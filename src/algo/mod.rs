//! Isochrone algorithms: coverage resolution and shape construction

pub(crate) mod coverage;
pub(crate) mod hull;
pub mod isochrone;
