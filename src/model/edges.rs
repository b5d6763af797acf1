//! Edge-table input views

use geo::LineString;

use crate::{Cost, EdgeId, Error, VertexId};

/// Borrowed view over the caller's parallel edge columns.
///
/// `geometries[i]` runs from the `sources[i]` endpoint to the
/// `targets[i]` endpoint. A negative or non-finite cost marks the
/// corresponding direction as impassable; `lengths` is carried through
/// unchanged and never consulted by routing.
#[derive(Debug, Clone, Copy)]
pub struct EdgeColumns<'a> {
    pub edge_ids: &'a [EdgeId],
    pub sources: &'a [VertexId],
    pub targets: &'a [VertexId],
    pub costs: &'a [Cost],
    pub reverse_costs: &'a [Cost],
    pub lengths: &'a [f64],
    pub geometries: &'a [LineString<f64>],
}

impl EdgeColumns<'_> {
    /// Number of edges in the table.
    pub fn len(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_ids.is_empty()
    }

    /// Every column must have the same length.
    pub fn validate(&self) -> Result<(), Error> {
        let n = self.edge_ids.len();
        if self.sources.len() == n
            && self.targets.len() == n
            && self.costs.len() == n
            && self.reverse_costs.len() == n
            && self.lengths.len() == n
            && self.geometries.len() == n
        {
            Ok(())
        } else {
            Err(Error::MismatchedColumns(format!(
                "expected {n} rows in every column, got sources={}, targets={}, costs={}, \
                 reverse_costs={}, lengths={}, geometries={}",
                self.sources.len(),
                self.targets.len(),
                self.costs.len(),
                self.reverse_costs.len(),
                self.lengths.len(),
                self.geometries.len()
            )))
        }
    }
}

/// Owned edge columns, as produced by the debug CSV ingester.
#[derive(Debug, Clone, Default)]
pub struct EdgeData {
    pub edge_ids: Vec<EdgeId>,
    pub sources: Vec<VertexId>,
    pub targets: Vec<VertexId>,
    pub costs: Vec<Cost>,
    pub reverse_costs: Vec<Cost>,
    pub lengths: Vec<f64>,
    pub geometries: Vec<LineString<f64>>,
}

impl EdgeData {
    /// Borrow the columns for the engine.
    pub fn columns(&self) -> EdgeColumns<'_> {
        EdgeColumns {
            edge_ids: &self.edge_ids,
            sources: &self.sources,
            targets: &self.targets,
            costs: &self.costs,
            reverse_costs: &self.reverse_costs,
            lengths: &self.lengths,
            geometries: &self.geometries,
        }
    }

    pub fn len(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_ids.is_empty()
    }
}
