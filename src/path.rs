use itertools::Itertools;

use crate::config::Connectivity;
use crate::cost::CostModel;
use crate::Cell;

/// A sequence of cells from start to goal and its total traversal cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cells: Vec<Cell>,
    pub cost: f64,
}

impl Path {
    /// The path that stays on a single cell.
    pub fn single(cell: Cell) -> Path {
        Path {
            cells: vec![cell],
            cost: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Checks that every consecutive pair of cells are neighbours.
    pub fn is_connected(&self, connectivity: Connectivity) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| connectivity.are_neighbours(*a, *b))
    }

    /// Cost from the start up to and including each cell, or [None] if the path takes a
    /// step that is not an edge under `costs`.
    pub fn cumulative_costs(&self, costs: &CostModel) -> Option<Vec<f64>> {
        let mut total = 0.0;
        let mut acc = Vec::with_capacity(self.cells.len());
        if !self.cells.is_empty() {
            acc.push(0.0);
        }
        for (a, b) in self.cells.iter().tuple_windows() {
            total += costs.edge_cost(*a, *b)?;
            acc.push(total);
        }
        Some(acc)
    }
}
