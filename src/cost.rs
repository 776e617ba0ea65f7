//! Physical step costs between neighbouring cells.
use crate::config::Connectivity;
use crate::Cell;

/// The physical extent of a cell along each axis, in coordinate units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    /// Derives the cell size from the average spacing of each coordinate sequence. An
    /// axis with a single coordinate has no spacing of its own and borrows the other
    /// axis' size; a 1x1 raster falls back to unit cells.
    pub fn from_coords(x_coords: &[f64], y_coords: &[f64]) -> CellSize {
        match (mean_spacing(x_coords), mean_spacing(y_coords)) {
            (Some(width), Some(height)) => CellSize { width, height },
            (Some(width), None) => CellSize {
                width,
                height: width,
            },
            (None, Some(height)) => CellSize {
                width: height,
                height,
            },
            (None, None) => CellSize {
                width: 1.0,
                height: 1.0,
            },
        }
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

fn mean_spacing(coords: &[f64]) -> Option<f64> {
    match coords {
        [first, .., last] => Some(((last - first) / (coords.len() - 1) as f64).abs()),
        _ => None,
    }
}

/// Static cost table for one raster: moving along x costs the cell width, along y the
/// cell height and diagonally the length of the cell diagonal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    cell_size: CellSize,
    diagonal: f64,
    connectivity: Connectivity,
}

impl CostModel {
    pub fn new(cell_size: CellSize, connectivity: Connectivity) -> CostModel {
        CostModel {
            cell_size,
            diagonal: cell_size.diagonal(),
            connectivity,
        }
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Cost of a single step by `(dx, dy)`, where both components are in `-1..=1`.
    pub(crate) fn step_cost(&self, dx: i32, dy: i32) -> f64 {
        match (dx != 0, dy != 0) {
            (true, true) => self.diagonal,
            (true, false) => self.cell_size.width,
            (false, true) => self.cell_size.height,
            (false, false) => 0.0,
        }
    }

    /// Cost of moving between two neighbouring cells, or [None] if they are not
    /// neighbours under the configured connectivity.
    pub fn edge_cost(&self, from: Cell, to: Cell) -> Option<f64> {
        if self.connectivity.are_neighbours(from, to) {
            Some(self.step_cost(to.x - from.x, to.y - from.y))
        } else {
            None
        }
    }

    /// Straight-line distance between cell centers. Never exceeds the cheapest sequence
    /// of steps between them under either connectivity, so it is admissible and
    /// consistent for A*.
    pub fn heuristic(&self, from: Cell, to: Cell) -> f64 {
        let dx = (from.x - to.x) as f64 * self.cell_size.width;
        let dy = (from.y - to.y) as f64 * self.cell_size.height;
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_from_irregular_coords() {
        let size = CellSize::from_coords(&[0.0, 1.0, 4.0], &[50.0, 40.0, 30.0, 20.0]);
        assert_eq!(size.width, 2.0);
        assert_eq!(size.height, 10.0);
        let single_row = CellSize::from_coords(&[0.0, 3.0], &[7.0]);
        assert_eq!(single_row, CellSize { width: 3.0, height: 3.0 });
        let single_cell = CellSize::from_coords(&[1.0], &[7.0]);
        assert_eq!(single_cell, CellSize { width: 1.0, height: 1.0 });
    }

    #[test]
    fn non_square_edge_costs() {
        let size = CellSize {
            width: 3.0,
            height: 4.0,
        };
        let eight = CostModel::new(size, Connectivity::Eight);
        let origin = Cell::new(1, 1);
        assert_eq!(eight.edge_cost(origin, Cell::new(2, 1)), Some(3.0));
        assert_eq!(eight.edge_cost(origin, Cell::new(1, 0)), Some(4.0));
        assert_eq!(eight.edge_cost(origin, Cell::new(0, 0)), Some(5.0));
        assert_eq!(eight.edge_cost(origin, Cell::new(3, 1)), None);

        let four = CostModel::new(size, Connectivity::Four);
        assert_eq!(four.edge_cost(origin, Cell::new(0, 0)), None);
        assert_eq!(four.edge_cost(origin, Cell::new(1, 2)), Some(4.0));
    }

    #[test]
    fn heuristic_is_admissible() {
        let size = CellSize {
            width: 2.0,
            height: 0.5,
        };
        let costs = CostModel::new(size, Connectivity::Eight);
        let from = Cell::new(0, 0);
        let to = Cell::new(5, 2);
        // Cheapest unobstructed route: two diagonal steps and three steps along x.
        let best = 2.0 * size.diagonal() + 3.0 * size.width;
        assert!(costs.heuristic(from, to) <= best);
        assert_eq!(costs.heuristic(from, from), 0.0);
    }
}
