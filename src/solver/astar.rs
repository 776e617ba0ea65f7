use crate::{pathing_grid::PathingGrid, solver::GridSolver, Cell};

/// A* with the straight-line distance between cell centers as heuristic.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    /// Euclidean distance in physical units, see [CostModel::heuristic](crate::CostModel::heuristic).
    fn heuristic(&self, grid: &PathingGrid, p1: &Cell, p2: &Cell) -> f64 {
        grid.costs().heuristic(*p1, *p2)
    }
}
