use crate::{pathing_grid::PathingGrid, solver::GridSolver, Cell};

/// Uniform-cost search. Expands more cells than [AstarSolver](super::astar::AstarSolver)
/// but does not depend on the heuristic, which makes it a reference for the A* results.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &PathingGrid, _: &Cell, _: &Cell) -> f64 {
        0.0
    }
}
