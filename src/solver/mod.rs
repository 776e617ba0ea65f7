use itertools::Itertools;
use log::{info, warn};

use crate::cancel::CancelToken;
use crate::error::{Endpoint, Result, RouteError};
use crate::path::Path;
use crate::pathing_grid::PathingGrid;
use crate::search;
use crate::Cell;

pub mod astar;
pub mod dijkstra;

/// A shortest-path solver over a [PathingGrid]. Implementors only choose the heuristic;
/// the search itself is shared.
pub trait GridSolver {
    /// Estimated remaining cost from `p1` to `p2`. Must not overestimate for the
    /// returned paths to be optimal.
    fn heuristic(&self, grid: &PathingGrid, p1: &Cell, p2: &Cell) -> f64;

    /// Sums the edge costs along `path`, or [None] if it takes a step that is not an
    /// edge of `grid` or enters a blocked cell.
    fn get_path_cost(&self, path: &[Cell], grid: &PathingGrid) -> Option<f64> {
        if !path.iter().all(|c| grid.can_move_to(*c)) {
            return None;
        }
        path.iter()
            .tuple_windows()
            .map(|(a, b)| grid.costs().edge_cost(*a, *b))
            .sum()
    }

    /// Computes the cheapest path from `start` to `goal`.
    fn get_path_single_goal(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goal: Cell,
        cancel: &CancelToken,
    ) -> Result<Path> {
        check_endpoint(grid, start, Endpoint::Start)?;
        check_endpoint(grid, goal, Endpoint::Goal)?;
        if start == goal {
            return Ok(Path::single(start));
        }
        // Check if start and goal are on the same connected component.
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(RouteError::NoPathFound { start, goal });
        }
        info!("{} is reachable from {}, computing path", goal, start);
        let goal_ix = grid.get_ix(goal);
        let result = search::astar(
            grid.len(),
            grid.get_ix(start),
            |ix| grid.neighborhood_ix_and_cost(ix),
            |ix| self.heuristic(grid, &grid.get_cell(ix), &goal),
            |ix| ix == goal_ix,
            cancel,
        )?;
        match result {
            Some((nodes, cost)) => Ok(Path {
                cells: nodes.into_iter().map(|ix| grid.get_cell(ix)).collect(),
                cost,
            }),
            None => {
                warn!("Reachable goal {} could not be pathed to, are the components correct?", goal);
                Err(RouteError::NoPathFound { start, goal })
            }
        }
    }

    /// Computes a path from the start to the cheapest of the given goals and returns the
    /// selected goal in addition to the found path. Blocked or unreachable goals are
    /// skipped.
    fn get_path_multiple_goals(
        &self,
        grid: &PathingGrid,
        start: Cell,
        goals: &[Cell],
        cancel: &CancelToken,
    ) -> Result<(Cell, Path)> {
        check_endpoint(grid, start, Endpoint::Start)?;
        if goals.contains(&start) {
            return Ok((start, Path::single(start)));
        }
        let candidates: Vec<Cell> = goals
            .iter()
            .copied()
            .filter(|goal| grid.reachable(&start, goal))
            .unique()
            .collect();
        if candidates.is_empty() {
            info!("None of {} goals is reachable from {}", goals.len(), start);
            let goal = goals.first().copied().unwrap_or(start);
            return Err(RouteError::NoPathFound { start, goal });
        }
        let goal_ixs: Vec<usize> = candidates.iter().map(|g| grid.get_ix(*g)).collect();
        let result = search::astar(
            grid.len(),
            grid.get_ix(start),
            |ix| grid.neighborhood_ix_and_cost(ix),
            |ix| {
                let cell = grid.get_cell(ix);
                candidates
                    .iter()
                    .map(|goal| self.heuristic(grid, &cell, goal))
                    .fold(f64::INFINITY, f64::min)
            },
            |ix| goal_ixs.contains(&ix),
            cancel,
        )?;
        match result {
            Some((nodes, cost)) => {
                let cells: Vec<Cell> = nodes.into_iter().map(|ix| grid.get_cell(ix)).collect();
                let selected = *cells.last().unwrap_or(&start);
                Ok((selected, Path { cells, cost }))
            }
            None => {
                warn!("Reachable goals could not be pathed to, are the components correct?");
                Err(RouteError::NoPathFound {
                    start,
                    goal: candidates[0],
                })
            }
        }
    }
}

fn check_endpoint(grid: &PathingGrid, cell: Cell, endpoint: Endpoint) -> Result<()> {
    if grid.can_move_to(cell) {
        Ok(())
    } else {
        Err(RouteError::InvalidStartOrGoal { endpoint, cell })
    }
}
