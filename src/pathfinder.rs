//! Coordinate-level routing over one raster.
use log::{debug, info};

use crate::barrier::{BarrierClassifier, BarrierSet};
use crate::cancel::CancelToken;
use crate::config::RouteConfig;
use crate::cost::CellSize;
use crate::error::{Endpoint, Result, RouteError};
use crate::grid_index::GridIndex;
use crate::path::Path;
use crate::pathing_grid::PathingGrid;
use crate::raster::{Coord, Raster, RasterValue};
use crate::rasterize::rasterize;
use crate::snap::CellSnapper;
use crate::solver::astar::AstarSolver;
use crate::solver::GridSolver;
use crate::Cell;

/// A found route: the resolved (and possibly snapped) endpoint cells and the path
/// between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub start: Cell,
    pub goal: Cell,
    pub path: Path,
}

/// Routes between real-world points on a fixed raster. Crossability, cell sizes and
/// connected components are computed once on construction; every query allocates its
/// own search state, so a single pathfinder can serve queries from several threads.
#[derive(Clone, Debug)]
pub struct RasterPathfinder<'a, T> {
    raster: &'a Raster<T>,
    index: GridIndex<'a>,
    grid: PathingGrid,
    config: RouteConfig<T>,
}

impl<'a, T: RasterValue> RasterPathfinder<'a, T> {
    /// Classifies every cell of `raster` and builds the search graph. Fails with
    /// [RouteError::InvalidConfiguration] if a barrier value has no numeric
    /// representation.
    pub fn new(raster: &'a Raster<T>, config: RouteConfig<T>) -> Result<RasterPathfinder<'a, T>> {
        let mut barriers = BarrierSet::new();
        for &value in &config.barriers {
            if !barriers.insert(value) && !barriers.contains(value) {
                return Err(RouteError::InvalidConfiguration(format!(
                    "barrier value {value:?} is not representable"
                )));
            }
        }
        let classifier = BarrierClassifier::new(raster, barriers);
        debug!(
            "Barrier values {:?}, no-data {:?}",
            classifier.barriers().values().collect::<Vec<f64>>(),
            raster.nodata()
        );
        let cell_size = CellSize::from_coords(raster.x_coords(), raster.y_coords());
        debug!(
            "Building {}x{} pathfinder with cell size {}x{}",
            raster.width(),
            raster.height(),
            cell_size.width,
            cell_size.height
        );
        let grid = PathingGrid::from_classifier(
            &classifier,
            raster.width(),
            raster.height(),
            config.connectivity,
            cell_size,
        )?;
        debug!("{} of {} cells are crossable", grid.crossable_count(), grid.len());
        Ok(RasterPathfinder {
            raster,
            index: GridIndex::new(raster),
            grid,
            config,
        })
    }

    pub fn raster(&self) -> &Raster<T> {
        self.raster
    }
    pub fn config(&self) -> &RouteConfig<T> {
        &self.config
    }
    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn index(&self) -> &GridIndex<'a> {
        &self.index
    }

    /// Maps a query cell to a crossable cell, snapping if enabled for `endpoint`.
    fn resolve_endpoint(&self, cell: Cell, endpoint: Endpoint) -> Result<Cell> {
        if self.grid.can_move_to(cell) {
            return Ok(cell);
        }
        let snap = match endpoint {
            Endpoint::Start => self.config.snap_start,
            Endpoint::Goal => self.config.snap_goal,
        };
        if snap {
            CellSnapper::new(&self.grid).snap(cell, endpoint)
        } else {
            Err(RouteError::InvalidStartOrGoal { endpoint, cell })
        }
    }

    /// Resolves both points to crossable cells. Both points are bounds checked before
    /// either is snapped.
    pub fn resolve(&self, start: Coord, goal: Coord) -> Result<(Cell, Cell)> {
        let start_cell = self.index.to_cell(start)?;
        let goal_cell = self.index.to_cell(goal)?;
        Ok((
            self.resolve_endpoint(start_cell, Endpoint::Start)?,
            self.resolve_endpoint(goal_cell, Endpoint::Goal)?,
        ))
    }

    /// Whether a route between the two points exists, without searching for it.
    pub fn reachable(&self, start: Coord, goal: Coord) -> Result<bool> {
        let (start, goal) = self.resolve(start, goal)?;
        Ok(self.grid.reachable(&start, &goal))
    }

    /// Cheapest path between two crossable cells under the configured connectivity.
    pub fn search(&self, start: Cell, goal: Cell, cancel: &CancelToken) -> Result<Path> {
        AstarSolver::new().get_path_single_goal(&self.grid, start, goal, cancel)
    }

    pub fn route(&self, start: Coord, goal: Coord) -> Result<Route> {
        self.route_with_cancel(start, goal, &CancelToken::new())
    }

    /// Like [route](Self::route), but gives up with [RouteError::Cancelled] once `cancel`
    /// trips.
    pub fn route_with_cancel(&self, start: Coord, goal: Coord, cancel: &CancelToken) -> Result<Route> {
        let (start_cell, goal_cell) = self.resolve(start, goal)?;
        info!("Routing from {} at {} to {} at {}", start_cell, start, goal_cell, goal);
        let path = self.search(start_cell, goal_cell, cancel)?;
        info!("Found path of {} cells with cost {}", path.len(), path.cost);
        Ok(Route {
            start: start_cell,
            goal: goal_cell,
            path,
        })
    }

    /// Routes from `start` to whichever of `goals` is cheapest to reach. Every goal is
    /// resolved, and snapped if enabled, before the search starts.
    pub fn route_multiple_goals(&self, start: Coord, goals: &[Coord], cancel: &CancelToken) -> Result<Route> {
        let start_cell = self.index.to_cell(start)?;
        let goal_cells = goals
            .iter()
            .map(|goal| self.index.to_cell(*goal))
            .collect::<Result<Vec<Cell>>>()?;
        let start_cell = self.resolve_endpoint(start_cell, Endpoint::Start)?;
        let goal_cells = goal_cells
            .into_iter()
            .map(|cell| self.resolve_endpoint(cell, Endpoint::Goal))
            .collect::<Result<Vec<Cell>>>()?;
        let (goal, path) = AstarSolver::new().get_path_multiple_goals(&self.grid, start_cell, &goal_cells, cancel)?;
        Ok(Route {
            start: start_cell,
            goal,
            path,
        })
    }

    /// Writes `path` into a raster shaped like the input using the configured marker.
    pub fn rasterize(&self, path: &Path) -> Result<Raster<T>> {
        rasterize(path, self.raster, self.config.marker, self.grid.costs())
    }

    /// Routes between the two points and returns the path as a raster.
    pub fn route_raster(&self, start: Coord, goal: Coord) -> Result<Raster<T>> {
        let route = self.route(start, goal)?;
        self.rasterize(&route.path)
    }
}

/// One-shot routing: builds a [RasterPathfinder] for `raster` and returns the path from
/// `start` to `goal` as a raster of the same shape.
pub fn find_path<T: RasterValue>(
    raster: &Raster<T>,
    start: Coord,
    goal: Coord,
    config: &RouteConfig<T>,
) -> Result<Raster<T>> {
    RasterPathfinder::new(raster, config.clone())?.route_raster(start, goal)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::SQRT_2;
    use std::thread;

    use super::*;
    use crate::config::{Connectivity, PathMarker};
    use crate::grid_index::Axis;

    /// 5x5 unit raster with a wall of zeros across row 2, optionally with a gap.
    fn walled(gap: Option<usize>) -> Raster<f64> {
        let mut values = vec![1.0; 25];
        for x in 0..5 {
            if Some(x) != gap {
                values[2 * 5 + x] = 0.0;
            }
        }
        Raster::with_uniform_coords(5, 5, values, Coord::new(0.5, 0.5), 1.0, 1.0, None).unwrap()
    }

    fn config(connectivity: Connectivity) -> RouteConfig<f64> {
        RouteConfig::new().with_barriers([0.0]).with_connectivity(connectivity)
    }

    fn center(x: i32, y: i32) -> Coord {
        Coord::new(x as f64 + 0.5, y as f64 + 0.5)
    }

    #[test]
    fn wall_without_gap_has_no_path() {
        let raster = walled(None);
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let result = pathfinder.route(center(0, 0), center(4, 4));
        assert_eq!(
            result,
            Err(RouteError::NoPathFound {
                start: Cell::new(0, 0),
                goal: Cell::new(4, 4)
            })
        );
        assert_eq!(pathfinder.reachable(center(0, 0), center(4, 4)), Ok(false));
    }

    #[test]
    fn gap_is_crossed_diagonally() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let route = pathfinder.route(center(0, 0), center(4, 4)).unwrap();
        let expected: Vec<Cell> = (0..5).map(|i| Cell::new(i, i)).collect();
        assert_eq!(route.path.cells, expected);
        assert!((route.path.cost - 4.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn gap_is_crossed_orthogonally() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Four)).unwrap();
        let route = pathfinder.route(center(0, 0), center(4, 4)).unwrap();
        assert_eq!(route.path.len(), 9);
        assert_eq!(route.path.cost, 8.0);
        assert!(route.path.cells.contains(&Cell::new(2, 2)));
        assert!(route.path.is_connected(Connectivity::Four));
    }

    #[test]
    fn off_center_point_resolves_to_nearest_cell() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let route = pathfinder.route(Coord::new(0.7, 0.3), center(4, 4)).unwrap();
        assert_eq!(route.start, Cell::new(0, 0));
    }

    #[test]
    fn out_of_bounds_regardless_of_snapping() {
        let raster = walled(Some(2));
        let snapping = config(Connectivity::Eight).with_snap_start(true).with_snap_goal(true);
        let pathfinder = RasterPathfinder::new(&raster, snapping).unwrap();
        let result = pathfinder.route(center(0, 0), Coord::new(7.0, 2.0));
        assert_eq!(
            result,
            Err(RouteError::OutOfBounds {
                axis: Axis::X,
                value: 7.0,
                min: 0.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn blocked_start_without_snapping() {
        let raster = walled(None);
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let result = pathfinder.route(center(1, 2), center(4, 4));
        assert_eq!(
            result,
            Err(RouteError::InvalidStartOrGoal {
                endpoint: Endpoint::Start,
                cell: Cell::new(1, 2)
            })
        );
    }

    #[test]
    fn blocked_start_is_snapped() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight).with_snap_start(true)).unwrap();
        let route = pathfinder.route(center(1, 2), center(4, 4)).unwrap();
        assert_eq!(route.start, Cell::new(0, 1));
        assert_eq!(route.path.start(), Some(Cell::new(0, 1)));
        assert_eq!(route.goal, Cell::new(4, 4));
    }

    #[test]
    fn blocked_goal_without_snapping() {
        let raster = walled(Some(2));
        // Snapping the start does not extend to the goal.
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight).with_snap_start(true)).unwrap();
        let result = pathfinder.route(center(0, 0), center(3, 2));
        assert_eq!(
            result,
            Err(RouteError::InvalidStartOrGoal {
                endpoint: Endpoint::Goal,
                cell: Cell::new(3, 2)
            })
        );
        assert!(pathfinder.reachable(center(0, 0), center(3, 2)).is_err());
    }

    #[test]
    fn blocked_goal_is_snapped() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight).with_snap_goal(true)).unwrap();
        let route = pathfinder.route(center(0, 0), center(3, 2)).unwrap();
        // (2, 1) is the first crossable cell of the ring around (3, 2) in row-major order.
        assert_eq!(route.start, Cell::new(0, 0));
        assert_eq!(route.goal, Cell::new(2, 1));
        assert_eq!(route.path.goal(), Some(Cell::new(2, 1)));
        assert!((route.path.cost - (1.0 + SQRT_2)).abs() < 1e-9);
    }

    #[test]
    fn fully_blocked_raster_has_no_valid_cell() {
        let raster = Raster::with_uniform_coords(3, 3, vec![0.0; 9], Coord::new(0.5, 0.5), 1.0, 1.0, None).unwrap();
        let snapping = config(Connectivity::Eight).with_snap_start(true).with_snap_goal(true);
        let pathfinder = RasterPathfinder::new(&raster, snapping).unwrap();
        assert_eq!(
            pathfinder.route(center(0, 0), center(2, 2)),
            Err(RouteError::NoValidCell {
                endpoint: Endpoint::Start
            })
        );
    }

    #[test]
    fn same_cell_gives_single_cell_path() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Four)).unwrap();
        let route = pathfinder.route(Coord::new(3.2, 4.1), Coord::new(3.8, 4.9)).unwrap();
        assert_eq!(route.path, Path::single(Cell::new(3, 4)));
    }

    #[test]
    fn route_raster_marks_path_cells() {
        let raster = walled(Some(2));
        let output = find_path(&raster, center(0, 0), center(4, 4), &config(Connectivity::Eight)).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let value = output.get(Cell::new(x, y)).unwrap();
                if x == y {
                    assert_eq!(value, 1.0);
                } else {
                    assert!(value.is_nan());
                }
            }
        }
        // The input raster is untouched.
        assert_eq!(raster, walled(Some(2)));
    }

    #[test]
    fn step_index_marker() {
        let raster = walled(Some(2));
        let config = config(Connectivity::Eight).with_marker(PathMarker::StepIndex);
        let output = find_path(&raster, center(0, 0), center(4, 4), &config).unwrap();
        for i in 0..5 {
            assert_eq!(output.get(Cell::new(i, i)), Some((i + 1) as f64));
        }
    }

    #[test]
    fn nodata_and_nan_cells_are_blocked() {
        let mut values = vec![1.0; 9];
        values[1] = -9999.0;
        values[4] = f64::NAN;
        values[7] = -9999.0;
        let raster = Raster::with_uniform_coords(3, 3, values, Coord::new(0.5, 0.5), 1.0, 1.0, Some(-9999.0)).unwrap();
        // No barrier values configured: the middle column is blocked by nodata and NaN.
        let pathfinder = RasterPathfinder::new(&raster, RouteConfig::new()).unwrap();
        assert!(matches!(
            pathfinder.route(center(0, 1), center(2, 1)),
            Err(RouteError::NoPathFound { .. })
        ));
    }

    #[test]
    fn multiple_goals_pick_the_cheapest() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Four)).unwrap();
        let route = pathfinder
            .route_multiple_goals(center(0, 0), &[center(4, 4), center(4, 0)], &CancelToken::new())
            .unwrap();
        assert_eq!(route.goal, Cell::new(4, 0));
        assert_eq!(route.path.cost, 4.0);
    }

    #[test]
    fn concurrent_queries_share_one_pathfinder() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let expected = pathfinder.route(center(0, 0), center(4, 4)).unwrap();
        thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| pathfinder.route(center(0, 0), center(4, 4))))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), Ok(expected.clone()));
            }
        });
    }

    #[test]
    fn cancelled_token_stops_the_search() {
        let raster = walled(Some(2));
        let pathfinder = RasterPathfinder::new(&raster, config(Connectivity::Eight)).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = pathfinder.route_with_cancel(center(0, 0), center(4, 4), &cancel);
        assert_eq!(result, Err(RouteError::Cancelled));
    }
}
