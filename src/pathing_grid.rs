use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::barrier::BarrierClassifier;
use crate::config::Connectivity;
use crate::cost::{CellSize, CostModel};
use crate::error::{Result, RouteError};
use crate::raster::RasterValue;
use crate::{Cell, N_SMALLVEC_SIZE};

/// The implicit search graph over a raster: one node per crossable cell, edges to
/// crossable neighbours under the configured [Connectivity], weighted by the
/// [CostModel]. Maintains connected components using a [UnionFind] so that
/// unreachable goals are rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    crossable: Vec<bool>,
    crossable_count: usize,
    costs: CostModel,
    pub components: UnionFind<usize>,
}

impl PathingGrid {
    /// Builds the graph from a row-major crossability mask and generates its components.
    /// Fails with [RouteError::InvalidConfiguration] if the mask does not hold
    /// `width * height` entries.
    pub fn new(width: usize, height: usize, crossable: Vec<bool>, costs: CostModel) -> Result<PathingGrid> {
        if crossable.len() != width * height {
            return Err(RouteError::InvalidConfiguration(format!(
                "crossability mask has {} entries but the grid is {}x{}",
                crossable.len(),
                width,
                height
            )));
        }
        let crossable_count = crossable.iter().filter(|&&c| c).count();
        let mut grid = PathingGrid {
            width,
            height,
            crossable,
            crossable_count,
            costs,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn from_classifier<T: RasterValue>(
        classifier: &BarrierClassifier<T>,
        width: usize,
        height: usize,
        connectivity: Connectivity,
        cell_size: CellSize,
    ) -> Result<PathingGrid> {
        PathingGrid::new(
            width,
            height,
            classifier.crossable_mask(),
            CostModel::new(cell_size, connectivity),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn len(&self) -> usize {
        self.crossable.len()
    }
    pub fn is_empty(&self) -> bool {
        self.crossable.is_empty()
    }
    pub fn costs(&self) -> &CostModel {
        &self.costs
    }
    pub fn connectivity(&self) -> Connectivity {
        self.costs.connectivity()
    }
    /// Number of crossable cells.
    pub fn crossable_count(&self) -> usize {
        self.crossable_count
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }
    pub fn get_ix(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.width + cell.x as usize
    }
    pub fn get_cell(&self, ix: usize) -> Cell {
        Cell::new((ix % self.width) as i32, (ix / self.width) as i32)
    }

    /// Whether a path may enter `cell`.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.crossable[self.get_ix(cell)]
    }

    /// Crossable neighbours of the cell at `ix` and the cost of stepping to each, in
    /// row-major neighbour order.
    pub fn neighborhood_ix_and_cost(&self, ix: usize) -> SmallVec<[(usize, f64); N_SMALLVEC_SIZE]> {
        let cell = self.get_cell(ix);
        self.connectivity()
            .offsets()
            .iter()
            .filter_map(|&(dx, dy)| {
                let n = Cell::new(cell.x + dx, cell.y + dy);
                if self.can_move_to(n) {
                    Some((self.get_ix(n), self.costs.step_cost(dx, dy)))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: &Cell) -> usize {
        self.components.find(self.get_ix(*cell))
    }

    /// Checks if start and goal are crossable and on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            let start_ix = self.get_ix(*start);
            let goal_ix = self.get_ix(*goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up crossable neighbours to the
    /// same components. Each cell only links forward (right and down), which covers
    /// every edge once.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for a {}x{} grid with {}",
            self.width,
            self.height,
            self.connectivity()
        );
        let forward: &[(i32, i32)] = match self.connectivity() {
            Connectivity::Four => &[(1, 0), (0, 1)],
            Connectivity::Eight => &[(1, 0), (-1, 1), (0, 1), (1, 1)],
        };
        self.components = UnionFind::new(self.width * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                if !self.can_move_to(cell) {
                    continue;
                }
                let parent_ix = self.get_ix(cell);
                for &(dx, dy) in forward {
                    let n = Cell::new(x + dx, y + dy);
                    if self.can_move_to(n) {
                        let ix = self.get_ix(n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.crossable.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|&c| if c { '.' } else { '#' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl PathingGrid {
    /// Unit-cell grid with the given cells blocked, for tests.
    pub(crate) fn unit(width: usize, height: usize, blocked: &[Cell], connectivity: Connectivity) -> PathingGrid {
        let mut mask = vec![true; width * height];
        for cell in blocked {
            mask[cell.y as usize * width + cell.x as usize] = false;
        }
        let size = CellSize {
            width: 1.0,
            height: 1.0,
        };
        PathingGrid::new(width, height, mask, CostModel::new(size, connectivity)).unwrap()
    }
}
