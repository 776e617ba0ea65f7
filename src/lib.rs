//! # raster_pathfinding
//!
//! Least-cost routing between real-world points on a raster. Cells are classified as
//! crossable or blocked from their raw values, query points are resolved to cells
//! through the raster's coordinate sequences, and the cheapest path is found with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using physical step costs
//! derived from the cell size. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists. The result can be written back
//! into a raster shaped like the input.
//!
//! ```
//! use raster_pathfinding::{find_path, Coord, Raster, RouteConfig};
//!
//! // A 3x3 raster with a barrier (0) in the middle.
//! let values = vec![1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0];
//! let raster = Raster::with_uniform_coords(3, 3, values, Coord::new(0.5, 0.5), 1.0, 1.0, None).unwrap();
//! let config = RouteConfig::new().with_barriers([0.0]);
//! let output = find_path(&raster, Coord::new(0.5, 0.5), Coord::new(2.5, 2.5), &config).unwrap();
//! assert_eq!(output.values().iter().filter(|v| **v == 1.0).count(), 4);
//! ```
pub mod barrier;
pub mod cancel;
pub mod config;
pub mod cost;
pub mod error;
pub mod grid_index;
pub mod path;
pub mod pathfinder;
pub mod pathing_grid;
pub mod raster;
pub mod rasterize;
mod search;
pub mod snap;
pub mod solver;

/// A raster cell; `x` is the column and `y` the row, counted from the first entry of
/// the respective coordinate sequence.
pub use grid_util::point::Point as Cell;

pub use crate::barrier::{BarrierClassifier, BarrierSet};
pub use crate::cancel::CancelToken;
pub use crate::config::{Connectivity, PathMarker, RouteConfig};
pub use crate::cost::{CellSize, CostModel};
pub use crate::error::{Endpoint, Result, RouteError};
pub use crate::grid_index::{Axis, GridIndex};
pub use crate::path::Path;
pub use crate::pathfinder::{find_path, RasterPathfinder, Route};
pub use crate::pathing_grid::PathingGrid;
pub use crate::raster::{Coord, Raster, RasterValue};
pub use crate::rasterize::rasterize;
pub use crate::snap::CellSnapper;
pub use crate::solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Inline capacity of per-cell neighbour lists; covers the full 8-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
