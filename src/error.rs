use core::fmt;
use thiserror::Error;

use crate::grid_index::Axis;
use crate::Cell;

/// Which end of a route a failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Every way a routing query can fail. None of these are fatal: the raster and the
/// pathfinder stay usable after any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("{axis} coordinate {value} lies outside the raster extent [{min}, {max}]")]
    OutOfBounds {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{endpoint} cell {cell} is not crossable and snapping is disabled")]
    InvalidStartOrGoal { endpoint: Endpoint, cell: Cell },

    #[error("no crossable cell exists to snap the {endpoint} to")]
    NoValidCell { endpoint: Endpoint },

    #[error("no path from {start} to {goal}")]
    NoPathFound { start: Cell, goal: Cell },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("search was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, RouteError>;
