use core::fmt;

use crate::error::RouteError;
use crate::Cell;

/// The neighbour relation of the search graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Connectivity {
    /// Axis-aligned neighbours only.
    Four,
    /// Axis-aligned and diagonal neighbours.
    #[default]
    Eight,
}

const FOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const EIGHT_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Connectivity {
    /// Neighbour offsets as `(dx, dy)`, in row-major order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &FOUR_OFFSETS,
            Connectivity::Eight => &EIGHT_OFFSETS,
        }
    }

    pub fn are_neighbours(self, a: Cell, b: Cell) -> bool {
        match self {
            Connectivity::Four => a.manhattan_distance(&b) == 1,
            Connectivity::Eight => a.move_distance(&b) == 1,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = RouteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(RouteError::InvalidConfiguration(format!(
                "connectivity must be 4 or 8, got {other}"
            ))),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(connectivity: Connectivity) -> u8 {
        match connectivity {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-connectivity", u8::from(*self))
    }
}

/// What is written into path cells of the output raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathMarker {
    /// Every path cell is set to one.
    #[default]
    One,
    /// Path cells are numbered `1..=n` from the start.
    StepIndex,
    /// Path cells hold their accumulated cost from the start, so the start is zero and
    /// the empty value must not be. Integer rasters receive the cost rounded to the
    /// nearest whole number.
    AccumulatedCost,
}

/// Options for a routing query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig<T> {
    /// Raw cell values that may not be crossed. The raster's no-data sentinel and NaN
    /// cells are blocked independently of this list.
    pub barriers: Vec<T>,
    /// Relocate a blocked start to the nearest crossable cell.
    pub snap_start: bool,
    /// Relocate a blocked goal to the nearest crossable cell.
    pub snap_goal: bool,
    pub connectivity: Connectivity,
    pub marker: PathMarker,
}

impl<T> Default for RouteConfig<T> {
    fn default() -> Self {
        RouteConfig {
            barriers: Vec::new(),
            snap_start: false,
            snap_goal: false,
            connectivity: Connectivity::default(),
            marker: PathMarker::default(),
        }
    }
}

impl<T> RouteConfig<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_barriers<I: IntoIterator<Item = T>>(mut self, barriers: I) -> Self {
        self.barriers = barriers.into_iter().collect();
        self
    }

    pub fn with_snap_start(mut self, snap: bool) -> Self {
        self.snap_start = snap;
        self
    }

    pub fn with_snap_goal(mut self, snap: bool) -> Self {
        self.snap_goal = snap;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_marker(mut self, marker: PathMarker) -> Self {
        self.marker = marker;
        self
    }
}
