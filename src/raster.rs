//! The raster surface routed over: a row-major grid of values with one real-world
//! coordinate per column and one per row.
use core::fmt;
use num_traits::{NumCast, One, ToPrimitive, Zero};
use std::fmt::Debug;

use crate::error::{Result, RouteError};
use crate::grid_index::Axis;
use crate::Cell;

/// Numeric cell types a [Raster] can hold.
pub trait RasterValue: Copy + PartialEq + Debug + NumCast + Zero + One {}

impl<T> RasterValue for T where T: Copy + PartialEq + Debug + NumCast + Zero + One {}

/// Returns [true] if the value is a floating point NaN. Integer values never are.
pub fn is_nan<T: ToPrimitive>(value: T) -> bool {
    value.to_f64().map_or(false, f64::is_nan)
}

/// A real-world position in the raster's coordinate reference system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 2-D grid of values with per-axis coordinate sequences. `x_coords` holds the center
/// of every column and `y_coords` the center of every row; both are strictly monotonic
/// but may be irregularly spaced and may decrease (north-up rasters usually have
/// decreasing `y_coords`).
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    values: Vec<T>,
    x_coords: Vec<f64>,
    y_coords: Vec<f64>,
    nodata: Option<T>,
}

impl<T: RasterValue> Raster<T> {
    /// Builds a raster from row-major `values`. Fails with
    /// [RouteError::InvalidConfiguration] if the value count does not match the
    /// coordinate sequences or if a coordinate sequence is empty, non-finite or not
    /// strictly monotonic.
    pub fn new(
        values: Vec<T>,
        x_coords: Vec<f64>,
        y_coords: Vec<f64>,
        nodata: Option<T>,
    ) -> Result<Raster<T>> {
        validate_axis(Axis::X, &x_coords)?;
        validate_axis(Axis::Y, &y_coords)?;
        let width = x_coords.len();
        let height = y_coords.len();
        if values.len() != width * height {
            return Err(RouteError::InvalidConfiguration(format!(
                "raster has {} values but its coordinates describe a {}x{} grid",
                values.len(),
                width,
                height
            )));
        }
        Ok(Raster {
            width,
            height,
            values,
            x_coords,
            y_coords,
            nodata,
        })
    }

    /// Builds a regularly spaced raster. `origin` is the center of cell (0, 0); a
    /// negative `cell_height` gives the usual north-up layout.
    pub fn with_uniform_coords(
        width: usize,
        height: usize,
        values: Vec<T>,
        origin: Coord,
        cell_width: f64,
        cell_height: f64,
        nodata: Option<T>,
    ) -> Result<Raster<T>> {
        let x_coords = (0..width)
            .map(|i| origin.x + i as f64 * cell_width)
            .collect();
        let y_coords = (0..height)
            .map(|j| origin.y + j as f64 * cell_height)
            .collect();
        Raster::new(values, x_coords, y_coords, nodata)
    }

    /// A raster with the same shape, coordinates and no-data sentinel as `self`, filled
    /// with `value`.
    pub fn filled_like(&self, value: T) -> Raster<T> {
        Raster {
            width: self.width,
            height: self.height,
            values: vec![value; self.values.len()],
            x_coords: self.x_coords.clone(),
            y_coords: self.y_coords.clone(),
            nodata: self.nodata,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn x_coords(&self) -> &[f64] {
        &self.x_coords
    }
    pub fn y_coords(&self) -> &[f64] {
        &self.y_coords
    }
    pub fn values(&self) -> &[T] {
        &self.values
    }
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Row-major index of an in-bounds cell.
    pub fn get_ix(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.y as usize * self.width + cell.x as usize
    }

    pub fn get(&self, cell: Cell) -> Option<T> {
        if self.in_bounds(cell) {
            Some(self.values[self.get_ix(cell)])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, cell: Cell, value: T) {
        let ix = self.get_ix(cell);
        self.values[ix] = value;
    }

    /// Whether `value` is this raster's no-data sentinel. A NaN sentinel matches NaN.
    pub fn is_nodata(&self, value: T) -> bool {
        match self.nodata {
            Some(nodata) => nodata == value || (is_nan(nodata) && is_nan(value)),
            None => false,
        }
    }
}

fn validate_axis(axis: Axis, coords: &[f64]) -> Result<()> {
    if coords.is_empty() {
        return Err(RouteError::InvalidConfiguration(format!(
            "{axis} coordinate sequence is empty"
        )));
    }
    if let Some(c) = coords.iter().find(|c| !c.is_finite()) {
        return Err(RouteError::InvalidConfiguration(format!(
            "{axis} coordinate sequence contains non-finite value {c}"
        )));
    }
    check_dimension(axis, coords.len())?;
    let increasing = coords.windows(2).all(|w| w[0] < w[1]);
    let decreasing = coords.windows(2).all(|w| w[0] > w[1]);
    if !increasing && !decreasing {
        return Err(RouteError::InvalidConfiguration(format!(
            "{axis} coordinate sequence is not strictly monotonic"
        )));
    }
    Ok(())
}

/// Cells are addressed with `i32` components, so neither axis may hold more entries
/// than `i32::MAX`.
pub(crate) fn check_dimension(axis: Axis, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        RouteError::InvalidConfiguration(format!("{axis} axis has {len} entries, more than a cell can address"))
    })
}

impl<T: RasterValue> fmt::Display for Raster<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Raster {}x{}:", self.width, self.height)?;
        for row in self.values.chunks(self.width) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}
