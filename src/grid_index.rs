//! Mapping between real-world coordinates and raster cells.
use core::fmt;

use crate::cost::CellSize;
use crate::error::{Result, RouteError};
use crate::raster::{check_dimension, Coord, Raster, RasterValue};
use crate::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Nearest-cell lookup on one monotonic coordinate sequence.
#[derive(Clone, Debug)]
struct AxisIndex<'a> {
    axis: Axis,
    coords: &'a [f64],
    ascending: bool,
    /// Outer edge before the first cell center, in sequence order.
    first_edge: f64,
    /// Outer edge past the last cell center, in sequence order.
    last_edge: f64,
}

impl<'a> AxisIndex<'a> {
    fn new(axis: Axis, coords: &'a [f64], cell_size: f64) -> AxisIndex<'a> {
        let n = coords.len();
        let ascending = n < 2 || coords[n - 1] > coords[0];
        // Irregular sequences extend by half of their outermost spacing.
        let (first_half, last_half) = if n < 2 {
            (cell_size / 2.0, cell_size / 2.0)
        } else {
            (
                (coords[1] - coords[0]).abs() / 2.0,
                (coords[n - 1] - coords[n - 2]).abs() / 2.0,
            )
        };
        let (first_edge, last_edge) = if ascending {
            (coords[0] - first_half, coords[n - 1] + last_half)
        } else {
            (coords[0] + first_half, coords[n - 1] - last_half)
        };
        AxisIndex {
            axis,
            coords,
            ascending,
            first_edge,
            last_edge,
        }
    }

    /// The extent is half-open in sequence order: the outer edge of the first cell
    /// belongs to the raster, the outer edge of the last cell does not.
    fn contains(&self, value: f64) -> bool {
        if self.ascending {
            self.first_edge <= value && value < self.last_edge
        } else {
            self.first_edge >= value && value > self.last_edge
        }
    }

    fn nearest(&self, value: f64) -> Result<usize> {
        if !self.contains(value) {
            return Err(RouteError::OutOfBounds {
                axis: self.axis,
                value,
                min: self.first_edge.min(self.last_edge),
                max: self.first_edge.max(self.last_edge),
            });
        }
        // First index at or past `value` in sequence order.
        let pos = if self.ascending {
            self.coords.partition_point(|&c| c < value)
        } else {
            self.coords.partition_point(|&c| c > value)
        };
        if pos == 0 {
            return Ok(0);
        }
        if pos == self.coords.len() {
            return Ok(pos - 1);
        }
        // A point exactly between two centers lies on their shared edge, which belongs
        // to the later cell.
        let before = (value - self.coords[pos - 1]).abs();
        let after = (self.coords[pos] - value).abs();
        if before < after {
            Ok(pos - 1)
        } else {
            Ok(pos)
        }
    }
}

/// Resolves real-world [Coord]s to [Cell]s and back using the raster's coordinate
/// sequences.
#[derive(Clone, Debug)]
pub struct GridIndex<'a> {
    x: AxisIndex<'a>,
    y: AxisIndex<'a>,
}

impl<'a> GridIndex<'a> {
    pub fn new<T: RasterValue>(raster: &'a Raster<T>) -> GridIndex<'a> {
        let cell_size = CellSize::from_coords(raster.x_coords(), raster.y_coords());
        GridIndex {
            x: AxisIndex::new(Axis::X, raster.x_coords(), cell_size.width),
            y: AxisIndex::new(Axis::Y, raster.y_coords(), cell_size.height),
        }
    }

    /// The cell whose center is nearest to `point` along each axis. Fails with
    /// [RouteError::OutOfBounds] if `point` lies outside the raster extent.
    pub fn to_cell(&self, point: Coord) -> Result<Cell> {
        let col = check_dimension(Axis::X, self.x.nearest(point.x)?)?;
        let row = check_dimension(Axis::Y, self.y.nearest(point.y)?)?;
        Ok(Cell::new(col, row))
    }

    /// The center of `cell`, or [None] if it lies outside the grid.
    pub fn to_point(&self, cell: Cell) -> Option<Coord> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let x = self.x.coords.get(cell.x as usize)?;
        let y = self.y.coords.get(cell.y as usize)?;
        Some(Coord::new(*x, *y))
    }

    /// Bounding box of the raster as `(min, max)` corners.
    pub fn extent(&self) -> (Coord, Coord) {
        (
            Coord::new(
                self.x.first_edge.min(self.x.last_edge),
                self.y.first_edge.min(self.y.last_edge),
            ),
            Coord::new(
                self.x.first_edge.max(self.x.last_edge),
                self.y.first_edge.max(self.y.last_edge),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north_up() -> Raster<u8> {
        // 4 columns of 10 units starting at x=100, 3 rows of 10 units with y decreasing.
        Raster::with_uniform_coords(4, 3, vec![1; 12], Coord::new(105.0, 525.0), 10.0, -10.0, None)
            .unwrap()
    }

    #[test]
    fn nearest_cell_lookup() {
        let raster = north_up();
        let index = GridIndex::new(&raster);
        assert_eq!(index.to_cell(Coord::new(105.0, 525.0)), Ok(Cell::new(0, 0)));
        assert_eq!(index.to_cell(Coord::new(108.9, 521.2)), Ok(Cell::new(0, 0)));
        assert_eq!(index.to_cell(Coord::new(131.0, 506.0)), Ok(Cell::new(3, 2)));
        assert_eq!(index.to_point(Cell::new(2, 1)), Some(Coord::new(125.0, 515.0)));
        assert_eq!(index.to_point(Cell::new(4, 1)), None);
    }

    #[test]
    fn extent_is_half_open_in_sequence_order() {
        let raster = north_up();
        let index = GridIndex::new(&raster);
        // Left and top edges belong to the raster, right and bottom edges do not.
        assert_eq!(index.to_cell(Coord::new(100.0, 530.0)), Ok(Cell::new(0, 0)));
        assert!(matches!(
            index.to_cell(Coord::new(140.0, 520.0)),
            Err(RouteError::OutOfBounds { axis: Axis::X, .. })
        ));
        assert!(matches!(
            index.to_cell(Coord::new(120.0, 500.0)),
            Err(RouteError::OutOfBounds { axis: Axis::Y, .. })
        ));
        // A shared edge between two cells resolves to the later one.
        assert_eq!(index.to_cell(Coord::new(110.0, 520.0)), Ok(Cell::new(1, 1)));
        let (min, max) = index.extent();
        assert_eq!(min, Coord::new(100.0, 500.0));
        assert_eq!(max, Coord::new(140.0, 530.0));
    }

    #[test]
    fn irregular_spacing() {
        let raster = Raster::new(vec![0u8; 4], vec![0.0, 1.0, 5.0, 6.0], vec![0.0], None).unwrap();
        let index = GridIndex::new(&raster);
        assert_eq!(index.to_cell(Coord::new(2.9, 0.0)), Ok(Cell::new(1, 0)));
        assert_eq!(index.to_cell(Coord::new(3.1, 0.0)), Ok(Cell::new(2, 0)));
        assert_eq!(index.to_cell(Coord::new(-0.5, 0.0)), Ok(Cell::new(0, 0)));
        assert!(index.to_cell(Coord::new(6.5, 0.0)).is_err());
        // The single row borrows the mean column spacing of 2 for its extent.
        assert_eq!(index.to_cell(Coord::new(0.0, -0.9)), Ok(Cell::new(0, 0)));
        assert!(index.to_cell(Coord::new(0.0, 1.0)).is_err());
    }

    #[test]
    fn nan_is_out_of_bounds() {
        let raster = north_up();
        let index = GridIndex::new(&raster);
        assert!(index.to_cell(Coord::new(f64::NAN, 520.0)).is_err());
    }
}
