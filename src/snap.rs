//! Relocation of blocked query cells to the nearest crossable cell.
use log::info;

use crate::error::{Endpoint, Result, RouteError};
use crate::pathing_grid::PathingGrid;
use crate::Cell;

/// Finds the nearest crossable cell by scanning square rings of growing radius around
/// the query cell. Rings follow the full 8-neighbourhood regardless of the search
/// connectivity, and each ring is scanned in row-major order so the first hit is
/// reproducible.
#[derive(Clone, Copy, Debug)]
pub struct CellSnapper<'a> {
    grid: &'a PathingGrid,
}

impl<'a> CellSnapper<'a> {
    pub fn new(grid: &'a PathingGrid) -> CellSnapper<'a> {
        CellSnapper { grid }
    }

    /// The nearest crossable cell to `cell`, which is `cell` itself if it is crossable,
    /// or [None] if the grid has no crossable cell at all.
    pub fn nearest_crossable(&self, cell: Cell) -> Option<Cell> {
        if self.grid.can_move_to(cell) {
            return Some(cell);
        }
        if self.grid.crossable_count() == 0 {
            return None;
        }
        let max_x = self.grid.width() as i32 - 1;
        let max_y = self.grid.height() as i32 - 1;
        // Radius at which the ring has swept past every corner of the grid.
        let max_radius = [cell.x, max_x - cell.x, cell.y, max_y - cell.y]
            .into_iter()
            .map(i32::abs)
            .max()
            .unwrap_or(0);
        (1..=max_radius).find_map(|r| self.scan_ring(cell, r, max_x, max_y))
    }

    fn scan_ring(&self, center: Cell, r: i32, max_x: i32, max_y: i32) -> Option<Cell> {
        let top = center.y - r;
        let bottom = center.y + r;
        let left = center.x - r;
        let right = center.x + r;
        for y in top.max(0)..=bottom.min(max_y) {
            if y == top || y == bottom {
                for x in left.max(0)..=right.min(max_x) {
                    let c = Cell::new(x, y);
                    if self.grid.can_move_to(c) {
                        return Some(c);
                    }
                }
            } else {
                for x in [left, right] {
                    let c = Cell::new(x, y);
                    if self.grid.can_move_to(c) {
                        return Some(c);
                    }
                }
            }
        }
        None
    }

    /// Snaps the query cell of `endpoint`, failing with [RouteError::NoValidCell] if
    /// nothing on the grid is crossable.
    pub fn snap(&self, cell: Cell, endpoint: Endpoint) -> Result<Cell> {
        let snapped = self
            .nearest_crossable(cell)
            .ok_or(RouteError::NoValidCell { endpoint })?;
        if snapped != cell {
            info!("Snapped {} from blocked cell {} to {}", endpoint, cell, snapped);
        }
        Ok(snapped)
    }
}
