use error_chain::bail;
use std::ops::{Add, Mul, Sub};

use crate::cells::Cell;
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::units::CellSize;


#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> WorldPoint {
        WorldPoint { x, y }
    }

    pub fn splat(v: f32) -> WorldPoint {
        WorldPoint { x: v, y: v }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for WorldPoint {
    type Output = WorldPoint;
    fn add(self, other: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = WorldPoint;
    fn sub(self, other: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = WorldPoint;
    fn mul(self, scale: f32) -> WorldPoint {
        WorldPoint::new(self.x * scale, self.y * scale)
    }
}

/// Places a grid in world space, centred on the world origin.
///
/// Rendering and gameplay must both go through this mapping so they agree on where a cell is. Note that it
/// mirrors both axes: grid `x` and `y` grow towards negative world coordinates.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WorldLayout {
    dimensions: GridDimensions,
    cell_size: f32,
}

impl WorldLayout {
    pub fn new(dimensions: GridDimensions, cell_size: CellSize) -> Result<WorldLayout> {
        let CellSize(size) = cell_size;
        if !size.is_finite() || size <= 0.0 {
            bail!(ErrorKind::InvalidCellSize(size));
        }
        Ok(WorldLayout {
            dimensions,
            cell_size: size,
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    /// `(width, height) / 2 * cell_size`
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        WorldPoint::new(self.dimensions.width() as f32, self.dimensions.height() as f32) *
        0.5 * self.cell_size
    }

    /// World position of the grid corner `(x, y)`: `origin - (x, y) * cell_size`.
    ///
    /// Takes signed grid coordinates as corners one past the last cell are needed to draw the outer walls.
    #[inline]
    pub fn world_position(&self, x: i64, y: i64) -> WorldPoint {
        WorldPoint::new(-x as f32, -y as f32) * self.cell_size + self.origin()
    }

    /// Where a player standing on `cell` is placed.
    pub fn player_position(&self, cell: &Cell) -> WorldPoint {
        let inset = self.cell_size / 2.0 - self.cell_size / 40.0;
        self.world_position(i64::from(cell.x), i64::from(cell.y)) - WorldPoint::splat(inset)
    }

    /// The cell whose world square contains `point`, None outside the grid.
    pub fn grid_position(&self, point: WorldPoint) -> Option<(u32, u32)> {
        let origin = self.origin();
        let gx = ((origin.x - point.x) / self.cell_size).floor();
        let gy = ((origin.y - point.y) / self.cell_size).floor();
        if !gx.is_finite() || !gy.is_finite() {
            return None;
        }
        let (x, y) = (gx as i64, gy as i64);
        if self.dimensions.is_valid_coordinate(x, y) {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }
}
