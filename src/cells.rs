use std::fmt;

use crate::grid_dimensions::GridDimensions;

/// The four sides of a square cell.
///
/// `Top` points towards increasing `y`, `Right` towards increasing `x`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum GridDirection {
    Top,
    Left,
    Bottom,
    Right,
}

impl GridDirection {
    /// Canonical order used whenever neighbours are listed: top, left, bottom, right.
    pub const ALL: [GridDirection; 4] = [GridDirection::Top,
                                         GridDirection::Left,
                                         GridDirection::Bottom,
                                         GridDirection::Right];

    pub fn opposite(self) -> GridDirection {
        match self {
            GridDirection::Top => GridDirection::Bottom,
            GridDirection::Left => GridDirection::Right,
            GridDirection::Bottom => GridDirection::Top,
            GridDirection::Right => GridDirection::Left,
        }
    }

    /// (dx, dy) of one step in this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            GridDirection::Top => (0, 1),
            GridDirection::Left => (-1, 0),
            GridDirection::Bottom => (0, -1),
            GridDirection::Right => (1, 0),
        }
    }

    /// The direction leading from one cell to an orthogonally adjacent cell, if the coordinate delta is a
    /// single step.
    pub fn from_offset(dx: i64, dy: i64) -> Option<GridDirection> {
        match (dx, dy) {
            (1, 0) => Some(GridDirection::Right),
            (-1, 0) => Some(GridDirection::Left),
            (0, 1) => Some(GridDirection::Top),
            (0, -1) => Some(GridDirection::Bottom),
            _ => None,
        }
    }
}

/// Linear index of a cell, `x + y * width`.
///
/// Neighbour fields double as "neighbour exists" and "neighbour index": an out of bounds neighbour is
/// stored as `CellIndex::NONE`. Always go through `get` before indexing the cell array.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Ord, PartialOrd)]
pub struct CellIndex(u32);

impl CellIndex {
    /// The invalid index sentinel, all bits set.
    pub const NONE: CellIndex = CellIndex(u32::MAX);

    #[inline]
    pub fn new(index: u32) -> CellIndex {
        CellIndex(index)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == CellIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    /// The index as a `usize` or None for the sentinel.
    #[inline]
    pub fn get(self) -> Option<usize> {
        if self.is_none() {
            None
        } else {
            Some(self.0 as usize)
        }
    }

    /// The raw bits, `u32::MAX` for the sentinel.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            write!(f, "CellIndex(NONE)")
        } else {
            write!(f, "CellIndex({})", self.0)
        }
    }
}

impl From<u32> for CellIndex {
    fn from(index: u32) -> CellIndex {
        CellIndex(index)
    }
}

/// One square of the maze grid.
///
/// Cells never point at each other, they only hold plain indices into the single flat cell array that owns
/// them.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub index: CellIndex,

    pub wall_top: bool,
    pub wall_left: bool,
    pub wall_bottom: bool,
    pub wall_right: bool,

    pub neighbour_top: CellIndex,
    pub neighbour_left: CellIndex,
    pub neighbour_bottom: CellIndex,
    pub neighbour_right: CellIndex,

    pub is_visited: bool,
}

impl Cell {
    /// A fully walled, unvisited cell with its neighbour indices precomputed.
    pub fn new(x: u32, y: u32, dimensions: &GridDimensions) -> Cell {
        let (xi, yi) = (i64::from(x), i64::from(y));
        Cell {
            x,
            y,
            index: dimensions.index_of(xi, yi),

            wall_top: true,
            wall_left: true,
            wall_bottom: true,
            wall_right: true,

            neighbour_top: dimensions.index_of(xi, yi + 1),
            neighbour_left: dimensions.index_of(xi - 1, yi),
            neighbour_bottom: dimensions.index_of(xi, yi - 1),
            neighbour_right: dimensions.index_of(xi + 1, yi),

            is_visited: false,
        }
    }

    #[inline]
    pub fn wall(&self, direction: GridDirection) -> bool {
        match direction {
            GridDirection::Top => self.wall_top,
            GridDirection::Left => self.wall_left,
            GridDirection::Bottom => self.wall_bottom,
            GridDirection::Right => self.wall_right,
        }
    }

    #[inline]
    pub fn neighbour(&self, direction: GridDirection) -> CellIndex {
        match direction {
            GridDirection::Top => self.neighbour_top,
            GridDirection::Left => self.neighbour_left,
            GridDirection::Bottom => self.neighbour_bottom,
            GridDirection::Right => self.neighbour_right,
        }
    }

    /// Wall flags in the canonical top, left, bottom, right order.
    #[inline]
    pub fn walls(&self) -> [bool; 4] {
        [self.wall_top, self.wall_left, self.wall_bottom, self.wall_right]
    }

    /// Neighbour indices in the canonical top, left, bottom, right order, sentinels included.
    #[inline]
    pub fn neighbours(&self) -> [CellIndex; 4] {
        [self.neighbour_top, self.neighbour_left, self.neighbour_bottom, self.neighbour_right]
    }

    pub(crate) fn remove_wall(&mut self, direction: GridDirection) {
        match direction {
            GridDirection::Top => self.wall_top = false,
            GridDirection::Left => self.wall_left = false,
            GridDirection::Bottom => self.wall_bottom = false,
            GridDirection::Right => self.wall_right = false,
        }
    }
}
