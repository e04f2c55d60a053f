use error_chain::bail;
use std::fmt;

use crate::cells::{CellIndex, GridDirection};
use crate::errors::*;
use crate::units::{EdgesCount, Height, NodesCount, Width};


/// Width and height of a rectangular grid and the row major coordinate <-> index mapping over it.
#[derive(Eq, PartialEq, Copy, Clone)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl GridDimensions {
    /// Validate a `width` x `height` grid.
    ///
    /// Both sides must be at least one cell and the cell count must leave `u32::MAX` free for the
    /// `CellIndex::NONE` sentinel.
    pub fn new(width: Width, height: Height) -> Result<GridDimensions> {
        let (Width(w), Height(h)) = (width, height);
        let fits = w.checked_mul(h).map_or(false, |size| size < u32::MAX as usize);
        if w == 0 || h == 0 || !fits {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        Ok(GridDimensions {
            width: w as u32,
            height: h as u32,
        })
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Node and edge counts of the passage graph of a perfect maze on this grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (NodesCount(cells_count), EdgesCount(cells_count - 1))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Row major index of `(x, y)`, or `CellIndex::NONE` when the coordinate lies outside the grid.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> CellIndex {
        if self.is_valid_coordinate(x, y) {
            CellIndex::new((x + y * i64::from(self.width)) as u32)
        } else {
            CellIndex::NONE
        }
    }

    /// Inverse of `index_of`. None for the sentinel or an index past the end of the grid.
    #[inline]
    pub fn coordinate_of(&self, index: CellIndex) -> Option<(u32, u32)> {
        index.get()
             .filter(|&i| i < self.size())
             .map(|i| {
                 let i = i as u32;
                 (i % self.width, i / self.width)
             })
    }

    /// The index one step away from `(x, y)` in `direction`, sentinel checked.
    #[inline]
    pub fn neighbour_index(&self, x: u32, y: u32, direction: GridDirection) -> CellIndex {
        let (dx, dy) = direction.offset();
        self.index_of(i64::from(x) + dx, i64::from(y) + dy)
    }

    /// Coordinates in index order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            dimensions: *self,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }
}

impl fmt::Debug for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GridDimensions :: width: {:?}, height: {:?}", self.width, self.height)
    }
}


#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let width = self.dimensions.width as usize;
            let coord = ((self.current_cell_number % width) as u32,
                         (self.current_cell_number / width) as u32);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
