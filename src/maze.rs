use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;
use std::slice;

use crate::cells::{Cell, CellIndex, GridDirection};
use crate::grid_dimensions::GridDimensions;
use crate::units::{EdgesCount, NodesCount};


/// A finished maze: the carved cell array and the grid it was carved on.
///
/// The cells are handed over as an immutable snapshot, nothing can change the walls after generation.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    dimensions: GridDimensions,
    seed: u64,
    cells: Vec<Cell>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: dimensions: {:?}, seed: {:?}, links: {:?}",
               self.dimensions, self.seed, self.links_count())
    }
}

impl Maze {
    pub(crate) fn from_carved_cells(dimensions: GridDimensions, seed: u64, cells: Vec<Cell>) -> Maze {
        debug_assert_eq!(cells.len(), dimensions.size());
        Maze {
            dimensions,
            seed,
            cells,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The seed the maze was carved from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    /// The cell at `index`, None for the sentinel or an index past the end.
    #[inline]
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        index.get().and_then(|i| self.cells.get(i))
    }

    #[inline]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<&Cell> {
        self.cell(self.dimensions.index_of(x, y))
    }

    /// Is there a passage out of the cell at `index` in `direction`?
    ///
    /// A missing wall facing outside the grid does not count as a passage.
    pub fn is_passage_open(&self, index: CellIndex, direction: GridDirection) -> bool {
        self.cell(index)
            .map_or(false,
                    |cell| !cell.wall(direction) && cell.neighbour(direction).is_some())
    }

    /// Number of carved passages between pairs of cells.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every passage once, as `(lower index, higher index)`, in cell index order.
    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            cells: self.cells.iter(),
            pending: None,
        }
    }

    /// The maze as a graph: node `i` is cell `i`, one edge per passage.
    pub fn passage_graph(&self) -> UnGraph<(), ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_links() {
            let _ = graph.add_edge(NodeIndex::new(a.raw() as usize), NodeIndex::new(b.raw() as usize), ());
        }
        graph
    }

    /// Every shared wall is open or closed on both sides.
    pub fn has_symmetric_walls(&self) -> bool {
        self.cells.iter().all(|cell| {
            GridDirection::ALL.iter().all(|&dir| {
                match self.cell(cell.neighbour(dir)) {
                    Some(neighbour) => cell.wall(dir) == neighbour.wall(dir.opposite()),
                    None => true,
                }
            })
        })
    }

    /// A perfect maze: symmetric walls and a passage graph that is a spanning tree, so exactly one route
    /// between any two cells.
    pub fn is_perfect(&self) -> bool {
        if !self.has_symmetric_walls() {
            return false;
        }
        let graph = self.passage_graph();
        graph.edge_count() == self.size() - 1 && algo::connected_components(&graph) == 1
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Passages found by looking at the top and right walls of each cell, which sees every shared wall once.
#[derive(Debug, Clone)]
pub struct LinksIter<'a> {
    cells: slice::Iter<'a, Cell>,
    pending: Option<(CellIndex, CellIndex)>,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (CellIndex, CellIndex);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(link) = self.pending.take() {
            return Some(link);
        }
        for cell in self.cells.by_ref() {
            let right = if !cell.wall_right && cell.neighbour_right.is_some() {
                Some((cell.index, cell.neighbour_right))
            } else {
                None
            };
            let top = if !cell.wall_top && cell.neighbour_top.is_some() {
                Some((cell.index, cell.neighbour_top))
            } else {
                None
            };
            match (right, top) {
                (Some(r), Some(t)) => {
                    self.pending = Some(t);
                    return Some(r);
                }
                (Some(link), None) | (None, Some(link)) => return Some(link),
                (None, None) => {}
            }
        }
        None
    }
}
