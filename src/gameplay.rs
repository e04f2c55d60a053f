use crate::cells::{CellIndex, GridDirection};
use crate::grid_positions::{WorldLayout, WorldPoint};
use crate::maze::Maze;

/// The cell reached by stepping out of `from` in `direction`.
///
/// Only possible through an open wall. No route finding happens here, the maze walls are the only rule.
pub fn try_move(maze: &Maze, from: CellIndex, direction: GridDirection) -> Option<CellIndex> {
    let cell = maze.cell(from)?;
    if cell.wall(direction) {
        return None;
    }
    let destination = cell.neighbour(direction);
    maze.cell(destination).map(|next| next.index)
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveRefusal {
    /// The previous move has not finished yet.
    Busy,
    /// A wall, or the edge of the maze, is in the way.
    Blocked,
}

/// A player walking the passages of a maze.
///
/// Only one move is in flight at a time: `try_move` locks movement until `finish_move` is called, which is
/// when whatever is animating the player has arrived.
#[derive(Debug, Clone)]
pub struct Player {
    cell: CellIndex,
    can_move: bool,
    path: Vec<CellIndex>,
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Player {
    /// Players always start on the cell the maze was carved from, index 0.
    pub fn new() -> Player {
        let start = CellIndex::new(0);
        Player {
            cell: start,
            can_move: true,
            path: vec![start],
        }
    }

    #[inline]
    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Every cell stood on so far, starting cell first.
    pub fn path(&self) -> &[CellIndex] {
        &self.path
    }

    pub fn try_move(&mut self, maze: &Maze, direction: GridDirection) -> Result<CellIndex, MoveRefusal> {
        if !self.can_move {
            return Err(MoveRefusal::Busy);
        }
        let destination = try_move(maze, self.cell, direction).ok_or(MoveRefusal::Blocked)?;
        self.can_move = false;
        self.cell = destination;
        self.path.push(destination);
        Ok(destination)
    }

    pub fn finish_move(&mut self) {
        self.can_move = true;
    }

    pub fn world_position(&self, maze: &Maze, layout: &WorldLayout) -> Option<WorldPoint> {
        maze.cell(self.cell).map(|cell| layout.player_position(cell))
    }
}
