use std::fmt;

use crate::cells::{Cell, CellIndex};
use crate::gameplay::Player;
use crate::maze::Maze;
use crate::utils::{fnv_hashset, FnvHashSet};


pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: &Cell) -> String {
        String::from("   ")
    }
}

/// Marks the cells a player has walked through with a dot and the cell they stand on with a `P`.
#[derive(Debug)]
pub struct PlayerPathDisplay {
    walked: FnvHashSet<CellIndex>,
    current: CellIndex,
}

impl PlayerPathDisplay {
    pub fn new(player: &Player) -> PlayerPathDisplay {
        let mut walked = fnv_hashset(player.path().len());
        walked.extend(player.path().iter().cloned());
        PlayerPathDisplay {
            walked,
            current: player.cell(),
        }
    }
}

impl GridDisplay for PlayerPathDisplay {
    fn render_cell_body(&self, cell: &Cell) -> String {
        if cell.index == self.current {
            String::from(" P ")
        } else if self.walked.contains(&cell.index) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

struct EmptyDisplay;
impl GridDisplay for EmptyDisplay {}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Box drawing text rendering of a maze.
///
/// The top row of the grid (`y == height - 1`) is printed first so that a cell's top wall is above it on
/// screen. Every cell body is 3 glyphs wide, the walls run along the grid lines between the bodies.
pub fn render_text(maze: &Maze, display: &dyn GridDisplay) -> String {
    let (width, height) = (i64::from(maze.width()), i64::from(maze.height()));

    // Wall along the horizontal grid line `line_y`, under the cell at (x, line_y).
    let horizontal_wall = |x: i64, line_y: i64| -> bool {
        let above = maze.cell_at(x, line_y).map_or(false, |c| c.wall_bottom);
        let below = maze.cell_at(x, line_y - 1).map_or(false, |c| c.wall_top);
        above || below
    };
    // Wall along the vertical grid line `line_x`, left of the cell at (line_x, y).
    let vertical_wall = |line_x: i64, y: i64| -> bool {
        let right = maze.cell_at(line_x, y).map_or(false, |c| c.wall_left);
        let left = maze.cell_at(line_x - 1, y).map_or(false, |c| c.wall_right);
        right || left
    };

    let mut output = String::new();
    for line_y in (0..=height).rev() {

        // Grid line with its corners
        for line_x in 0..=width {
            let show_left_section = line_x > 0 && horizontal_wall(line_x - 1, line_y);
            let show_right_section = line_x < width && horizontal_wall(line_x, line_y);
            let show_up_section = line_y < height && vertical_wall(line_x, line_y);
            let show_down_section = line_y > 0 && vertical_wall(line_x, line_y - 1);

            let corner = match (show_left_section,
                                show_right_section,
                                show_up_section,
                                show_down_section) {
                (true, true, true, true) => WALL_LRUD,
                (true, true, true, false) => WALL_LRU,
                (true, true, false, true) => WALL_LRD,
                (true, false, true, true) => WALL_LUD,
                (false, true, true, true) => WALL_RUD,
                (true, true, false, false) => WALL_LR,
                (false, false, true, true) => WALL_UD,
                (false, true, true, false) => WALL_RU,
                (true, false, false, true) => WALL_LD,
                (true, false, true, false) => WALL_LU,
                (false, true, false, true) => WALL_RD,
                (true, false, false, false) => WALL_L,
                (false, true, false, false) => WALL_R,
                (false, false, true, false) => WALL_U,
                (false, false, false, true) => WALL_D,
                (false, false, false, false) => " ",
            };
            output.push_str(corner);

            if line_x < width {
                output.push_str(if horizontal_wall(line_x, line_y) { WALL_LR_3 } else { "   " });
            }
        }
        output.push('\n');

        // Cell bodies of the row below the grid line
        if line_y > 0 {
            let y = line_y - 1;
            for line_x in 0..=width {
                output.push_str(if vertical_wall(line_x, y) { WALL_UD } else { " " });
                if let Some(cell) = maze.cell_at(line_x, y) {
                    output.push_str(&display.render_cell_body(cell));
                }
            }
            output.push('\n');
        }
    }

    output
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, &EmptyDisplay))
    }
}
