use docopt::Docopt;
use error_chain::bail;
use itertools::Itertools;
use log::{info, warn, LevelFilter};
use serde_derive::Deserialize;
use mazes::{
    cells::GridDirection,
    gameplay::{MoveRefusal, Player},
    grid_displays::{self, PlayerPathDisplay},
    maze::Maze,
    renderers,
    request::{MazeRequest, SeedChoice},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w> --height=<h>] [--seed=<s>] [--cell-size=<c>] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--save-edges=<path>] [--walk=<dirs>] [--quiet]

Options:
    -h --help              Show this screen.
    --width=<w>            The grid width in a w*h grid [default: 20].
    --height=<h>           The grid height in a w*h grid [default: 20].
    --seed=<s>             Seed for the maze generator. A random seed below 20000 is chosen and printed if not given.
    --cell-size=<c>        Side length of one cell in world units [default: 0.5].
    --text-out=<path>      Output file path for a textual rendering of the maze. Printed to stdout if not given.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze [default: 10] max 255.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --walk=<dirs>          Walk a player from cell 0, one move per letter: T(op), L(eft), B(ottom), R(ight). The walked path is shown in the text rendering.
    --quiet                Only log warnings and errors.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<i64>,
    flag_cell_size: f32,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_save_edges: String,
    flag_walk: String,
    flag_quiet: bool,
}

mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Mazes(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_logging(args.flag_quiet);

    let seed = args.flag_seed.map_or(SeedChoice::Random, SeedChoice::Fixed);
    let mut request = MazeRequest::new(args.flag_width, args.flag_height, seed);
    request.cell_size = args.flag_cell_size;

    let resolved = request.resolve()?;
    println!("Seed: {}", resolved.seed());

    let maze = resolved.generate()?;

    let player = if args.flag_walk.is_empty() {
        None
    } else {
        Some(walk_player(&maze, &args.flag_walk)?)
    };

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let text = match player {
        Some(ref player) => grid_displays::render_text(&maze, &PlayerPathDisplay::new(player)),
        None => maze.to_string(),
    };
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!("wrote text maze to {}", args.flag_text_out);
    }

    if !args.flag_image_out.is_empty() {
        let render_options = renderers::RenderOptionsBuilder::new()
            .output_file(Some(Path::new(&args.flag_image_out)))
            .cell_side_pixels_length(args.flag_cell_pixels)
            .build();
        renderers::render_png(&maze, &render_options)?;
    }

    Ok(())
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { LevelFilter::Warn } else { LevelFilter::Info };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Move a fresh player through the maze, skipping any move a wall refuses.
fn walk_player(maze: &Maze, directions: &str) -> Result<Player> {
    let mut player = Player::new();
    for letter in directions.chars() {
        let direction = match letter.to_ascii_uppercase() {
            'T' => GridDirection::Top,
            'L' => GridDirection::Left,
            'B' => GridDirection::Bottom,
            'R' => GridDirection::Right,
            other => bail!("Unknown walk direction '{}', expected one of T, L, B, R", other),
        };
        match player.try_move(maze, direction) {
            Ok(cell) => info!("player moved {:?} to cell {:?}", direction, cell),
            Err(MoveRefusal::Blocked) => warn!("player cannot move {:?} from cell {:?}", direction, player.cell()),
            Err(MoveRefusal::Busy) => warn!("player is still moving"),
        }
        player.finish_move();
    }
    Ok(player)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let edges = maze.iter_links()
        .map(|(src, dst)| {
            let src_as_1_based_index = u64::from(src.raw()) + 1;
            let dst_as_1_based_index = u64::from(dst.raw()) + 1;
            format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index)
        })
        .join("");
    let graph_data = format!("{} {}\n{}", maze.size(), maze.links_count(), edges);

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("wrote {} maze edges to {}", maze.links_count(), file_path);

    Ok(())
}
