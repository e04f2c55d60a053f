use rand::Rng;

use crate::errors::*;
use crate::generators;
use crate::grid_dimensions::GridDimensions;
use crate::grid_positions::WorldLayout;
use crate::maze::Maze;
use crate::maze_rng;
use crate::units::{CellSize, Height, Width};

/// World units per cell side when nothing else is asked for.
pub const DEFAULT_CELL_SIZE: f32 = 0.5;

/// Random seeds are drawn from `0..MAX_RANDOM_SEED`, small enough to read out and type back in.
pub const MAX_RANDOM_SEED: i64 = 20000;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SeedChoice {
    Fixed(i64),
    Random,
}

/// Everything needed to build a maze, as collected from a user.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct MazeRequest {
    pub width: usize,
    pub height: usize,
    pub seed: SeedChoice,
    pub cell_size: f32,
}

impl MazeRequest {
    pub fn new(width: usize, height: usize, seed: SeedChoice) -> MazeRequest {
        MazeRequest {
            width,
            height,
            seed,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    /// Validate the request and settle on a seed, drawing one if it was left random.
    pub fn resolve(&self) -> Result<ResolvedRequest> {
        let dimensions = GridDimensions::new(Width(self.width), Height(self.height))?;
        let layout = WorldLayout::new(dimensions, CellSize(self.cell_size))?;
        let seed = match self.seed {
            SeedChoice::Fixed(seed) => seed,
            SeedChoice::Random => rand::thread_rng().gen_range(0..MAX_RANDOM_SEED),
        };
        Ok(ResolvedRequest { layout, seed })
    }
}

/// A validated request with a concrete seed, ready to be shown back to the user and generated.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct ResolvedRequest {
    layout: WorldLayout,
    seed: i64,
}

impl ResolvedRequest {
    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    #[inline]
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        self.layout.dimensions()
    }

    pub fn generate(&self) -> Result<Maze> {
        let dimensions = self.dimensions();
        generators::generate(Width(dimensions.width() as usize),
                             Height(dimensions.height() as usize),
                             maze_rng::seed_from_signed(self.seed))
    }
}
