use image::{Rgb, RgbImage};
use log::{info, trace};
use std::path::Path;

use crate::errors::*;
use crate::grid_positions::{WorldLayout, WorldPoint};
use crate::maze::Maze;
use crate::units::CellPixels;

/// Thickness of a wall quad in world units.
pub const WALL_WIDTH: f32 = 0.05;

/// Quads per mesh before a new mesh has to be started.
pub const MAX_QUADS_PER_MESH: usize = 4000;

/// Largest pixel length of a cell side in a rasterized maze.
pub const MAX_CELL_PIXELS: u32 = 255;

/// A wall between two world space points.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WallSegment {
    pub from: WorldPoint,
    pub to: WorldPoint,
}

/// An axis aligned quad ready to be turned into two triangles by a mesh builder.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WallQuad {
    pub centre: WorldPoint,
    pub size: WorldPoint,
}

/// Every wall of the maze once, in world space.
///
/// A wall shared by two cells is emitted by only one of them: a cell skips its left wall when it has a left
/// neighbour and its top wall when it has a top neighbour, those are drawn as the neighbour's right and
/// bottom walls. Cells are walked in index order, each emitting top, left, bottom, right.
pub fn wall_segments(maze: &Maze, layout: &WorldLayout) -> Vec<WallSegment> {
    let mut segments = Vec::with_capacity(2 * maze.size() + maze.width() as usize + maze.height() as usize);
    let pos = |x: u32, y: u32| layout.world_position(i64::from(x), i64::from(y));

    for cell in maze.iter() {
        let (x, y) = (cell.x, cell.y);
        if cell.wall_top && cell.neighbour_top.is_none() {
            segments.push(WallSegment { from: pos(x, y + 1), to: pos(x + 1, y + 1) });
        }
        if cell.wall_left && cell.neighbour_left.is_none() {
            segments.push(WallSegment { from: pos(x, y), to: pos(x, y + 1) });
        }
        if cell.wall_bottom {
            segments.push(WallSegment { from: pos(x, y), to: pos(x + 1, y) });
        }
        if cell.wall_right {
            segments.push(WallSegment { from: pos(x + 1, y), to: pos(x + 1, y + 1) });
        }
    }

    segments
}

impl WallSegment {
    /// The quad covering this wall, `WALL_WIDTH` thick.
    ///
    /// The end points are moved half a wall width apart on both axes. The world mapping mirrors the grid,
    /// so segments always run from higher to lower world coordinates and the zero width axis grows to
    /// `WALL_WIDTH` while the long axis grows by the same amount.
    ///
    /// The quad sits on the true midpoint of the segment, not on the midpoint shifted by the moved end
    /// point, which would put every wall `WALL_WIDTH / 2` off its grid line on both axes.
    pub fn quad(&self) -> WallQuad {
        let half = WorldPoint::splat(WALL_WIDTH / 2.0);
        let a = self.from + half;
        let b = self.to - half;
        let size = b - a;
        WallQuad {
            centre: self.from + (self.to - self.from) * 0.5,
            size: WorldPoint::new(size.x.abs(), size.y.abs()),
        }
    }
}

pub fn wall_quads(segments: &[WallSegment]) -> Vec<WallQuad> {
    segments.iter().map(WallSegment::quad).collect()
}

/// Split quads into meshes of at most `MAX_QUADS_PER_MESH`.
pub fn mesh_batches(quads: &[WallQuad]) -> Vec<&[WallQuad]> {
    let batches: Vec<&[WallQuad]> = quads.chunks(MAX_QUADS_PER_MESH).collect();
    trace!("{} wall quads split into {} meshes", quads.len(), batches.len());
    batches
}


#[derive(Debug)]
pub struct RenderOptions<'path> {
    cell_pixels: CellPixels,
    output_file: Option<&'path Path>,
}

impl<'path> RenderOptions<'path> {
    #[inline]
    pub fn cell_pixels(&self) -> CellPixels {
        self.cell_pixels
    }

    #[inline]
    pub fn output_file(&self) -> Option<&'path Path> {
        self.output_file
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_pixels: CellPixels(10),
                output_file: None,
            },
        }
    }

    /// Pixel length of one cell side, clamped to `2..=MAX_CELL_PIXELS` so a cell has room inside its walls.
    pub fn cell_side_pixels_length(mut self, cell_pixels: u32) -> RenderOptionsBuilder<'path> {
        self.options.cell_pixels = CellPixels(cell_pixels.clamp(2, MAX_CELL_PIXELS));
        self
    }

    pub fn output_file(mut self, output_file: Option<&'path Path>) -> RenderOptionsBuilder<'path> {
        self.options.output_file = output_file;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

/// Rasterize the maze walls, black on white, with the top row of the grid at the top of the image.
///
/// The image is saved as a PNG when an output file is set.
pub fn render_png(maze: &Maze, options: &RenderOptions) -> Result<RgbImage> {
    let CellPixels(cell_px) = options.cell_pixels();
    let (width, height) = (maze.width(), maze.height());
    let (img_width, img_height) = image_dimensions(width, height, cell_px)?;

    let white = Rgb([0xff, 0xff, 0xff]);
    let black = Rgb([0, 0, 0]);
    let mut img = RgbImage::from_pixel(img_width, img_height, white);

    // Image rows grow downwards, grid rows grow upwards.
    let pixel_row = |grid_line_y: u32| (height - grid_line_y) * cell_px;

    for cell in maze.iter() {
        let x1 = cell.x * cell_px;
        let x2 = (cell.x + 1) * cell_px;
        let y_top = pixel_row(cell.y + 1);
        let y_bottom = pixel_row(cell.y);

        if cell.wall_top {
            draw_horizontal(&mut img, x1, x2, y_top, black);
        }
        if cell.wall_bottom {
            draw_horizontal(&mut img, x1, x2, y_bottom, black);
        }
        if cell.wall_left {
            draw_vertical(&mut img, x1, y_top, y_bottom, black);
        }
        if cell.wall_right {
            draw_vertical(&mut img, x2, y_top, y_bottom, black);
        }
    }

    if let Some(path) = options.output_file() {
        img.save(path)
           .chain_err(|| format!("Failed to write maze image {}", path.display()))?;
        info!("wrote {}x{} maze image to {}", img_width, img_height, path.display());
    }

    Ok(img)
}

/// Pixel size of the rendered image, one extra pixel for the far outer walls.
///
/// Fails when a side overflows `u32` or the RGB buffer would not be addressable.
fn image_dimensions(width: u32, height: u32, cell_px: u32) -> Result<(u32, u32)> {
    let side = |cells: u32| cells.checked_mul(cell_px).and_then(|px| px.checked_add(1));
    let too_large = || Error::from(ErrorKind::ImageTooLarge(width, height, cell_px));

    let (img_width, img_height) = match (side(width), side(height)) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(too_large()),
    };
    let buffer_len = (img_width as usize)
        .checked_mul(img_height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .filter(|&len| len <= isize::MAX as usize);
    if buffer_len.is_none() {
        return Err(too_large());
    }
    Ok((img_width, img_height))
}

fn draw_horizontal(img: &mut RgbImage, x1: u32, x2: u32, y: u32, colour: Rgb<u8>) {
    for x in x1..=x2 {
        img.put_pixel(x, y, colour);
    }
}

fn draw_vertical(img: &mut RgbImage, x: u32, y1: u32, y2: u32, colour: Rgb<u8>) {
    for y in y1..=y2 {
        img.put_pixel(x, y, colour);
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::generate;
    use crate::units::{CellSize, Height, Width};

    fn maze_and_layout(w: usize, h: usize, seed: u64) -> (Maze, WorldLayout) {
        let m = generate(Width(w), Height(h), seed).expect("valid dimensions");
        let layout = WorldLayout::new(*m.dimensions(), CellSize(0.5)).expect("valid cell size");
        (m, layout)
    }

    fn close(a: WorldPoint, b: WorldPoint) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn single_cell_has_four_walls() {
        let (m, layout) = maze_and_layout(1, 1, 3);
        let segments = wall_segments(&m, &layout);
        assert_eq!(segments.len(), 4);
        // top, left, bottom, right
        let p = |x, y| layout.world_position(x, y);
        assert_eq!(segments,
                   vec![WallSegment { from: p(0, 1), to: p(1, 1) },
                        WallSegment { from: p(0, 0), to: p(0, 1) },
                        WallSegment { from: p(0, 0), to: p(1, 0) },
                        WallSegment { from: p(1, 0), to: p(1, 1) }]);
    }

    #[test]
    fn shared_walls_are_emitted_once() {
        for &(w, h, seed) in &[(2, 2, 42), (5, 4, 2024), (17, 3, 8), (1, 9, 1)] {
            let (m, layout) = maze_and_layout(w, h, seed);
            let segments = wall_segments(&m, &layout);
            let grid_edges = 2 * w * h + w + h;
            assert_eq!(segments.len(), grid_edges - (w * h - 1));

            for (i, a) in segments.iter().enumerate() {
                for b in segments.iter().skip(i + 1) {
                    let same = close(a.from, b.from) && close(a.to, b.to);
                    let reversed = close(a.from, b.to) && close(a.to, b.from);
                    assert!(!same && !reversed, "duplicate wall {:?}", a);
                }
            }
        }
    }

    #[test]
    fn wall_quads_have_wall_thickness() {
        let (m, layout) = maze_and_layout(1, 1, 0);
        let quads = wall_quads(&wall_segments(&m, &layout));
        assert_eq!(quads.len(), 4);

        // Horizontal walls: one cell long plus a wall width, one wall width thick.
        let top = quads[0];
        assert!((top.size.x - (0.5 + WALL_WIDTH)).abs() < 1e-5);
        assert!((top.size.y - WALL_WIDTH).abs() < 1e-5);
        // midpoint of the top wall of cell (0, 0)
        assert!(close(top.centre, WorldPoint::new(0.0, -0.25)));

        let left = quads[1];
        assert!((left.size.x - WALL_WIDTH).abs() < 1e-5);
        assert!((left.size.y - (0.5 + WALL_WIDTH)).abs() < 1e-5);
        assert!(close(left.centre, WorldPoint::new(0.25, 0.0)));
    }

    #[test]
    fn meshes_are_capped() {
        let quad = WallQuad { centre: WorldPoint::default(), size: WorldPoint::splat(1.0) };
        let quads = vec![quad; 2 * MAX_QUADS_PER_MESH + 1];
        let batches = mesh_batches(&quads);
        assert_eq!(batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
                   vec![MAX_QUADS_PER_MESH, MAX_QUADS_PER_MESH, 1]);
        assert!(mesh_batches(&[]).is_empty());
    }

    #[test]
    fn png_walls_follow_the_maze() {
        let (m, _) = maze_and_layout(2, 2, 42);
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(4).build();
        let img = render_png(&m, &options).expect("in memory render");
        assert_eq!(img.dimensions(), (9, 9));

        let black = Rgb([0, 0, 0]);
        let white = Rgb([0xff, 0xff, 0xff]);
        // outer frame
        assert_eq!(*img.get_pixel(0, 0), black);
        assert_eq!(*img.get_pixel(8, 8), black);
        // U shape: wall between the two bottom cells, open between the two top cells
        assert_eq!(*img.get_pixel(4, 6), black);
        assert_eq!(*img.get_pixel(4, 2), white);
        // open between bottom and top cells in both columns
        assert_eq!(*img.get_pixel(2, 4), white);
        assert_eq!(*img.get_pixel(6, 4), white);
    }

    #[test]
    fn cell_pixels_are_clamped() {
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(0).build();
        assert_eq!(options.cell_pixels(), CellPixels(2));
        assert!(options.output_file().is_none());

        let options = RenderOptionsBuilder::new().cell_side_pixels_length(1 << 31).build();
        assert_eq!(options.cell_pixels(), CellPixels(MAX_CELL_PIXELS));
    }

    #[test]
    fn huge_cell_pixels_still_render() {
        let (m, _) = maze_and_layout(2, 1, 1);
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(1 << 31).build();
        let img = render_png(&m, &options).expect("clamped cell pixels");
        assert_eq!(img.dimensions(), (2 * MAX_CELL_PIXELS + 1, MAX_CELL_PIXELS + 1));
    }

    #[test]
    fn oversized_images_are_rejected() {
        assert_eq!(image_dimensions(2, 1, 10).expect("small image"), (21, 11));

        let err = image_dimensions(u32::MAX / 2, 1, MAX_CELL_PIXELS).unwrap_err();
        match *err.kind() {
            ErrorKind::ImageTooLarge(w, h, px) => assert_eq!((w, h, px), (u32::MAX / 2, 1, MAX_CELL_PIXELS)),
            ref other => panic!("unexpected error kind {:?}", other),
        }
    }
}
