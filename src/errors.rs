// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: both sides must be at least 1 and the cell count below {}",
                    width, height, u32::MAX)
        }
        InvalidCellSize(size: f32) {
            description("invalid cell size")
            display("invalid cell size {}: must be a finite positive number", size)
        }
        ImageTooLarge(width: u32, height: u32, cell_pixels: u32) {
            description("maze image too large")
            display("a {}x{} maze at {} pixels per cell does not fit in an image", width, height, cell_pixels)
        }
    }
}
