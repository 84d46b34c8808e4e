//! Whole-image rendering on top of the kernels.
//!
//! Every pixel's escape time is independent of every other pixel, so
//! the renderer partitions the image by row and computes rows on the
//! rayon pool. Each worker owns a disjoint row range of the buffer;
//! the kernels themselves stay sequential and lock-free.

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::buffer::Buffer;
use crate::colour;
use crate::mandelbrot;
use crate::pixel::Complex;
use crate::region::Extent;
use crate::scale;

/// Maps the pixel grid onto the complex plane: pixel `(x, y)` samples
/// `origin + (x * x_inc, y * y_inc)`. Rows run left to right, top to
/// bottom in buffer order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin: Complex,
    pub x_inc: f64,
    pub y_inc: f64,
}

impl Viewport {
    /// The viewport spanning `x_min..x_max` by `y_min..y_max`, sampled
    /// at `extent` pixels. The upper bounds are exclusive: sample
    /// spacing is `(max - min) / extent`, with the first sample on the
    /// lower bound.
    pub fn spanning(x_min: f64, y_min: f64, x_max: f64, y_max: f64, extent: Extent) -> Self {
        Self {
            origin: Complex {
                real: x_min,
                imaginary: y_min,
            },
            x_inc: (x_max - x_min) / extent.width as f64,
            y_inc: (y_max - y_min) / extent.height as f64,
        }
    }

    pub fn point_at(&self, x: u32, y: u32) -> Complex {
        Complex {
            real: self.origin.real + x as f64 * self.x_inc,
            imaginary: self.origin.imaginary + y as f64 * self.y_inc,
        }
    }
}

/// Fills the first `extent.num_pixels()` words of `image` with
/// escape-time values, row-parallel.
///
/// Output is identical to issuing one [`mandelbrot::mandelbrot_line`]
/// call per row.
///
/// # Panics
///
/// Panics if `image` holds fewer than `extent.num_pixels()` words.
pub fn render_iterations(
    image: &mut [u32],
    extent: Extent,
    viewport: Viewport,
    max_modulus_squared: f64,
    max_iteration_count: u32,
) {
    trace!(
        "begin render_iterations: {}x{}",
        extent.width,
        extent.height
    );
    image[..extent.num_pixels()]
        .par_chunks_mut(extent.width as usize)
        .enumerate()
        .for_each(|(row, line)| {
            let start = viewport.point_at(0, row as u32);
            mandelbrot::fill_line(
                line,
                start.real,
                start.imaginary,
                viewport.x_inc,
                max_modulus_squared,
                max_iteration_count,
            );
        });
    trace!("end render_iterations");
}

/// Renders a full coloured image into the head of the shared buffer:
/// an escape-time pass followed by in-place palette colouring over the
/// same pixel range.
///
/// # Panics
///
/// Panics if the buffer holds fewer than `extent.num_pixels()` words,
/// or if the palette is empty.
#[allow(clippy::too_many_arguments)]
pub fn render_image(
    buffer: &mut Buffer,
    extent: Extent,
    viewport: Viewport,
    max_modulus_squared: f64,
    max_iteration_count: u32,
    palette: &[u32],
    in_set_colour: u32,
) {
    debug!("rendering {}x{} image", extent.width, extent.height);
    let mut image = buffer.view_mut(0, extent.num_pixels());
    render_iterations(
        &mut image,
        extent,
        viewport,
        max_modulus_squared,
        max_iteration_count,
    );
    colour::colour_iterations(&mut image, palette, max_iteration_count, in_set_colour);
}

/// Renders the image into the head of the buffer, then box-scales it
/// into the words immediately following it (layout: image, thumbnail).
///
/// # Panics
///
/// Panics if the buffer holds fewer than
/// `extent.num_pixels() + thumbnail_extent.num_pixels()` words, or if
/// the palette is empty.
#[allow(clippy::too_many_arguments)]
pub fn render_with_thumbnail(
    buffer: &mut Buffer,
    extent: Extent,
    thumbnail_extent: Extent,
    viewport: Viewport,
    max_modulus_squared: f64,
    max_iteration_count: u32,
    palette: &[u32],
    in_set_colour: u32,
) {
    render_image(
        buffer,
        extent,
        viewport,
        max_modulus_squared,
        max_iteration_count,
        palette,
        in_set_colour,
    );
    scale::box_scale(
        buffer,
        extent.width,
        extent.height,
        thumbnail_extent.width,
        thumbnail_extent.height,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mandelbrot::mandelbrot_point;

    const EXTENT: Extent = Extent {
        width: 64,
        height: 48,
    };

    fn test_viewport() -> Viewport {
        Viewport::spanning(-2.0, -1.12, 0.47, 1.12, EXTENT)
    }

    #[test]
    fn viewport_samples_start_on_the_lower_bounds() {
        let viewport = test_viewport();
        assert_eq!(
            viewport.point_at(0, 0),
            Complex {
                real: -2.0,
                imaginary: -1.12
            }
        );
        let last = viewport.point_at(EXTENT.width - 1, EXTENT.height - 1);
        assert!(last.real < 0.47);
        assert!(last.imaginary < 1.12);
    }

    #[test]
    fn parallel_rendering_matches_the_point_form() {
        let viewport = test_viewport();
        let mut image = vec![0u32; EXTENT.num_pixels()];
        render_iterations(&mut image, EXTENT, viewport, 4.0, 500);

        for y in 0..EXTENT.height {
            for x in 0..EXTENT.width {
                let point = viewport.point_at(x, y);
                assert_eq!(
                    image[(y * EXTENT.width + x) as usize],
                    mandelbrot_point(point.real, point.imaginary, 4.0, 500),
                    "pixel ({}, {}) disagrees with the point form",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn rendered_images_contain_only_palette_or_in_set_colours() {
        let palette = [0xff00_0000, 0x00ff_00ff, 0x0000_00ff, 0x00ff_0000];
        let in_set_colour = 1;
        let mut buffer = Buffer::new(EXTENT.num_pixels());
        render_image(
            &mut buffer,
            EXTENT,
            test_viewport(),
            4.0,
            500,
            &palette,
            in_set_colour,
        );
        for word in buffer.words() {
            assert!(*word == in_set_colour || palette.contains(word));
        }
    }

    #[test]
    fn the_thumbnail_lands_after_the_image() {
        let thumbnail = Extent {
            width: 8,
            height: 6,
        };
        let palette = [0xff00_0000, 0x00ff_00ff];
        let mut buffer = Buffer::new(EXTENT.num_pixels() + thumbnail.num_pixels());
        render_with_thumbnail(
            &mut buffer,
            EXTENT,
            thumbnail,
            test_viewport(),
            4.0,
            500,
            &palette,
            1,
        );
        let thumbnail_words = &buffer.words()[EXTENT.num_pixels()..];
        assert_eq!(thumbnail_words.len(), thumbnail.num_pixels());
        // The interior of this framing holds in-set pixels; their
        // averages cannot all be zero.
        assert!(thumbnail_words.iter().any(|word| *word != 0));
    }
}
