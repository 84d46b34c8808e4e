/*!
Mandelbrot escape-time kernels over a shared buffer of 32-bit words.

Three numeric kernels plus the memory contract tying them together:

- [`mandelbrot::mandelbrot_point`] / [`mandelbrot::mandelbrot_line`]:
  escape-time iteration for a single complex point or a scanline of
  consecutive points.
- [`colour::iteration_colouring`]: in-place mapping of escape-time
  values to packed colours through a cyclic palette, with a
  distinguished colour for points that reached the iteration cap.
- [`scale::box_scale`]: channel-wise box-filter downsampling of a
  rendered image into a thumbnail.

All three operate on one host-allocated [`buffer::Buffer`] of 32-bit
words with positional layouts: colouring expects
`[iteration data][palette]`, scaling expects `[source image][thumbnail]`.
Addressing is word-indexed and row-major; see the `buffer` module for
the view types kernels use to carve disjoint ranges.

The `render` module is the host-side driver: a [`render::Viewport`]
mapping the pixel grid onto the complex plane and a rayon-parallel
whole-image renderer built on the scanline kernel.
*/

pub mod buffer;
pub mod colour;
pub mod mandelbrot;
pub mod pixel;
pub mod region;
pub mod render;
pub mod scale;

pub use buffer::Buffer;
pub use colour::iteration_colouring;
pub use mandelbrot::{mandelbrot_line, mandelbrot_point};
pub use pixel::{Complex, PackedColour};
pub use region::{Extent, Region};
pub use scale::box_scale;
