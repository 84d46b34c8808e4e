//! The escape-time kernel.

use log::trace;

use crate::buffer::Buffer;

/// Computes the escape time of the complex point `(x0, y0)`: the number
/// of iterations of `x' = x^2 - y^2 + x0`, `y' = 2xy + y0`, starting
/// from the origin, taken before the squared modulus `x^2 + y^2`
/// exceeds `max_modulus_squared`, capped at `max_iteration_count`.
///
/// The boundary convention is strict-greater on exit: iteration
/// continues while `x^2 + y^2 <= max_modulus_squared`, so a point whose
/// modulus lands exactly on the bound iterates again. Differential
/// oracles must use the same convention to agree bit-for-bit.
///
/// Inputs are not validated. A NaN bound fails the continue comparison
/// immediately and the result is 0; a NaN coordinate poisons the
/// iterate and the loop exits one iteration later with 1.
pub fn mandelbrot_point(
    x0: f64,
    y0: f64,
    max_modulus_squared: f64,
    max_iteration_count: u32,
) -> u32 {
    // Incremental form: x^2 and y^2 are carried across iterations
    // rather than recomputed. Output-identical to the direct form.
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let (mut x_squared, mut y_squared) = (0.0_f64, 0.0_f64);
    let mut iteration_count = 0;
    while x_squared + y_squared <= max_modulus_squared && iteration_count < max_iteration_count {
        y = 2.0 * x * y + y0;
        x = x_squared - y_squared + x0;
        x_squared = x * x;
        y_squared = y * y;
        iteration_count += 1;
    }
    iteration_count
}

/// Fills `line` with the escape times of `line.len()` consecutive
/// samples: entry `i` is `mandelbrot_point(x0 + i * x_inc, y0, ..)`.
///
/// The x coordinate is computed by multiplication, never by
/// accumulation, so batched and point-wise results agree exactly.
pub fn fill_line(
    line: &mut [u32],
    x0: f64,
    y0: f64,
    x_inc: f64,
    max_modulus_squared: f64,
    max_iteration_count: u32,
) {
    for (i, value) in line.iter_mut().enumerate() {
        *value = mandelbrot_point(
            x0 + i as f64 * x_inc,
            y0,
            max_modulus_squared,
            max_iteration_count,
        );
    }
}

/// Writes `count` escape-time values into the shared buffer starting at
/// word index `offset`; a batching convenience over
/// [`mandelbrot_point`].
///
/// # Panics
///
/// Panics if `offset + count` exceeds the buffer length.
#[allow(clippy::too_many_arguments)]
pub fn mandelbrot_line(
    buffer: &mut Buffer,
    offset: u32,
    count: u32,
    x0: f64,
    y0: f64,
    x_inc: f64,
    max_modulus_squared: f64,
    max_iteration_count: u32,
) {
    trace!("begin mandelbrot_line: offset={}, count={}", offset, count);
    let mut line = buffer.view_mut(offset as usize, count as usize);
    fill_line(
        &mut line,
        x0,
        y0,
        x_inc,
        max_modulus_squared,
        max_iteration_count,
    );
    trace!("end mandelbrot_line");
}
