//! Colouring algorithms.

use log::trace;

use crate::buffer::Buffer;

/// Rewrites escape-time values as packed colours, in place.
///
/// A value of `max_iteration_count` or above marks a point that never
/// escaped and becomes `in_set_colour`; every other value indexes the
/// palette cyclically (`value % palette.len()`). The in-set threshold
/// is inclusive of the cap.
///
/// The iteration values are consumed by the rewrite; callers must not
/// re-read them afterwards.
///
/// # Panics
///
/// Panics if the palette is empty and any value is below the cap.
pub fn colour_iterations(
    iterations: &mut [u32],
    palette: &[u32],
    max_iteration_count: u32,
    in_set_colour: u32,
) {
    let num_palette_entries = palette.len() as u32;
    for value in iterations.iter_mut() {
        *value = if *value >= max_iteration_count {
            in_set_colour
        } else {
            palette[(*value % num_palette_entries) as usize]
        };
    }
}

/// Colours the head of the shared buffer in place. Layout: the first
/// `count` words hold escape-time values, immediately followed by
/// `num_palette_entries` palette words, index 0 first.
///
/// # Panics
///
/// Panics if the buffer holds fewer than `count + num_palette_entries`
/// words, or if `num_palette_entries` is 0.
pub fn iteration_colouring(
    buffer: &mut Buffer,
    count: u32,
    max_iteration_count: u32,
    in_set_colour: u32,
    num_palette_entries: u32,
) {
    trace!("begin iteration_colouring: count={}", count);
    let (mut iterations, palette) = buffer.split_mut(count as usize);
    colour_iterations(
        &mut iterations,
        &palette[..num_palette_entries as usize],
        max_iteration_count,
        in_set_colour,
    );
    trace!("end iteration_colouring");
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [u32; 4] = [0xff00_0000, 0x00ff_00ff, 0x0000_00ff, 0x00ff_0000];
    const IN_SET: u32 = 1;

    #[test]
    fn the_in_set_threshold_is_inclusive_of_the_cap() {
        let mut iterations = [999, 1000, 0xffff_ffff];
        colour_iterations(&mut iterations, &PALETTE, 1000, IN_SET);
        assert_eq!(iterations, [PALETTE[999 % 4], IN_SET, IN_SET]);
    }

    #[test]
    fn low_values_index_the_palette_cyclically() {
        let mut iterations = [0, 1, 2, 3, 4, 5];
        colour_iterations(&mut iterations, &PALETTE, 1000, IN_SET);
        assert_eq!(
            iterations,
            [
                PALETTE[0], PALETTE[1], PALETTE[2], PALETTE[3], PALETTE[0], PALETTE[1]
            ]
        );
    }

    #[test]
    fn a_single_entry_palette_colours_every_escaped_point() {
        let mut iterations = [0, 7, 123];
        colour_iterations(&mut iterations, &[42], 1000, IN_SET);
        assert_eq!(iterations, [42, 42, 42]);
    }

    #[test]
    fn the_buffer_layout_is_iterations_then_palette() {
        let mut words = vec![0, 1, 2, 1000];
        words.extend_from_slice(&PALETTE);
        let mut buffer = Buffer::from_words(words);
        iteration_colouring(&mut buffer, 4, 1000, IN_SET, PALETTE.len() as u32);
        assert_eq!(
            &buffer.words()[..4],
            &[PALETTE[0], PALETTE[1], PALETTE[2], IN_SET]
        );
        // The palette itself is untouched.
        assert_eq!(&buffer.words()[4..], &PALETTE);
    }

    #[test]
    fn colouring_is_deterministic() {
        let words: Vec<u32> = (0..32).chain(PALETTE).collect();
        let mut first = Buffer::from_words(words.clone());
        let mut second = Buffer::from_words(words);
        iteration_colouring(&mut first, 32, 20, IN_SET, 4);
        iteration_colouring(&mut second, 32, 20, IN_SET, 4);
        assert_eq!(first.words(), second.words());
    }
}
