//! Box-filter image scaling.

use log::trace;

use crate::buffer::Buffer;
use crate::pixel::PackedColour;
use crate::region::{Extent, Region};

/// The source region averaged into target pixel `(x, y)`.
///
/// The origin is the floored scaled-up target coordinate; the extents
/// are the rounded scale factors, clamped below to one pixel and above
/// to the source's right/bottom edges. Every region returned holds at
/// least one pixel and lies fully inside `source`.
fn sampling_region(x: u32, y: u32, scale_x: f64, scale_y: f64, source: Extent) -> Region {
    let origin_x = (x as f64 * scale_x).floor() as u32;
    let origin_y = (y as f64 * scale_y).floor() as u32;
    Region {
        x: origin_x,
        y: origin_y,
        width: (scale_x.round() as u32).max(1).min(source.width - origin_x),
        height: (scale_y.round() as u32).max(1).min(source.height - origin_y),
    }
}

/// Averages the pixels of `region`, each 8-bit channel independently,
/// truncating each channel mean toward zero.
///
/// Averaging the packed words as single numbers would carry overflow
/// across channel boundaries.
fn box_average(source: &[PackedColour], source_width: u32, region: Region) -> PackedColour {
    let mut channel_sums = [0_u64; PackedColour::NUM_CHANNELS];
    for y in region.y..region.bottom() {
        let row = y as usize * source_width as usize;
        for x in region.x..region.right() {
            let pixel = source[row + x as usize];
            for (channel, sum) in channel_sums.iter_mut().enumerate() {
                *sum += pixel.channel(channel) as u64;
            }
        }
    }

    let num_samples = region.num_pixels() as u64;
    let mut channels = [0_u32; PackedColour::NUM_CHANNELS];
    for (channel, sum) in channel_sums.into_iter().enumerate() {
        channels[channel] = (sum / num_samples) as u32;
    }
    PackedColour::from_channels(channels)
}

/// Downsamples `source` into `target` with a channel-wise box filter.
/// Both images are row-major; `target.len()` must equal
/// `target_extent.num_pixels()`.
pub fn scale_into(
    source: &[PackedColour],
    source_extent: Extent,
    target: &mut [PackedColour],
    target_extent: Extent,
) {
    debug_assert_eq!(source.len(), source_extent.num_pixels());
    debug_assert_eq!(target.len(), target_extent.num_pixels());

    let scale_x = source_extent.width as f64 / target_extent.width as f64;
    let scale_y = source_extent.height as f64 / target_extent.height as f64;
    for (i, pixel) in target.iter_mut().enumerate() {
        let x = i as u32 % target_extent.width;
        let y = i as u32 / target_extent.width;
        let region = sampling_region(x, y, scale_x, scale_y, source_extent);
        *pixel = box_average(source, source_extent.width, region);
    }
}

/// Scales the image at the head of the shared buffer into the words
/// immediately following it. Layout: the first
/// `source_width * source_height` words hold the source image; the
/// `target_width * target_height` words after them receive the
/// thumbnail.
///
/// `target_width` and `target_height` must be at least 1; that is a
/// caller obligation, not a runtime check.
///
/// # Panics
///
/// Panics if the buffer holds fewer than
/// `source_width * source_height + target_width * target_height` words.
pub fn box_scale(
    buffer: &mut Buffer,
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) {
    trace!(
        "begin box_scale: {}x{} -> {}x{}",
        source_width,
        source_height,
        target_width,
        target_height
    );
    let source_extent = Extent {
        width: source_width,
        height: source_height,
    };
    let target_extent = Extent {
        width: target_width,
        height: target_height,
    };
    let (source, mut target) = buffer.split_mut(source_extent.num_pixels());
    scale_into(
        source.as_colours(),
        source_extent,
        &mut target.as_colours_mut()[..target_extent.num_pixels()],
        target_extent,
    );
    trace!("end box_scale");
}
