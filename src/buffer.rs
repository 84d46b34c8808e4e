/*!
The shared pixel buffer.

Every kernel in this crate reads and writes one contiguous,
host-allocated range of 32-bit words. Layouts within the buffer are
positional (iteration data followed by its palette, source image
followed by its thumbnail), so the types here make the addressing
explicit: a [`View`]/[`ViewMut`] is a borrowed word range carrying its
base word offset, and disjoint mutable ranges are obtained by splitting
rather than by convention.
*/

use std::ops::{Deref, DerefMut};

use crate::pixel::PackedColour;

/// The host-allocated shared memory: one contiguous range of 32-bit
/// words, addressed by word index (byte offset = index * 4).
///
/// The host allocates before any kernel call and frees after the last;
/// kernels only ever borrow it and never allocate, resize, or retain
/// it across calls.
pub struct Buffer {
    words: Vec<u32>,
}

impl Buffer {
    /// Allocates a zero-filled buffer of `num_words` words.
    pub fn new(num_words: usize) -> Self {
        Self {
            words: vec![0; num_words],
        }
    }

    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// Borrows the `len` words starting at word index `base`.
    ///
    /// # Panics
    ///
    /// Panics if `base + len` exceeds the buffer length.
    pub fn view(&self, base: usize, len: usize) -> View {
        View {
            words: &self.words[base..base + len],
            base,
        }
    }

    /// Mutably borrows the `len` words starting at word index `base`.
    ///
    /// # Panics
    ///
    /// Panics if `base + len` exceeds the buffer length.
    pub fn view_mut(&mut self, base: usize, len: usize) -> ViewMut {
        ViewMut {
            words: &mut self.words[base..base + len],
            base,
        }
    }

    /// Splits the buffer at word index `at` into two disjoint mutable
    /// views. The kernels carve their positional layouts with this, so
    /// overlapping writes are unrepresentable.
    ///
    /// # Panics
    ///
    /// Panics if `at` exceeds the buffer length.
    pub fn split_mut(&mut self, at: usize) -> (ViewMut, ViewMut) {
        let (head, tail) = self.words.split_at_mut(at);
        (
            ViewMut {
                words: head,
                base: 0,
            },
            ViewMut {
                words: tail,
                base: at,
            },
        )
    }
}

/// A borrowed word range of the shared buffer together with its base
/// word offset.
pub struct View<'a> {
    words: &'a [u32],
    base: usize,
}

impl View<'_> {
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn as_colours(&self) -> &[PackedColour] {
        bytemuck::cast_slice(self.words)
    }
}

impl Deref for View<'_> {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        self.words
    }
}

/// A mutably borrowed word range of the shared buffer together with its
/// base word offset.
pub struct ViewMut<'a> {
    words: &'a mut [u32],
    base: usize,
}

impl ViewMut<'_> {
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn as_colours(&self) -> &[PackedColour] {
        bytemuck::cast_slice(self.words)
    }

    pub fn as_colours_mut(&mut self) -> &mut [PackedColour] {
        bytemuck::cast_slice_mut(self.words)
    }
}

impl Deref for ViewMut<'_> {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        self.words
    }
}

impl DerefMut for ViewMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.words
    }
}
