//! Bit-granular cursors and iterators.

use core::cell::Cell;
use core::iter::FusedIterator;

use crate::index::{BitIndex, WORD_BITS, WORD_SHIFT, Word};
use crate::reference::BitRef;

/// A bit position held as `(word, offset)`.
///
/// Advancing past the last bit of a word carries into the next word;
/// retreating from offset 0 borrows from the previous one. Two cursors are
/// equal only when both the word and the offset match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BitCursor {
    word: usize,
    offset: u32,
}

impl BitCursor {
    #[inline]
    pub fn new(word: usize, offset: u32) -> Self {
        debug_assert!((offset as usize) < WORD_BITS);
        Self { word, offset }
    }

    #[inline]
    pub fn word(&self) -> usize {
        self.word
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn bit_pos(&self) -> usize {
        (self.word << WORD_SHIFT) | self.offset as usize
    }

    #[inline]
    pub fn mask(&self) -> Word {
        1 << self.offset
    }

    #[inline]
    pub fn advance(&mut self) {
        self.offset += 1;
        if self.offset as usize == WORD_BITS {
            self.offset = 0;
            self.word += 1;
        }
    }

    /// # Panics
    ///
    /// Panics in debug builds when retreating from position 0.
    #[inline]
    pub fn retreat(&mut self) {
        if self.offset == 0 {
            self.offset = WORD_BITS as u32 - 1;
            self.word -= 1;
        } else {
            self.offset -= 1;
        }
    }
}

impl From<usize> for BitCursor {
    #[inline]
    fn from(pos: usize) -> Self {
        let idx = BitIndex(pos);
        Self {
            word: idx.word(),
            offset: idx.offset(),
        }
    }
}

/// Iterator over the logical bits of a [`BitVector`](crate::BitVector).
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [Word],
    front: BitCursor,
    back: BitCursor,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(words: &'a [Word], len: usize) -> Self {
        Self {
            words,
            front: BitCursor::default(),
            back: BitCursor::from(len),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let bit = self.words[self.front.word] & self.front.mask() != 0;
        self.front.advance();
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.bit_pos() - self.front.bit_pos();
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back.retreat();
        Some(self.words[self.back.word] & self.back.mask() != 0)
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Iterator yielding a [`BitRef`] for every logical bit.
#[derive(Debug)]
pub struct IterMut<'a> {
    words: &'a [Cell<Word>],
    front: BitCursor,
    back: BitCursor,
}

impl<'a> IterMut<'a> {
    pub(crate) fn new(words: &'a mut [Word], len: usize) -> Self {
        Self {
            words: Cell::from_mut(words).as_slice_of_cells(),
            front: BitCursor::default(),
            back: BitCursor::from(len),
        }
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = BitRef<'a>;

    #[inline]
    fn next(&mut self) -> Option<BitRef<'a>> {
        if self.front == self.back {
            return None;
        }
        let bit = BitRef::new(&self.words[self.front.word], self.front.mask());
        self.front.advance();
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.bit_pos() - self.front.bit_pos();
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for IterMut<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<BitRef<'a>> {
        if self.front == self.back {
            return None;
        }
        self.back.retreat();
        Some(BitRef::new(&self.words[self.back.word], self.back.mask()))
    }
}

impl ExactSizeIterator for IterMut<'_> {}
impl FusedIterator for IterMut<'_> {}
