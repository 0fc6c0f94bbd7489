//! Single-bit proxy.

use core::cell::Cell;
use core::fmt;

use crate::index::Word;

/// A view of one bit: the word holding it and the bit's mask.
///
/// Produced by [`BitVector::bit_mut`](crate::BitVector::bit_mut) and
/// [`IterMut`](crate::iter::IterMut). Several proxies may point into the same
/// word. All of them borrow the vector mutably, so none can outlive a
/// reallocation.
///
/// ```
/// use packed_bits::BitVector;
///
/// let mut bits = BitVector::with_len(8, false).unwrap();
/// let mut bit = bits.bit_mut(3).unwrap();
/// bit.set(true);
/// bit.flip();
/// bit.flip();
/// assert!(bit.get());
/// assert_eq!(bits.get(3), Ok(true));
/// ```
///
/// A proxy cannot outlive a push that may reallocate:
///
/// ```compile_fail
/// use packed_bits::BitVector;
///
/// let mut bits = BitVector::with_len(32, false).unwrap();
/// let mut bit = bits.bit_mut(0).unwrap();
/// bits.push(true).unwrap();
/// bit.set(true);
/// ```
pub struct BitRef<'a> {
    word: &'a Cell<Word>,
    mask: Word,
}

impl<'a> BitRef<'a> {
    #[inline]
    pub(crate) fn new(word: &'a Cell<Word>, mask: Word) -> Self {
        debug_assert!(mask.is_power_of_two());
        Self { word, mask }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.word.get() & self.mask != 0
    }

    #[inline]
    pub fn set(&mut self, value: bool) {
        let word = self.word.get();
        self.word
            .set(if value { word | self.mask } else { word & !self.mask });
    }

    /// Copies the value of `other`, not its location.
    #[inline]
    pub fn assign(&mut self, other: &BitRef<'_>) {
        self.set(other.get());
    }

    #[inline]
    pub fn flip(&mut self) {
        self.word.set(self.word.get() ^ self.mask);
    }

    #[inline]
    pub fn mask(&self) -> Word {
        self.mask
    }
}

impl fmt::Debug for BitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitRef")
            .field("mask", &format_args!("{:#010x}", self.mask))
            .field("value", &self.get())
            .finish()
    }
}
