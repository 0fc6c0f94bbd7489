//! Dense bit vector over aligned 32-bit words.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```rust
//! use packed_bits::BitVector;
//!
//! let mut bits = BitVector::new();
//! bits.push(false).unwrap();
//! bits.push(true).unwrap();
//! bits.push(true).unwrap();
//!
//! assert_eq!(bits.len(), 3);
//! assert_eq!(bits.get(0), Ok(false));
//! assert!(bits[1] && bits[2]);
//! ```
//!
//! ## Marking and scanning
//!
//! ```rust
//! use packed_bits::BitVector;
//!
//! let mut bits = BitVector::with_len(100, false).unwrap();
//! // Mark 10, 13, 16, ..., 97
//! bits.set_progression(10, 3, 30).unwrap();
//! assert_eq!(bits.count_ones(), 30);
//!
//! bits.set_progression(11, 1, 2).unwrap();
//! assert_eq!(bits.skip_ones(10), Ok(14));
//! ```
//!
//! # Padding
//!
//! Storage is allocated in whole words, so the bits between `len()` and
//! `capacity()` physically exist. Whole-word fills (`with_len`, `assign`)
//! write them too; nothing else gives them a defined value.

use core::cell::Cell;
use core::fmt;

use raw_words::{AlignedBuffer, SharedAllocator, default_allocator};

use crate::bit_ops;
use crate::error::{BitVecError, Result};
use crate::index::{BitIndex, WORD_BITS, WORD_MASK, Word, num_words};
use crate::iter::{BitCursor, Iter, IterMut};
use crate::reference::BitRef;
use crate::simd;

pub struct BitVector {
    words: AlignedBuffer<Word>,
    len: usize,
}

impl BitVector {
    /// Creates an empty vector. Nothing is allocated until the first push.
    pub fn new() -> Self {
        Self::new_in(default_allocator())
    }

    pub fn new_in(allocator: SharedAllocator) -> Self {
        Self {
            words: AlignedBuffer::new_in(allocator),
            len: 0,
        }
    }

    /// Creates a vector of `len` bits, all equal to `value`.
    ///
    /// Every allocated word is filled, padding included.
    pub fn with_len(len: usize, value: bool) -> Result<Self> {
        Self::with_len_in(len, value, default_allocator())
    }

    pub fn with_len_in(len: usize, value: bool, allocator: SharedAllocator) -> Result<Self> {
        let words =
            AlignedBuffer::filled_in(num_words(len), bit_ops::fill_byte(value), allocator)?;
        Ok(Self { words, len })
    }

    /// Deep copy with the same allocator and word capacity.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            words: self.words.try_clone()?,
            len: self.len,
        })
    }

    /// Replaces `self` with a deep copy of `source`, adopting its allocator.
    ///
    /// On failure `self` is left empty.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()> {
        self.len = 0;
        self.words.try_clone_from(&source.words)?;
        self.len = source.len;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits the allocated words can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.capacity().saturating_mul(WORD_BITS)
    }

    #[inline]
    pub fn word_capacity(&self) -> usize {
        self.words.capacity()
    }

    pub fn allocator(&self) -> &SharedAllocator {
        self.words.allocator()
    }

    /// All allocated words, padding included.
    #[inline]
    pub fn as_words(&self) -> &[Word] {
        self.words.as_slice()
    }

    #[inline]
    pub fn as_words_mut(&mut self) -> &mut [Word] {
        self.words.as_mut_slice()
    }

    /// Raw bytes of the allocated words in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.words.as_slice())
    }

    #[inline(always)]
    fn check(&self, pos: usize) -> Result<()> {
        #[cfg(feature = "bounds-check")]
        if pos >= self.len {
            return Err(BitVecError::IndexOutOfBounds { pos, len: self.len });
        }
        #[cfg(not(feature = "bounds-check"))]
        debug_assert!(pos < self.len, "pos {} out of range for size {}", pos, self.len);
        Ok(())
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Result<bool> {
        self.check(pos)?;
        Ok(bit_ops::read(self.words.as_slice(), pos))
    }

    /// Proxy for the bit at `pos`.
    #[inline]
    pub fn bit_mut(&mut self, pos: usize) -> Result<BitRef<'_>> {
        self.check(pos)?;
        let idx = BitIndex(pos);
        let cells = Cell::from_mut(self.words.as_mut_slice()).as_slice_of_cells();
        Ok(BitRef::new(&cells[idx.word()], idx.mask()))
    }

    #[inline]
    pub fn set(&mut self, pos: usize, value: bool) -> Result<()> {
        self.check(pos)?;
        bit_ops::write(self.words.as_mut_slice(), pos, value);
        Ok(())
    }

    /// Sets the bit at `pos` without a bounds check.
    ///
    /// # Safety
    ///
    /// `pos < self.len()`.
    #[inline(always)]
    pub unsafe fn set_true_unchecked(&mut self, pos: usize) {
        debug_assert!(pos < self.len);
        // SAFETY: `pos < len <= capacity`.
        unsafe { bit_ops::set_true(self.words.as_mut_slice(), pos) }
    }

    /// Sets `pos, pos + stride, ..., pos + 5 * stride` without bounds checks.
    ///
    /// # Safety
    ///
    /// `pos + 5 * stride < self.len()`.
    #[inline(always)]
    pub unsafe fn set_true_6_unchecked(&mut self, pos: usize, stride: usize) {
        debug_assert!(bit_ops::progression_last(pos, stride, 6).is_some_and(|l| l < self.len));
        // SAFETY: the last term is below `len`.
        unsafe { bit_ops::set_true_6(self.words.as_mut_slice(), pos, stride) }
    }

    /// Sets `count` bits at `pos, pos + stride, ...` using the vector kernel
    /// when available.
    ///
    /// # Safety
    ///
    /// `count == 0` or `pos + (count - 1) * stride < self.len()`, computed
    /// without overflow.
    #[inline]
    pub unsafe fn set_progression_unchecked(&mut self, pos: usize, stride: usize, count: usize) {
        debug_assert!(
            count == 0
                || bit_ops::progression_last(pos, stride, count).is_some_and(|l| l < self.len)
        );
        // SAFETY: forwarded contract.
        unsafe { simd::set_progression(self.words.as_mut_slice(), pos, stride, count) }
    }

    /// Checked form of [`set_progression_unchecked`](Self::set_progression_unchecked).
    ///
    /// Validates the last term once, then marks through the same kernel.
    pub fn set_progression(&mut self, pos: usize, stride: usize, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let last = bit_ops::progression_last(pos, stride, count).unwrap_or(usize::MAX);
        if last >= self.len {
            return Err(BitVecError::ProgressionOutOfBounds {
                last,
                len: self.len,
            });
        }
        // SAFETY: the last, largest term is in range.
        unsafe { self.set_progression_unchecked(pos, stride, count) };
        Ok(())
    }

    /// Appends a bit, doubling the word capacity when full.
    pub fn push(&mut self, value: bool) -> Result<()> {
        if self.len == self.capacity() {
            let bits = match self.words.capacity() {
                0 => WORD_BITS,
                words => words.saturating_mul(2).saturating_mul(WORD_BITS),
            };
            self.reserve(bits)?;
        }
        bit_ops::write(self.words.as_mut_slice(), self.len, value);
        self.len += 1;
        Ok(())
    }

    /// Ensures room for `bits` bits in total.
    ///
    /// Words beyond the previous capacity have no defined value.
    pub fn reserve(&mut self, bits: usize) -> Result<()> {
        if bits > self.capacity() {
            self.words.grow_to(num_words(bits))?;
        }
        Ok(())
    }

    /// Resizes to `len` bits, all equal to `value`.
    ///
    /// Reallocates only when `len` exceeds the capacity; never shrinks. Every
    /// allocated word is rewritten, padding included. On allocation failure
    /// the vector is left empty.
    pub fn assign(&mut self, len: usize, value: bool) -> Result<()> {
        if len > self.capacity() {
            if let Err(err) = self.words.replace_with_capacity(num_words(len)) {
                self.len = 0;
                return Err(err.into());
            }
        }
        self.len = len;
        self.words.fill_bytes(bit_ops::fill_byte(value));
        Ok(())
    }

    /// Sets the length to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of set bits below `len()`.
    pub fn count_ones(&self) -> usize {
        let words = self.words.as_slice();
        let full = self.len / WORD_BITS;
        let mut ones: usize = words[..full].iter().map(|w| w.count_ones() as usize).sum();
        if self.len % WORD_BITS != 0 {
            ones += (words[full] & bit_ops::tail_mask(self.len)).count_ones() as usize;
        }
        ones
    }

    /// Returns the first position at or after `pos` holding a zero bit, or
    /// `len()` if the run of ones reaches the end.
    ///
    /// Whole words of ones are skipped with one trailing-zero count each.
    pub fn skip_ones(&self, mut pos: usize) -> Result<usize> {
        self.check(pos)?;
        let words = self.words.as_slice();
        let len = self.len;

        while pos < len && pos & WORD_MASK != 0 && bit_ops::read(words, pos) {
            pos += 1;
        }

        // `pos` is word aligned here whenever the bit at `pos` is set. Stop a
        // word short of the end so the last word is finished bit by bit.
        while pos + WORD_BITS < len && bit_ops::read(words, pos) {
            let ones = bit_ops::trailing_ones(words[BitIndex(pos).word()]);
            pos += ones;
            if ones != WORD_BITS {
                break;
            }
        }

        while pos < len && bit_ops::read(words, pos) {
            pos += 1;
        }
        Ok(pos)
    }

    /// Iterates over the logical bits.
    ///
    /// The iterator borrows the vector, so it cannot be kept across an
    /// operation that may move the storage:
    ///
    /// ```compile_fail
    /// use packed_bits::BitVector;
    ///
    /// let mut bits = BitVector::with_len(32, true).unwrap();
    /// let mut it = bits.iter();
    /// bits.push(false).unwrap();
    /// it.next();
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.words.as_slice(), self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut::new(self.words.as_mut_slice(), self.len)
    }

    /// Cursor at bit 0.
    #[inline]
    pub fn begin(&self) -> BitCursor {
        BitCursor::default()
    }

    /// Cursor at bit `len()`, one past the last logical bit.
    #[inline]
    pub fn end(&self) -> BitCursor {
        BitCursor::from(self.len)
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BitVector {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the copy.
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.len = 0;
        self.words.clone_from(&source.words);
        self.len = source.len;
    }
}

impl PartialEq for BitVector {
    /// Compares logical bits only; padding is ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let (a, b) = (self.as_words(), other.as_words());
        let full = self.len / WORD_BITS;
        a[..full] == b[..full]
            && (self.len % WORD_BITS == 0
                || (a[full] ^ b[full]) & bit_ops::tail_mask(self.len) == 0)
    }
}

impl Eq for BitVector {}

impl core::ops::Index<usize> for BitVector {
    type Output = bool;

    /// # Panics
    ///
    /// Panics when `pos` is out of range.
    fn index(&self, pos: usize) -> &bool {
        match self.get(pos) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Extend<bool> for BitVector {
    /// # Panics
    ///
    /// Panics if growing the storage fails.
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let wanted = self.len.saturating_add(iter.size_hint().0);
        if let Err(err) = self.reserve(wanted) {
            panic!("{}", err);
        }
        for bit in iter {
            if let Err(err) = self.push(bit) {
                panic!("{}", err);
            }
        }
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVector::new();
        bits.extend(iter);
        bits
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut BitVector {
    type Item = BitRef<'a>;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Bits<'a>(&'a BitVector);

        impl fmt::Debug for Bits<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for bit in self.0.iter() {
                    f.write_str(if bit { "1" } else { "0" })?;
                }
                Ok(())
            }
        }

        f.debug_struct("BitVector")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("bits", &Bits(self))
            .finish()
    }
}
