use crate::index::{BitIndex, WORD_BITS, Word};

/// Byte that fills a whole word with `value`.
#[inline(always)]
pub(crate) fn fill_byte(value: bool) -> u8 {
    if value { 0xFF } else { 0x00 }
}

#[inline(always)]
pub(crate) fn read(words: &[Word], pos: usize) -> bool {
    let idx = BitIndex(pos);
    words[idx.word()] & idx.mask() != 0
}

#[inline(always)]
pub(crate) fn write(words: &mut [Word], pos: usize, value: bool) {
    let idx = BitIndex(pos);
    if value {
        words[idx.word()] |= idx.mask();
    } else {
        words[idx.word()] &= !idx.mask();
    }
}

/// Sets one bit without a bounds check.
///
/// # Safety
///
/// `pos / WORD_BITS < words.len()`.
#[inline(always)]
pub(crate) unsafe fn set_true(words: &mut [Word], pos: usize) {
    let idx = BitIndex(pos);
    debug_assert!(idx.word() < words.len());
    // SAFETY: caller guarantees the word exists.
    unsafe { *words.get_unchecked_mut(idx.word()) |= idx.mask() };
}

/// Sets `pos, pos + stride, ..., pos + 5 * stride`.
///
/// # Safety
///
/// `(pos + 5 * stride) / WORD_BITS < words.len()`.
#[inline(always)]
pub(crate) unsafe fn set_true_6(words: &mut [Word], mut pos: usize, stride: usize) {
    for _ in 0..6 {
        // SAFETY: every term is at most the last one, which the caller bounds.
        unsafe { set_true(words, pos) };
        pos = pos.wrapping_add(stride);
    }
}

/// Scalar batch kernel: sets `count` bits starting at `pos`, `stride` apart.
///
/// # Safety
///
/// `count == 0` or `(pos + (count - 1) * stride) / WORD_BITS < words.len()`.
pub(crate) unsafe fn set_progression(
    words: &mut [Word],
    mut pos: usize,
    stride: usize,
    count: usize,
) {
    for _ in 0..count {
        // SAFETY: terms increase monotonically up to the caller-bounded last one.
        unsafe { set_true(words, pos) };
        pos = pos.wrapping_add(stride);
    }
}

/// Number of consecutive set bits starting at bit 0 of `word`.
#[inline(always)]
pub(crate) fn trailing_ones(word: Word) -> usize {
    (!word).trailing_zeros() as usize
}

/// Last position of a progression, or `None` if it overflows `usize`.
/// An empty progression reports `pos`.
#[inline]
pub(crate) fn progression_last(pos: usize, stride: usize, count: usize) -> Option<usize> {
    match count {
        0 => Some(pos),
        n => stride.checked_mul(n - 1)?.checked_add(pos),
    }
}

/// Mask of the bits below `bits` in the final word of a `bits`-long vector.
#[inline]
pub(crate) fn tail_mask(bits: usize) -> Word {
    match bits % WORD_BITS {
        0 => Word::MAX,
        rem => (1 << rem) - 1,
    }
}
