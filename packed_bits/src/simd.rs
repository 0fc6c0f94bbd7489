//! Batch marking of arithmetic progressions.
//!
//! Two kernels produce identical words:
//!
//! 1. **AVX2**: four progression terms per step. Word index and mask are
//!    computed for all four 64-bit lanes at once, then each lane is OR-ed
//!    into its word with its own scalar read-modify-write, since two lanes
//!    may land in the same word.
//! 2. **Scalar**: one term at a time; also finishes the `count % 4` tail of
//!    the AVX2 kernel.
//!
//! The kernel is selected once per process and cached.

use crate::bit_ops;
use crate::index::Word;

/// Batch-marking implementation in use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kernel {
    Scalar,
    Avx2,
}

/// Returns the kernel [`set_progression`] dispatches to.
pub fn kernel() -> Kernel {
    detected().0
}

/// Sets `count` bits at `pos, pos + stride, ...` to one.
///
/// # Safety
///
/// `count == 0` or the word holding `pos + (count - 1) * stride` lies inside
/// `words`. Every term must be representable as a `usize`.
#[inline]
pub(crate) unsafe fn set_progression(words: &mut [Word], pos: usize, stride: usize, count: usize) {
    debug_assert!(
        count == 0
            || bit_ops::progression_last(pos, stride, count)
                .is_some_and(|last| crate::index::num_words(last + 1) <= words.len())
    );
    // SAFETY: forwarded caller contract.
    unsafe { (detected().1)(words, pos, stride, count) }
}

type ProgressionFn = unsafe fn(&mut [Word], usize, usize, usize);

#[cfg(feature = "simd")]
fn detected() -> (Kernel, ProgressionFn) {
    use std::sync::OnceLock;

    static FN: OnceLock<(Kernel, ProgressionFn)> = OnceLock::new();
    *FN.get_or_init(|| {
        let selected = detect();
        tracing::debug!(kernel = ?selected.0, "selected progression kernel");
        selected
    })
}

#[cfg(not(feature = "simd"))]
fn detected() -> (Kernel, ProgressionFn) {
    (Kernel::Scalar, bit_ops::set_progression)
}

#[cfg(feature = "simd")]
fn detect() -> (Kernel, ProgressionFn) {
    #[cfg(target_arch = "x86_64")]
    {
        if std::is_x86_feature_detected!("avx2") {
            return (Kernel::Avx2, avx2_entry);
        }
    }
    (Kernel::Scalar, bit_ops::set_progression)
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
unsafe fn avx2_entry(words: &mut [Word], pos: usize, stride: usize, count: usize) {
    // SAFETY: only installed after avx2 was detected; bounds are the
    // caller's contract.
    unsafe { avx2::set_progression(words, pos, stride, count) }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) mod avx2 {
    use core::arch::x86_64::*;

    use crate::bit_ops;
    use crate::index::{WORD_MASK, WORD_SHIFT, Word};

    /// # Safety
    ///
    /// The CPU must support AVX2, and the bounds contract of
    /// [`super::set_progression`] holds.
    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn set_progression(
        words: &mut [Word],
        pos: usize,
        stride: usize,
        count: usize,
    ) {
        let full = count - count % 4;
        let mut lane_word = [0u64; 4];
        let mut lane_mask = [0u64; 4];

        // SAFETY: avx2 is enabled for this function; the lane arrays hold
        // exactly four u64s; every progression term up to the last one lies
        // inside `words` by the caller's contract.
        unsafe {
            // Lanes past a short progression are computed but never stored.
            let step = _mm256_set1_epi64x(stride.wrapping_mul(4) as i64);
            let offset_mask = _mm256_set1_epi64x(WORD_MASK as i64);
            let one = _mm256_set1_epi64x(1);
            let mut terms = _mm256_set_epi64x(
                pos.wrapping_add(stride.wrapping_mul(3)) as i64,
                pos.wrapping_add(stride.wrapping_mul(2)) as i64,
                pos.wrapping_add(stride) as i64,
                pos as i64,
            );

            let mut done = 0;
            while done < full {
                let idx = _mm256_srli_epi64::<{ WORD_SHIFT as i32 }>(terms);
                let mask = _mm256_sllv_epi64(one, _mm256_and_si256(terms, offset_mask));
                _mm256_storeu_si256(lane_word.as_mut_ptr().cast(), idx);
                _mm256_storeu_si256(lane_mask.as_mut_ptr().cast(), mask);

                for lane in 0..4 {
                    let word = lane_word[lane] as usize;
                    debug_assert!(word < words.len());
                    *words.get_unchecked_mut(word) |= lane_mask[lane] as Word;
                }

                terms = _mm256_add_epi64(terms, step);
                done += 4;
            }

            let tail = pos.wrapping_add(done.wrapping_mul(stride));
            bit_ops::set_progression(words, tail, stride, count - done);
        }
    }
}
