//! Aligned allocation for word arrays.
//!
//! The allocator is injected into every [`AlignedBuffer`](crate::AlignedBuffer)
//! as a [`SharedAllocator`] rather than baked into the buffer's type, so a
//! test can hand in a counting or failing allocator without changing the
//! container type.
//!
//! # Examples
//!
//! ```
//! use raw_words::{AlignedAllocator, WordAllocator};
//!
//! let alloc = AlignedAllocator::new(64).expect("64 is a power of two");
//! assert_eq!(alloc.align(), 64);
//! assert!(AlignedAllocator::new(48).is_err());
//! ```

use alloc::sync::Arc;
use core::alloc::Layout;
use core::fmt::Debug;
use core::mem::{align_of, size_of};

use crate::StorageError;

/// Byte boundary used when no alignment is requested (one AVX2 register).
pub const DEFAULT_ALIGN: usize = 32;

/// Allocation strategy for word arrays.
///
/// Implementations hand out raw blocks described by a [`Layout`]; the
/// buffer owns the bookkeeping (word count, overflow checks, copies).
pub trait WordAllocator: Debug + Send + Sync {
    /// Minimum byte alignment of every block this allocator returns.
    fn align(&self) -> usize;

    /// Allocates a block for `layout`, returning null on failure.
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    unsafe fn allocate(&self, layout: Layout) -> *mut u8;

    /// Releases a block. Null pointers are ignored.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from [`allocate`](Self::allocate) on this
    /// allocator with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);
}

/// Allocator handle shared between a buffer and its clones.
pub type SharedAllocator = Arc<dyn WordAllocator>;

/// Global-heap allocator with a fixed alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedAllocator {
    align: usize,
}

impl AlignedAllocator {
    pub fn new(align: usize) -> Result<Self, StorageError> {
        if align.is_power_of_two() {
            Ok(Self { align })
        } else {
            Err(StorageError::InvalidAlignment(align))
        }
    }
}

impl Default for AlignedAllocator {
    fn default() -> Self {
        Self {
            align: DEFAULT_ALIGN,
        }
    }
}

impl WordAllocator for AlignedAllocator {
    #[inline]
    fn align(&self) -> usize {
        self.align
    }

    unsafe fn allocate(&self, layout: Layout) -> *mut u8 {
        debug_assert!(layout.size() > 0);
        debug_assert!(layout.align() >= self.align);
        // SAFETY: caller guarantees a non-zero size.
        unsafe { alloc::alloc::alloc(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        if ptr.is_null() {
            return;
        }
        // SAFETY: caller guarantees `ptr` came from `allocate` with `layout`.
        unsafe { alloc::alloc::dealloc(ptr, layout) }
    }
}

/// Returns a shared handle to an [`AlignedAllocator`] with [`DEFAULT_ALIGN`].
pub fn default_allocator() -> SharedAllocator {
    Arc::new(AlignedAllocator::default())
}

/// Layout of `words` elements of `T` aligned to at least `align` bytes.
///
/// Fails with [`StorageError::CapacityOverflow`] when the byte size does not
/// fit in `usize` or exceeds `isize::MAX` once rounded to the alignment.
pub fn words_layout<T>(words: usize, align: usize) -> Result<Layout, StorageError> {
    let overflow = || StorageError::CapacityOverflow {
        words,
        word_size: size_of::<T>(),
    };
    let bytes = words.checked_mul(size_of::<T>()).ok_or_else(overflow)?;
    Layout::from_size_align(bytes, align.max(align_of::<T>())).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two() {
        assert_eq!(
            AlignedAllocator::new(0),
            Err(StorageError::InvalidAlignment(0))
        );
        assert_eq!(
            AlignedAllocator::new(24),
            Err(StorageError::InvalidAlignment(24))
        );
        assert_eq!(AlignedAllocator::new(16).unwrap().align(), 16);
        assert_eq!(AlignedAllocator::default().align(), DEFAULT_ALIGN);
    }

    #[test]
    fn allocation_honours_alignment() {
        for align in [8usize, 32, 64, 4096] {
            let alloc = AlignedAllocator::new(align).unwrap();
            let layout = words_layout::<u32>(17, alloc.align()).unwrap();
            unsafe {
                let ptr = alloc.allocate(layout);
                assert!(!ptr.is_null());
                assert_eq!(ptr as usize % align, 0);
                alloc.deallocate(ptr, layout);
            }
        }
    }

    #[test]
    fn deallocate_null_is_noop() {
        let alloc = AlignedAllocator::default();
        let layout = words_layout::<u32>(1, alloc.align()).unwrap();
        unsafe { alloc.deallocate(core::ptr::null_mut(), layout) };
    }

    #[test]
    fn layout_overflow_is_reported() {
        assert_eq!(
            words_layout::<u32>(usize::MAX, DEFAULT_ALIGN),
            Err(StorageError::CapacityOverflow {
                words: usize::MAX,
                word_size: 4
            })
        );
        // Fits in usize but not in isize once rounded.
        assert!(words_layout::<u32>(usize::MAX / 4, DEFAULT_ALIGN).is_err());
    }

    #[test]
    fn layout_keeps_the_word_alignment_floor() {
        let layout = words_layout::<u64>(3, 1).unwrap();
        assert_eq!(layout.align(), align_of::<u64>());
        assert_eq!(layout.size(), 24);
    }
}
