use core::fmt;
use core::mem::size_of;
use core::ptr::{self, NonNull};

use bytemuck::Pod;

use crate::allocator::{SharedAllocator, default_allocator, words_layout};
use crate::StorageError;

/// Owned, aligned, fixed-capacity array of `T` words.
///
/// The buffer never grows implicitly: [`grow_to`](Self::grow_to) and
/// [`replace_with_capacity`](Self::replace_with_capacity) are the only
/// operations that move the block, and both are explicit. An empty buffer
/// holds no allocation.
///
/// Every word handed out by the buffer is initialised. Words exposed by
/// growth read as zero, but owners should treat them as unspecified and
/// overwrite them before giving them meaning.
///
/// # Examples
///
/// ```
/// use raw_words::AlignedBuffer;
///
/// let mut buf = AlignedBuffer::<u32>::filled(2, 0xFF).unwrap();
/// assert_eq!(buf.as_slice(), &[u32::MAX, u32::MAX]);
///
/// buf.grow_to(4).unwrap();
/// assert_eq!(buf.capacity(), 4);
/// assert_eq!(&buf.as_slice()[..2], &[u32::MAX, u32::MAX]);
/// ```
pub struct AlignedBuffer<T: Pod> {
    ptr: NonNull<T>,
    capacity: usize,
    allocator: SharedAllocator,
}

// SAFETY: the buffer uniquely owns its block; the allocator is Send + Sync.
unsafe impl<T: Pod + Send> Send for AlignedBuffer<T> {}
// SAFETY: shared access only hands out `&[T]`.
unsafe impl<T: Pod + Sync> Sync for AlignedBuffer<T> {}

impl<T: Pod> AlignedBuffer<T> {
    /// Creates an empty buffer using the default 32-byte aligned allocator.
    pub fn new() -> Self {
        Self::new_in(default_allocator())
    }

    /// Creates an empty buffer that will allocate through `allocator`.
    pub fn new_in(allocator: SharedAllocator) -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            allocator,
        }
    }

    /// Allocates `words` words with every byte set to `byte`.
    pub fn filled(words: usize, byte: u8) -> Result<Self, StorageError> {
        Self::filled_in(words, byte, default_allocator())
    }

    pub fn filled_in(
        words: usize,
        byte: u8,
        allocator: SharedAllocator,
    ) -> Result<Self, StorageError> {
        let ptr = allocate_block::<T>(&allocator, words)?;
        // SAFETY: `ptr` is valid for `words` writes of `T`.
        unsafe { ptr::write_bytes(ptr.as_ptr(), byte, words) };
        Ok(Self {
            ptr,
            capacity: words,
            allocator,
        })
    }

    /// Number of allocated words.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    pub fn allocator(&self) -> &SharedAllocator {
        &self.allocator
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is valid (or dangling with zero length) and every
        // word is initialised.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.capacity) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees uniqueness.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.capacity) }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Overwrites every allocated byte with `byte`.
    pub fn fill_bytes(&mut self, byte: u8) {
        bytemuck::cast_slice_mut::<T, u8>(self.as_mut_slice()).fill(byte);
    }

    /// Grows the block to at least `words` words, keeping the current words
    /// at the low end. Does nothing when the capacity already suffices.
    pub fn grow_to(&mut self, words: usize) -> Result<(), StorageError> {
        if words <= self.capacity {
            return Ok(());
        }
        let new_ptr = allocate_block::<T>(&self.allocator, words)?;
        // SAFETY: the blocks are distinct; the old one holds `capacity`
        // initialised words and the new one has room for `words > capacity`.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.capacity);
            ptr::write_bytes(
                new_ptr.as_ptr().add(self.capacity),
                0,
                words - self.capacity,
            );
        }
        tracing::trace!(
            old_words = self.capacity,
            new_words = words,
            "grew word buffer"
        );
        self.release();
        self.ptr = new_ptr;
        self.capacity = words;
        Ok(())
    }

    /// Releases the current block and allocates a fresh one of `words` words.
    ///
    /// Contents are not carried over. If the allocation fails the buffer is
    /// left empty.
    pub fn replace_with_capacity(&mut self, words: usize) -> Result<(), StorageError> {
        let old_words = self.capacity;
        self.release();
        let ptr = allocate_block::<T>(&self.allocator, words)?;
        // SAFETY: `ptr` is valid for `words` writes of `T`.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, words) };
        tracing::trace!(old_words, new_words = words, "replaced word buffer");
        self.ptr = ptr;
        self.capacity = words;
        Ok(())
    }

    /// Deep copy sharing the same allocator.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        let ptr = allocate_block::<T>(&self.allocator, self.capacity)?;
        // SAFETY: both blocks hold `capacity` words and do not overlap.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), ptr.as_ptr(), self.capacity) };
        Ok(Self {
            ptr,
            capacity: self.capacity,
            allocator: self.allocator.clone(),
        })
    }

    /// Replaces `self` with a deep copy of `source`, adopting its allocator.
    ///
    /// The current block is released before the copy is allocated. If the
    /// allocation fails `self` is left empty.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), StorageError> {
        self.release();
        self.allocator = source.allocator.clone();
        let ptr = allocate_block::<T>(&self.allocator, source.capacity)?;
        // SAFETY: distinct blocks of `source.capacity` words.
        unsafe { ptr::copy_nonoverlapping(source.ptr.as_ptr(), ptr.as_ptr(), source.capacity) };
        self.ptr = ptr;
        self.capacity = source.capacity;
        Ok(())
    }

    fn release(&mut self) {
        if self.capacity > 0 && size_of::<T>() > 0 {
            // The layout was valid when the block was allocated.
            if let Ok(layout) = words_layout::<T>(self.capacity, self.allocator.align()) {
                // SAFETY: the block came from this allocator with this layout.
                unsafe { self.allocator.deallocate(self.ptr.as_ptr().cast(), layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.capacity = 0;
    }
}

fn allocate_block<T: Pod>(
    allocator: &SharedAllocator,
    words: usize,
) -> Result<NonNull<T>, StorageError> {
    let layout = words_layout::<T>(words, allocator.align())?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // SAFETY: the layout has a non-zero size.
    let raw = unsafe { allocator.allocate(layout) };
    NonNull::new(raw.cast::<T>()).ok_or_else(|| {
        tracing::warn!(
            bytes = layout.size(),
            align = layout.align(),
            "word allocation failed"
        );
        StorageError::OutOfMemory {
            bytes: layout.size(),
            align: layout.align(),
        }
    })
}

impl<T: Pod> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Pod> Clone for AlignedBuffer<T> {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the copy.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(buf) => buf,
            Err(err) => panic!("failed to clone word buffer: {}", err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            panic!("failed to clone word buffer: {}", err);
        }
    }
}

impl<T: Pod> Default for AlignedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("capacity", &self.capacity)
            .field("align", &self.allocator.align())
            .field("words", &self.as_slice())
            .finish()
    }
}

impl<T: Pod> core::ops::Index<usize> for AlignedBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T: Pod> core::ops::IndexMut<usize> for AlignedBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}
