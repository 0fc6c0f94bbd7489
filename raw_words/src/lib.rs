//! # raw_words
//!
//! Aligned, fixed-capacity word storage with a pluggable allocator.
//!
//! ```rust
//! use raw_words::AlignedBuffer;
//!
//! let mut words = AlignedBuffer::<u32>::filled(4, 0x00).expect("allocation failed");
//! words[2] = 0xDEAD_BEEF;
//!
//! assert_eq!(words.capacity(), 4);
//! assert_eq!(words.as_slice(), &[0, 0, 0xDEAD_BEEF, 0]);
//! assert_eq!(words.as_ptr() as usize % raw_words::DEFAULT_ALIGN, 0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allocator;
pub mod buffer;
pub mod error;

pub use allocator::{
    AlignedAllocator, DEFAULT_ALIGN, SharedAllocator, WordAllocator, default_allocator,
};
pub use buffer::AlignedBuffer;
pub use error::StorageError;
