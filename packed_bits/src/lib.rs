//! # packed_bits
//!
//! A packed boolean container tuned for write-heavy workloads.
//!
//! Bits live in 32-bit words allocated on a 32-byte boundary. On top of the
//! usual indexed access and amortised `push`, the vector offers unchecked and
//! vectorised bulk marking of arithmetic progressions, and a scan that skips
//! whole words of ones at a time.
//!
//! ```rust
//! use packed_bits::BitVector;
//!
//! let mut marks = BitVector::with_len(1000, false).unwrap();
//!
//! // Mark every multiple of 7 from 49 upwards
//! let count = (marks.len() - 49).div_ceil(7);
//! marks.set_progression(49, 7, count).unwrap();
//!
//! assert_eq!(marks.get(49), Ok(true));
//! assert_eq!(marks.get(50), Ok(false));
//! assert_eq!(marks.count_ones(), count);
//! ```
//!
//! ## Features
//!
//! - `std` (default): `std::error::Error` support via `thiserror`.
//! - `bounds-check` (default): range-check `get`, `set`, `bit_mut` and
//!   `skip_ones`. Without it only debug assertions remain.
//! - `simd` (default): runtime-detected AVX2 kernel for batch marking.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub use error::BitVecError;

mod bit_ops;
pub mod index;
pub mod iter;
pub mod reference;
pub mod simd;

pub mod bitvector;

pub use bitvector::BitVector;
pub use index::{BitIndex, WORD_BITS, Word};
pub use iter::{BitCursor, Iter, IterMut};
pub use reference::BitRef;

pub use raw_words::{AlignedAllocator, SharedAllocator, StorageError, WordAllocator};
