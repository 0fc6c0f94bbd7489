#[cfg(feature = "std")]
use thiserror::Error;

/// Storage errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The requested word count does not fit in the address space
    #[cfg_attr(
        feature = "std",
        error("capacity overflow: {words} words of {word_size} bytes")
    )]
    CapacityOverflow { words: usize, word_size: usize },

    /// The allocator could not provide the block
    #[cfg_attr(
        feature = "std",
        error("out of memory: failed to allocate {bytes} bytes aligned to {align}")
    )]
    OutOfMemory { bytes: usize, align: usize },

    /// Alignment must be a non-zero power of two
    #[cfg_attr(feature = "std", error("alignment {0} is not a power of two"))]
    InvalidAlignment(usize),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::CapacityOverflow { words, word_size } => {
                write!(f, "capacity overflow: {} words of {} bytes", words, word_size)
            }
            StorageError::OutOfMemory { bytes, align } => write!(
                f,
                "out of memory: failed to allocate {} bytes aligned to {}",
                bytes, align
            ),
            StorageError::InvalidAlignment(align) => {
                write!(f, "alignment {} is not a power of two", align)
            }
        }
    }
}
