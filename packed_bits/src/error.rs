use raw_words::StorageError;
#[cfg(feature = "std")]
use thiserror::Error;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitVecError {
    #[cfg_attr(
        feature = "std",
        error("bit index out of range: pos {pos}, size {len}")
    )]
    IndexOutOfBounds { pos: usize, len: usize },

    #[cfg_attr(
        feature = "std",
        error("progression ends at {last}, past size {len}")
    )]
    ProgressionOutOfBounds { last: usize, len: usize },

    #[cfg_attr(feature = "std", error("storage error: {0}"))]
    Storage(#[cfg_attr(feature = "std", from)] StorageError),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitVecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitVecError::IndexOutOfBounds { pos, len } => {
                write!(f, "bit index out of range: pos {}, size {}", pos, len)
            }
            BitVecError::ProgressionOutOfBounds { last, len } => {
                write!(f, "progression ends at {}, past size {}", last, len)
            }
            BitVecError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<StorageError> for BitVecError {
    fn from(err: StorageError) -> Self {
        BitVecError::Storage(err)
    }
}

pub type Result<T> = core::result::Result<T, BitVecError>;
