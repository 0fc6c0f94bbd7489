/// Storage word. Single-bit writes are read-modify-writes of one `Word`.
pub type Word = u32;

pub const WORD_BITS: usize = Word::BITS as usize;
pub const WORD_SHIFT: u32 = WORD_BITS.trailing_zeros();
pub const WORD_MASK: usize = WORD_BITS - 1;

const _: () = assert!(1 << WORD_SHIFT == WORD_BITS, "WORD_BITS must be a power of two");

/// A logical bit position, decomposed into word index and in-word offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitIndex(pub usize);

impl BitIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub fn word(self) -> usize {
        self.0 >> WORD_SHIFT
    }

    #[inline]
    pub fn offset(self) -> u32 {
        (self.0 & WORD_MASK) as u32
    }

    #[inline]
    pub fn mask(self) -> Word {
        1 << self.offset()
    }
}

impl From<usize> for BitIndex {
    #[inline]
    fn from(pos: usize) -> Self {
        BitIndex(pos)
    }
}

/// Words needed to hold `bits` bits.
#[inline]
pub const fn num_words(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}
