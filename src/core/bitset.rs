//! Fixed-size bitset backing descriptor occupancy
//!
//! Bits are stored in 64-bit words, bit `i` living at bit `i % 64` of word
//! `i / 64`. Only the first `nbits` bits are addressable; the rest of the last
//! word is padding and never reported as clear.

const ADDRESS_BITS_PER_WORD: usize = 6;
const BITS_PER_WORD: usize = 1 << ADDRESS_BITS_PER_WORD;
const BIT_INDEX_MASK: usize = BITS_PER_WORD - 1;

#[inline(always)]
const fn word_index(idx: usize) -> usize {
    idx >> ADDRESS_BITS_PER_WORD
}

/// Number of words needed to hold `nbits` bits
pub const fn words_for(nbits: usize) -> usize {
    (nbits + BIT_INDEX_MASK) >> ADDRESS_BITS_PER_WORD
}

/// Bitset of `nbits` bits held in `W` words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet<const W: usize> {
    nbits: usize,
    words: [u64; W],
}

impl<const W: usize> BitSet<W> {
    /// Create an empty bitset with `nbits` addressable bits
    ///
    /// `nbits` is clamped to the storage of `W` words.
    pub const fn new(nbits: usize) -> Self {
        let cap = W * BITS_PER_WORD;
        BitSet {
            nbits: if nbits < cap { nbits } else { cap },
            words: [0; W],
        }
    }

    /// Number of addressable bits
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nbits
    }

    /// Set bit `idx`; out-of-range indices are ignored
    #[inline]
    pub fn set(&mut self, idx: usize) {
        if idx < self.nbits {
            self.words[word_index(idx)] |= 1u64 << (idx & BIT_INDEX_MASK);
        }
    }

    /// Clear bit `idx`; out-of-range indices are ignored
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        if idx < self.nbits {
            self.words[word_index(idx)] &= !(1u64 << (idx & BIT_INDEX_MASK));
        }
    }

    /// Read bit `idx`; out-of-range indices read as clear
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        idx < self.nbits && (self.words[word_index(idx)] & (1u64 << (idx & BIT_INDEX_MASK))) != 0
    }

    /// Clear every bit
    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Lowest clear bit at or above `from`, or `None` if every bit from there is set
    pub fn next_clear_bit(&self, from: usize) -> Option<usize> {
        if from >= self.nbits {
            return None;
        }

        let mut u = word_index(from);
        let mut word = !self.words[u] & (u64::MAX << (from & BIT_INDEX_MASK));

        loop {
            if word != 0 {
                let idx = u * BITS_PER_WORD + word.trailing_zeros() as usize;
                return if idx < self.nbits { Some(idx) } else { None };
            }
            u += 1;
            if u == W {
                return None;
            }
            word = !self.words[u];
        }
    }
}
