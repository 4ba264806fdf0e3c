//! Bit-packed cell storage: fixed-width values packed tightly into `u64`
//! words, with conversion to and from the flat one-byte-per-cell form the
//! wire format uses.

/// A compact array where each element is stored using a fixed number of bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedCells {
    /// Raw storage. Elements are packed into 64-bit words and may
    /// straddle word boundaries.
    data: Vec<u64>,
    /// Bits per element (1..=8).
    bits: u8,
    /// Total number of logical elements.
    len: usize,
}

impl PackedCells {
    /// Creates a new array with `len` elements, all initialized to zero.
    ///
    /// `bits` must be in 1..=8.
    pub fn new(bits: u8, len: usize) -> Self {
        debug_assert!((1..=8).contains(&bits), "bits must be in 1..=8");
        let total_bits = len as u64 * u64::from(bits);
        let word_count = total_bits.div_ceil(64) as usize;
        Self {
            data: vec![0u64; word_count],
            bits,
            len,
        }
    }

    /// Smallest width that can hold values up to `max_value` inclusive.
    pub fn min_bits_for(max_value: u8) -> u8 {
        (8 - max_value.leading_zeros() as u8).max(1)
    }

    /// Returns the value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` in debug builds.
    pub fn get(&self, index: usize) -> u8 {
        debug_assert!(index < self.len, "index out of bounds");
        let bit_index = index as u64 * u64::from(self.bits);
        let word = (bit_index / 64) as usize;
        let offset = (bit_index % 64) as u32;
        let mask = (1u64 << self.bits) - 1;
        let mut value = (self.data[word] >> offset) & mask;
        let spill = offset + u32::from(self.bits);
        if spill > 64 {
            let low_bits = 64 - offset;
            value |= (self.data[word + 1] & (mask >> low_bits)) << low_bits;
        }
        value as u8
    }

    /// Sets the value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` in debug builds, or if `value` exceeds
    /// the maximum for the current bit width.
    pub fn set(&mut self, index: usize, value: u8) {
        debug_assert!(index < self.len, "index out of bounds");
        debug_assert!(
            self.bits >= 8 || value < (1u8 << self.bits),
            "value {value} exceeds {}-bit capacity",
            self.bits
        );
        let bit_index = index as u64 * u64::from(self.bits);
        let word = (bit_index / 64) as usize;
        let offset = (bit_index % 64) as u32;
        let mask = (1u64 << self.bits) - 1;
        self.data[word] &= !(mask << offset);
        self.data[word] |= u64::from(value) << offset;
        let spill = offset + u32::from(self.bits);
        if spill > 64 {
            let low_bits = 64 - offset;
            self.data[word + 1] &= !(mask >> low_bits);
            self.data[word + 1] |= u64::from(value) >> low_bits;
        }
    }

    /// Packs a flat byte-per-cell slice at the given width.
    pub fn from_bytes(bits: u8, bytes: &[u8]) -> Self {
        let mut cells = Self::new(bits, bytes.len());
        for (i, &b) in bytes.iter().enumerate() {
            cells.set(i, b);
        }
        cells
    }

    /// Unpacks back to one byte per cell.
    pub fn to_bytes(&self) -> Vec<u8> {
        (0..self.len).map(|i| self.get(i)).collect()
    }

    /// Returns the number of bits per element.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Returns the number of logical elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the backing storage in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.data.len() * 8
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
