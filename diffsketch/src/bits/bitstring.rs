// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use byteorder::ByteOrder;
use byteorder::LE;

/// An ordered sequence of bits of arbitrary length, not required to be
/// byte-aligned.
///
/// Bit `i` is bit `i % 64` of limb `i / 64`, so the whole sequence reads as
/// a little-endian unsigned integer of unbounded width. Two invariants hold
/// at all times:
///
/// - `limbs.len()` is exactly `bit_len.div_ceil(64)`
/// - bits of the last limb at positions `>= bit_len` are zero
///
/// The second invariant is what makes the derived equality and hashing
/// correct: equal bit sequences of equal length are limb-identical.
///
/// # Examples
///
/// ```
/// use diffsketch::bits::Bitstring;
///
/// let bits = Bitstring::from_u64(0b10110, 5);
/// assert_eq!(bits.len(), 5);
/// assert!(!bits.bit(0));
/// assert!(bits.bit(1));
/// assert_eq!(bits.to_bytes(), vec![0b10110]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstring {
    bit_len: usize,
    limbs: Vec<u64>,
}

impl Bitstring {
    /// Creates an empty bitstring of length zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bitstring of `bit_len` zero bits.
    pub fn zero(bit_len: usize) -> Self {
        Bitstring {
            bit_len,
            limbs: vec![0; bit_len.div_ceil(64)],
        }
    }

    /// Creates a bitstring from packed bytes; bit `i` of byte `j` becomes
    /// bit `8 * j + i`. The length is `8 * bytes.len()`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(8));
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            limbs.push(LE::read_u64(chunk));
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut buf = [0u8; 8];
            buf[..rest.len()].copy_from_slice(rest);
            limbs.push(LE::read_u64(&buf));
        }
        Bitstring {
            bit_len: bytes.len() * 8,
            limbs,
        }
    }

    /// Creates a bitstring of length `bit_len` from the low bits of `value`.
    /// Bits of `value` at positions `>= bit_len` are discarded.
    pub fn from_u64(value: u64, bit_len: usize) -> Self {
        let mut bits = Bitstring::zero(bit_len);
        if bit_len > 0 {
            bits.limbs[0] = value;
            bits.mask_excess();
        }
        bits
    }

    /// Creates a bitstring from individual bits, first bit at index 0.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut out = Bitstring::zero(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                out.limbs[i >> 6] |= 1u64 << (i & 63);
            }
        }
        out
    }

    /// Returns the number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// Returns whether the sequence has length zero.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.bit_len, "bit index out of range");
        (self.limbs[index >> 6] >> (index & 63)) & 1 == 1
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < self.bit_len, "bit index out of range");
        let mask = 1u64 << (index & 63);
        if value {
            self.limbs[index >> 6] |= mask;
        } else {
            self.limbs[index >> 6] &= !mask;
        }
    }

    /// Appends one bit at the end of the sequence.
    pub fn push(&mut self, value: bool) {
        if self.bit_len == self.limbs.len() * 64 {
            self.limbs.push(0);
        }
        self.bit_len += 1;
        if value {
            let index = self.bit_len - 1;
            self.limbs[index >> 6] |= 1u64 << (index & 63);
        }
    }

    /// Packs the sequence into bytes, `len().div_ceil(8)` of them; the final
    /// partial byte, if any, is padded with zero bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let byte_len = self.bit_len.div_ceil(8);
        let mut bytes = vec![0u8; self.limbs.len() * 8];
        for (i, &limb) in self.limbs.iter().enumerate() {
            LE::write_u64(&mut bytes[i * 8..(i + 1) * 8], limb);
        }
        bytes.truncate(byte_len);
        bytes
    }

    /// Returns a copy truncated or zero-extended on the most significant end
    /// to exactly `bit_len` bits.
    pub fn resized(&self, bit_len: usize) -> Bitstring {
        let mut limbs = self.limbs.clone();
        limbs.resize(bit_len.div_ceil(64), 0);
        let mut out = Bitstring { bit_len, limbs };
        out.mask_excess();
        out
    }

    /// Returns a copy with all trailing zero bits removed; the length of the
    /// result is one past the highest set bit, or zero if no bit is set.
    pub fn trimmed(&self) -> Bitstring {
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            if limb != 0 {
                let top = 64 - limb.leading_zeros() as usize;
                let bit_len = i * 64 + top;
                let mut limbs = self.limbs.clone();
                limbs.truncate(bit_len.div_ceil(64));
                return Bitstring { bit_len, limbs };
            }
        }
        Bitstring::new()
    }

    /// Builds a bitstring from raw limbs, enforcing both representation
    /// invariants.
    pub(crate) fn from_limbs(mut limbs: Vec<u64>, bit_len: usize) -> Bitstring {
        limbs.resize(bit_len.div_ceil(64), 0);
        let mut out = Bitstring { bit_len, limbs };
        out.mask_excess();
        out
    }

    pub(crate) fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    fn mask_excess(&mut self) {
        let excess = self.bit_len % 64;
        if excess != 0 {
            if let Some(last) = self.limbs.last_mut() {
                *last &= (1u64 << excess) - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bitstring;

    #[test]
    fn test_zero_and_len() {
        let bits = Bitstring::zero(5);
        assert_eq!(bits.len(), 5);
        assert!(!bits.is_empty());
        assert!((0..5).all(|i| !bits.bit(i)));
        assert!(Bitstring::new().is_empty());
    }

    #[test]
    fn test_bytes_round_trip() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x00, 0x55, 0xAA, 0x7F];
        let bits = Bitstring::from_bytes(&bytes);
        assert_eq!(bits.len(), 72);
        assert_eq!(bits.to_bytes(), bytes);
    }

    #[test]
    fn test_from_u64_discards_high_bits() {
        let bits = Bitstring::from_u64(0b1110110, 5);
        assert_eq!(bits, Bitstring::from_u64(0b10110, 5));
        assert_eq!(bits.to_bytes(), vec![0b10110]);
    }

    #[test]
    fn test_from_bits_and_bit() {
        let bits = Bitstring::from_bits(&[true, false, true, true, false]);
        assert_eq!(bits.len(), 5);
        assert!(bits.bit(0));
        assert!(!bits.bit(1));
        assert!(bits.bit(2));
        assert_eq!(bits, Bitstring::from_u64(0b01101, 5));
    }

    #[test]
    fn test_push_crosses_limb_boundary() {
        let mut bits = Bitstring::new();
        for i in 0..130 {
            bits.push(i % 3 == 0);
        }
        assert_eq!(bits.len(), 130);
        assert!(bits.bit(0));
        assert!(!bits.bit(1));
        assert!(bits.bit(63));
        assert!(!bits.bit(64));
        assert!(bits.bit(129));
    }

    #[test]
    fn test_set_bit() {
        let mut bits = Bitstring::zero(70);
        bits.set_bit(69, true);
        assert!(bits.bit(69));
        bits.set_bit(69, false);
        assert_eq!(bits, Bitstring::zero(70));
    }

    #[test]
    fn test_trimmed() {
        let mut bits = Bitstring::zero(200);
        bits.set_bit(8, true);
        assert_eq!(bits.trimmed().len(), 9);
        assert_eq!(bits.trimmed(), Bitstring::from_u64(1 << 8, 9));
        assert!(Bitstring::zero(100).trimmed().is_empty());
        assert!(Bitstring::new().trimmed().is_empty());
    }

    #[test]
    fn test_resized() {
        let bits = Bitstring::from_u64(0b101, 3);
        let grown = bits.resized(130);
        assert_eq!(grown.len(), 130);
        assert_eq!(grown.trimmed(), bits.trimmed());
        let shrunk = grown.resized(3);
        assert_eq!(shrunk, bits);
        // truncation drops high bits
        assert_eq!(bits.resized(1), Bitstring::from_u64(1, 1));
    }

    #[test]
    fn test_partial_byte_packing() {
        let bits = Bitstring::from_u64(0b1_0000_0001, 9);
        assert_eq!(bits.to_bytes(), vec![0x01, 0x01]);
    }

    #[test]
    fn test_length_is_part_of_identity() {
        assert_ne!(Bitstring::zero(1), Bitstring::zero(5));
        assert_ne!(Bitstring::from_u64(1, 1), Bitstring::from_u64(1, 8));
    }
}
