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

use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::BitXor;

use super::Bitstring;

impl Bitstring {
    /// Bitwise XOR of two bitstrings.
    ///
    /// The shorter operand is zero-extended to the longer; the result has
    /// length `max(self.len(), other.len())`. XOR-ing a value twice restores
    /// the other operand (up to that zero extension), which is what lets
    /// accumulated key sums cancel.
    ///
    /// # Examples
    ///
    /// ```
    /// use diffsketch::bits::Bitstring;
    ///
    /// let a = Bitstring::from_u64(0b10110, 5);
    /// let b = Bitstring::from_u64(0b11, 2);
    /// assert_eq!(a.xor(&b), Bitstring::from_u64(0b10101, 5));
    /// assert_eq!(a.xor(&a), Bitstring::zero(5));
    /// ```
    pub fn xor(&self, other: &Bitstring) -> Bitstring {
        self.combine(other, |a, b| a ^ b)
    }

    /// Bitwise OR, with the same zero-extension rule as [`xor`](Self::xor).
    pub fn or(&self, other: &Bitstring) -> Bitstring {
        self.combine(other, |a, b| a | b)
    }

    /// Bitwise AND, with the same zero-extension rule as [`xor`](Self::xor).
    /// Bits beyond the shorter operand are necessarily zero in the result.
    pub fn and(&self, other: &Bitstring) -> Bitstring {
        self.combine(other, |a, b| a & b)
    }

    /// Applies `op` limb by limb; a missing limb of the shorter operand
    /// reads as zero. The operators are bitwise, so the external result is
    /// independent of the 64-bit chunking.
    fn combine(&self, other: &Bitstring, op: impl Fn(u64, u64) -> u64) -> Bitstring {
        let bit_len = self.len().max(other.len());
        let limbs = (0..bit_len.div_ceil(64))
            .map(|i| {
                op(
                    self.limbs().get(i).copied().unwrap_or(0),
                    other.limbs().get(i).copied().unwrap_or(0),
                )
            })
            .collect();
        Bitstring::from_limbs(limbs, bit_len)
    }
}

impl BitXor for &Bitstring {
    type Output = Bitstring;

    fn bitxor(self, rhs: &Bitstring) -> Bitstring {
        self.xor(rhs)
    }
}

impl BitOr for &Bitstring {
    type Output = Bitstring;

    fn bitor(self, rhs: &Bitstring) -> Bitstring {
        self.or(rhs)
    }
}

impl BitAnd for &Bitstring {
    type Output = Bitstring;

    fn bitand(self, rhs: &Bitstring) -> Bitstring {
        self.and(rhs)
    }
}
