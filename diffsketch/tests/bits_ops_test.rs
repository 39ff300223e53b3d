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

use diffsketch::bits::Bitstring;

/// xorshift64*, deterministic filler for the large-operand tests.
fn pseudo_random_bytes(len: usize, mut state: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(len + 8);
    while bytes.len() < len {
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        let word = state.wrapping_mul(0x2545F4914F6CDD1D);
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes.truncate(len);
    bytes
}

#[test]
fn test_xor_with_shorter_operand() {
    // 5-bit operand against a 2-bit operand: the short one is zero-extended
    let a = Bitstring::from_u64(0b10110, 5);
    let b = Bitstring::from_u64(0b11, 2);
    let r = a.xor(&b);
    assert_eq!(r.len(), 5);
    assert_eq!(r, Bitstring::from_u64(0b10101, 5));
}

#[test]
fn test_xor_is_an_involution() {
    let a = Bitstring::from_bytes(b"the first operand, somewhat long");
    let b = Bitstring::from_bytes(b"second");
    assert_eq!(a.xor(&a), Bitstring::zero(a.len()));
    assert_eq!(a.xor(&a.xor(&b)), b.resized(a.len()));
    assert_eq!(b.xor(&a).xor(&a), b.resized(a.len()));
}

#[test]
fn test_commutativity() {
    let a = Bitstring::from_bytes(&pseudo_random_bytes(123, 7));
    let b = Bitstring::from_bytes(&pseudo_random_bytes(45, 8));
    assert_eq!(a.xor(&b), b.xor(&a));
    assert_eq!(a.or(&b), b.or(&a));
    assert_eq!(a.and(&b), b.and(&a));
}

#[test]
fn test_empty_operands() {
    let a = Bitstring::from_bytes(b"content");
    let empty = Bitstring::new();
    assert_eq!(a.xor(&empty), a);
    assert_eq!(empty.xor(&a), a);
    assert_eq!(empty.or(&a), a);
    assert_eq!(empty.and(&a), Bitstring::zero(a.len()));
    assert_eq!(empty.xor(&empty), empty);
}

#[test]
fn test_ragged_lengths() {
    // operands that straddle limb boundaries on both sides
    for (long_len, short_len) in [(65, 1), (64, 63), (129, 64), (200, 7)] {
        let a = Bitstring::from_bytes(&pseudo_random_bytes(32, 1)).resized(long_len);
        let b = Bitstring::from_bytes(&pseudo_random_bytes(32, 2)).resized(short_len);
        let r = a.xor(&b);
        assert_eq!(r.len(), long_len);
        for i in 0..long_len {
            let expected = a.bit(i) ^ (i < short_len && b.bit(i));
            assert_eq!(r.bit(i), expected, "bit {i} of {long_len}/{short_len}");
        }
    }
}

#[test]
fn test_or_and_against_bitwise_reference() {
    let a = Bitstring::from_u64(0b1100_1010, 8);
    let b = Bitstring::from_u64(0b0110, 4);
    assert_eq!(a.or(&b), Bitstring::from_u64(0b1100_1110, 8));
    assert_eq!(a.and(&b), Bitstring::from_u64(0b0010, 8));
}

#[test]
fn test_large_operands_round_trip() {
    // several hundred kilobits, lengths not byte-aligned
    let bits = 200_017;
    let a = Bitstring::from_bytes(&pseudo_random_bytes(bits / 8 + 1, 42)).resized(bits);
    let b = Bitstring::from_bytes(&pseudo_random_bytes(bits / 8 + 1, 43)).resized(bits);
    let restored = a.xor(&a.xor(&b));
    assert_eq!(restored, b);
    assert_eq!(a.xor(&a), Bitstring::zero(bits));
}

#[test]
fn test_large_unequal_operands() {
    let a = Bitstring::from_bytes(&pseudo_random_bytes(40_000, 4));
    let b = Bitstring::from_bytes(&pseudo_random_bytes(11, 5));
    let r = a.xor(&b);
    assert_eq!(r.len(), a.len());
    // beyond the short operand the long one passes through untouched
    for i in (b.len()..a.len()).step_by(997) {
        assert_eq!(r.bit(i), a.bit(i));
    }
    assert_eq!(r.xor(&b).resized(a.len()), a);
}
