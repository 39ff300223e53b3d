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

use crate::bits::Bitstring;

/// A simple wrapper around a `Vec<u8>` that provides methods for writing the
/// pieces of a key encoding.
pub(crate) struct KeyBytes {
    bytes: Vec<u8>,
}

impl KeyBytes {
    /// Constructs an empty `KeyBytes` with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Writes the given byte slice to the `KeyBytes`.
    pub fn write(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    /// Writes a single byte to the `KeyBytes`.
    pub fn write_u8(&mut self, n: u8) {
        self.bytes.push(n);
    }

    /// Writes an unsigned integer as a LEB128 varint, 7 bits per byte, least
    /// significant group first.
    pub fn write_varint(&mut self, mut value: u64) {
        loop {
            let group = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.write_u8(group);
                return;
            }
            self.write_u8(group | 0x80);
        }
    }

    /// Consumes the `KeyBytes` and returns the bytes with trailing zero
    /// bytes removed; at least one byte always remains.
    pub fn into_trimmed_bytes(mut self) -> Vec<u8> {
        while self.bytes.len() > 1 && self.bytes.last() == Some(&0) {
            self.bytes.pop();
        }
        self.bytes
    }
}

/// Serializes a key bitstring into its canonical self-describing byte form:
/// `varint(length in bits) || packed bits`, with trailing zero bytes
/// trimmed. Equal keys produce byte-identical encodings, which is what
/// makes XOR accumulation cancel, and the trim keeps the encoding canonical
/// after zero-extension round trips through the cell algebra.
pub(crate) fn encode_key(key: &Bitstring) -> Vec<u8> {
    let mut bytes = KeyBytes::with_capacity(10 + key.len().div_ceil(8));
    bytes.write_varint(key.len() as u64);
    bytes.write(&key.to_bytes());
    bytes.into_trimmed_bytes()
}
