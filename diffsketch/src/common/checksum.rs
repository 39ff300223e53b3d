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

//! CRC-32 checksums over the cell accumulators.
//!
//! Bitstrings are fed as their packed byte form; integers are rendered as
//! decimal text first. A cell is recognized as pure by recomputing these
//! checksums over its sums and comparing against the XOR-accumulated
//! per-entry checksums, so both sides must use the same serialized form.

use crate::bits::Bitstring;

/// CRC-32 of a bitstring's packed byte form.
pub(crate) fn bits_checksum(bits: &Bitstring) -> u32 {
    crc32fast::hash(&bits.to_bytes())
}

/// CRC-32 of an already-encoded key.
pub(crate) fn bytes_checksum(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// CRC-32 of an integer's decimal text rendering.
pub(crate) fn value_checksum(value: u64) -> u32 {
    crc32fast::hash(value.to_string().as_bytes())
}
