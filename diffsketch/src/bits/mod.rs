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

//! Arbitrary-width bitstrings and their bitwise algebra.
//!
//! [`Bitstring`] models an ordered bit sequence of unbounded length that is
//! not required to be byte-aligned. The sequence reads as a little-endian
//! unsigned integer and is stored in 64-bit limbs, so the bitwise operations
//! run one machine word at a time regardless of how long the operands are.
//!
//! The three operations ([`Bitstring::xor`], [`Bitstring::or`],
//! [`Bitstring::and`]) share one contract: the shorter operand is
//! zero-extended to the longer, the operator is applied bitwise, and the
//! result has length `max(|a|, |b|)`. They are total functions; in
//! particular an empty operand leaves the other operand unchanged (AND
//! excepted, which zeroes it).
//!
//! Keys accumulated inside lookup-table cells are XOR sums of bitstrings of
//! differing lengths, which is why the zero-extension rule is part of the
//! contract rather than a convenience.

mod bitstring;
mod ops;

pub use self::bitstring::Bitstring;
