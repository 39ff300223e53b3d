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

//! Invertible Bloom Lookup Tables and the bitstring algebra behind them.
//!
//! The [`iblt`] module holds the table itself: a probabilistic key/value
//! store whose contents can be enumerated back out, and whose difference
//! with another table costs space proportional to how much the two sides
//! disagree. That difference is the primitive behind efficient set
//! reconciliation.
//!
//! The [`bits`] module holds the arbitrary-width [`bits::Bitstring`] keys
//! are made of, with XOR/OR/AND over operands of unequal length.
//!
//! ```rust
//! use diffsketch::bits::Bitstring;
//! use diffsketch::iblt::Iblt;
//!
//! let mut table = Iblt::new(5, 100);
//! table.insert(&Bitstring::from_bytes(b"abc"), 42);
//! assert_eq!(table.get(&Bitstring::from_bytes(b"abc")), Some(42));
//! ```

pub mod bits;
pub mod common;
pub mod error;
pub mod hash;
pub mod iblt;

mod codec;
