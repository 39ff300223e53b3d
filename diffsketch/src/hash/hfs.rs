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
use crate::hash::murmurhash::murmur3_x64_128;
use crate::hash::DEFAULT_UPDATE_SEED;

/// A family of `K` independent hash functions over bitstring keys, indexed
/// `0..K`.
///
/// Each function maps a key to a non-negative 64-bit value; the lookup
/// table reduces that value modulo its column size to pick a row. The
/// per-function seeds are derived deterministically from the set seed, so
/// two sets built from the same `(size, seed)` pair behave identically,
/// which is what makes two tables comparable cell for cell.
///
/// # Examples
///
/// ```
/// use diffsketch::bits::Bitstring;
/// use diffsketch::hash::HashFunctionSet;
///
/// let hashes = HashFunctionSet::new(5);
/// let key = Bitstring::from_bytes(b"abc");
/// assert_eq!(hashes.size(), 5);
/// assert_eq!(hashes.apply(0, &key), hashes.apply(0, &key));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashFunctionSet {
    seed: u64,
    function_seeds: Vec<u64>,
}

impl HashFunctionSet {
    /// Creates a set of `size` hash functions with the default seed.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn new(size: u16) -> Self {
        Self::with_seed(size, DEFAULT_UPDATE_SEED)
    }

    /// Creates a set of `size` hash functions seeded from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn with_seed(size: u16, seed: u64) -> Self {
        assert!(size > 0, "size must be at least 1");
        let function_seeds = (0..size)
            .map(|i| {
                // Derive per-function seeds deterministically from the set seed.
                let (h1, _) = murmur3_x64_128(&u64::from(i).to_le_bytes(), seed);
                h1
            })
            .collect();
        HashFunctionSet {
            seed,
            function_seeds,
        }
    }

    /// Returns the number of hash functions in the set.
    pub fn size(&self) -> u16 {
        self.function_seeds.len() as u16
    }

    /// Returns the seed the set was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Applies hash function `index` to the key.
    ///
    /// The key's bit length is hashed along with its packed bytes, so
    /// bitstrings that pack identically but differ in length hash apart.
    ///
    /// # Panics
    ///
    /// Panics if `index >= size()`.
    pub fn apply(&self, index: usize, key: &Bitstring) -> u64 {
        let mut material = key.to_bytes();
        material.extend_from_slice(&(key.len() as u64).to_le_bytes());
        let (h1, _) = murmur3_x64_128(&material, self.function_seeds[index]);
        h1
    }
}
