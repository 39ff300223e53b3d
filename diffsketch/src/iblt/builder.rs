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

use super::sketch::Cell;
use super::Iblt;
use crate::common::nearest_prime;
use crate::hash::HashFunctionSet;
use crate::hash::DEFAULT_UPDATE_SEED;

const MAX_TABLE_CELLS: usize = 1 << 30;

/// Builder for creating [`Iblt`] instances.
///
/// Provides two construction modes:
/// - [`with_size()`](Self::with_size): specify the number of hash functions
///   and a total cell budget
/// - [`with_hash_set()`](Self::with_hash_set): bring a prebuilt
///   [`HashFunctionSet`], e.g. one shared with a remote peer
#[derive(Debug, Clone)]
pub struct IbltBuilder {
    hash_set: Option<HashFunctionSet>,
    num_hashes: u16,
    requested_cells: u64,
    prime_columns: bool,
    seed: u64,
}

impl IbltBuilder {
    /// Creates a builder for a table with `num_hashes` hash functions and a
    /// budget of `requested_cells` cells in total.
    ///
    /// The budget is a hint: each of the `num_hashes` columns gets
    /// `requested_cells / num_hashes` cells rounded up, and by default
    /// rounded further to the nearest prime (see
    /// [`prime_columns()`](Self::prime_columns)).
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` or `requested_cells` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::iblt::IbltBuilder;
    /// let table = IbltBuilder::with_size(5, 100).build();
    /// assert_eq!(table.column_size(), 23);
    /// ```
    pub fn with_size(num_hashes: u16, requested_cells: u64) -> Self {
        assert!(num_hashes >= 1, "num_hashes must be at least 1");
        assert!(requested_cells >= 1, "requested_cells must be at least 1");

        IbltBuilder {
            hash_set: None,
            num_hashes,
            requested_cells,
            prime_columns: true,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Creates a builder around a prebuilt hash function set; the set fixes
    /// the number of columns and the seed.
    ///
    /// # Panics
    ///
    /// Panics if `requested_cells` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::hash::HashFunctionSet;
    /// # use diffsketch::iblt::IbltBuilder;
    /// let hashes = HashFunctionSet::with_seed(4, 77);
    /// let table = IbltBuilder::with_hash_set(hashes, 64).build();
    /// assert_eq!(table.num_hashes(), 4);
    /// assert_eq!(table.seed(), 77);
    /// ```
    pub fn with_hash_set(hash_set: HashFunctionSet, requested_cells: u64) -> Self {
        assert!(requested_cells >= 1, "requested_cells must be at least 1");

        IbltBuilder {
            num_hashes: hash_set.size(),
            seed: hash_set.seed(),
            hash_set: Some(hash_set),
            requested_cells,
            prime_columns: true,
        }
    }

    /// Sets a custom hash seed (default: 9001).
    ///
    /// **Important**: tables with different seeds cannot be merged or
    /// subtracted. Has no effect when the builder was given a prebuilt hash
    /// set, which carries its own seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Chooses between prime column sizes (the default) and the exact cell
    /// budget.
    ///
    /// With `enabled`, each column is sized to the nearest prime at or above
    /// `requested_cells / num_hashes`, which avoids systematic collisions
    /// when a hash value shares factors with the column size. Without it,
    /// `requested_cells` is only rounded up to a multiple of `num_hashes`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::iblt::IbltBuilder;
    /// let exact = IbltBuilder::with_size(5, 101).prime_columns(false).build();
    /// assert_eq!(exact.cell_count(), 105); // rounded up to a multiple of 5
    /// ```
    pub fn prime_columns(mut self, enabled: bool) -> Self {
        self.prime_columns = enabled;
        self
    }

    /// Builds the table with all cells empty.
    ///
    /// # Panics
    ///
    /// Panics if the resulting table would exceed the supported cell limit.
    pub fn build(self) -> Iblt {
        let hash_set = self
            .hash_set
            .unwrap_or_else(|| HashFunctionSet::with_seed(self.num_hashes, self.seed));

        let num_hashes = u64::from(hash_set.size());
        let baseline = self.requested_cells.div_ceil(num_hashes);
        let column_size = if self.prime_columns {
            nearest_prime(baseline)
        } else {
            baseline
        };

        let cell_count = (num_hashes as usize)
            .checked_mul(column_size as usize)
            .expect("num_hashes * column_size overflows usize");
        assert!(
            cell_count < MAX_TABLE_CELLS,
            "num_hashes * column_size must be < {}",
            MAX_TABLE_CELLS
        );

        Iblt {
            hash_set,
            column_size,
            item_count: 0,
            cells: vec![Cell::empty(); cell_count],
        }
    }
}
