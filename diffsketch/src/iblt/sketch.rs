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
use crate::codec::decode_key;
use crate::codec::encode_key;
use crate::common::checksum::bits_checksum;
use crate::common::checksum::bytes_checksum;
use crate::common::checksum::value_checksum;
use crate::error::Error;
use crate::hash::HashFunctionSet;
use crate::iblt::IbltBuilder;

/// One bucket of the table.
///
/// The five accumulators form an abelian group under the signed update:
/// counts add, the key sum XORs bitstrings, the remaining sums XOR
/// integers. A cell holding exactly one net entry is recognizable because
/// its checksums recompute from its sums; such a cell is *pure* and is the
/// only shape an entry can be extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Cell {
    count: i64,
    key_sum: Bitstring,
    key_hash_sum: u32,
    val_sum: u64,
    val_hash_sum: u32,
}

impl Cell {
    pub(super) fn empty() -> Self {
        Cell {
            count: 0,
            key_sum: Bitstring::zero(1),
            key_hash_sum: 0,
            val_sum: 0,
            val_hash_sum: 0,
        }
    }

    fn accumulate(&mut self, key_bits: &Bitstring, key_crc: u32, value: u64, val_crc: u32, direction: i64) {
        self.count += direction;
        self.key_sum = canonical_key_sum(self.key_sum.xor(key_bits));
        self.key_hash_sum ^= key_crc;
        self.val_sum ^= value;
        self.val_hash_sum ^= val_crc;
    }

    /// Folds another cell in; `direction` is +1 for merge, -1 for subtract.
    /// The XOR accumulators are their own inverses, only the count is signed.
    fn combine(&mut self, other: &Cell, direction: i64) {
        self.count += direction * other.count;
        self.key_sum = canonical_key_sum(self.key_sum.xor(&other.key_sum));
        self.key_hash_sum ^= other.key_hash_sum;
        self.val_sum ^= other.val_sum;
        self.val_hash_sum ^= other.val_hash_sum;
    }

    fn is_pure(&self) -> bool {
        (self.count == 1 || self.count == -1)
            && bits_checksum(&self.key_sum) == self.key_hash_sum
            && value_checksum(self.val_sum) == self.val_hash_sum
    }

    fn is_vacant(&self) -> bool {
        self.count == 0 && self.key_hash_sum == 0 && self.val_sum == 0 && self.val_hash_sum == 0
    }
}

/// Keeps the key sum canonical: trailing zero bits are shed after every
/// XOR (the running result length would otherwise only ever grow), and an
/// all-zero sum collapses back to the single zero bit of an untouched
/// cell. This is what makes insert-then-delete restore a cell exactly.
fn canonical_key_sum(sum: Bitstring) -> Bitstring {
    let trimmed = sum.trimmed();
    if trimmed.is_empty() {
        Bitstring::zero(1)
    } else {
        trimmed
    }
}

/// The outcome of peeling a table.
///
/// `entries` came from cells with count +1 (net insertions), `phantoms`
/// from cells with count -1: deletions that never saw a matching insert,
/// or, after a [`subtract`](Iblt::subtract), the other side's entries.
/// `complete` reports whether peeling drained every cell; when false, the
/// table was too saturated and the lists are a strict subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    pub entries: Vec<(Bitstring, u64)>,
    pub phantoms: Vec<(Bitstring, u64)>,
    pub complete: bool,
}

/// An Invertible Bloom Lookup Table.
///
/// `K` hash functions index `K` columns of `column_size` cells each; every
/// entry occupies exactly one cell per column. See the
/// [module documentation](crate::iblt) for the full picture.
///
/// Use [`Iblt::new`] or [`super::IbltBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Iblt {
    pub(super) hash_set: HashFunctionSet,
    pub(super) column_size: u64,
    pub(super) item_count: i64,
    pub(super) cells: Vec<Cell>,
}

impl Iblt {
    /// Creates a table with `num_hashes` hash functions and at least
    /// `requested_cells` cells, columns rounded up to a prime size.
    ///
    /// Equivalent to `IbltBuilder::with_size(num_hashes, requested_cells).build()`.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` or `requested_cells` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::iblt::Iblt;
    /// let table = Iblt::new(5, 100);
    /// assert_eq!(table.column_size(), 23); // nearest prime >= 100 / 5
    /// assert_eq!(table.cell_count(), 115);
    /// ```
    pub fn new(num_hashes: u16, requested_cells: u64) -> Self {
        IbltBuilder::with_size(num_hashes, requested_cells).build()
    }

    /// Inserts a key/value pair.
    ///
    /// Every insert lands in exactly one cell of each column. Inserting the
    /// same pair twice is allowed; the two copies must be deleted twice to
    /// cancel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::bits::Bitstring;
    /// # use diffsketch::iblt::Iblt;
    /// let mut table = Iblt::new(5, 100);
    /// table.insert(&Bitstring::from_bytes(b"abc"), 42);
    /// assert_eq!(table.item_count(), 1);
    /// ```
    pub fn insert(&mut self, key: &Bitstring, value: u64) {
        self.apply(key, value, 1);
    }

    /// Deletes a key/value pair.
    ///
    /// Deletion is insertion with opposite sign; no check is made that the
    /// pair was ever inserted. Deleting from an empty table records a
    /// phantom entry that a later matching insert cancels exactly.
    pub fn delete(&mut self, key: &Bitstring, value: u64) {
        self.apply(key, value, -1);
    }

    /// Looks the key up, returning the value from the first of its cells
    /// that holds exactly one entry.
    ///
    /// Returns `None` when none of the key's cells is pure, which can
    /// happen for a present key whose cells all collide, so a `None` is not
    /// proof of absence. Conversely the first pure cell's value is returned
    /// without verifying which key it belongs to, so a colliding absent key
    /// can spuriously hit. If the key is present and at least one of its
    /// cells is pure, the returned value is correct.
    pub fn get(&self, key: &Bitstring) -> Option<u64> {
        for column in 0..usize::from(self.hash_set.size()) {
            let cell = self.cell_for(column, key);
            if cell.is_pure() {
                return Some(cell.val_sum);
            }
        }
        None
    }

    /// Tests whether the key is possibly in the table: every one of its
    /// cells must have a positive count.
    ///
    /// This is the Bloom-filter reading of the table; false positives are
    /// possible, false negatives are not (as long as only inserted pairs
    /// are deleted).
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::bits::Bitstring;
    /// # use diffsketch::iblt::Iblt;
    /// let mut table = Iblt::new(5, 100);
    /// assert!(!table.contains(&Bitstring::from_bytes(b"abc")));
    /// table.insert(&Bitstring::from_bytes(b"abc"), 42);
    /// assert!(table.contains(&Bitstring::from_bytes(b"abc")));
    /// ```
    pub fn contains(&self, key: &Bitstring) -> bool {
        (0..usize::from(self.hash_set.size())).all(|column| self.cell_for(column, key).count > 0)
    }

    /// Enumerates the table's contents by peeling.
    ///
    /// Every extracted pair is returned regardless of sign; use
    /// [`decode`](Self::decode) to tell net insertions from phantom
    /// deletions or to learn whether the enumeration was complete. Order is
    /// unspecified. Over-saturated tables may yield a strict subset.
    pub fn list_entries(&self) -> Vec<(Bitstring, u64)> {
        let decoding = self.decode();
        let mut pairs = decoding.entries;
        pairs.extend(decoding.phantoms);
        pairs
    }

    /// Peels a working copy of the table down to nothing, extracting one
    /// entry from every pure cell exposed along the way.
    ///
    /// Each extraction subtracts the entry's contribution from all of its
    /// cells, which uncovers new pure cells; the loop runs until a scan
    /// finds none. Work is bounded by a small multiple of the item count
    /// (or of the table size when the net count is smaller) so pathological
    /// saturation cannot loop forever.
    pub fn decode(&self) -> Decoding {
        let mut work = self.clone();
        let mut entries = Vec::new();
        let mut phantoms = Vec::new();

        // a net count of zero (e.g. right after a subtract) says nothing
        // about how many entries remain, so the table size backstops the
        // bound
        let max_rounds = (self.item_count.unsigned_abs() as usize)
            .max(self.cells.len())
            .saturating_mul(4);
        for _ in 0..max_rounds {
            let pure: Vec<usize> = work
                .cells
                .iter()
                .enumerate()
                .filter_map(|(index, cell)| cell.is_pure().then_some(index))
                .collect();
            if pure.is_empty() {
                break;
            }

            let mut progressed = false;
            for index in pure {
                let cell = &work.cells[index];
                // peeling earlier cells in this round may have touched it
                if !cell.is_pure() {
                    continue;
                }
                let Ok(key) = decode_key(&cell.key_sum) else {
                    continue;
                };
                let value = cell.val_sum;
                let sign = cell.count;
                work.apply(&key, value, -sign);
                if sign > 0 {
                    entries.push((key, value));
                } else {
                    phantoms.push((key, value));
                }
                progressed = true;
            }
            if !progressed {
                break;
            }
        }

        let complete = work.cells.iter().all(Cell::is_vacant);
        Decoding {
            entries,
            phantoms,
            complete,
        }
    }

    /// Estimates the false positive rate of [`contains`](Self::contains) at
    /// the current saturation: `(1 - e^(-K*N/M))^K` with `N` the item count
    /// (clamped at zero) and `M` the cell count.
    pub fn estimated_fpr(&self) -> f64 {
        let hashes = f64::from(self.hash_set.size());
        let items = self.item_count.max(0) as f64;
        let cells = self.cells.len() as f64;
        (1.0 - (-(hashes * items) / cells).exp()).powf(hashes)
    }

    /// Returns the current load factor, net items per cell.
    ///
    /// Peeling reliably recovers everything while this stays well below the
    /// decoding threshold; values past roughly 0.1 erode the guarantee.
    pub fn load_factor(&self) -> f64 {
        self.item_count as f64 / self.cells.len() as f64
    }

    /// Read-only accessor keyed by property name, for callers that carry
    /// the property as data. Recognized names: `item_count`, `col_size`,
    /// `cell_count`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownProperty`](crate::error::ErrorKind) for
    /// any other name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use diffsketch::iblt::Iblt;
    /// let table = Iblt::new(5, 100);
    /// assert_eq!(table.property("cell_count").unwrap(), 115);
    /// assert!(table.property("row_count").is_err());
    /// ```
    pub fn property(&self, name: &str) -> Result<i64, Error> {
        match name {
            "item_count" => Ok(self.item_count),
            "col_size" => Ok(self.column_size as i64),
            "cell_count" => Ok(self.cells.len() as i64),
            _ => Err(Error::unknown_property(name)),
        }
    }

    /// Returns the number of hash functions (and columns).
    pub fn num_hashes(&self) -> u16 {
        self.hash_set.size()
    }

    /// Returns the number of cells in each column.
    pub fn column_size(&self) -> u64 {
        self.column_size
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> u64 {
        self.cells.len() as u64
    }

    /// Returns net insertions minus deletions.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Returns the seed of the underlying hash function set.
    pub fn seed(&self) -> u64 {
        self.hash_set.seed()
    }

    /// Checks whether two tables can be merged or subtracted: they must
    /// share the hash function set and the column size.
    pub fn is_compatible(&self, other: &Iblt) -> bool {
        self.hash_set == other.hash_set && self.column_size == other.column_size
    }

    /// Merges another table into this one, cell by cell. Afterwards this
    /// table holds the multiset union of both entry sets.
    ///
    /// # Panics
    ///
    /// Panics if the tables are not compatible (different hash functions,
    /// seed, or column size). Use [`is_compatible()`](Self::is_compatible)
    /// to check first.
    pub fn merge(&mut self, other: &Iblt) {
        assert!(
            self.is_compatible(other),
            "Cannot merge incompatible lookup tables"
        );
        for (cell, other_cell) in self.cells.iter_mut().zip(&other.cells) {
            cell.combine(other_cell, 1);
        }
        self.item_count += other.item_count;
    }

    /// Subtracts another table from this one, cell by cell. Entries common
    /// to both sides cancel; [`decode`](Self::decode) on the result yields
    /// the symmetric difference, this side's surplus as `entries` and the
    /// other side's as `phantoms`.
    ///
    /// # Panics
    ///
    /// Panics if the tables are not compatible.
    pub fn subtract(&mut self, other: &Iblt) {
        assert!(
            self.is_compatible(other),
            "Cannot subtract incompatible lookup tables"
        );
        for (cell, other_cell) in self.cells.iter_mut().zip(&other.cells) {
            cell.combine(other_cell, -1);
        }
        self.item_count -= other.item_count;
    }

    /// The one signed update everything else is built from: touch the
    /// key's cell in every column, then the running item count.
    fn apply(&mut self, key: &Bitstring, value: u64, direction: i64) {
        let encoded = encode_key(key);
        let key_bits = Bitstring::from_bytes(&encoded);
        let key_crc = bytes_checksum(&encoded);
        let val_crc = value_checksum(value);
        for column in 0..usize::from(self.hash_set.size()) {
            let index = self.cell_index(column, key);
            self.cells[index].accumulate(&key_bits, key_crc, value, val_crc, direction);
        }
        self.item_count += direction;
    }

    fn cell_index(&self, column: usize, key: &Bitstring) -> usize {
        let row = self.hash_set.apply(column, key) % self.column_size;
        column * self.column_size as usize + row as usize
    }

    fn cell_for(&self, column: usize, key: &Bitstring) -> &Cell {
        &self.cells[self.cell_index(column, key)]
    }
}
