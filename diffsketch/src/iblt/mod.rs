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

//! Invertible Bloom Lookup Table for probabilistic key/value storage and
//! set reconciliation.
//!
//! An IBLT is an associative structure that supports insertion, deletion,
//! point lookup, membership testing and, unlike a plain Bloom filter,
//! **full enumeration of its contents** while the load factor stays low.
//! Every cell keeps XOR-accumulated key and value sums next to a signed
//! count, so the whole structure forms an abelian group: deletions exactly
//! cancel insertions, two tables can be merged or subtracted cell by cell,
//! and the difference of two tables decodes to the symmetric difference of
//! their entry sets in space proportional to the difference, not the sets.
//!
//! # Properties
//!
//! - **No false negatives for membership**: an inserted key always passes
//!   [`Iblt::contains`]
//! - **Possible false positives**: membership and lookup may spuriously hit
//!   under collisions, with probability given by [`Iblt::estimated_fpr`]
//! - **Probabilistic enumeration**: [`Iblt::list_entries`] recovers every
//!   entry with high probability at low load, and may return a strict
//!   subset when the table is over-saturated
//! - **Group structure**: inserts and deletes commute, and deleting a pair
//!   never inserted is permitted (it records a "phantom" entry that a later
//!   insert cancels)
//!
//! # Usage
//!
//! ```rust
//! use diffsketch::bits::Bitstring;
//! use diffsketch::iblt::Iblt;
//!
//! // 5 hash functions, around 100 cells (rounded up to a prime column size)
//! let mut table = Iblt::new(5, 100);
//!
//! table.insert(&Bitstring::from_bytes(b"abc"), 42);
//! table.insert(&Bitstring::from_bytes(b"def"), 9000);
//!
//! assert_eq!(table.get(&Bitstring::from_bytes(b"abc")), Some(42));
//! assert!(table.contains(&Bitstring::from_bytes(b"abc")));
//! assert_eq!(table.list_entries().len(), 2);
//! ```
//!
//! # Creating tables
//!
//! [`Iblt::new`] covers the common case; [`IbltBuilder`] exposes the knobs:
//!
//! ```rust
//! # use diffsketch::iblt::IbltBuilder;
//! let table = IbltBuilder::with_size(4, 64)
//!     .seed(9001)
//!     .prime_columns(false) // exact cell budget instead of prime columns
//!     .build();
//! assert_eq!(table.cell_count(), 64);
//! ```
//!
//! By default each of the `K` columns is sized to the nearest prime at or
//! above `requested_cells / K`, which avoids systematic collisions when a
//! hash value shares factors with the column size.
//!
//! # Set reconciliation
//!
//! Subtracting one table from another leaves a table holding only the
//! entries the two sides do not share; decoding it yields both directions
//! of the difference:
//!
//! ```rust
//! use diffsketch::bits::Bitstring;
//! use diffsketch::iblt::Iblt;
//!
//! let mut ours = Iblt::new(4, 120);
//! let mut theirs = Iblt::new(4, 120);
//! for name in ["shared-1", "shared-2", "only-ours"] {
//!     ours.insert(&Bitstring::from_bytes(name.as_bytes()), 1);
//! }
//! for name in ["shared-1", "shared-2", "only-theirs"] {
//!     theirs.insert(&Bitstring::from_bytes(name.as_bytes()), 1);
//! }
//!
//! ours.subtract(&theirs);
//! let difference = ours.decode();
//! assert!(difference.complete);
//! assert_eq!(difference.entries.len(), 1); // only-ours
//! assert_eq!(difference.phantoms.len(), 1); // only-theirs
//! ```
//!
//! # Implementation Details
//!
//! - Keys are arbitrary-length [`Bitstring`](crate::bits::Bitstring)s,
//!   accumulated through the chunked XOR in [`bits`](crate::bits)
//! - Cell checksums are CRC-32 over the canonical key encoding and over the
//!   decimal rendering of values
//! - Enumeration "peels": it repeatedly extracts cells holding exactly one
//!   entry and subtracts them until the table drains or stalls
//!
//! # References
//!
//! - Goodrich and Mitzenmacher (2011). "Invertible Bloom Lookup Tables"
//! - Eppstein, Goodrich, Uyeda and Varghese (2011). "What's the Difference?
//!   Efficient Set Reconciliation without Prior Context"

mod builder;
mod sketch;

pub use self::builder::IbltBuilder;
pub use self::sketch::Decoding;
pub use self::sketch::Iblt;
