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
use diffsketch::error::ErrorKind;
use diffsketch::iblt::Iblt;
use diffsketch::iblt::IbltBuilder;

fn key(text: &str) -> Bitstring {
    Bitstring::from_bytes(text.as_bytes())
}

#[test]
fn test_init_defaults() {
    let table = Iblt::new(5, 100);
    assert_eq!(table.num_hashes(), 5);
    assert_eq!(table.column_size(), 23);
    assert_eq!(table.cell_count(), 115);
    assert_eq!(table.item_count(), 0);
    assert_eq!(table.seed(), 9001);
    assert_eq!(table.estimated_fpr(), 0.0);
}

#[test]
fn test_insert_two_and_list() {
    let mut table = Iblt::new(5, 100);
    table.insert(&key("abc"), 42);
    table.insert(&key("def"), 9000);

    let mut pairs = table.list_entries();
    pairs.sort_by_key(|(_, value)| *value);
    assert_eq!(pairs, vec![(key("abc"), 42), (key("def"), 9000)]);
}

#[test]
fn test_get_present_and_absent() {
    let mut table = Iblt::new(5, 100);
    table.insert(&key("abc"), 42);
    table.insert(&key("def"), 9000);

    assert_eq!(table.get(&key("abc")), Some(42));
    assert_eq!(table.get(&key("def")), Some(9000));
    // an absent key may spuriously hit a pure cell it collides into, so the
    // only wrong answers are values never inserted
    assert!(matches!(table.get(&key("ghi")), None | Some(42) | Some(9000)));
}

#[test]
fn test_membership() {
    let mut table = Iblt::new(5, 100);
    assert!(!table.contains(&key("abc")));
    table.insert(&key("abc"), 42);
    assert!(table.contains(&key("abc")));
    table.delete(&key("abc"), 42);
    assert!(!table.contains(&key("abc")));
}

#[test]
fn test_delete_then_reinsert_round_trip() {
    let mut table = Iblt::new(5, 100);
    table.insert(&key("abc"), 42);
    table.insert(&key("def"), 9000);
    let snapshot = table.clone();

    table.delete(&key("abc"), 42);
    assert_ne!(table, snapshot);
    table.insert(&key("abc"), 42);
    assert_eq!(table, snapshot);
}

#[test]
fn test_permuted_operations_build_equal_tables() {
    let operations = [
        ("alpha", 1u64, true),
        ("beta", 2, true),
        ("gamma", 3, true),
        ("beta", 2, false),
        ("delta", 4, true),
    ];

    let mut forward = Iblt::new(4, 64);
    for (name, value, is_insert) in operations {
        if is_insert {
            forward.insert(&key(name), value);
        } else {
            forward.delete(&key(name), value);
        }
    }

    let mut backward = Iblt::new(4, 64);
    for (name, value, is_insert) in operations.into_iter().rev() {
        if is_insert {
            backward.insert(&key(name), value);
        } else {
            backward.delete(&key(name), value);
        }
    }

    assert_eq!(forward, backward);
}

#[test]
fn test_item_count_is_inserts_minus_deletes() {
    let mut table = Iblt::new(3, 36);
    for i in 0..7u64 {
        table.insert(&Bitstring::from_u64(i, 24), i);
    }
    for i in 0..3u64 {
        table.delete(&Bitstring::from_u64(i, 24), i);
    }
    table.delete(&key("never seen"), 99);
    assert_eq!(table.item_count(), 3);
    assert_eq!(table.property("item_count").unwrap(), 3);
}

#[test]
fn test_property_names() {
    let table = Iblt::new(5, 100);
    assert_eq!(table.property("item_count").unwrap(), 0);
    assert_eq!(table.property("col_size").unwrap(), 23);
    assert_eq!(table.property("cell_count").unwrap(), 115);

    let err = table.property("load_factor").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
}

#[test]
fn test_cell_budget_rounding_without_primes() {
    let table = IbltBuilder::with_size(5, 101).prime_columns(false).build();
    assert_eq!(table.column_size(), 21);
    assert_eq!(table.cell_count(), 105);
}

#[test]
fn test_compatible_tables_subtract_to_empty() {
    let mut left = Iblt::new(4, 48);
    let mut right = Iblt::new(4, 48);
    for i in 0..20u64 {
        left.insert(&Bitstring::from_u64(i, 32), i);
        right.insert(&Bitstring::from_u64(i, 32), i);
    }
    left.subtract(&right);
    assert_eq!(left, Iblt::new(4, 48));
}

#[test]
#[should_panic(expected = "num_hashes must be at least 1")]
fn test_invalid_hashes() {
    Iblt::new(0, 100);
}

#[test]
#[should_panic(expected = "requested_cells must be at least 1")]
fn test_invalid_cells() {
    Iblt::new(5, 0);
}

#[test]
#[should_panic(expected = "Cannot subtract incompatible lookup tables")]
fn test_subtract_incompatible() {
    let mut left = Iblt::new(4, 48);
    let right = IbltBuilder::with_size(4, 48).seed(7).build();
    left.subtract(&right);
}
