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

mod hfs;
mod murmurhash;

pub use self::hfs::HashFunctionSet;

/// The seed 9001 used in the table update methods is a prime number that was
/// chosen very early on in experimental testing.
///
/// Choosing a seed is somewhat arbitrary; what matters is that two tables
/// meant to be compared or subtracted share the same hash functions and
/// seed, otherwise the assumed 1:1 relationship between a key and its cell
/// positions is violated. Once a fleet of stored tables exists you are
/// stuck with the seed you shipped.
pub(crate) const DEFAULT_UPDATE_SEED: u64 = 9001;
