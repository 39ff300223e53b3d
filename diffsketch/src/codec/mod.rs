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

//! Canonical key framing.
//!
//! Keys are arbitrary-length bitstrings; the lookup-table cells accumulate
//! them by XOR, so each key needs one stable, deterministic, losslessly
//! invertible byte form. The frame is `varint(length in bits) || packed
//! bits`, trimmed of trailing zero bytes so the encoding stays canonical
//! under the zero-extension the cell algebra performs.

mod decode;
mod encode;

pub(crate) use self::decode::decode_key;
pub(crate) use self::encode::encode_key;
