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

use std::io::Cursor;

use byteorder::ReadBytesExt;

use crate::bits::Bitstring;
use crate::error::Error;

/// A wrapper around a byte slice that provides methods for reading the
/// pieces of a key encoding from it.
pub(crate) struct KeySlice<'a> {
    slice: Cursor<&'a [u8]>,
}

impl<'a> KeySlice<'a> {
    /// Creates a new `KeySlice` from the given byte slice.
    pub fn new(slice: &'a [u8]) -> KeySlice<'a> {
        KeySlice {
            slice: Cursor::new(slice),
        }
    }

    /// Reads a LEB128 varint.
    pub fn read_varint(&mut self) -> Result<u64, Error> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self
                .slice
                .read_u8()
                .map_err(|_| Error::truncated_key("length prefix"))?;
            if shift >= 64 {
                return Err(Error::invalid_data("length prefix overflows u64"));
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Returns the bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        let inner: &'a [u8] = *self.slice.get_ref();
        let pos = (self.slice.position() as usize).min(inner.len());
        &inner[pos..]
    }
}

/// Recovers a key from an accumulated key sum.
///
/// The inverse of `encode_key`: reads the varint bit length, then
/// zero-extends the remaining payload to that length (the cell algebra and
/// the encoding both shed trailing zeros, so missing high bits are zeros by
/// construction). Payload bits set beyond the declared length mean the sum
/// is not a single encoding and are rejected.
pub(crate) fn decode_key(sum: &Bitstring) -> Result<Bitstring, Error> {
    let bytes = sum.to_bytes();
    let mut slice = KeySlice::new(&bytes);
    let declared = slice.read_varint()?;
    let bit_len = usize::try_from(declared)
        .map_err(|_| Error::invalid_data("key length out of range"))?;
    let payload = Bitstring::from_bytes(slice.remaining());
    if payload.trimmed().len() > bit_len {
        return Err(Error::invalid_data("key payload exceeds declared length"));
    }
    Ok(payload.resized(bit_len))
}

#[cfg(test)]
mod tests {
    use super::decode_key;
    use super::KeySlice;
    use crate::codec::encode_key;
    use crate::bits::Bitstring;
    use crate::error::ErrorKind;

    #[test]
    fn test_varint_round_trip() {
        for value in [0u64, 1, 127, 128, 300, 16_383, 16_384, u64::MAX] {
            let mut bytes = crate::codec::encode::KeyBytes::with_capacity(10);
            bytes.write_varint(value);
            let buf = bytes.into_trimmed_bytes();
            let mut slice = KeySlice::new(&buf);
            if value == 0 {
                // the trimmed buffer still holds the single zero byte
                assert_eq!(buf, vec![0x00]);
            }
            assert_eq!(slice.read_varint().unwrap(), value);
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        let keys = [
            Bitstring::new(),
            Bitstring::from_u64(1, 1),
            Bitstring::from_u64(0b10110, 5),
            Bitstring::from_bytes(b"a longer key with several bytes"),
            Bitstring::from_u64(1, 200), // long tail of zero bits
        ];
        for key in &keys {
            let sum = Bitstring::from_bytes(&encode_key(key));
            assert_eq!(&decode_key(&sum).unwrap(), key);
        }
    }

    #[test]
    fn test_decode_tolerates_trimmed_sum() {
        let key = Bitstring::from_u64(1, 80);
        let sum = Bitstring::from_bytes(&encode_key(&key)).trimmed();
        assert_eq!(decode_key(&sum).unwrap(), key);
    }

    #[test]
    fn test_decode_rejects_empty_sum() {
        let err = decode_key(&Bitstring::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_decode_rejects_overlong_payload() {
        // declares 3 bits but carries a set bit at position 9 of the payload
        let mut bytes = vec![0x03, 0x00, 0x02];
        let sum = Bitstring::from_bytes(&bytes);
        assert!(decode_key(&sum).is_err());
        // trimming the stray bit makes it decodable again
        bytes[2] = 0x00;
        let sum = Bitstring::from_bytes(&bytes);
        assert_eq!(decode_key(&sum).unwrap(), Bitstring::zero(3));
    }
}
