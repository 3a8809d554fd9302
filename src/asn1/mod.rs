// Copyright 2021 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
////////////////////////////////////////////////////////////////////////////////

//! Conversion between the two encodings of an ECDSA signature.
//!
//! COSE carries ECDSA signatures as the fixed-length concatenation `r || s`, each half left-padded
//! to the coordinate length of the curve (RFC 8152 section 8.1). Cryptographic libraries speak
//! ASN.1 DER instead:
//!
//! ```asn1
//!   Ecdsa-Sig-Value ::= SEQUENCE {
//!       r  INTEGER,
//!       s  INTEGER
//!   }
//! ```

use crate::{CoseError, Result};


const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// Convert a fixed-length `r || s` signature into DER.
///
/// Fails with [`CoseError::InvalidLength`] unless `fixed` is exactly twice `coordinate_len` long.
pub fn to_der(fixed: &[u8], coordinate_len: usize) -> Result<Vec<u8>> {
    let want = 2 * coordinate_len;
    if fixed.len() != want {
        return Err(CoseError::InvalidLength {
            got: fixed.len(),
            want,
        });
    }
    let (r, s) = fixed.split_at(coordinate_len);
    let mut content = Vec::with_capacity(want + 6);
    push_integer(&mut content, r);
    push_integer(&mut content, s);

    let mut der = Vec::with_capacity(content.len() + 4);
    der.push(SEQUENCE);
    push_length(&mut der, content.len());
    der.extend_from_slice(&content);
    Ok(der)
}

/// Convert a DER signature into fixed-length `r || s` form, each half left-padded to
/// `coordinate_len` bytes.
///
/// Only the exact DER encoding is accepted; anything else fails with
/// [`CoseError::MalformedSignature`].
pub fn from_der(der: &[u8], coordinate_len: usize) -> Result<Vec<u8>> {
    let mut input = der;
    let mut content = read_tlv(&mut input, SEQUENCE, "expected SEQUENCE")?;
    if !input.is_empty() {
        return Err(CoseError::MalformedSignature("trailing data after SEQUENCE"));
    }
    let mut fixed = Vec::with_capacity(2 * coordinate_len);
    for _ in 0..2 {
        let value = read_unsigned_integer(&mut content)?;
        if value.len() > coordinate_len {
            return Err(CoseError::MalformedSignature(
                "INTEGER too large for the curve",
            ));
        }
        fixed.resize(fixed.len() + coordinate_len - value.len(), 0);
        fixed.extend_from_slice(value);
    }
    if !content.is_empty() {
        return Err(CoseError::MalformedSignature("trailing data in SEQUENCE"));
    }
    Ok(fixed)
}

/// Append a big-endian unsigned value as a minimal DER INTEGER.
fn push_integer(out: &mut Vec<u8>, value: &[u8]) {
    let value = match value.iter().position(|b| *b != 0) {
        Some(first) => &value[first..],
        None => &value[value.len()..],
    };
    // A set high bit would read as negative, as would nothing at all.
    let pad = value.first().map_or(true, |b| b & 0x80 != 0);
    out.push(INTEGER);
    push_length(out, value.len() + usize::from(pad));
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(value);
}

fn push_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    out.push(0x80 | (bytes.len() - first) as u8);
    out.extend_from_slice(&bytes[first..]);
}

/// Split one tag-length-value item with the given `tag` off the front of `input`, returning its
/// contents.
fn read_tlv<'a>(input: &mut &'a [u8], tag: u8, wrong_tag: &'static str) -> Result<&'a [u8]> {
    let (&got, rest) = input
        .split_first()
        .ok_or(CoseError::MalformedSignature("truncated input"))?;
    if got != tag {
        return Err(CoseError::MalformedSignature(wrong_tag));
    }
    let (len, rest) = read_length(rest)?;
    if rest.len() < len {
        return Err(CoseError::MalformedSignature("truncated input"));
    }
    let (value, rest) = rest.split_at(len);
    *input = rest;
    Ok(value)
}

fn read_length(input: &[u8]) -> Result<(usize, &[u8])> {
    let (&first, rest) = input
        .split_first()
        .ok_or(CoseError::MalformedSignature("truncated input"))?;
    if first < 0x80 {
        return Ok((first as usize, rest));
    }
    let count = (first & 0x7f) as usize;
    if count == 0 || count > core::mem::size_of::<usize>() {
        return Err(CoseError::MalformedSignature(
            "indefinite or oversized length",
        ));
    }
    if rest.len() < count {
        return Err(CoseError::MalformedSignature("truncated input"));
    }
    let (bytes, rest) = rest.split_at(count);
    if bytes[0] == 0 {
        return Err(CoseError::MalformedSignature("non-minimal length"));
    }
    let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
    if len < 0x80 {
        return Err(CoseError::MalformedSignature("non-minimal length"));
    }
    Ok((len, rest))
}

/// Read a non-negative INTEGER, returning its magnitude without any sign padding.
fn read_unsigned_integer<'a>(input: &mut &'a [u8]) -> Result<&'a [u8]> {
    let value = read_tlv(input, INTEGER, "expected INTEGER")?;
    match value {
        [] => Err(CoseError::MalformedSignature("empty INTEGER")),
        [b, ..] if b & 0x80 != 0 => Err(CoseError::MalformedSignature("negative INTEGER")),
        [0, b, ..] if b & 0x80 == 0 => Err(CoseError::MalformedSignature("non-minimal INTEGER")),
        [0, rest @ ..] => Ok(rest),
        _ => Ok(value),
    }
}
