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

//! Common types.

use crate::{
    cbor,
    cbor::value::Value,
    iana,
    iana::EnumI64,
    util::cbor_type_error,
};
use core::{cmp::Ordering, convert::TryInto};


/// Marker structure indicating that the EOF was encountered when reading CBOR data.
#[derive(Debug)]
pub struct EndOfFile;

/// Error type for failures in encoding, decoding, signing or verifying COSE types.
///
/// Note that a signature or tag that fails to verify is *not* an error; verification methods
/// return `Ok(false)` in that case.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoseError {
    /// CBOR decoding failure.
    #[error("decode CBOR failure: {0}")]
    DecodeFailed(cbor::de::Error<EndOfFile>),
    /// Duplicate map key detected.
    #[error("duplicate map key")]
    DuplicateMapKey,
    /// CBOR encoding failure.
    #[error("encode CBOR failure")]
    EncodeFailed,
    /// CBOR input had extra data.
    #[error("extraneous data in CBOR input")]
    ExtraneousData,
    /// Integer value on the wire is outside the range of integers representable in this crate.
    #[error("out of range integer value")]
    OutOfRangeIntegerValue,
    /// Unexpected CBOR item encountered (got, want).
    #[error("got {0}, expected {1}")]
    UnexpectedItem(&'static str, &'static str),
    /// Key parameters are missing, malformed or unsupported.
    #[error("invalid key: {0}")]
    KeyFormat(String),
    /// Key belongs to the wrong key family for the algorithm.
    #[error("invalid key, must be of type {0}")]
    InvalidKeyType(&'static str),
    /// Key belongs to the right family but cannot be used with the algorithm.
    #[error("this key cannot be used with this algorithm")]
    IncompatibleKey,
    /// Key lacks the material needed for the operation.
    #[error("missing key material: {0}")]
    MissingKeyMaterial(&'static str),
    /// Algorithm identifier is not in the registry, or lacks the requested capability.
    #[error("unsupported algorithm {0}")]
    UnsupportedAlgorithm(i64),
    /// Algorithm differs from the one the caller required.
    #[error("unexpected algorithm {got}, expected {want}")]
    UnexpectedAlgorithm { got: i64, want: i64 },
    /// COSE envelope does not have the required shape.
    #[error("malformed COSE envelope: {item} shall be {want}")]
    MalformedEnvelope {
        item: &'static str,
        want: &'static str,
    },
    /// DER-encoded ECDSA signature could not be parsed.
    #[error("malformed signature: {0}")]
    MalformedSignature(&'static str),
    /// Input has the wrong length.
    #[error("invalid length {got}, expected {want}")]
    InvalidLength { got: usize, want: usize },
    /// Failure reported by the cryptographic backend.
    #[error("crypto failure: {0}")]
    Crypto(#[from] openssl::error::ErrorStack),
}

/// Crate-specific Result type
pub type Result<T, E = CoseError> = core::result::Result<T, E>;

impl<T> core::convert::From<cbor::de::Error<T>> for CoseError {
    fn from(e: cbor::de::Error<T>) -> Self {
        // Make sure we use our [`EndOfFile`] marker.
        use cbor::de::Error::{Io, RecursionLimitExceeded, Semantic, Syntax};
        let e = match e {
            Io(_) => Io(EndOfFile),
            Syntax(x) => Syntax(x),
            Semantic(a, b) => Semantic(a, b),
            RecursionLimitExceeded => RecursionLimitExceeded,
        };
        CoseError::DecodeFailed(e)
    }
}

impl<T> core::convert::From<cbor::ser::Error<T>> for CoseError {
    fn from(_e: cbor::ser::Error<T>) -> Self {
        CoseError::EncodeFailed
    }
}

impl core::convert::From<core::num::TryFromIntError> for CoseError {
    fn from(_: core::num::TryFromIntError) -> Self {
        CoseError::OutOfRangeIntegerValue
    }
}

/// Read a CBOR [`Value`] from a byte slice, failing if any extra data remains after the `Value` has
/// been read.
pub(crate) fn read_to_value(mut slice: &[u8]) -> Result<Value> {
    let value = cbor::de::from_reader(&mut slice)?;
    if slice.is_empty() {
        Ok(value)
    } else {
        Err(CoseError::ExtraneousData)
    }
}

/// Serialize a [`Value`] into a freshly allocated vector.
pub(crate) fn write_value(value: &Value) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    cbor::ser::into_writer(value, &mut data)?;
    Ok(data)
}

/// Trait for types that can be converted to/from a [`Value`].
pub trait AsCborValue: Sized {
    /// Convert a [`Value`] into an instance of the type.
    fn from_cbor_value(value: Value) -> Result<Self>;
    /// Convert the object into a [`Value`], consuming it along the way.
    fn to_cbor_value(self) -> Result<Value>;
}

/// Extension trait that adds serialization/deserialization methods.
pub trait CborSerializable: AsCborValue {
    /// Create an object instance from serialized CBOR data in a slice.  This method will fail (with
    /// `CoseError::ExtraneousData`) if there is additional CBOR data after the object.
    fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::from_cbor_value(read_to_value(slice)?)
    }

    /// Serialize this object to a vector, consuming it along the way.
    fn to_vec(self) -> Result<Vec<u8>> {
        write_value(&self.to_cbor_value()?)
    }
}

/// Extension trait that adds tagged serialization/deserialization methods.
///
/// The associated `TAG` is how the CBOR layer recognizes a COSE structure: decoding checks it and
/// encoding emits it.
pub trait TaggedCborSerializable: AsCborValue {
    /// The associated tag value.
    const TAG: u64;

    /// Create an object instance from a tagged [`Value`].
    fn from_tagged_cbor_value(value: Value) -> Result<Self> {
        match value {
            Value::Tag(t, v) if t == Self::TAG => Self::from_cbor_value(*v),
            Value::Tag(t, _) => {
                log::debug!("got CBOR tag {t}, expected {}", Self::TAG);
                Err(CoseError::MalformedEnvelope {
                    item: "the CBOR tag",
                    want: "the tag of this COSE structure",
                })
            }
            _ => Err(CoseError::MalformedEnvelope {
                item: "the content",
                want: "tagged",
            }),
        }
    }

    /// Create an object instance from serialized CBOR data in a slice, expecting an initial
    /// tag value.
    fn from_tagged_slice(slice: &[u8]) -> Result<Self> {
        Self::from_tagged_cbor_value(read_to_value(slice)?)
    }

    /// Serialize this object to a vector, including initial tag, consuming the object along the
    /// way.
    fn to_tagged_vec(self) -> Result<Vec<u8>> {
        write_value(&Value::Tag(Self::TAG, Box::new(self.to_cbor_value()?)))
    }
}

/// Trivial implementation of [`AsCborValue`] for [`Value`].
impl AsCborValue for Value {
    fn from_cbor_value(value: Value) -> Result<Self> {
        Ok(value)
    }
    fn to_cbor_value(self) -> Result<Value> {
        Ok(self)
    }
}

impl CborSerializable for Value {}

/// A COSE label may be either a signed integer value or a string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Label {
    Int(i64),
    Text(String),
}

impl CborSerializable for Label {}

/// Manual implementation of [`Ord`] to ensure that CBOR canonical ordering is respected.
///
/// Note that this uses the ordering given by RFC 8949 section 4.2.1 (lexicographic ordering of
/// encoded form).
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Int(i1), Label::Int(i2)) => match (i1.signum(), i2.signum()) {
                (-1, -1) => i2.cmp(i1),
                (-1, _) => Ordering::Greater,
                (_, -1) => Ordering::Less,
                (_, _) => i1.cmp(i2),
            },
            (Label::Int(_i1), Label::Text(_t2)) => Ordering::Less,
            (Label::Text(_t1), Label::Int(_i2)) => Ordering::Greater,
            (Label::Text(t1), Label::Text(t2)) => t1.len().cmp(&t2.len()).then(t1.cmp(t2)),
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsCborValue for Label {
    fn from_cbor_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(Label::Int(i.try_into()?)),
            Value::Text(t) => Ok(Label::Text(t)),
            v => cbor_type_error(&v, "int/tstr"),
        }
    }
    fn to_cbor_value(self) -> Result<Value> {
        Ok(match self {
            Label::Int(i) => Value::from(i),
            Label::Text(t) => Value::Text(t),
        })
    }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Label::Int(i)
    }
}

impl From<&str> for Label {
    fn from(t: &str) -> Self {
        Label::Text(t.to_owned())
    }
}

/// Caller requirements applied when verifying a COSE envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Externally supplied data covered by the signature or tag.
    pub external_aad: Vec<u8>,
    /// If set, the envelope must name exactly this algorithm.
    pub expected_algorithm: Option<iana::Algorithm>,
}

impl VerifyOptions {
    /// Options with no external data and no algorithm requirement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the external additional authenticated data.
    #[must_use]
    pub fn external_aad(mut self, external_aad: Vec<u8>) -> Self {
        self.external_aad = external_aad;
        self
    }

    /// Require the envelope to use `alg`.
    #[must_use]
    pub fn expected_algorithm(mut self, alg: iana::Algorithm) -> Self {
        self.expected_algorithm = Some(alg);
        self
    }

    pub(crate) fn check_algorithm(&self, got: i64) -> Result<()> {
        match self.expected_algorithm {
            Some(want) if want.to_i64() != got => Err(CoseError::UnexpectedAlgorithm {
                got,
                want: want.to_i64(),
            }),
            _ => Ok(()),
        }
    }
}
