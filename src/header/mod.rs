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

//! COSE Headers functionality.

use crate::{
    cbor::value::Value,
    common::AsCborValue,
    iana,
    iana::EnumI64,
    util::{cbor_type_error, to_cbor_array, ValueTryAs},
    CoseError, Label, Result,
};
use std::collections::BTreeSet;


/// Content type, either a CoAP content format number or a `type/subtype` string.
pub type ContentType = Label;

/// Structure representing a common COSE header map.
///
/// ```cddl
///   header_map = {
///       Generic_Headers,
///       * label => values
///   }
///
///   Generic_Headers = (
///       ? 1 => int,         ; algorithm identifier
///       ? 2 => [+label],    ; criticality
///       ? 3 => tstr / uint, ; content type
///       ? 4 => bstr,        ; key identifier
///   )
///  ```
///
/// Algorithm identifiers are restricted to integers, as the algorithm registry is keyed by them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    /// Cryptographic algorithm to use
    pub alg: Option<i64>,
    /// Critical headers to be understood
    pub crit: Vec<Label>,
    /// Content type of the payload
    pub content_type: Option<ContentType>,
    /// Key identifier.
    pub key_id: Vec<u8>,
    /// Any additional header (label,value) pairs.  If duplicate labels are present, CBOR-encoding
    /// will fail.
    pub rest: Vec<(Label, Value)>,
}

impl Header {
    /// Indicate whether the `Header` is empty.
    pub fn is_empty(&self) -> bool {
        self.alg.is_none()
            && self.crit.is_empty()
            && self.content_type.is_none()
            && self.key_id.is_empty()
            && self.rest.is_empty()
    }
}

impl crate::CborSerializable for Header {}

const ALG: Label = Label::Int(iana::HeaderParameter::Alg as i64);
const CRIT: Label = Label::Int(iana::HeaderParameter::Crit as i64);
const CONTENT_TYPE: Label = Label::Int(iana::HeaderParameter::ContentType as i64);
const KID: Label = Label::Int(iana::HeaderParameter::Kid as i64);

impl AsCborValue for Header {
    fn from_cbor_value(value: Value) -> Result<Self> {
        let m = value.try_as_map()?;
        let mut headers = Self::default();
        let mut seen = BTreeSet::new();
        for (l, value) in m.into_iter() {
            // RFC 8152 section 14 requires that COSE polices duplicate map keys.
            let label = Label::from_cbor_value(l)?;
            if !seen.insert(label.clone()) {
                return Err(CoseError::DuplicateMapKey);
            }
            match label {
                ALG => headers.alg = Some(value.try_as_integer()?.try_into()?),

                CRIT => {
                    let crit = value.try_as_array_then_convert(Label::from_cbor_value)?;
                    if crit.is_empty() {
                        return Err(CoseError::UnexpectedItem("empty array", "non-empty array"));
                    }
                    headers.crit = crit;
                }

                CONTENT_TYPE => {
                    let content_type = match value {
                        Value::Integer(i) => {
                            let i: i64 = i.try_into()?;
                            if i < 0 {
                                return Err(CoseError::UnexpectedItem("nint", "uint"));
                            }
                            Label::Int(i)
                        }
                        Value::Text(text) => {
                            if text.is_empty() {
                                return Err(CoseError::UnexpectedItem("empty tstr", "non-empty tstr"));
                            }
                            if text.trim() != text {
                                return Err(CoseError::UnexpectedItem(
                                    "leading/trailing whitespace",
                                    "no leading/trailing whitespace",
                                ));
                            }
                            // Basic check that the content type is of form type/subtype.
                            if text.matches('/').count() != 1 {
                                return Err(CoseError::UnexpectedItem(
                                    "arbitrary text",
                                    "text of form type/subtype",
                                ));
                            }
                            Label::Text(text)
                        }
                        v => return cbor_type_error(&v, "tstr/uint"),
                    };
                    headers.content_type = Some(content_type);
                }

                KID => headers.key_id = value.try_as_nonempty_bytes()?,

                label => headers.rest.push((label, value)),
            }
        }
        Ok(headers)
    }

    fn to_cbor_value(self) -> Result<Value> {
        let mut map = Vec::<(Value, Value)>::new();
        if let Some(alg) = self.alg {
            map.push((ALG.to_cbor_value()?, Value::from(alg)));
        }
        if !self.crit.is_empty() {
            map.push((CRIT.to_cbor_value()?, to_cbor_array(self.crit)?));
        }
        if let Some(content_type) = self.content_type {
            map.push((CONTENT_TYPE.to_cbor_value()?, content_type.to_cbor_value()?));
        }
        if !self.key_id.is_empty() {
            map.push((KID.to_cbor_value()?, Value::Bytes(self.key_id)));
        }
        let mut seen = BTreeSet::new();
        for (label, value) in self.rest {
            if !seen.insert(label.clone()) {
                return Err(CoseError::DuplicateMapKey);
            }
            map.push((label.to_cbor_value()?, value));
        }
        Ok(Value::Map(map))
    }
}

/// Builder for [`Header`] objects.
#[derive(Debug, Default)]
pub struct HeaderBuilder(Header);

impl HeaderBuilder {
    builder! {Header}
    builder_set! {key_id: Vec<u8>}

    /// Set the algorithm.
    #[must_use]
    pub fn algorithm(mut self, alg: iana::Algorithm) -> Self {
        self.0.alg = Some(alg.to_i64());
        self
    }

    /// Set the algorithm to an identifier that may not be registered.
    #[must_use]
    pub fn algorithm_id(mut self, alg: i64) -> Self {
        self.0.alg = Some(alg);
        self
    }

    /// Add a critical header.
    #[must_use]
    pub fn add_critical(mut self, label: Label) -> Self {
        self.0.crit.push(label);
        self
    }

    /// Set the content type to a numeric value.
    #[must_use]
    pub fn content_format(mut self, content_format: u16) -> Self {
        self.0.content_type = Some(Label::Int(content_format.into()));
        self
    }

    /// Set the content type to a text value.
    #[must_use]
    pub fn content_type(mut self, content_type: String) -> Self {
        self.0.content_type = Some(Label::Text(content_type));
        self
    }

    /// Set a header label:value pair.
    ///
    /// # Panics
    ///
    /// This function will panic if it used to set a header label from the
    /// [`iana::HeaderParameter`] range.
    #[must_use]
    pub fn value(mut self, label: i64, value: Value) -> Self {
        if iana::HeaderParameter::from_i64(label).is_some() {
            panic!("value() method used to set core header parameter"); // safe: invalid input
        }
        self.0.rest.push((Label::Int(label), value));
        self
    }

    /// Set a header label:value pair where the `label` is text.
    #[must_use]
    pub fn text_value(mut self, label: String, value: Value) -> Self {
        self.0.rest.push((Label::Text(label), value));
        self
    }
}

/// Structure representing a protected COSE header map.
///
/// The serialized form is retained when decoding, because signatures cover the exact bytes
/// received rather than a re-encoding of the parsed map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProtectedHeader {
    /// If this structure was created by parsing serialized data, this field
    /// holds the exact data that was parsed.
    pub original_data: Option<Vec<u8>>,
    /// Parsed header information.
    pub header: Header,
}

impl ProtectedHeader {
    /// Constructor from the contents of a `bstr`, which holds either nothing (empty header) or an
    /// encoded header map.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = if data.is_empty() {
            // An empty bstr is used as a short cut for an empty header map.
            Header::default()
        } else {
            <Header as crate::CborSerializable>::from_slice(&data)?
        };
        Ok(ProtectedHeader {
            original_data: Some(data),
            header,
        })
    }

    /// Serialized form of the protected header: the original bytes if retained, otherwise the
    /// encoding of the header (empty for an empty header).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if let Some(data) = &self.original_data {
            Ok(data.clone())
        } else if self.header.is_empty() {
            Ok(Vec::new())
        } else {
            crate::CborSerializable::to_vec(self.header.clone())
        }
    }

    /// Convert this header to a `bstr` encoded map, as a [`Value`], consuming the object along the
    /// way.
    pub fn cbor_bstr(self) -> Result<Value> {
        Ok(Value::Bytes(self.to_bytes()?))
    }

    /// Indicate whether the `ProtectedHeader` is empty.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}
