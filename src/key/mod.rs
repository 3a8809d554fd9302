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

//! COSE_Key functionality.
//!
//! A [`KeyParameters`] map holds the raw (label, value) pairs of a COSE_Key. [`Key::create`]
//! validates such a map once and produces one of the typed key families; nothing downstream of
//! that boundary sees the untyped map.

use crate::{
    cbor::value::Value,
    common::AsCborValue,
    iana,
    iana::EnumI64,
    util::ValueTryAs,
    CoseError, Label, Result,
};
use std::collections::BTreeSet;

mod ec2;
mod okp;
mod rsa;
mod symmetric;

pub use ec2::{Ec2Curve, Ec2Key};
pub use okp::{OkpCurve, OkpKey};
pub use rsa::RsaKey;
pub use symmetric::SymmetricKey;

#[cfg(test)]
mod tests;

/// Unvalidated COSE_Key parameters.
///
/// ```cddl
///  COSE_Key = {
///      1 => tstr / int,          ; kty
///      ? 2 => bstr,              ; kid
///      ? 3 => tstr / int,        ; alg
///      * label => values
///  }
///  ```
///
/// Parameters may also be given under their short text (JWK-style) names, such as `"kty"` or
/// `"crv"`. A parameter present under both its integer label and its text name is ambiguous and
/// is rejected during validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyParameters(Vec<(Label, Value)>);

impl KeyParameters {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    #[must_use]
    pub fn param<L: Into<Label>, V: Into<Value>>(mut self, label: L, value: V) -> Self {
        self.0.push((label.into(), value.into()));
        self
    }

    /// Iterate over the (label, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Label, Value)> {
        self.0.iter()
    }

    /// Indicate whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a parameter by integer label and legacy text name.
    pub(crate) fn get(&self, label: i64, name: &'static str) -> Result<Option<&Value>> {
        let mut found = self.0.iter().filter(|(l, _)| match l {
            Label::Int(i) => *i == label,
            Label::Text(t) => t == name,
        });
        let first = found.next();
        if found.next().is_some() {
            return Err(CoseError::KeyFormat(format!(
                "the parameter \"{name}\" is ambiguous"
            )));
        }
        Ok(first.map(|(_, v)| v))
    }

    /// Look up an optional byte string parameter.
    pub(crate) fn bytes(&self, label: i64, name: &'static str) -> Result<Option<Vec<u8>>> {
        match self.get(label, name)? {
            None => Ok(None),
            Some(Value::Bytes(b)) => Ok(Some(b.clone())),
            Some(_) => Err(CoseError::KeyFormat(format!(
                "the parameter \"{name}\" must be a byte string"
            ))),
        }
    }

    /// Look up a mandatory byte string parameter.
    pub(crate) fn required_bytes(&self, label: i64, name: &'static str) -> Result<Vec<u8>> {
        self.bytes(label, name)?
            .ok_or_else(|| CoseError::KeyFormat(format!("the parameter \"{name}\" is missing")))
    }

    /// Determine the key type, given as an integer or as a text name.
    pub fn key_type(&self) -> Result<iana::KeyType> {
        let kty = self
            .get(iana::KeyParameter::Kty as i64, "kty")?
            .ok_or_else(|| CoseError::KeyFormat("the key type is missing".to_owned()))?;
        let kty = match kty {
            Value::Integer(i) => i64::try_from(*i)
                .ok()
                .and_then(iana::KeyType::from_i64),
            Value::Text(t) => key_type_from_name(t),
            _ => None,
        };
        kty.ok_or_else(|| CoseError::KeyFormat("unsupported key type".to_owned()))
    }

    /// Check that the key type is `want`, as required by the `family` constructor.
    pub(crate) fn expect_key_type(&self, want: iana::KeyType, family: &str) -> Result<()> {
        if self.key_type()? != want {
            return Err(CoseError::KeyFormat(format!(
                "the key type does not correspond to {family}"
            )));
        }
        Ok(())
    }
}

impl<L: Into<Label>, V: Into<Value>> FromIterator<(L, V)> for KeyParameters {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        )
    }
}

impl crate::CborSerializable for KeyParameters {}

impl AsCborValue for KeyParameters {
    fn from_cbor_value(value: Value) -> Result<Self> {
        let m = value.try_as_map()?;
        let mut params = Vec::with_capacity(m.len());
        let mut seen = BTreeSet::new();
        for (l, value) in m.into_iter() {
            // The `ciborium` CBOR library does not police duplicate map keys.
            // RFC 8152 section 14 requires that COSE does police duplicates, so do it here.
            let label = Label::from_cbor_value(l)?;
            if !seen.insert(label.clone()) {
                return Err(CoseError::DuplicateMapKey);
            }
            params.push((label, value));
        }
        Ok(Self(params))
    }

    fn to_cbor_value(self) -> Result<Value> {
        let mut seen = BTreeSet::new();
        let mut map = Vec::with_capacity(self.0.len());
        for (label, value) in self.0 {
            if !seen.insert(label.clone()) {
                return Err(CoseError::DuplicateMapKey);
            }
            map.push((label.to_cbor_value()?, value));
        }
        Ok(Value::Map(map))
    }
}

/// Text name of a key type.
pub fn key_type_name(kty: iana::KeyType) -> &'static str {
    match kty {
        iana::KeyType::OKP => "OKP",
        iana::KeyType::EC2 => "EC",
        iana::KeyType::RSA => "RSA",
        iana::KeyType::Symmetric => "oct",
    }
}

fn key_type_from_name(name: &str) -> Option<iana::KeyType> {
    match name {
        "OKP" => Some(iana::KeyType::OKP),
        "EC" => Some(iana::KeyType::EC2),
        "RSA" => Some(iana::KeyType::RSA),
        "oct" => Some(iana::KeyType::Symmetric),
        _ => None,
    }
}

/// Parameters shared by all key types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyInfo {
    /// Key identification.
    pub key_id: Vec<u8>,
    /// Key use restriction to this algorithm.
    pub alg: Option<i64>,
}

const KTY: i64 = iana::KeyParameter::Kty as i64;
const KID: i64 = iana::KeyParameter::Kid as i64;
const ALG: i64 = iana::KeyParameter::Alg as i64;

impl KeyInfo {
    pub(crate) fn from_params(params: &KeyParameters) -> Result<Self> {
        let key_id = params.bytes(KID, "kid")?.unwrap_or_default();
        let alg = match params.get(ALG, "alg")? {
            None => None,
            Some(Value::Integer(i)) => Some(i64::try_from(*i)?),
            Some(_) => {
                return Err(CoseError::KeyFormat(
                    "the parameter \"alg\" must be an integer".to_owned(),
                ))
            }
        };
        Ok(Self { key_id, alg })
    }

    /// Emit the `kty` entry followed by whichever common parameters are set.
    pub(crate) fn to_params(&self, kty: iana::KeyType) -> KeyParameters {
        let mut params = KeyParameters::new().param(KTY, kty.to_i64());
        if !self.key_id.is_empty() {
            params = params.param(KID, self.key_id.clone());
        }
        if let Some(alg) = self.alg {
            params = params.param(ALG, alg);
        }
        params
    }
}

/// Validated COSE key, one variant per key family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Ec2(Ec2Key),
    Okp(OkpKey),
    Rsa(RsaKey),
    Symmetric(SymmetricKey),
}

impl Key {
    /// Validate `params` and build the key family named by its key type.
    pub fn create(params: &KeyParameters) -> Result<Self> {
        let kty = params.key_type()?;
        log::trace!("creating {} key", key_type_name(kty));
        Ok(match kty {
            iana::KeyType::EC2 => Key::Ec2(Ec2Key::create(params)?),
            iana::KeyType::OKP => Key::Okp(OkpKey::create(params)?),
            iana::KeyType::RSA => Key::Rsa(RsaKey::create(params)?),
            iana::KeyType::Symmetric => Key::Symmetric(SymmetricKey::create(params)?),
        })
    }

    /// Key family.
    pub fn key_type(&self) -> iana::KeyType {
        match self {
            Key::Ec2(_) => iana::KeyType::EC2,
            Key::Okp(_) => iana::KeyType::OKP,
            Key::Rsa(_) => iana::KeyType::RSA,
            Key::Symmetric(_) => iana::KeyType::Symmetric,
        }
    }

    /// Parameters shared by all key types.
    pub fn info(&self) -> &KeyInfo {
        match self {
            Key::Ec2(k) => k.info(),
            Key::Okp(k) => k.info(),
            Key::Rsa(k) => k.info(),
            Key::Symmetric(k) => k.info(),
        }
    }

    /// Indicate whether the key holds private material. Symmetric keys are always private.
    pub fn is_private(&self) -> bool {
        match self {
            Key::Ec2(k) => k.is_private(),
            Key::Okp(k) => k.is_private(),
            Key::Rsa(k) => k.is_private(),
            Key::Symmetric(_) => true,
        }
    }

    /// Copy of the key with private fields stripped. Symmetric keys have no public view.
    pub fn to_public(&self) -> Result<Self> {
        match self {
            Key::Ec2(k) => Ok(Key::Ec2(k.to_public())),
            Key::Okp(k) => Ok(Key::Okp(k.to_public())),
            Key::Rsa(k) => Ok(Key::Rsa(k.to_public())),
            Key::Symmetric(_) => Err(CoseError::InvalidKeyType("EC2, OKP or RSA")),
        }
    }

    /// Parameter map equivalent to this key.
    pub fn to_parameters(&self) -> KeyParameters {
        match self {
            Key::Ec2(k) => k.to_parameters(),
            Key::Okp(k) => k.to_parameters(),
            Key::Rsa(k) => k.to_parameters(),
            Key::Symmetric(k) => k.to_parameters(),
        }
    }

    /// Check the key's own algorithm restriction, if any, against `alg`.
    pub(crate) fn check_alg(&self, alg: iana::Algorithm) -> Result<()> {
        match self.info().alg {
            Some(restricted) if restricted != alg.to_i64() => {
                log::debug!("key restricted to algorithm {restricted}, not {alg:?}");
                Err(CoseError::IncompatibleKey)
            }
            _ => Ok(()),
        }
    }
}

impl From<Ec2Key> for Key {
    fn from(k: Ec2Key) -> Self {
        Key::Ec2(k)
    }
}

impl From<OkpKey> for Key {
    fn from(k: OkpKey) -> Self {
        Key::Okp(k)
    }
}

impl From<RsaKey> for Key {
    fn from(k: RsaKey) -> Self {
        Key::Rsa(k)
    }
}

impl From<SymmetricKey> for Key {
    fn from(k: SymmetricKey) -> Self {
        Key::Symmetric(k)
    }
}

impl crate::CborSerializable for Key {}

impl AsCborValue for Key {
    fn from_cbor_value(value: Value) -> Result<Self> {
        Key::create(&KeyParameters::from_cbor_value(value)?)
    }

    fn to_cbor_value(self) -> Result<Value> {
        self.to_parameters().to_cbor_value()
    }
}
