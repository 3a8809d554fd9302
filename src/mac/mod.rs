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

//! COSE_Mac0 functionality.

use crate::{
    algorithm::{self, Mac},
    cbor::value::Value,
    common::{write_value, AsCborValue},
    iana,
    util::{envelope_bstr, envelope_items, envelope_map},
    CoseError, Header, Key, ProtectedHeader, Result, VerifyOptions,
};


/// Structure representing a message with authentication code (MAC)
/// where the relevant key is implicit.
///
/// ```cddl
///  COSE_Mac0 = [
///     Headers,
///     payload : bstr,
///     tag : bstr,
///  ]
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoseMac0 {
    pub protected: ProtectedHeader,
    pub unprotected: Header,
    pub payload: Vec<u8>,
    pub tag: Vec<u8>,
}

impl crate::CborSerializable for CoseMac0 {}

impl crate::TaggedCborSerializable for CoseMac0 {
    const TAG: u64 = iana::CborTag::CoseMac0 as u64;
}

impl AsCborValue for CoseMac0 {
    fn from_cbor_value(value: Value) -> Result<Self> {
        let [protected, unprotected, payload, tag] = envelope_items(value)?;
        let protected = envelope_bstr(protected, "the protected header")?;
        let unprotected = envelope_map(unprotected, "the unprotected header")?;
        Ok(Self {
            protected: ProtectedHeader::from_bytes(protected)?,
            unprotected: Header::from_cbor_value(unprotected)?,
            payload: envelope_bstr(payload, "the payload")?,
            tag: envelope_bstr(tag, "the tag")?,
        })
    }

    fn to_cbor_value(self) -> Result<Value> {
        Ok(Value::Array(vec![
            self.protected.cbor_bstr()?,
            self.unprotected.to_cbor_value()?,
            Value::Bytes(self.payload),
            Value::Bytes(self.tag),
        ]))
    }
}

impl CoseMac0 {
    /// Algorithm identifier carried in the protected header.
    pub fn algorithm(&self) -> Result<i64> {
        self.protected
            .header
            .alg
            .ok_or(CoseError::MalformedEnvelope {
                item: "the protected header alg",
                want: "present",
            })
    }

    /// Verify the `tag` value using the provided `verify` function, feeding it
    /// the `tag` value and the combined to-be-MACed data (in that order).
    pub fn verify_tag<F>(&self, external_aad: &[u8], verify: F) -> Result<bool>
    where
        F: FnOnce(&[u8], &[u8]) -> Result<bool>,
    {
        let tbm = self.tbm(external_aad)?;
        verify(&self.tag, &tbm)
    }

    /// Verify the `tag` value with the symmetric `key`, using the algorithm named in the
    /// protected header.
    pub fn verify_tag_with_key(&self, key: &Key) -> Result<bool> {
        self.verify_tag_with_options(key, &VerifyOptions::default())
    }

    /// Verify the `tag` value with `key`, applying the caller requirements in `options`.
    pub fn verify_tag_with_options(&self, key: &Key, options: &VerifyOptions) -> Result<bool> {
        let id = self.algorithm()?;
        options.check_algorithm(id)?;
        let alg = algorithm::lookup_mac(id)?;
        let verified =
            self.verify_tag(&options.external_aad, |tag, data| alg.verify(data, key, tag))?;
        log::debug!(
            "{:?} tag {}",
            alg,
            if verified { "verified" } else { "rejected" }
        );
        Ok(verified)
    }

    /// Construct the to-be-MAC-ed data for this object. Any protected header values should be set
    /// before using this method, as should the `payload`.
    pub fn tbm(&self, external_aad: &[u8]) -> Result<Vec<u8>> {
        mac_structure_data(&self.protected.to_bytes()?, external_aad, &self.payload)
    }
}

/// Builder for [`CoseMac0`] objects.
#[derive(Debug, Default)]
pub struct CoseMac0Builder(CoseMac0);

impl CoseMac0Builder {
    builder! {CoseMac0}
    builder_set_protected! {protected}
    builder_set! {unprotected: Header}
    builder_set! {tag: Vec<u8>}
    builder_set! {payload: Vec<u8>}

    /// Calculate the tag value, using `create`. Any protected header values should be set
    /// before using this method, as should the `payload`.
    pub fn create_tag<F>(self, external_aad: &[u8], create: F) -> Result<Self>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        let tbm = self.0.tbm(external_aad)?;
        Ok(self.tag(create(&tbm)))
    }

    /// Calculate the tag value, using a `create` function that may fail.
    pub fn try_create_tag<F, E>(self, external_aad: &[u8], create: F) -> Result<Self, E>
    where
        F: FnOnce(&[u8]) -> Result<Vec<u8>, E>,
        E: From<CoseError>,
    {
        let tbm = self.0.tbm(external_aad)?;
        Ok(self.tag(create(&tbm)?))
    }

    /// Calculate the tag value with the symmetric `key`, using the algorithm set in the protected
    /// header.
    pub fn create_tag_with_key(self, external_aad: &[u8], key: &Key) -> Result<Self> {
        let alg = algorithm::lookup_mac(self.0.algorithm()?)?;
        log::debug!("computing tag with {alg:?}");
        self.try_create_tag(external_aad, |tbm| alg.hash(tbm, key))
    }
}

/// Create the binary blob that a COSE_Mac0 tag covers.
///
/// ```cddl
///  MAC_structure = [
///       context : "MAC0",
///       protected : empty_or_serialized_map,
///       external_aad : bstr,
///       payload : bstr
///  ]
/// ```
pub fn mac_structure_data(protected: &[u8], external_aad: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    write_value(&Value::Array(vec![
        Value::Text("MAC0".to_owned()),
        Value::Bytes(protected.to_vec()),
        Value::Bytes(external_aad.to_vec()),
        Value::Bytes(payload.to_vec()),
    ]))
}
