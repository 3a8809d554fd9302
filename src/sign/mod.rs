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

//! COSE_Sign1 functionality.

use crate::{
    algorithm::{self, Signature},
    cbor::value::Value,
    common::{write_value, AsCborValue},
    iana,
    util::{envelope_bstr, envelope_items, envelope_map, ValueTryAs},
    CoseError, Header, Key, ProtectedHeader, Result, VerifyOptions,
};


/// The to-be-signed structure of a COSE_Sign1 message.
///
/// ```cddl
///  Sig_structure = [
///      context : "Signature1",
///      body_protected : empty_or_serialized_map,
///      external_aad : bstr,
///      payload : bstr
///  ]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature1 {
    protected: Vec<u8>,
    external_aad: Vec<u8>,
    payload: Vec<u8>,
}

impl Signature1 {
    /// Context string, per RFC 8152 section 4.4.
    pub const CONTEXT: &'static str = "Signature1";

    /// Structure over the serialized protected header and the payload, with no external data.
    pub fn new(protected: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            protected,
            external_aad: Vec::new(),
            payload,
        }
    }

    /// Set the externally supplied additional authenticated data.
    #[must_use]
    pub fn with_external_aad(mut self, external_aad: Vec<u8>) -> Self {
        self.external_aad = external_aad;
        self
    }

    pub fn protected(&self) -> &[u8] {
        &self.protected
    }

    pub fn external_aad(&self) -> &[u8] {
        &self.external_aad
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl crate::CborSerializable for Signature1 {}

impl AsCborValue for Signature1 {
    fn from_cbor_value(value: Value) -> Result<Self> {
        let mut a = value.try_as_array()?;
        if a.len() != 4 {
            return Err(CoseError::UnexpectedItem("array", "array with 4 items"));
        }

        // Remove array elements in reverse order to avoid shifts.
        let payload = a.remove(3).try_as_bytes()?;
        let external_aad = a.remove(2).try_as_bytes()?;
        let protected = a.remove(1).try_as_bytes()?;
        match a.remove(0) {
            Value::Text(t) if t == Self::CONTEXT => {}
            _ => return Err(CoseError::UnexpectedItem("context", "\"Signature1\"")),
        }
        Ok(Self {
            protected,
            external_aad,
            payload,
        })
    }

    fn to_cbor_value(self) -> Result<Value> {
        Ok(Value::Array(vec![
            Value::Text(Self::CONTEXT.to_owned()),
            Value::Bytes(self.protected),
            Value::Bytes(self.external_aad),
            Value::Bytes(self.payload),
        ]))
    }
}

/// Create the binary blob that a COSE_Sign1 signature covers.
pub fn sig_structure_data(protected: &[u8], external_aad: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let structure = Signature1::new(protected.to_vec(), payload.to_vec())
        .with_external_aad(external_aad.to_vec());
    crate::CborSerializable::to_vec(structure)
}

/// Signed payload with a single signature.
///
/// ```cddl
///   COSE_Sign1 = [
///       Headers,
///       payload : bstr,
///       signature : bstr
///   ]
/// ```
///
/// Detached (nil) payloads are not accepted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoseSign1 {
    pub protected: ProtectedHeader,
    pub unprotected: Header,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl crate::CborSerializable for CoseSign1 {}

impl crate::TaggedCborSerializable for CoseSign1 {
    const TAG: u64 = iana::CborTag::CoseSign1 as u64;
}

impl AsCborValue for CoseSign1 {
    fn from_cbor_value(value: Value) -> Result<Self> {
        let [protected, unprotected, payload, signature] = envelope_items(value)?;
        let protected = envelope_bstr(protected, "the protected header")?;
        let unprotected = envelope_map(unprotected, "the unprotected header")?;
        let payload = envelope_bstr(payload, "the payload")?;
        let signature = envelope_bstr(signature, "the signature")?;
        Ok(Self {
            protected: ProtectedHeader::from_bytes(protected)?,
            unprotected: Header::from_cbor_value(unprotected)?,
            payload,
            signature,
        })
    }

    fn to_cbor_value(self) -> Result<Value> {
        Ok(Value::Array(vec![
            self.protected.cbor_bstr()?,
            self.unprotected.to_cbor_value()?,
            Value::Bytes(self.payload),
            Value::Bytes(self.signature),
        ]))
    }
}

impl CoseSign1 {
    /// Assemble a message from its parts, serializing the protected header and the payload value
    /// into byte strings.
    pub fn create(
        protected: Header,
        unprotected: Header,
        payload: Value,
        signature: Vec<u8>,
    ) -> Result<Self> {
        Ok(Self {
            protected: ProtectedHeader {
                original_data: None,
                header: protected,
            },
            unprotected,
            payload: write_value(&payload)?,
            signature,
        })
    }

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

    /// Verify the signature with `key`, using the algorithm named in the protected header.
    ///
    /// Returns `Ok(false)` if the signature does not match; errors are reserved for messages or
    /// keys that cannot be checked at all.
    pub fn verify(&self, key: &Key) -> Result<bool> {
        self.verify_with_options(key, &VerifyOptions::default())
    }

    /// Verify the signature with `key`, applying the caller requirements in `options`.
    pub fn verify_with_options(&self, key: &Key, options: &VerifyOptions) -> Result<bool> {
        let id = self.algorithm()?;
        options.check_algorithm(id)?;
        let alg = algorithm::lookup_signature(id)?;
        let public = key.to_public()?;
        let verified = self.verify_signature(&options.external_aad, |sig, data| {
            alg.verify(data, &public, sig)
        })?;
        log::debug!(
            "{:?} signature {}",
            alg,
            if verified { "verified" } else { "rejected" }
        );
        Ok(verified)
    }

    /// Verify the signature with a caller-supplied function, feeding it the signature value and
    /// the to-be-signed data (in that order).
    pub fn verify_signature<F>(&self, external_aad: &[u8], verify: F) -> Result<bool>
    where
        F: FnOnce(&[u8], &[u8]) -> Result<bool>,
    {
        let tbs = self.tbs_data(external_aad)?;
        verify(&self.signature, &tbs)
    }

    /// Construct the to-be-signed data for this object. Any protected header values should be set
    /// before using this method, as should the `payload`.
    pub fn tbs_data(&self, external_aad: &[u8]) -> Result<Vec<u8>> {
        sig_structure_data(&self.protected.to_bytes()?, external_aad, &self.payload)
    }
}

/// Builder for [`CoseSign1`] objects.
#[derive(Debug, Default)]
pub struct CoseSign1Builder(CoseSign1);

impl CoseSign1Builder {
    builder! {CoseSign1}
    builder_set_protected! {protected}
    builder_set! {unprotected: Header}
    builder_set! {signature: Vec<u8>}
    builder_set! {payload: Vec<u8>}

    /// Calculate the signature value, using `signer` to generate the signature bytes. Any
    /// protected header values should be set before using this method, as should the `payload`.
    pub fn create_signature<F>(self, external_aad: &[u8], signer: F) -> Result<Self>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        let tbs = self.0.tbs_data(external_aad)?;
        Ok(self.signature(signer(&tbs)))
    }

    /// Calculate the signature value, using a `signer` that may fail.
    pub fn try_create_signature<F, E>(self, external_aad: &[u8], signer: F) -> Result<Self, E>
    where
        F: FnOnce(&[u8]) -> Result<Vec<u8>, E>,
        E: From<CoseError>,
    {
        let tbs = self.0.tbs_data(external_aad)?;
        Ok(self.signature(signer(&tbs)?))
    }

    /// Sign with `key`, using the algorithm set in the protected header.
    pub fn sign_with_key(self, external_aad: &[u8], key: &Key) -> Result<Self> {
        let alg = algorithm::lookup_signature(self.0.algorithm()?)?;
        log::debug!("signing with {alg:?}");
        self.try_create_signature(external_aad, |tbs| alg.sign(tbs, key))
    }
}
