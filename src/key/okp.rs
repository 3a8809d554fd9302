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

//! Octet key pairs.

use super::{KeyInfo, KeyParameters};
use crate::{cbor::value::Value, iana, iana::EnumI64, CoseError, Result};
use openssl::pkey::{Id, PKey, Private, Public};

const CRV: i64 = iana::OkpKeyParameter::Crv as i64;
const X: i64 = iana::OkpKeyParameter::X as i64;
const D: i64 = iana::OkpKeyParameter::D as i64;

/// Curves usable with OKP keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OkpCurve {
    X25519,
    X448,
    Ed25519,
    Ed448,
}

impl OkpCurve {
    /// Canonical curve name.
    pub fn name(self) -> &'static str {
        match self {
            OkpCurve::X25519 => "X25519",
            OkpCurve::X448 => "X448",
            OkpCurve::Ed25519 => "Ed25519",
            OkpCurve::Ed448 => "Ed448",
        }
    }

    /// COSE curve identifier.
    pub fn to_iana(self) -> iana::EllipticCurve {
        match self {
            OkpCurve::X25519 => iana::EllipticCurve::X25519,
            OkpCurve::X448 => iana::EllipticCurve::X448,
            OkpCurve::Ed25519 => iana::EllipticCurve::Ed25519,
            OkpCurve::Ed448 => iana::EllipticCurve::Ed448,
        }
    }

    fn from_iana(crv: iana::EllipticCurve) -> Option<Self> {
        match crv {
            iana::EllipticCurve::X25519 => Some(OkpCurve::X25519),
            iana::EllipticCurve::X448 => Some(OkpCurve::X448),
            iana::EllipticCurve::Ed25519 => Some(OkpCurve::Ed25519),
            iana::EllipticCurve::Ed448 => Some(OkpCurve::Ed448),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "X25519" => Some(OkpCurve::X25519),
            "X448" => Some(OkpCurve::X448),
            "Ed25519" => Some(OkpCurve::Ed25519),
            "Ed448" => Some(OkpCurve::Ed448),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Result<Self> {
        let curve = match value {
            Value::Integer(i) => i64::try_from(*i)
                .ok()
                .and_then(iana::EllipticCurve::from_i64)
                .and_then(Self::from_iana),
            Value::Text(t) => Self::from_name(t),
            _ => None,
        };
        curve.ok_or_else(|| CoseError::KeyFormat("unsupported OKP curve".to_owned()))
    }

    fn pkey_id(self) -> Id {
        match self {
            OkpCurve::X25519 => Id::X25519,
            OkpCurve::X448 => Id::X448,
            OkpCurve::Ed25519 => Id::ED25519,
            OkpCurve::Ed448 => Id::ED448,
        }
    }
}

/// Octet key pair: public key `x` with optional private key `d`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OkpKey {
    info: KeyInfo,
    curve: OkpCurve,
    x: Vec<u8>,
    d: Option<Vec<u8>>,
}

impl OkpKey {
    /// Public key.
    pub fn new_public(curve: OkpCurve, x: Vec<u8>) -> Self {
        Self {
            info: KeyInfo::default(),
            curve,
            x,
            d: None,
        }
    }

    /// Private key, together with its public counterpart.
    pub fn new_private(curve: OkpCurve, x: Vec<u8>, d: Vec<u8>) -> Self {
        Self {
            info: KeyInfo::default(),
            curve,
            x,
            d: Some(d),
        }
    }

    /// Validate OKP key parameters.
    pub fn create(params: &KeyParameters) -> Result<Self> {
        params.expect_key_type(iana::KeyType::OKP, "an OKP key")?;
        let info = KeyInfo::from_params(params)?;
        let curve = params
            .get(CRV, "crv")?
            .ok_or_else(|| CoseError::KeyFormat("the parameter \"crv\" is missing".to_owned()))?;
        Ok(Self {
            info,
            curve: OkpCurve::from_value(curve)?,
            x: params.required_bytes(X, "x")?,
            d: params.bytes(D, "d")?,
        })
    }

    /// Replace the common key parameters.
    #[must_use]
    pub fn with_info(mut self, info: KeyInfo) -> Self {
        self.info = info;
        self
    }

    pub fn info(&self) -> &KeyInfo {
        &self.info
    }

    pub fn curve(&self) -> OkpCurve {
        self.curve
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn d(&self) -> Option<&[u8]> {
        self.d.as_deref()
    }

    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }

    /// Copy of the key without `d`.
    pub fn to_public(&self) -> Self {
        Self {
            d: None,
            ..self.clone()
        }
    }

    pub fn to_parameters(&self) -> KeyParameters {
        let mut params = self
            .info
            .to_params(iana::KeyType::OKP)
            .param(CRV, self.curve.to_iana().to_i64())
            .param(X, self.x.clone());
        if let Some(d) = &self.d {
            params = params.param(D, d.clone());
        }
        params
    }

    pub(crate) fn public_pkey(&self) -> Result<PKey<Public>> {
        Ok(PKey::public_key_from_raw_bytes(
            &self.x,
            self.curve.pkey_id(),
        )?)
    }

    pub(crate) fn private_pkey(&self) -> Result<PKey<Private>> {
        let d = self
            .d
            .as_ref()
            .ok_or(CoseError::MissingKeyMaterial("OKP private key \"d\""))?;
        Ok(PKey::private_key_from_raw_bytes(d, self.curve.pkey_id())?)
    }
}
