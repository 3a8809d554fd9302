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

//! RSA keys.

use super::{KeyInfo, KeyParameters};
use crate::{iana, CoseError, Result};
use openssl::{
    bn::BigNum,
    pkey::{PKey, Private, Public},
    rsa::Rsa,
};

const N: i64 = iana::RsaKeyParameter::N as i64;
const E: i64 = iana::RsaKeyParameter::E as i64;
const D: i64 = iana::RsaKeyParameter::D as i64;
const P: i64 = iana::RsaKeyParameter::P as i64;
const Q: i64 = iana::RsaKeyParameter::Q as i64;
const DP: i64 = iana::RsaKeyParameter::DP as i64;
const DQ: i64 = iana::RsaKeyParameter::DQ as i64;
const QINV: i64 = iana::RsaKeyParameter::QInv as i64;

/// Private exponent and CRT parameters of an RSA key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RsaPrivateParts {
    d: Option<Vec<u8>>,
    p: Option<Vec<u8>>,
    q: Option<Vec<u8>>,
    dp: Option<Vec<u8>>,
    dq: Option<Vec<u8>>,
    qi: Option<Vec<u8>>,
}

impl RsaPrivateParts {
    fn is_complete(&self) -> bool {
        self.d.is_some()
            && self.p.is_some()
            && self.q.is_some()
            && self.dp.is_some()
            && self.dq.is_some()
            && self.qi.is_some()
    }

    fn entries(&self) -> [(i64, Option<&Vec<u8>>); 6] {
        [
            (D, self.d.as_ref()),
            (P, self.p.as_ref()),
            (Q, self.q.as_ref()),
            (DP, self.dp.as_ref()),
            (DQ, self.dq.as_ref()),
            (QINV, self.qi.as_ref()),
        ]
    }
}

/// RSA key: modulus and public exponent, plus any private parameters that were provided.
///
/// The key only counts as private when the private exponent and all CRT parameters are present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaKey {
    info: KeyInfo,
    n: Vec<u8>,
    e: Vec<u8>,
    private: RsaPrivateParts,
}

impl RsaKey {
    /// Public key from modulus and exponent.
    pub fn new_public(n: Vec<u8>, e: Vec<u8>) -> Self {
        Self {
            info: KeyInfo::default(),
            n,
            e,
            private: RsaPrivateParts::default(),
        }
    }

    /// Private key with the full set of CRT parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new_private(
        n: Vec<u8>,
        e: Vec<u8>,
        d: Vec<u8>,
        p: Vec<u8>,
        q: Vec<u8>,
        dp: Vec<u8>,
        dq: Vec<u8>,
        qi: Vec<u8>,
    ) -> Self {
        Self {
            info: KeyInfo::default(),
            n,
            e,
            private: RsaPrivateParts {
                d: Some(d),
                p: Some(p),
                q: Some(q),
                dp: Some(dp),
                dq: Some(dq),
                qi: Some(qi),
            },
        }
    }

    /// Validate RSA key parameters.
    pub fn create(params: &KeyParameters) -> Result<Self> {
        params.expect_key_type(iana::KeyType::RSA, "an RSA key")?;
        Ok(Self {
            info: KeyInfo::from_params(params)?,
            n: params.required_bytes(N, "n")?,
            e: params.required_bytes(E, "e")?,
            private: RsaPrivateParts {
                d: params.bytes(D, "d")?,
                p: params.bytes(P, "p")?,
                q: params.bytes(Q, "q")?,
                dp: params.bytes(DP, "dp")?,
                dq: params.bytes(DQ, "dq")?,
                qi: params.bytes(QINV, "qi")?,
            },
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

    /// Modulus.
    pub fn n(&self) -> &[u8] {
        &self.n
    }

    /// Public exponent.
    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// Private exponent, if present.
    pub fn d(&self) -> Option<&[u8]> {
        self.private.d.as_deref()
    }

    pub fn is_private(&self) -> bool {
        self.private.is_complete()
    }

    /// Copy of the key with every private parameter removed.
    pub fn to_public(&self) -> Self {
        Self {
            info: self.info.clone(),
            n: self.n.clone(),
            e: self.e.clone(),
            private: RsaPrivateParts::default(),
        }
    }

    pub fn to_parameters(&self) -> KeyParameters {
        let mut params = self
            .info
            .to_params(iana::KeyType::RSA)
            .param(N, self.n.clone())
            .param(E, self.e.clone());
        for (label, value) in self.private.entries() {
            if let Some(value) = value {
                params = params.param(label, value.clone());
            }
        }
        params
    }

    /// PEM encoding of the key: PKCS#8 for a private key, SubjectPublicKeyInfo otherwise.
    pub fn to_pem(&self) -> Result<Vec<u8>> {
        if self.is_private() {
            Ok(self.private_pkey()?.private_key_to_pem_pkcs8()?)
        } else {
            Ok(self.public_pkey()?.public_key_to_pem()?)
        }
    }

    pub(crate) fn public_pkey(&self) -> Result<PKey<Public>> {
        let rsa = Rsa::from_public_components(
            BigNum::from_slice(&self.n)?,
            BigNum::from_slice(&self.e)?,
        )?;
        Ok(PKey::from_rsa(rsa)?)
    }

    pub(crate) fn private_pkey(&self) -> Result<PKey<Private>> {
        let missing = || CoseError::MissingKeyMaterial("RSA private key parameters");
        let bn = |v: &Option<Vec<u8>>| -> Result<BigNum> {
            Ok(BigNum::from_slice(v.as_ref().ok_or_else(missing)?)?)
        };
        let private = &self.private;
        let rsa = Rsa::from_private_components(
            BigNum::from_slice(&self.n)?,
            BigNum::from_slice(&self.e)?,
            bn(&private.d)?,
            bn(&private.p)?,
            bn(&private.q)?,
            bn(&private.dp)?,
            bn(&private.dq)?,
            bn(&private.qi)?,
        )?;
        Ok(PKey::from_rsa(rsa)?)
    }
}
