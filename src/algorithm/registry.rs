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

//! Algorithm registry.

use super::{CoseAlgorithm, Ecdsa, EdDsa, Hmac, RsaPkcs1, RsaPss, SignatureAlgorithm};
use crate::{iana::EnumI64, CoseError, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

const ALGORITHMS: [CoseAlgorithm; 18] = [
    CoseAlgorithm::Mac(Hmac::Sha256Trunc64),
    CoseAlgorithm::Mac(Hmac::Sha256),
    CoseAlgorithm::Mac(Hmac::Sha384),
    CoseAlgorithm::Mac(Hmac::Sha512),
    CoseAlgorithm::Signature(SignatureAlgorithm::Ecdsa(Ecdsa::ES256)),
    CoseAlgorithm::Signature(SignatureAlgorithm::Ecdsa(Ecdsa::ES256K)),
    CoseAlgorithm::Signature(SignatureAlgorithm::Ecdsa(Ecdsa::ES384)),
    CoseAlgorithm::Signature(SignatureAlgorithm::Ecdsa(Ecdsa::ES512)),
    CoseAlgorithm::Signature(SignatureAlgorithm::EdDsa(EdDsa::Any)),
    CoseAlgorithm::Signature(SignatureAlgorithm::EdDsa(EdDsa::Ed25519)),
    CoseAlgorithm::Signature(SignatureAlgorithm::EdDsa(EdDsa::Ed448)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPkcs1(RsaPkcs1::Sha1)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPkcs1(RsaPkcs1::Sha256)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPkcs1(RsaPkcs1::Sha384)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPkcs1(RsaPkcs1::Sha512)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPss(RsaPss::Sha256)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPss(RsaPss::Sha384)),
    CoseAlgorithm::Signature(SignatureAlgorithm::RsaPss(RsaPss::Sha512)),
];

static REGISTRY: Lazy<BTreeMap<i64, CoseAlgorithm>> = Lazy::new(|| {
    ALGORITHMS
        .iter()
        .map(|alg| (alg.identifier().to_i64(), *alg))
        .collect()
});

/// Find the algorithm registered under `id`.
pub fn lookup(id: i64) -> Result<CoseAlgorithm> {
    REGISTRY.get(&id).copied().ok_or_else(|| {
        log::debug!("no algorithm registered under {id}");
        CoseError::UnsupportedAlgorithm(id)
    })
}

/// Find the signature algorithm registered under `id`.
pub fn lookup_signature(id: i64) -> Result<SignatureAlgorithm> {
    match lookup(id)? {
        CoseAlgorithm::Signature(alg) => Ok(alg),
        CoseAlgorithm::Mac(alg) => {
            log::debug!("{alg:?} is not a signature algorithm");
            Err(CoseError::UnsupportedAlgorithm(id))
        }
    }
}

/// Find the MAC algorithm registered under `id`.
pub fn lookup_mac(id: i64) -> Result<Hmac> {
    match lookup(id)? {
        CoseAlgorithm::Mac(alg) => Ok(alg),
        CoseAlgorithm::Signature(alg) => {
            log::debug!("{alg:?} is not a MAC algorithm");
            Err(CoseError::UnsupportedAlgorithm(id))
        }
    }
}

/// All registered algorithms, in ascending identifier order.
pub fn supported() -> impl Iterator<Item = CoseAlgorithm> {
    REGISTRY.values().copied()
}
