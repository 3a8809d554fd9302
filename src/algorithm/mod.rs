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

//! COSE algorithms.
//!
//! Each algorithm family is a closed enum implementing one of two capability traits: [`Mac`] for
//! message authentication codes, and [`Signature`] for digital signatures. [`CoseAlgorithm`] joins
//! the two, and the registry maps COSE algorithm identifiers onto it.
//!
//! Every operation checks that the key belongs to the family the algorithm needs
//! ([`CoseError::InvalidKeyType`]) and that its curve and `alg` restriction fit the algorithm
//! ([`CoseError::IncompatibleKey`]). A tag or signature that does not verify is reported as
//! `Ok(false)`.
//!
//! [`CoseError::InvalidKeyType`]: crate::CoseError::InvalidKeyType
//! [`CoseError::IncompatibleKey`]: crate::CoseError::IncompatibleKey

use crate::{iana, Key, Result};

mod ecdsa;
mod eddsa;
mod mac;
mod registry;
mod rsa;

pub use ecdsa::Ecdsa;
pub use eddsa::EdDsa;
pub use mac::Hmac;
pub use registry::{lookup, lookup_mac, lookup_signature, supported};
pub use rsa::{RsaPkcs1, RsaPss};


/// Message authentication code algorithm.
pub trait Mac {
    /// COSE algorithm identifier.
    fn identifier(&self) -> iana::Algorithm;

    /// Compute the tag of `data` under `key`.
    fn hash(&self, data: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Check `tag` against the tag of `data` under `key`, in constant time.
    fn verify(&self, data: &[u8], key: &Key, tag: &[u8]) -> Result<bool>;
}

/// Digital signature algorithm.
pub trait Signature {
    /// COSE algorithm identifier.
    fn identifier(&self) -> iana::Algorithm;

    /// Sign `data` with the private `key`.
    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Verify `signature` over `data` with the public part of `key`.
    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool>;
}

/// Any of the supported signature algorithms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SignatureAlgorithm {
    Ecdsa(Ecdsa),
    EdDsa(EdDsa),
    RsaPkcs1(RsaPkcs1),
    RsaPss(RsaPss),
}

impl SignatureAlgorithm {
    fn inner(&self) -> &dyn Signature {
        match self {
            SignatureAlgorithm::Ecdsa(a) => a,
            SignatureAlgorithm::EdDsa(a) => a,
            SignatureAlgorithm::RsaPkcs1(a) => a,
            SignatureAlgorithm::RsaPss(a) => a,
        }
    }
}

impl Signature for SignatureAlgorithm {
    fn identifier(&self) -> iana::Algorithm {
        self.inner().identifier()
    }

    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        self.inner().sign(data, key)
    }

    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
        self.inner().verify(data, key, signature)
    }
}

/// Registered algorithm, tagged by capability.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CoseAlgorithm {
    Mac(Hmac),
    Signature(SignatureAlgorithm),
}

impl CoseAlgorithm {
    /// COSE algorithm identifier.
    pub fn identifier(&self) -> iana::Algorithm {
        match self {
            CoseAlgorithm::Mac(a) => a.identifier(),
            CoseAlgorithm::Signature(a) => a.identifier(),
        }
    }
}

impl From<Hmac> for CoseAlgorithm {
    fn from(a: Hmac) -> Self {
        CoseAlgorithm::Mac(a)
    }
}

impl From<Ecdsa> for CoseAlgorithm {
    fn from(a: Ecdsa) -> Self {
        CoseAlgorithm::Signature(SignatureAlgorithm::Ecdsa(a))
    }
}

impl From<EdDsa> for CoseAlgorithm {
    fn from(a: EdDsa) -> Self {
        CoseAlgorithm::Signature(SignatureAlgorithm::EdDsa(a))
    }
}

impl From<RsaPkcs1> for CoseAlgorithm {
    fn from(a: RsaPkcs1) -> Self {
        CoseAlgorithm::Signature(SignatureAlgorithm::RsaPkcs1(a))
    }
}

impl From<RsaPss> for CoseAlgorithm {
    fn from(a: RsaPss) -> Self {
        CoseAlgorithm::Signature(SignatureAlgorithm::RsaPss(a))
    }
}
