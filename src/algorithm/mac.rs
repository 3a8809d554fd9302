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

//! HMAC with SHA-2.

use super::Mac;
use crate::{iana, CoseError, Key, Result};
use openssl::{hash::MessageDigest, memcmp, pkey::PKey, sign::Signer};

/// HMAC algorithms (RFC 8152 section 9.1).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Hmac {
    /// HMAC-SHA256 truncated to 64 bits.
    Sha256Trunc64,
    Sha256,
    Sha384,
    Sha512,
}

impl Hmac {
    fn digest(self) -> MessageDigest {
        match self {
            Hmac::Sha256Trunc64 | Hmac::Sha256 => MessageDigest::sha256(),
            Hmac::Sha384 => MessageDigest::sha384(),
            Hmac::Sha512 => MessageDigest::sha512(),
        }
    }

    /// Tag length in bytes.
    pub fn tag_len(self) -> usize {
        match self {
            Hmac::Sha256Trunc64 => 8,
            Hmac::Sha256 => 32,
            Hmac::Sha384 => 48,
            Hmac::Sha512 => 64,
        }
    }
}

impl Mac for Hmac {
    fn identifier(&self) -> iana::Algorithm {
        match self {
            Hmac::Sha256Trunc64 => iana::Algorithm::HMAC_256_64,
            Hmac::Sha256 => iana::Algorithm::HMAC_256_256,
            Hmac::Sha384 => iana::Algorithm::HMAC_384_384,
            Hmac::Sha512 => iana::Algorithm::HMAC_512_512,
        }
    }

    fn hash(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        let Key::Symmetric(symmetric) = key else {
            return Err(CoseError::InvalidKeyType("symmetric"));
        };
        key.check_alg(self.identifier())?;
        if symmetric.k().is_empty() {
            return Err(CoseError::MissingKeyMaterial("symmetric key \"k\""));
        }
        let pkey = PKey::hmac(symmetric.k())?;
        let mut signer = Signer::new(self.digest(), &pkey)?;
        let mut tag = signer.sign_oneshot_to_vec(data)?;
        tag.truncate(self.tag_len());
        Ok(tag)
    }

    fn verify(&self, data: &[u8], key: &Key, tag: &[u8]) -> Result<bool> {
        let expected = self.hash(data, key)?;
        // `memcmp::eq` panics on length mismatch.
        Ok(expected.len() == tag.len() && memcmp::eq(&expected, tag))
    }
}
