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

//! Pure EdDSA.

use super::Signature;
use crate::{iana, CoseError, Key, OkpCurve, OkpKey, Result};
use openssl::sign::{Signer, Verifier};

/// EdDSA algorithms (RFC 8152 section 8.2). The message is signed directly, without prehashing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdDsa {
    /// Either Edwards curve, as given by the key.
    Any,
    /// Ed25519 only.
    Ed25519,
    /// Ed448 only.
    Ed448,
}

impl EdDsa {
    fn accepts(self, curve: OkpCurve) -> bool {
        matches!(
            (self, curve),
            (EdDsa::Any, OkpCurve::Ed25519 | OkpCurve::Ed448)
                | (EdDsa::Ed25519, OkpCurve::Ed25519)
                | (EdDsa::Ed448, OkpCurve::Ed448)
        )
    }

    fn okp_key(self, key: &Key) -> Result<&OkpKey> {
        let Key::Okp(okp) = key else {
            return Err(CoseError::InvalidKeyType("OKP"));
        };
        if !self.accepts(okp.curve()) {
            log::debug!("{:?} cannot use a {} key", self, okp.curve().name());
            return Err(CoseError::IncompatibleKey);
        }
        key.check_alg(self.identifier())?;
        Ok(okp)
    }
}

impl Signature for EdDsa {
    fn identifier(&self) -> iana::Algorithm {
        match self {
            EdDsa::Any => iana::Algorithm::EdDSA,
            EdDsa::Ed25519 => iana::Algorithm::Ed256,
            EdDsa::Ed448 => iana::Algorithm::Ed512,
        }
    }

    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        let pkey = self.okp_key(key)?.private_pkey()?;
        let mut signer = Signer::new_without_digest(&pkey)?;
        Ok(signer.sign_oneshot_to_vec(data)?)
    }

    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
        let pkey = self.okp_key(key)?.public_pkey()?;
        let mut verifier = Verifier::new_without_digest(&pkey)?;
        Ok(verifier.verify_oneshot(signature, data)?)
    }
}
