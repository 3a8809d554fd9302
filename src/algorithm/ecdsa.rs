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

//! ECDSA with SHA-2.

use super::Signature;
use crate::{asn1, iana, CoseError, Ec2Curve, Ec2Key, Key, Result};
use openssl::{
    hash::MessageDigest,
    sign::{Signer, Verifier},
};

/// ECDSA algorithms, each bound to one curve (RFC 8152 section 8.1).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ecdsa {
    /// P-256 with SHA-256.
    ES256,
    /// secp256k1 with SHA-256.
    ES256K,
    /// P-384 with SHA-384.
    ES384,
    /// P-521 with SHA-512.
    ES512,
}

impl Ecdsa {
    /// Curve the algorithm signs with.
    pub fn curve(self) -> Ec2Curve {
        match self {
            Ecdsa::ES256 => Ec2Curve::P256,
            Ecdsa::ES256K => Ec2Curve::P256K,
            Ecdsa::ES384 => Ec2Curve::P384,
            Ecdsa::ES512 => Ec2Curve::P521,
        }
    }

    fn digest(self) -> MessageDigest {
        match self {
            Ecdsa::ES256 | Ecdsa::ES256K => MessageDigest::sha256(),
            Ecdsa::ES384 => MessageDigest::sha384(),
            Ecdsa::ES512 => MessageDigest::sha512(),
        }
    }

    fn ec2_key(self, key: &Key) -> Result<&Ec2Key> {
        let Key::Ec2(ec2) = key else {
            return Err(CoseError::InvalidKeyType("EC2"));
        };
        if ec2.curve() != self.curve() {
            log::debug!(
                "{:?} needs a {} key, got {}",
                self,
                self.curve().name(),
                ec2.curve().name()
            );
            return Err(CoseError::IncompatibleKey);
        }
        key.check_alg(self.identifier())?;
        Ok(ec2)
    }
}

impl Signature for Ecdsa {
    fn identifier(&self) -> iana::Algorithm {
        match self {
            Ecdsa::ES256 => iana::Algorithm::ES256,
            Ecdsa::ES256K => iana::Algorithm::ES256K,
            Ecdsa::ES384 => iana::Algorithm::ES384,
            Ecdsa::ES512 => iana::Algorithm::ES512,
        }
    }

    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        let ec2 = self.ec2_key(key)?;
        let pkey = ec2.private_pkey()?;
        let mut signer = Signer::new(self.digest(), &pkey)?;
        // The signer produces DER, COSE wants fixed-length r || s.
        let der = signer.sign_oneshot_to_vec(data)?;
        asn1::from_der(&der, self.curve().coordinate_len())
    }

    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
        let ec2 = self.ec2_key(key)?;
        let der = asn1::to_der(signature, self.curve().coordinate_len()).map_err(|e| {
            log::debug!("{:?} signature rejected: {}", self, e);
            CoseError::MalformedSignature("ECDSA signature has the wrong length")
        })?;
        let pkey = ec2.public_pkey()?;
        let mut verifier = Verifier::new(self.digest(), &pkey)?;
        Ok(verifier.verify_oneshot(&der, data)?)
    }
}
