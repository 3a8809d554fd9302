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

//! RSA signatures: PKCS#1 v1.5 (RFC 8812) and PSS (RFC 8230).

use super::Signature;
use crate::{iana, CoseError, Key, Result, RsaKey};
use openssl::{
    hash::MessageDigest,
    rsa::Padding,
    sign::{RsaPssSaltlen, Signer, Verifier},
};

/// RSASSA-PKCS1-v1_5 algorithms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RsaPkcs1 {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

/// RSASSA-PSS algorithms. MGF1 uses the same hash as the message, and the salt is as long as the
/// hash output.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RsaPss {
    Sha256,
    Sha384,
    Sha512,
}

fn rsa_key(key: &Key, alg: iana::Algorithm) -> Result<&RsaKey> {
    let Key::Rsa(rsa) = key else {
        return Err(CoseError::InvalidKeyType("RSA"));
    };
    key.check_alg(alg)?;
    Ok(rsa)
}

impl RsaPkcs1 {
    fn digest(self) -> MessageDigest {
        match self {
            RsaPkcs1::Sha1 => MessageDigest::sha1(),
            RsaPkcs1::Sha256 => MessageDigest::sha256(),
            RsaPkcs1::Sha384 => MessageDigest::sha384(),
            RsaPkcs1::Sha512 => MessageDigest::sha512(),
        }
    }
}

impl Signature for RsaPkcs1 {
    fn identifier(&self) -> iana::Algorithm {
        match self {
            RsaPkcs1::Sha1 => iana::Algorithm::RS1,
            RsaPkcs1::Sha256 => iana::Algorithm::RS256,
            RsaPkcs1::Sha384 => iana::Algorithm::RS384,
            RsaPkcs1::Sha512 => iana::Algorithm::RS512,
        }
    }

    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        let pkey = rsa_key(key, self.identifier())?.private_pkey()?;
        let mut signer = Signer::new(self.digest(), &pkey)?;
        signer.set_rsa_padding(Padding::PKCS1)?;
        Ok(signer.sign_oneshot_to_vec(data)?)
    }

    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
        let pkey = rsa_key(key, self.identifier())?.public_pkey()?;
        let mut verifier = Verifier::new(self.digest(), &pkey)?;
        verifier.set_rsa_padding(Padding::PKCS1)?;
        Ok(verifier.verify_oneshot(signature, data)?)
    }
}

impl RsaPss {
    fn digest(self) -> MessageDigest {
        match self {
            RsaPss::Sha256 => MessageDigest::sha256(),
            RsaPss::Sha384 => MessageDigest::sha384(),
            RsaPss::Sha512 => MessageDigest::sha512(),
        }
    }
}

impl Signature for RsaPss {
    fn identifier(&self) -> iana::Algorithm {
        match self {
            RsaPss::Sha256 => iana::Algorithm::PS256,
            RsaPss::Sha384 => iana::Algorithm::PS384,
            RsaPss::Sha512 => iana::Algorithm::PS512,
        }
    }

    fn sign(&self, data: &[u8], key: &Key) -> Result<Vec<u8>> {
        let pkey = rsa_key(key, self.identifier())?.private_pkey()?;
        let mut signer = Signer::new(self.digest(), &pkey)?;
        signer.set_rsa_padding(Padding::PKCS1_PSS)?;
        signer.set_rsa_pss_saltlen(RsaPssSaltlen::DIGEST_LENGTH)?;
        signer.set_rsa_mgf1_md(self.digest())?;
        Ok(signer.sign_oneshot_to_vec(data)?)
    }

    fn verify(&self, data: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
        let pkey = rsa_key(key, self.identifier())?.public_pkey()?;
        let mut verifier = Verifier::new(self.digest(), &pkey)?;
        verifier.set_rsa_padding(Padding::PKCS1_PSS)?;
        verifier.set_rsa_pss_saltlen(RsaPssSaltlen::DIGEST_LENGTH)?;
        verifier.set_rsa_mgf1_md(self.digest())?;
        Ok(verifier.verify_oneshot(signature, data)?)
    }
}
