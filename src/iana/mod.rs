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

//! Enumerations for the COSE values this crate understands.
//!
//! Sources:
//! - <https://www.iana.org/assignments/cose/cose.xhtml>
//! - <https://www.iana.org/assignments/cbor-tags/cbor-tags.xhtml>
//!
//! The [`Algorithm`] registry follows the identifiers used by the COSE libraries this crate
//! interoperates with, which differ from IANA for a few entries (notably `ES256K` and the
//! curve-specific EdDSA values).


/// Trait indicating an enum that can be constructed from `i64` values.
pub trait EnumI64: Sized + Eq {
    fn from_i64(i: i64) -> Option<Self>;
    fn to_i64(&self) -> i64;
}

/// Generate an enum with associated values, plus a `from_i64` method.
macro_rules! iana_registry {
    ( $(#[$attr:meta])* $enum_name:ident {$($(#[$fattr:meta])* $name:ident: $val:expr,)* } ) => {
        #[allow(non_camel_case_types)]
        $(#[$attr])*
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum $enum_name {
            $($(#[$fattr])* $name = $val,)*
        }
        impl EnumI64 for $enum_name {
            fn from_i64(i: i64) -> Option<Self> {
                match i {
                    $(x if x == Self::$name as i64 => Some(Self::$name),)*
                    _ => None,
                }
            }
            #[inline]
            fn to_i64(&self) -> i64 {
                *self as i64
            }
        }
    }
}

iana_registry! {
    /// COSE header parameters.
    ///
    /// See RFC 8152 section 3.1 table 2.
    HeaderParameter {
        /// Cryptographic algorithm to use
        ///
        /// Associated value of type int / tstr
        Alg: 1,
        /// Critical headers to be understood
        ///
        /// Associated value of type [+ label]
        Crit: 2,
        /// Content type of the payload
        ///
        /// Associated value of type tstr / uint
        ContentType: 3,
        /// Key identifier
        ///
        /// Associated value of type bstr
        Kid: 4,
    }
}

iana_registry! {
    /// Algorithm identifiers recognized by the algorithm registry.
    Algorithm {
        /// RSASSA-PKCS1-v1_5 using SHA-1
        RS1: -65535,
        /// EdDSA restricted to Ed448
        Ed512: -261,
        /// EdDSA restricted to Ed25519
        Ed256: -260,
        /// RSASSA-PKCS1-v1_5 using SHA-512
        RS512: -259,
        /// RSASSA-PKCS1-v1_5 using SHA-384
        RS384: -258,
        /// RSASSA-PKCS1-v1_5 using SHA-256
        RS256: -257,
        /// ECDSA using secp256k1 curve and SHA-256
        ES256K: -46,
        /// RSASSA-PSS w/ SHA-512
        PS512: -39,
        /// RSASSA-PSS w/ SHA-384
        PS384: -38,
        /// RSASSA-PSS w/ SHA-256
        PS256: -37,
        /// ECDSA w/ SHA-512
        ES512: -36,
        /// ECDSA w/ SHA-384
        ES384: -35,
        /// EdDSA, curve taken from the key
        EdDSA: -8,
        /// ECDSA w/ SHA-256
        ES256: -7,
        /// HMAC w/ SHA-256 truncated to 64 bits
        HMAC_256_64: 4,
        /// HMAC w/ SHA-256
        HMAC_256_256: 5,
        /// HMAC w/ SHA-384
        HMAC_384_384: 6,
        /// HMAC w/ SHA-512
        HMAC_512_512: 7,
    }
}

iana_registry! {
    /// Key parameters common to all key types.
    ///
    /// See RFC 8152 section 7.1 table 3.
    KeyParameter {
        /// Identification of the key type
        ///
        /// Associated value of type tstr / int
        Kty: 1,
        /// Key identification value - match to kid in message
        ///
        /// Associated value of type bstr
        Kid: 2,
        /// Key usage restriction to this algorithm
        ///
        /// Associated value of type tstr / int
        Alg: 3,
        /// Restrict set of permissible operations
        ///
        /// Associated value of type [+ (tstr / int)]
        KeyOps: 4,
        /// Base IV to be XORed with Partial IVs
        ///
        /// Associated value of type bstr
        BaseIv: 5,
    }
}

iana_registry! {
    /// Key parameters specific to [`KeyType::EC2`].
    ///
    /// See RFC 8152 section 13.1.1 table 23.
    Ec2KeyParameter {
        /// EC identifier
        Crv: -1,
        /// x-coordinate
        X: -2,
        /// y-coordinate
        Y: -3,
        /// Private key
        D: -4,
    }
}

iana_registry! {
    /// Key parameters specific to [`KeyType::OKP`].
    ///
    /// See RFC 8152 section 13.2 table 24.
    OkpKeyParameter {
        /// EC identifier
        Crv: -1,
        /// x-coordinate
        X: -2,
        /// Private key
        D: -4,
    }
}

iana_registry! {
    /// Key parameters specific to [`KeyType::RSA`].
    ///
    /// See RFC 8230 section 4 table 4.
    RsaKeyParameter {
        /// The RSA modulus n
        N: -1,
        /// The RSA public exponent e
        E: -2,
        /// The RSA private exponent d
        D: -3,
        /// The prime factor p of n
        P: -4,
        /// The prime factor q of n
        Q: -5,
        /// dP is d mod (p - 1)
        DP: -6,
        /// dQ is d mod (q - 1)
        DQ: -7,
        /// qInv is the CRT coefficient q^(-1) mod p
        QInv: -8,
    }
}

iana_registry! {
    /// Key parameters specific to [`KeyType::Symmetric`].
    ///
    /// See RFC 8152 section 13.3 table 25.
    SymmetricKeyParameter {
        /// Key value
        K: -1,
    }
}

iana_registry! {
    /// Key type.
    ///
    /// See RFC 8152 section 13 table 21.
    KeyType {
        /// Octet Key Pair
        OKP: 1,
        /// Elliptic Curve Keys w/ x- and y-coordinate pair
        EC2: 2,
        /// RSA Key
        RSA: 3,
        /// Symmetric Keys
        Symmetric: 4,
    }
}

iana_registry! {
    /// Elliptic curves.
    ///
    /// See RFC 8152 section 13.1 table 22.
    EllipticCurve {
        /// EC2: NIST P-256 also known as secp256r1
        P_256: 1,
        /// EC2: NIST P-384 also known as secp384r1
        P_384: 2,
        /// EC2: NIST P-521 also known as secp521r1
        P_521: 3,
        /// OKP: X25519 for use w/ ECDH only
        X25519: 4,
        /// OKP: X448 for use w/ ECDH only
        X448: 5,
        /// OKP: Ed25519 for use w/ EdDSA only
        Ed25519: 6,
        /// OKP: Ed448 for use w/ EdDSA only
        Ed448: 7,
        /// EC2: SECG secp256k1 curve
        Secp256k1: 8,
    }
}

iana_registry! {
    /// CBOR tag values for COSE structures.
    ///
    /// From IANA registry <https://www.iana.org/assignments/cbor-tags/cbor-tags.xhtml>
    CborTag {
        /// COSE Mac w/o Recipients Object
        CoseMac0: 17,
        /// COSE Single Signer Data Object
        CoseSign1: 18,
    }
}
