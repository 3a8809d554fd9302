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

//! Signing and verification core for [CBOR Object Signing and Encryption (COSE)][COSE].
//!
//! The crate provides:
//! - a typed key model ([`Key`]) built from COSE_Key parameter maps,
//! - an [`algorithm`] registry mapping COSE algorithm identifiers onto HMAC, ECDSA, EdDSA and RSA
//!   implementations backed by [`openssl`](https://docs.rs/openssl),
//! - the [`CoseSign1`] and [`CoseMac0`] envelopes, with their canonical to-be-signed and
//!   to-be-MACed structures,
//! - conversion between fixed-length and DER-encoded ECDSA signatures ([`asn1`]).
//!
//! Builds on the [`ciborium`](https://docs.rs/ciborium) crate for underlying [CBOR][CBOR] support.
//!
//! ## Usage
//!
//! ```
//! use cose_sign::{
//!     iana, CoseSign1, CoseSign1Builder, HeaderBuilder, Key, OkpCurve, OkpKey,
//!     TaggedCborSerializable, VerifyOptions,
//! };
//!
//! // Ed25519 key from RFC 8037 appendix A.
//! let key: Key = OkpKey::new_private(
//!     OkpCurve::Ed25519,
//!     hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a").unwrap(),
//!     hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap(),
//! )
//! .into();
//! let aad = b"this is additional data";
//!
//! // Build and sign a `CoseSign1` object.
//! let sign1 = CoseSign1Builder::new()
//!     .protected(HeaderBuilder::new().algorithm(iana::Algorithm::EdDSA).build())
//!     .payload(b"This is the content".to_vec())
//!     .sign_with_key(aad, &key)?
//!     .build();
//! let data = sign1.to_tagged_vec()?;
//!
//! // At the receiving end, decode and check the signature with the public key.
//! let sign1 = CoseSign1::from_tagged_slice(&data)?;
//! let public = key.to_public()?;
//! let options = VerifyOptions::new()
//!     .external_aad(aad.to_vec())
//!     .expected_algorithm(iana::Algorithm::EdDSA);
//! assert!(sign1.verify_with_options(&public, &options)?);
//!
//! // A different `aad` is a verification failure, not an error.
//! assert!(!sign1.verify(&public)?);
//! # Ok::<(), cose_sign::CoseError>(())
//! ```
//!
//! [COSE]: https://tools.ietf.org/html/rfc8152
//! [CBOR]: https://tools.ietf.org/html/rfc7049

#![deny(rustdoc::broken_intra_doc_links)]

/// Re-export of the `ciborium` crate used for underlying CBOR encoding.
pub use ciborium as cbor;

#[macro_use]
pub(crate) mod util;

#[macro_use]
pub mod iana;

pub mod algorithm;
pub mod asn1;

mod common;
pub use common::*;
mod header;
pub use header::*;
mod key;
pub use key::*;
mod mac;
pub use mac::*;
mod sign;
pub use sign::*;
