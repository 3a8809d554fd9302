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

//! Elliptic curve keys with x- and y-coordinates.

use super::{KeyInfo, KeyParameters};
use crate::{cbor::value::Value, iana, iana::EnumI64, CoseError, Result};
use openssl::{
    bn::BigNum,
    ec::{EcGroup, EcKey},
    nid::Nid,
    pkey::{PKey, Private, Public},
};

const CRV: i64 = iana::Ec2KeyParameter::Crv as i64;
const X: i64 = iana::Ec2KeyParameter::X as i64;
const Y: i64 = iana::Ec2KeyParameter::Y as i64;
const D: i64 = iana::Ec2KeyParameter::D as i64;

/// Curves usable with EC2 keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ec2Curve {
    /// NIST P-256.
    P256,
    /// SECG secp256k1.
    P256K,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
}

impl Ec2Curve {
    /// Byte length of each coordinate (and of the private scalar).
    pub fn coordinate_len(self) -> usize {
        match self {
            Ec2Curve::P256 | Ec2Curve::P256K => 32,
            Ec2Curve::P384 => 48,
            Ec2Curve::P521 => 66,
        }
    }

    /// Canonical curve name.
    pub fn name(self) -> &'static str {
        match self {
            Ec2Curve::P256 => "P-256",
            Ec2Curve::P256K => "secp256k1",
            Ec2Curve::P384 => "P-384",
            Ec2Curve::P521 => "P-521",
        }
    }

    /// COSE curve identifier.
    pub fn to_iana(self) -> iana::EllipticCurve {
        match self {
            Ec2Curve::P256 => iana::EllipticCurve::P_256,
            Ec2Curve::P256K => iana::EllipticCurve::Secp256k1,
            Ec2Curve::P384 => iana::EllipticCurve::P_384,
            Ec2Curve::P521 => iana::EllipticCurve::P_521,
        }
    }

    fn from_iana(crv: iana::EllipticCurve) -> Option<Self> {
        match crv {
            iana::EllipticCurve::P_256 => Some(Ec2Curve::P256),
            iana::EllipticCurve::Secp256k1 => Some(Ec2Curve::P256K),
            iana::EllipticCurve::P_384 => Some(Ec2Curve::P384),
            iana::EllipticCurve::P_521 => Some(Ec2Curve::P521),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(Ec2Curve::P256),
            "secp256k1" | "P-256K" => Some(Ec2Curve::P256K),
            "P-384" => Some(Ec2Curve::P384),
            "P-521" => Some(Ec2Curve::P521),
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
        curve.ok_or_else(|| CoseError::KeyFormat("unsupported EC2 curve".to_owned()))
    }

    fn nid(self) -> Nid {
        match self {
            Ec2Curve::P256 => Nid::X9_62_PRIME256V1,
            Ec2Curve::P256K => Nid::SECP256K1,
            Ec2Curve::P384 => Nid::SECP384R1,
            Ec2Curve::P521 => Nid::SECP521R1,
        }
    }
}

/// Elliptic curve key in affine (x, y) form, with optional private scalar `d`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ec2Key {
    info: KeyInfo,
    curve: Ec2Curve,
    x: Vec<u8>,
    y: Vec<u8>,
    d: Option<Vec<u8>>,
}

impl Ec2Key {
    /// Public key from its coordinates.
    pub fn new_public(curve: Ec2Curve, x: Vec<u8>, y: Vec<u8>) -> Result<Self> {
        Self::new(KeyInfo::default(), curve, x, y, None)
    }

    /// Private key from its coordinates and private scalar.
    pub fn new_private(curve: Ec2Curve, x: Vec<u8>, y: Vec<u8>, d: Vec<u8>) -> Result<Self> {
        Self::new(KeyInfo::default(), curve, x, y, Some(d))
    }

    fn new(
        info: KeyInfo,
        curve: Ec2Curve,
        x: Vec<u8>,
        y: Vec<u8>,
        d: Option<Vec<u8>>,
    ) -> Result<Self> {
        let want = curve.coordinate_len();
        for (name, field) in [("x", Some(&x)), ("y", Some(&y)), ("d", d.as_ref())] {
            if let Some(field) = field {
                if field.len() != want {
                    return Err(CoseError::KeyFormat(format!(
                        "the parameter \"{name}\" must be {want} bytes for curve {}",
                        curve.name()
                    )));
                }
            }
        }
        Ok(Self {
            info,
            curve,
            x,
            y,
            d,
        })
    }

    /// Validate EC2 key parameters.
    pub fn create(params: &KeyParameters) -> Result<Self> {
        params.expect_key_type(iana::KeyType::EC2, "an EC2 key")?;
        let info = KeyInfo::from_params(params)?;
        let curve = params
            .get(CRV, "crv")?
            .ok_or_else(|| CoseError::KeyFormat("the parameter \"crv\" is missing".to_owned()))?;
        let curve = Ec2Curve::from_value(curve)?;
        if let Some(Value::Bool(_)) = params.get(Y, "y")? {
            return Err(CoseError::KeyFormat(
                "compressed EC2 points are not supported".to_owned(),
            ));
        }
        let x = params.required_bytes(X, "x")?;
        let y = params.required_bytes(Y, "y")?;
        let d = params.bytes(D, "d")?;
        Self::new(info, curve, x, y, d)
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

    pub fn curve(&self) -> Ec2Curve {
        self.curve
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
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
            .to_params(iana::KeyType::EC2)
            .param(CRV, self.curve.to_iana().to_i64())
            .param(X, self.x.clone())
            .param(Y, self.y.clone());
        if let Some(d) = &self.d {
            params = params.param(D, d.clone());
        }
        params
    }

    pub(crate) fn public_pkey(&self) -> Result<PKey<Public>> {
        let group = EcGroup::from_curve_name(self.curve.nid())?;
        let x = BigNum::from_slice(&self.x)?;
        let y = BigNum::from_slice(&self.y)?;
        let ec_key = EcKey::from_public_key_affine_coordinates(&group, &x, &y)?;
        Ok(PKey::from_ec_key(ec_key)?)
    }

    pub(crate) fn private_pkey(&self) -> Result<PKey<Private>> {
        let d = self
            .d
            .as_ref()
            .ok_or(CoseError::MissingKeyMaterial("EC2 private key \"d\""))?;
        let group = EcGroup::from_curve_name(self.curve.nid())?;
        let x = BigNum::from_slice(&self.x)?;
        let y = BigNum::from_slice(&self.y)?;
        let public = EcKey::from_public_key_affine_coordinates(&group, &x, &y)?;
        let d = BigNum::from_slice(d)?;
        let ec_key = EcKey::from_private_components(&group, &d, public.public_key())?;
        ec_key.check_key()?;
        Ok(PKey::from_ec_key(ec_key)?)
    }
}
