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

//! Key material shared between tests.

use crate::{Ec2Curve, Ec2Key, OkpCurve, OkpKey, RsaKey, SymmetricKey};
use base64::Engine;

/// Decode standard base64, with or without padding.
pub fn b64(s: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(s.trim_end_matches('='))
        .unwrap()
}

pub const HMAC_KEY: &str = "hJtXIZ2uSN5kbQfbtTNWbpdmhkV8FJG+Onbc6mxCcYg";

/// JWS signing input used with [`HMAC_KEY`].
pub const HMAC_DATA: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsImtpZCI6IjAxOGMwYWU1LTRkOWItNDcxYi1iZmQ2LWVlZjMxNGJjNzAzNyJ9.",
    "SXTigJlzIGEgZGFuZ2Vyb3VzIGJ1c2luZXNzLCBGcm9kbywgZ29pbmcgb3V0IHlvdXIgZG9vci4gWW91IHN0ZX",
    "Agb250byB0aGUgcm9hZCwgYW5kIGlmIHlvdSBkb24ndCBrZWVwIHlvdXIgZmVldCwgdGhlcmXigJlzIG5vIGtu",
    "b3dpbmcgd2hlcmUgeW91IG1pZ2h0IGJlIHN3ZXB0IG9mZiB0by4",
);

pub fn symmetric_key() -> SymmetricKey {
    SymmetricKey::new(b64(HMAC_KEY))
}

pub const P256_D: &str = "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721";
pub const P256_X: &str = "60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6";
pub const P256_Y: &str = "7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299";

/// RFC 6979 deterministic ECDSA signature of "sample" with SHA-256 under the P-256 key.
pub const P256_SAMPLE_SIG: &str = concat!(
    "EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716",
    "F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8",
);

/// RFC 6979 deterministic ECDSA signature of "test" with SHA-256 under the P-256 key.
pub const P256_TEST_SIG: &str = concat!(
    "F1ABB023518351CD71D881567B1EA663ED3EFCF6C5132B354F28D3B0B7D38367",
    "019F4113742A2B14BD25926B49C649155F267E60D3814B4C0CC84250E46F0083",
);

pub fn p256_private() -> Ec2Key {
    Ec2Key::new_private(
        Ec2Curve::P256,
        hex::decode(P256_X).unwrap(),
        hex::decode(P256_Y).unwrap(),
        hex::decode(P256_D).unwrap(),
    )
    .unwrap()
}

pub fn secp256k1_private() -> Ec2Key {
    Ec2Key::new_private(
        Ec2Curve::P256K,
        hex::decode("779dd197a5df977ed2cf6cb31d82d43328b790dc6b3b7d4437a427bd5847dfcd").unwrap(),
        hex::decode("e94b724a555b6d017bb7607c3e3281daf5b1699d6ef4124975c9237b917d426f").unwrap(),
        hex::decode("ebb2c082fd7727890a28ac82f6bdf97bad8de9f5d7c9028692de1a255cad3e0f").unwrap(),
    )
    .unwrap()
}

pub const SECP256K1_DATA: &str = "Maarten Bodewes generated this test vector on 2016-11-08";
pub const SECP256K1_SIG: &str = concat!(
    "241097efbf8b63bf145c8961dbdf10c310efbb3b2676bbc0f8b08505c9e2f795",
    "021006b7838609339e8b415a7f9acb1b661828131aef1ecbc7955dfb01f3ca0e",
);

pub fn p384_private() -> Ec2Key {
    Ec2Key::new_private(
        Ec2Curve::P384,
        hex::decode(concat!(
            "EC3A4E415B4E19A4568618029F427FA5DA9A8BC4AE92E02E",
            "06AAE5286B300C64DEF8F0EA9055866064A254515480BC13",
        ))
        .unwrap(),
        hex::decode(concat!(
            "8015D9B72D7D57244EA8EF9AC0C621896708A59367F9DFB9",
            "F54CA84B3F1C9DB1288B231C3AE0D4FE7344FD2533264720",
        ))
        .unwrap(),
        hex::decode(concat!(
            "6B9D3DAD2E1B8C1C05B19875B6659F4DE23C3B667BF297BA",
            "9AA47740787137D896D5724E4C70A825F872C9EA60D2EDF5",
        ))
        .unwrap(),
    )
    .unwrap()
}

/// RFC 6979 deterministic ECDSA signature of "sample" with SHA-384 under the P-384 key.
pub const P384_SAMPLE_SIG: &str = concat!(
    "94EDBB92A5ECB8AAD4736E56C691916B3F88140666CE9FA73D64C4EA95AD133C",
    "81A648152E44ACF96E36DD1E80FABE46",
    "99EF4AEB15F178CEA1FE40DB2603138F130E740A19624526203B6351D0A3A94F",
    "A329C145786E679E7B82C71A38628AC8",
);

pub fn p521_private() -> Ec2Key {
    Ec2Key::new_private(
        Ec2Curve::P521,
        hex::decode(concat!(
            "01894550D0785932E00EAA23B694F213F8C3121F86DC97A04E5A7167DB4E5BCD",
            "371123D46E45DB6B5D5370A7F20FB633155D38FFA16D2BD761DCAC474B9A2F50",
            "23A4",
        ))
        .unwrap(),
        hex::decode(concat!(
            "00493101C962CD4D2FDDF782285E64584139C2F91B47F87FF82354D6630F746A",
            "28A0DB25741B5B34A828008B22ACC23F924FAAFBD4D33F81EA66956DFEAA2BFD",
            "FCF5",
        ))
        .unwrap(),
        hex::decode(concat!(
            "00FAD06DAA62BA3B25D2FB40133DA757205DE67F5BB0018FEE8C86E1B68C7E75",
            "CAA896EB32F1F47C70855836A6D16FCC1466F6D8FBEC67DB89EC0C08B0E996B8",
            "3538",
        ))
        .unwrap(),
    )
    .unwrap()
}

/// RFC 6979 deterministic ECDSA signature of "sample" with SHA-512 under the P-521 key.
pub const P521_SAMPLE_SIG: &str = concat!(
    "00C328FAFCBD79DD77850370C46325D987CB525569FB63C5D3BC53950E6D4C5F",
    "174E25A1EE9017B5D450606ADD152B534931D7D4E8455CC91F9B15BF05EC36E3",
    "77FA",
    "00617CCE7CF5064806C467F678D3B4080D6F1CC50AF26CA209417308281B68AF",
    "282623EAA63E5B5C0723D8B8C37FF0777B1A20F8CCB1DCCC43997F1EE0E44DA4",
    "A67A",
);

pub fn ed25519_private() -> OkpKey {
    OkpKey::new_private(
        OkpCurve::Ed25519,
        b64("11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo"),
        b64("nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A"),
    )
}

/// RFC 8037 appendix A.4 signing input and signature.
pub const ED25519_DATA: &str = "eyJhbGciOiJFZERTQSJ9.RXhhbXBsZSBvZiBFZDI1NTE5IHNpZ25pbmc";
pub const ED25519_SIG: &str = concat!(
    "860c98d2297f3060a33f42739672d61b53cf3adefed3d3c672f320dc021b411e",
    "9d59b8628dc351e248b88b29468e0e41855b0fb7d83bb15be902bfccb8cd0a02",
);

pub fn ed448_private() -> OkpKey {
    let pkey = openssl::pkey::PKey::generate_ed448().unwrap();
    OkpKey::new_private(
        OkpCurve::Ed448,
        pkey.raw_public_key().unwrap(),
        pkey.raw_private_key().unwrap(),
    )
}

pub const RSA_N: &str = concat!(
    "tpS1ZmfVKVP5KofIhMBP0tSWc4qlh6fm2lrZSkuKxUjEaWjzZSzs72gEIGxraWusMdoRuV54xsWRyf5KeZT0S+I5Pr",
    "le3Idi3gICiO4NwvMk6JwSBcJWwmSLFEKyUSnB2CtfiGc0/5rQCpcEt/Dn5iM+BNn7fqpoLIbks8rXKUIj8+qMVqkT",
    "XsEKeKinE23t1ykMldsNaaOH+hvGti5Jt2DMnH1JjoXdDXfxvSP/0gjUYb0ektudYFXoA6wekmQyJeImvgx4Myz1I4",
    "iHtkY/Cp7J4Mn1ejZ6HNmyvoTE/4OuY1uCeYv4UyXFc1s1uUyYtj4z57qsHGsS4dQ3A2MJsw",
);

pub fn rsa_private() -> RsaKey {
    RsaKey::new_private(
        b64(RSA_N),
        b64("AQAB"),
        b64(concat!(
            "Kp0KuZwCZGL1BLgsVM+N0edMNitl9wN5Hf2WOYDoIqOZNAEKzdJuenIMhITJjRFUX05GVL138uyp2js/pq",
            "DdY9ipA7rAKThwGuDdNphZHech9ih3DGEPXs+YpmHqvIbCd3GoGm38MKwxYkddEpFnjo8rKna1/BpJthrF",
            "xjDRhw9DxJBycOdH2yWTyp62ZENPvneK40H2a57W4QScTgfecZqD59m2fGUaWaX5uUmIxaEmtGoJnd9RE4",
            "oywKhgN7/TK7wXRlqA4UoRPiH2ACrdU+/cLQL9Jc0u0GqZJK31LDbOeN95QgtSCc72k3Vtzy3CrVpp5TAA",
            "67s1Gj9Skn+CAQ",
        )),
        b64(concat!(
            "zPD+B+nrngwF+O99BHvb47XGKR7ON8JCI6JxavzIkusMXCB8rMyYW8zLs68L8JLAzWZ34oMq0FPUnysBxc",
            "5nTF8Nb4BZxTZ5+9cHfoKrYTI3YWsmVW2FpCJFEjMs4NXZ28PBkS9b4zjfS2KhNdkmCeOYU0tJpNfwmOTI",
            "90qeUdU",
        )),
        b64(concat!(
            "5BGU1c7af/5sFyfsa+onIJgo5BZu8uHvz3Uyb8OA0a+G9UPO1ShLYjX0wUfhZcFB7fwPtgmmYAN6wKGVce",
            "9eMAbX4PliPk3r+BcpZuPKkuLk/wFvgWAQ5Hqw2iEuwXLV0/e8c2gaUt/hyMC5+nFc4v0Bmv6NT6Pfry+U",
            "rK3BKWc",
        )),
        b64(concat!(
            "Swz1+m/vmTFN/pu1bK7vF7S5nNVrL4A0OFiEsGliCmuJWzOKdL14DiYxctvnw3H6qT2dKZZfV2tbse5N9+",
            "JecdldUjfuqAoLIe7dD7dKi42YOlTC9QXmqvTh1ohnJu8pmRFXEZQGUm/BVhoIb2/WPkjav6YSkguCUHt4",
            "HRd2YwE",
        )),
        b64(concat!(
            "aJrzw/kjWK9uDlTeaES2e4muv6bWbopYfrPHVWG7NPGoGdhnBnd70+jhgMEiTZSNU8VXw2u7prAR3kZ+kA",
            "p1DdwlqedYOzFsOJcPA0UZhbORyrBy30kbll/7u6CanFm6X4VyJxCpejd7jKNw6cCTFP1sfhWg5NVJ5EUT",
            "kPwE66M",
        )),
        b64(concat!(
            "xxNHSKYPReMBuvtOHCCpaKG8l4KRZ6VpgzmdfQRMZmyFwKL0gjPxgcutluONFzxfj+p6X2Q4GBjFEHefRf",
            "DO5E/MRWlVuEC2UQrSx9zhaVs8+rdp2xL0QdVzSJAzBvHCRCZ2YJWQua70Qbk64sWCvlUxZWFqZaTYgAnl",
            "J7Y41ks",
        )),
    )
}
