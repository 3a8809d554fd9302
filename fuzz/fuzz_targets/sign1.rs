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

#![no_main]

use cose_sign::{CoseSign1, Ec2Curve, Ec2Key, Key, TaggedCborSerializable};
use libfuzzer_sys::fuzz_target;

// P-256 public key from RFC 6979 appendix A.2.5.
const X: &str = "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";
const Y: &str = "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299";

fuzz_target!(|data: &[u8]| {
    if let Ok(sign1) = CoseSign1::from_tagged_slice(data) {
        let key: Key = Ec2Key::new_public(
            Ec2Curve::P256,
            hex::decode(X).unwrap(),
            hex::decode(Y).unwrap(),
        )
        .unwrap()
        .into();
        let _ = sign1.verify(&key);
        let _ = sign1.to_tagged_vec();
    }
});
