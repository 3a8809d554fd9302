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

use cose_sign::{CoseMac0, Key, SymmetricKey, TaggedCborSerializable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mac) = CoseMac0::from_tagged_slice(data) {
        let key = Key::from(SymmetricKey::new(vec![0x42; 32]));
        let _ = mac.verify_tag_with_key(&key);
        let _ = mac.to_tagged_vec();
    }
});
