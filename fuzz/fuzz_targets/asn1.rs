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

use cose_sign::asn1;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for coordinate_len in [32, 48, 66] {
        // Anything accepted must re-encode to an equivalent signature.
        if let Ok(fixed) = asn1::from_der(data, coordinate_len) {
            let der = asn1::to_der(&fixed, coordinate_len).unwrap();
            assert_eq!(asn1::from_der(&der, coordinate_len).unwrap(), fixed);
        }
    }
});
