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

//! Symmetric keys.

use super::{KeyInfo, KeyParameters};
use crate::{iana, Result};

const K: i64 = iana::SymmetricKeyParameter::K as i64;

/// Symmetric key holding the secret `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymmetricKey {
    info: KeyInfo,
    k: Vec<u8>,
}

impl SymmetricKey {
    pub fn new(k: Vec<u8>) -> Self {
        Self {
            info: KeyInfo::default(),
            k,
        }
    }

    /// Validate symmetric key parameters.
    pub fn create(params: &KeyParameters) -> Result<Self> {
        params.expect_key_type(iana::KeyType::Symmetric, "a symmetric key")?;
        Ok(Self {
            info: KeyInfo::from_params(params)?,
            k: params.required_bytes(K, "k")?,
        })
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

    pub fn k(&self) -> &[u8] {
        &self.k
    }

    pub fn to_parameters(&self) -> KeyParameters {
        self.info
            .to_params(iana::KeyType::Symmetric)
            .param(K, self.k.clone())
    }
}
