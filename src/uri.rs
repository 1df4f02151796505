// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Network access for texture retrieval.
//!
//! The cache never talks to the network directly; all remote reads go
//! through the [`UriHandler`] trait so that hosts can plug in their own
//! transport. [`HttpUriHandler`] is the stock blocking HTTP implementation.

use log::error;

/// Network-access collaborator used to retrieve remote textures.
///
/// Retries, proxying, TLS, and timeouts are the implementor's concern; the
/// cache performs exactly one `open` per fetch attempt.
pub trait UriHandler {
    /// Retrieve the contents of `uri`.
    ///
    /// Returns `None` when the resource could not be retrieved. An empty
    /// payload is treated as a failure by callers.
    fn open(&self, uri: &str) -> Option<Vec<u8>>;
}

/// Blocking HTTP [`UriHandler`] backed by a reqwest client.
#[derive(Debug)]
pub struct HttpUriHandler {
    client: reqwest::blocking::Client,
}

impl HttpUriHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpUriHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UriHandler for HttpUriHandler {
    fn open(&self, uri: &str) -> Option<Vec<u8>> {
        match self.client.get(uri).send() {
            Ok(response) => {
                if response.status().is_success() {
                    match response.bytes() {
                        Ok(bytes) => Some(bytes.to_vec()),
                        Err(e) => {
                            error!("Failed to read texture bytes from {}: {}", uri, e);
                            None
                        }
                    }
                } else {
                    error!("Failed to download texture {}: HTTP {}", uri, response.status());
                    None
                }
            }
            Err(e) => {
                error!("Failed to fetch texture {}: {}", uri, e);
                None
            }
        }
    }
}
