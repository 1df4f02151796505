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

//! Error types for texture resolution and cache maintenance.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving textures or purging the cache.
///
/// A failed network fetch is deliberately *not* represented here: the cache
/// soft-fails on it and returns the (not yet existing) target path so the
/// UI stays responsive. Only environmental filesystem failures and manifest
/// problems surface as errors.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture cache i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open manifest '{path}': {source}")]
    ManifestOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line} in manifest '{path}'")]
    ManifestParse { path: PathBuf, line: usize },
}
