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

//! Texture manifest loading.
//!
//! Each channel publishes an `.md5` manifest next to its directory declaring
//! the artwork that should exist and its expected content, one
//! `"<hash> <subfolder>/<filename>"` pair per line. The manifest is the
//! authority during a purge: anything on disk that it does not declare, or
//! declares with a different hash, gets evicted.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TextureError;

/// Load a manifest into a `key -> expected hash` lookup table.
///
/// Duplicate keys are tolerated: later lines silently overwrite earlier
/// entries, so the last occurrence wins.
///
/// # Errors
/// Returns [`TextureError::ManifestOpen`] when the file cannot be opened and
/// [`TextureError::ManifestParse`] for a line that is not a
/// `"<hash> <key>"` pair. The file handle is released on every exit path.
pub fn load(path: &Path) -> Result<HashMap<String, String>, TextureError> {
    let file = File::open(path).map_err(|source| TextureError::ManifestOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut entries = HashMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match line.split_once(' ') {
            Some((digest, key)) if !digest.is_empty() && !key.is_empty() => {
                entries.insert(key.to_string(), digest.to_string());
            }
            _ => {
                return Err(TextureError::ManifestParse {
                    path: path.to_path_buf(),
                    line: index + 1,
                })
            }
        }
    }

    Ok(entries)
}
