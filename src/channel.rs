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

//! Channel metadata consumed by texture handlers.
//!
//! A channel is an external entity: the scraper side of the add-on creates
//! these from its channel descriptors and hands them to the cache. The cache
//! only reads the identifier and the filesystem root; it never mutates a
//! channel.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A channel that supplies artwork filenames to be resolved.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Channel {
    /// Stable channel identifier (e.g. `channel.nick.nickelodeon`). Derives
    /// both the cache subfolder and the manifest filename.
    pub id: String,

    /// Filesystem root of the channel, containing its bundled default
    /// artwork files.
    pub path: PathBuf,

    /// Fanart url/path used for display purposes. Never read by the cache.
    #[serde(default)]
    pub fanart: Option<String>,
}

impl Channel {
    /// Create a new channel from its identifier and filesystem root.
    #[must_use]
    pub fn new(id: String, path: PathBuf) -> Self {
        Self {
            id,
            path,
            fanart: None,
        }
    }

    /// CDN subfolder that namespaces this channel's textures, both under
    /// the cache root and in manifest keys.
    #[must_use]
    pub fn cdn_folder(&self) -> &str {
        &self.id
    }

    /// Location of the channel's texture manifest: `<path>/../<id>.md5`,
    /// one `"<hash> <subfolder>/<filename>"` pair per line.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("..").join(format!("{}.md5", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_folder_is_stable_id() {
        let channel = Channel::new(
            "channel.nick.nickelodeon".to_string(),
            PathBuf::from("/addons/channel.nick/nickelodeon"),
        );
        assert_eq!(channel.cdn_folder(), "channel.nick.nickelodeon");
    }

    #[test]
    fn test_manifest_path_is_sibling_of_channel_root() {
        let channel = Channel::new(
            "channel.nick.nickelodeon".to_string(),
            PathBuf::from("/addons/channel.nick/nickelodeon"),
        );
        assert_eq!(
            channel.manifest_path(),
            PathBuf::from("/addons/channel.nick/nickelodeon/../channel.nick.nickelodeon.md5")
        );
    }
}
