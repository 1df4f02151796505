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

//! Channel artwork texture caching for media-center add-ons.
//!
//! This library resolves channel-relative image filenames into usable local
//! paths, populating an on-disk cache on first use and purging stale entries
//! against a server-provided manifest. It is the storage side of an add-on:
//! the channel scrapers call in through a single seam and never deal with
//! the CDN or the cache layout themselves.
//!
//! - **Handler layer**: the [`TextureHandler`] capability with two variants,
//!   the CDN-backed disk cache ([`Cached`]) and a bundled-resources
//!   passthrough ([`Local`]), selected by configuration
//! - **Collaborators**: network access ([`UriHandler`]) and platform
//!   image-cache invalidation ([`ImageCacheNotifier`]) are injected traits,
//!   so hosts and tests control transport and side effects
//! - **Maintenance**: [`TextureHandler::purge`] reconciles the cache with a
//!   channel's `.md5` manifest and restores entries already in use
//!
//! # Quick Start
//!
//! ```no_run
//! use texture_cache::{create_handler, Channel, TextureConfig};
//!
//! # fn main() -> Result<(), texture_cache::TextureError> {
//! let handler = create_handler(&TextureConfig::default())?;
//!
//! let channel = Channel::new(
//!     "channel.nick.nickelodeon".to_string(),
//!     "/addons/channel.nick/nickelodeon".into(),
//! );
//!
//! // Resolve artwork; the cache populates itself on the first miss.
//! let icon = handler.resolve(&channel, "nickelodeonimage.png")?;
//! println!("icon lives at {icon}");
//!
//! // Maintenance pass against the channel's manifest.
//! handler.purge(&channel)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Injecting Collaborators
//!
//! ```no_run
//! use texture_cache::{Cached, NoopNotifier, UriHandler};
//! use std::path::Path;
//!
//! struct OfflineUriHandler;
//!
//! impl UriHandler for OfflineUriHandler {
//!     fn open(&self, _uri: &str) -> Option<Vec<u8>> {
//!         None
//!     }
//! }
//!
//! # fn main() -> Result<(), texture_cache::TextureError> {
//! let cache = Cached::new(
//!     Path::new("/tmp/texture-cache"),
//!     None,
//!     Box::new(OfflineUriHandler),
//!     Box::new(NoopNotifier),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cached;
pub mod channel;
pub mod error;
pub mod handler;
pub mod hash;
pub mod local;
pub mod manifest;
pub mod uri;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use cached::{total_bytes_transferred, Cached, DEFAULT_CDN_BASE};
pub use channel::Channel;
pub use error::TextureError;
pub use handler::{ImageCacheNotifier, NoopNotifier, TextureHandler};
pub use local::Local;
pub use uri::{HttpUriHandler, UriHandler};

/// Texture handler variant selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Disk cache populated from bundled files or the CDN (default).
    #[default]
    Cached,

    /// Resolve against the channel's bundled resources only.
    Local,
}

/// Configuration for texture handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureConfig {
    /// Which handler variant to create.
    #[serde(default)]
    pub kind: HandlerKind,

    /// Directory under which the `textures` cache tree is created.
    #[serde(default = "default_cache_root")]
    pub cache_root: PathBuf,

    /// CDN base URL; `None` selects the default public CDN.
    #[serde(default)]
    pub cdn_base: Option<String>,
}

fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("texture-cache")
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            kind: HandlerKind::default(),
            cache_root: default_cache_root(),
            cdn_base: None,
        }
    }
}

/// Create the configured texture handler with stock collaborators.
///
/// The [`Cached`] variant gets a blocking HTTP [`UriHandler`] and a no-op
/// image-cache notifier; hosts that need their own transport or platform
/// invalidation construct [`Cached::new`] directly.
pub fn create_handler(config: &TextureConfig) -> Result<Box<dyn TextureHandler>, TextureError> {
    match config.kind {
        HandlerKind::Cached => Ok(Box::new(Cached::new(
            &config.cache_root,
            config.cdn_base.clone(),
            Box::new(HttpUriHandler::new()),
            Box::new(NoopNotifier),
        )?)),
        HandlerKind::Local => Ok(Box::new(Local::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_selects_cached() {
        let config = TextureConfig::default();
        assert_eq!(config.kind, HandlerKind::Cached);
        assert!(config.cdn_base.is_none());
    }

    #[test]
    fn test_create_handler_cached() {
        let dir = tempfile::tempdir().unwrap();
        let config = TextureConfig {
            kind: HandlerKind::Cached,
            cache_root: dir.path().to_path_buf(),
            cdn_base: Some("http://cdn.example.com".to_string()),
        };

        create_handler(&config).unwrap();
        assert!(dir.path().join("textures").is_dir());
    }

    #[test]
    fn test_create_handler_local_touches_no_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let config = TextureConfig {
            kind: HandlerKind::Local,
            cache_root: dir.path().join("never-created"),
            cdn_base: None,
        };

        create_handler(&config).unwrap();
        assert!(!dir.path().join("never-created").exists());
    }
}
