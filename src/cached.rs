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

//! Disk-backed texture cache populated from the channel CDN.
//!
//! This is the workhorse [`TextureHandler`]: channel-relative artwork
//! filenames resolve to files under `<cacheRoot>/textures/<subfolder>/`,
//! populated on first use from the channel's bundled copy or from the CDN.
//!
//! Key responsibilities:
//! - Resolve filenames to cached paths, fetching on a miss
//! - Copy bundled defaults into the cache without touching the network
//! - Purge stale or retired entries against the channel manifest
//! - Re-fetch purged entries that were already served this session
//!
//! Everything here is synchronous, blocking, and single-threaded by
//! contract: a purge racing a resolve for the same file is not guarded
//! against.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{debug, error, info, trace, warn};

use crate::channel::Channel;
use crate::error::TextureError;
use crate::handler::{ImageCacheNotifier, TextureHandler};
use crate::hash;
use crate::manifest;
use crate::uri::UriHandler;

/// CDN base used when the host does not configure one.
pub const DEFAULT_CDN_BASE: &str = "http://www.rieter.net/net.rieter.xot.cdn/";

/// Cumulative texture bytes fetched over the network by this process.
static BYTES_TRANSFERRED: AtomicU64 = AtomicU64::new(0);

/// Total texture bytes fetched from the CDN by this process.
///
/// Diagnostic only; the counter never resets and has no behavioral effect.
#[must_use]
pub fn total_bytes_transferred() -> u64 {
    BYTES_TRANSFERRED.load(Ordering::Relaxed)
}

/// Texture handler backed by an on-disk cache and a remote CDN.
pub struct Cached {
    /// Root of the cache tree (`<cacheRoot>/textures`).
    texture_root: PathBuf,

    /// Base URL for remote texture fetches.
    cdn_base: String,

    /// Injected network access; retries and timeouts are its concern.
    uri_handler: Box<dyn UriHandler>,

    /// Platform image-cache invalidation, notified after a changing purge.
    notifier: Box<dyn ImageCacheNotifier>,

    /// Cache paths served during this session. A purge that evicts one of
    /// these re-fetches it immediately, since a consumer may still hold the
    /// path. Append-only for the life of the instance.
    retrieved: Mutex<HashSet<PathBuf>>,
}

impl std::fmt::Debug for Cached {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cached")
            .field("texture_root", &self.texture_root)
            .field("cdn_base", &self.cdn_base)
            .finish_non_exhaustive()
    }
}

impl Cached {
    /// Create a cache rooted at `<cache_root>/textures`, creating that
    /// directory if needed. A `cdn_base` of `None` selects
    /// [`DEFAULT_CDN_BASE`].
    pub fn new(
        cache_root: &Path,
        cdn_base: Option<String>,
        uri_handler: Box<dyn UriHandler>,
        notifier: Box<dyn ImageCacheNotifier>,
    ) -> Result<Self, TextureError> {
        let texture_root = cache_root.join("textures");
        if !texture_root.is_dir() {
            fs::create_dir_all(&texture_root)?;
        }

        Ok(Self {
            texture_root,
            cdn_base: cdn_base.unwrap_or_else(|| DEFAULT_CDN_BASE.to_string()),
            uri_handler,
            notifier,
            retrieved: Mutex::new(HashSet::new()),
        })
    }

    /// Root of the cache tree, `<cacheRoot>/textures`.
    #[must_use]
    pub fn texture_root(&self) -> &Path {
        &self.texture_root
    }

    fn cdn_uri(&self, subfolder: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.cdn_base.trim_end_matches('/'),
            subfolder,
            filename
        )
    }

    fn record_retrieved(&self, path: &Path) {
        if let Ok(mut retrieved) = self.retrieved.lock() {
            retrieved.insert(path.to_path_buf());
        }
    }

    fn was_retrieved(&self, path: &Path) -> bool {
        self.retrieved
            .lock()
            .map(|retrieved| retrieved.contains(path))
            .unwrap_or(false)
    }

    /// Fetch `uri` into `target` as a single whole-file write.
    ///
    /// An empty or absent payload is logged and swallowed, leaving `target`
    /// missing so that a later resolve retries the fetch. Filesystem write
    /// failures propagate.
    fn fetch_texture(&self, uri: &str, target: &Path) -> Result<(), TextureError> {
        match self.uri_handler.open(uri) {
            Some(bytes) if !bytes.is_empty() => {
                fs::write(target, &bytes)?;
                BYTES_TRANSFERRED.fetch_add(bytes.len() as u64, Ordering::Relaxed);
                debug!("Retrieved texture: {}", uri);
                Ok(())
            }
            _ => {
                error!(
                    "Could not update texture. Source: '{}' Target: '{}'",
                    uri,
                    target.display()
                );
                Ok(())
            }
        }
    }
}

impl TextureHandler for Cached {
    fn resolve(&self, channel: &Channel, filename: &str) -> Result<String, TextureError> {
        if filename.is_empty() {
            return Ok(filename.to_string());
        }

        if filename.starts_with("http://") || filename.starts_with("https://") {
            trace!("Not going to resolve remote texture: '{}'", filename);
            return Ok(filename.to_string());
        }

        if Path::new(filename).is_absolute() {
            trace!("Already resolved texture found: '{}'", filename);
            return Ok(filename.to_string());
        }

        let subfolder = channel.cdn_folder();
        let texture_dir = self.texture_root.join(subfolder);
        if !texture_dir.is_dir() {
            fs::create_dir_all(&texture_dir)?;
        }

        let target = texture_dir.join(filename);
        if !target.is_file() {
            // Missing item, fetch it: bundled copy first, CDN otherwise.
            let bundled = channel.path.join(filename);
            if bundled.is_file() {
                debug!(
                    "Fetching texture '{}' from '{}'",
                    filename,
                    bundled.display()
                );
                fs::copy(&bundled, &target)?;
            } else {
                let uri = self.cdn_uri(subfolder, filename);
                debug!("Fetching texture '{}' from '{}'", filename, uri);
                self.fetch_texture(&uri, &target)?;
            }
        }

        trace!(
            "Returning cached texture for '{}' from '{}'",
            filename,
            target.display()
        );
        self.record_retrieved(&target);
        Ok(target.display().to_string())
    }

    fn purge(&self, channel: &Channel) -> Result<(), TextureError> {
        info!("Purging textures for: {}", channel.path.display());

        // The manifest is authoritative; a channel that asks for a purge
        // must have one.
        let expected = manifest::load(&channel.manifest_path())?;

        let subfolder = channel.cdn_folder();
        let texture_dir = self.texture_root.join(subfolder);
        if !texture_dir.is_dir() {
            warn!("Missing path '{}' to purge", texture_dir.display());
            return Ok(());
        }

        // Snapshot the listing up front; a re-fetch below repopulates files
        // in the directory being walked.
        let mut images = Vec::new();
        for entry in fs::read_dir(&texture_dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                if has_texture_extension(&name) {
                    images.push(name);
                }
            }
        }

        let mut changed = false;
        for file_name in images {
            let file_path = texture_dir.join(&file_name);
            let key = format!("{}/{}", subfolder, file_name);
            if let Some(expected_digest) = expected.get(&key) {
                // Declared: verify the content hash.
                let digest = hash::file_digest(&file_path)?;
                if digest == *expected_digest {
                    trace!("Texture up to date: {}", file_path.display());
                } else {
                    warn!("Texture expired: {}", file_path.display());
                    fs::remove_file(&file_path)?;
                    changed = true;

                    // Refetch right away if it was served this session.
                    if self.was_retrieved(&file_path) {
                        self.resolve(channel, &file_name)?;
                    }
                }
            } else {
                warn!("Texture no longer required: {}", file_path.display());
                fs::remove_file(&file_path)?;
                changed = true;
            }
        }

        if changed {
            self.notifier.invalidate(subfolder);
        }

        Ok(())
    }
}

/// Case-insensitive match on the texture extensions the CDN serves.
fn has_texture_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".png") || lower.ends_with(".jpg")
}
