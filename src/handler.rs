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

//! Texture handling capability.
//!
//! [`TextureHandler`] is the single seam between the scraper side of the
//! add-on and texture storage: resolve a channel-relative artwork filename
//! into a usable path, and reconcile the on-disk cache against the channel's
//! manifest. Variant implementations are selected by configuration (see
//! [`crate::create_handler`]).

use crate::channel::Channel;
use crate::error::TextureError;

/// Capability for resolving and maintaining channel artwork textures.
pub trait TextureHandler {
    /// Resolve `filename` for `channel` into a usable texture reference.
    ///
    /// Empty filenames, `http(s)://` URLs, and absolute paths are returned
    /// unchanged. Anything else resolves to a handler-specific local path.
    ///
    /// Best-effort contract: when a remote fetch fails, the returned path
    /// does not exist on disk (yet); consumers must tolerate a missing image
    /// and a later resolve will retry.
    fn resolve(&self, channel: &Channel, filename: &str) -> Result<String, TextureError>;

    /// Reconcile stored textures for `channel` against its manifest,
    /// removing stale or retired entries.
    fn purge(&self, channel: &Channel) -> Result<(), TextureError>;
}

/// Platform image-cache invalidation collaborator.
///
/// After a purge changes the texture set of a channel, the platform-level
/// image cache keyed by the same subfolder has to be told to drop its
/// entries. The call is fire-and-forget from the cache's perspective.
pub trait ImageCacheNotifier {
    /// Invalidate platform image caches for one channel subfolder.
    fn invalidate(&self, subfolder: &str);
}

/// [`ImageCacheNotifier`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ImageCacheNotifier for NoopNotifier {
    fn invalidate(&self, _subfolder: &str) {}
}
