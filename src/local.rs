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

//! Passthrough texture handling against bundled channel resources.

use std::path::Path;

use log::trace;

use crate::channel::Channel;
use crate::error::TextureError;
use crate::handler::TextureHandler;

/// Texture handler that serves artwork straight from the channel's bundled
/// resources. No cache directory, no network, no purge bookkeeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct Local;

impl Local {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextureHandler for Local {
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

        Ok(channel.path.join(filename).display().to_string())
    }

    fn purge(&self, channel: &Channel) -> Result<(), TextureError> {
        trace!("Nothing to purge for bundled textures of '{}'", channel.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn channel() -> Channel {
        Channel::new(
            "channel.nick.nickelodeon".to_string(),
            PathBuf::from("/addons/channel.nick/nickelodeon"),
        )
    }

    #[test]
    fn test_passthrough_inputs_unchanged() {
        let handler = Local::new();
        for name in ["", "http://example.com/a.png", "https://example.com/a.png", "/abs/a.png"] {
            assert_eq!(handler.resolve(&channel(), name).unwrap(), name);
        }
    }

    #[test]
    fn test_relative_name_resolves_into_channel_root() {
        let handler = Local::new();
        assert_eq!(
            handler.resolve(&channel(), "icon.png").unwrap(),
            "/addons/channel.nick/nickelodeon/icon.png"
        );
    }

    #[test]
    fn test_purge_is_noop() {
        assert!(Local::new().purge(&channel()).is_ok());
    }
}
