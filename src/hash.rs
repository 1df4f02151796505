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

//! Streamed file hashing for manifest verification.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Block size for streamed hashing; bounds memory for large artwork files.
const HASH_BLOCK_SIZE: usize = 65536;

/// Compute the lowercase hex MD5 digest of a file's contents.
///
/// The file is read in fixed-size blocks, so the digest of a large file is
/// computed without loading it fully into memory.
pub fn file_digest(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut block = vec![0u8; HASH_BLOCK_SIZE];

    loop {
        let read = file.read(&mut block)?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.png");
        fs::write(&path, b"hello world").unwrap();

        assert_eq!(
            file_digest(&path).unwrap(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }

    #[test]
    fn test_streamed_digest_matches_whole_buffer() {
        // Larger than HASH_BLOCK_SIZE so the loop runs more than once.
        let payload: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.jpg");
        fs::write(&path, &payload).unwrap();

        let whole = format!("{:x}", Md5::digest(&payload));
        assert_eq!(file_digest(&path).unwrap(), whole);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        fs::write(&path, b"").unwrap();

        assert_eq!(
            file_digest(&path).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_digest(&dir.path().join("nope.png")).is_err());
    }
}
