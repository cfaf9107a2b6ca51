// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Content fingerprints
//!
//! BLAKE3 hashes used by watch mode to skip regeneration when a save did
//! not change the graph.

use blake3::Hasher;

/// Hex BLAKE3 digest of some bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_hex().to_string()
}
