// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Utility modules
//!
//! Terminal styling and content fingerprinting for the CLI.

pub mod colors;
pub mod fingerprint;

pub use colors::*;
pub use fingerprint::*;
