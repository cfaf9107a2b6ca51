// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Pipeline generation
//!
//! Turns an editor graph into a staged CI document: stages from block
//! types, one job per block, and `needs` from edges.

mod converter;
mod definition;

pub use converter::{convert, ConvertOptions, DuplicateIdPolicy, GraphConverter};
pub use definition::*;
