// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! Editor graph types
//!
//! The block/edge graph submitted by the visual editor, its structural
//! validation, and a queryable view for rendering.

mod definition;
mod validation;
mod view;

pub use definition::*;
pub use validation::{GraphValidator, ValidationResult};
pub use view::GraphView;
