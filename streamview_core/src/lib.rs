// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-command model for the streamview widget.
//!
//! Rendering in streamview is a pure function from data to a list of [`Mark`]s. A host surface
//! executes a render by clearing its [`Scene`] and drawing the new marks; there is no incremental
//! diffing.
//!
//! - [`Mark`] is a single draw command (rectangle, path or text) with a stable [`MarkId`] and a
//!   `z_index` used for paint order.
//! - [`Scene`] is the mark list of one surface.

#![no_std]

extern crate alloc;

mod mark;
mod scene;

pub use mark::{
    Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::Scene;
