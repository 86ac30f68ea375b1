// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the gateway and persistence backends.
//!
//! Traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod storage;

pub use storage::ItemStore;
