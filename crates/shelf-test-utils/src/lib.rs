// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shelf integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - temp-dir backed store plus the full gateway router
//! - [`MockStore`] - in-memory store that can be switched to fail every call

pub mod harness;
pub mod mock_store;

pub use harness::{TestHarness, TestResponse};
pub use mock_store::MockStore;
