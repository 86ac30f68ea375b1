// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file persistence for Shelf items.
//!
//! The whole collection lives in one human-readable JSON file that is read in
//! full and rewritten in full on every mutation. Mutations are serialized by a
//! per-store lock held across the entire read-modify-write, and every write
//! goes through a temp file plus rename so the file is never observed torn.

pub mod codec;
mod file;
pub mod store;

pub use store::FileStore;
