// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Shelf.
//!
//! Exposes the item store as a JSON REST API:
//!
//! - `GET    {prefix}/items`        list all items
//! - `POST   {prefix}/items`        create an item (201)
//! - `GET    {prefix}/items/{id}`   fetch one item
//! - `PUT    {prefix}/items/{id}`   partially update an item
//! - `DELETE {prefix}/items/{id}`   delete an item (204)
//! - `GET    {prefix}/health`       liveness check
//! - `GET    /`                     welcome message

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayState, ServerConfig, bind, router, serve, start_server};
