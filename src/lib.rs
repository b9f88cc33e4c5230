// SPDX-License-Identifier: MPL-2.0

//! Client core for the Thinkify idea-sharing service.
//!
//! Comment drafting with `@`-mention suggestions, rendering of stored
//! mentions, and local reconciliation of post reactions, on top of a small
//! HTTP client for the Thinkify server.

pub mod api;
pub mod compose;
pub mod config;
pub mod state;
pub mod view;
