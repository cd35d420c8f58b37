//! Pagination module
//!
//! Supports: server-supplied continuation links (`links.next`)
//!
//! # Overview
//!
//! The cursor is opaque. Instead of counting pages or offsets, the next
//! request replays the query string of the link the server handed back.

mod types;

pub use types::{cursor_params, NextPage, Page, PaginationState};
