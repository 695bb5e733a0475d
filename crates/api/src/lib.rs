//! `attendly-api` — HTTP surface for the attendance-token core.
//!
//! The request layer owns routing, bearer extraction, and error mapping; all
//! protocol decisions live in `attendly-auth` and `attendly-attendance`.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
