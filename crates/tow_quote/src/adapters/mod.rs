// Rust guideline compliant 2026-08-02

//! Adapters (secondary ports) for the tow-quote binaries.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate. Adapters are intentionally isolated from quoting logic;
//! snapshot-store adapters are binary-specific and loaded via `#[path]` from
//! their entry points.

pub mod demo_routing;
pub mod identity_shortener;
pub mod log_clipboard;
