//! Common utilities for the Trellis widget core.
//!
//! This crate provides shared infrastructure used by every Trellis crate:
//! - **Warning System** - deduplicated diagnostics for unsupported style input

pub mod warning;
