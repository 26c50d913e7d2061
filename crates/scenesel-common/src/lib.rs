//! Common utilities for the scenesel crates.
//!
//! This crate provides shared infrastructure used by all scenesel components:
//! - **Warning System** - deduplicated warnings for unsupported syntax and data

pub mod warning;
