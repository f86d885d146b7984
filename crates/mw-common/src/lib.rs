//! MPX Watch common types and errors.
//!
//! This crate provides the foundational types shared across mw-core modules:
//! the fatal error taxonomy and the crate-wide `Result` alias.

pub mod error;

pub use error::{Error, Result};
