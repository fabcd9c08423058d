//! Error handling for WAD codec operations
//!
//! This module re-exports the error types defined alongside the common
//! codec types. It uses thiserror for ergonomic error handling.

pub use crate::common::Result;
pub use crate::common::WadError;
