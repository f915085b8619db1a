//! Utility functions and helpers.

pub mod dates;
pub mod documents;
pub mod serde_ext;
