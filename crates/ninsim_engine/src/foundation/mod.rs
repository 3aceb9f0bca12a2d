//! Foundation module - Core utilities and types
//!
//! - Logging setup
//! - Frame timing

pub mod logging;
pub mod time;
