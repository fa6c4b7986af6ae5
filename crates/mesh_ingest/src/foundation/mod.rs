//! Foundation module - Core utilities and types
//!
//! - Math types and the vector helpers used by tangent generation
//! - Logging setup

pub mod math;
pub mod logging;
