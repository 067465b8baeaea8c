//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the light engine:
//! - Math types and fixed-point conversions
//! - Per-frame memory arenas
//! - Handle-keyed descriptor storage
//! - Logging utilities

pub mod math;
pub mod memory;
pub mod collections;
pub mod logging;
