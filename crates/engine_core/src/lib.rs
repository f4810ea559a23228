//! Core engine types and utilities for the hike progress scene.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Scalar interpolation and easing helpers
//! - The internal RGB color representation
//! - Frame timing

pub mod color;
pub mod math;
pub mod time;

pub use color::*;
pub use math::*;
pub use time::*;

// Re-export commonly used types
pub use glam::DVec2;
