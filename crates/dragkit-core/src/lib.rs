//! Dragkit Core
//!
//! This crate contains the foundation types shared by the dragkit
//! interaction engine: geometry and collision utilities, optimized hash
//! collections, math re-exports, and logging setup.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
