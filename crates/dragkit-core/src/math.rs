//! Math types re-exported from [`glam`].
//!
//! The engine works in a single 2D screen-space coordinate system; [`Vec2`]
//! is the point, offset, and delta type everywhere.
//!
//! # Examples
//!
//! ```
//! use dragkit_core::math::Vec2;
//!
//! let origin = Vec2::new(10.0, 20.0);
//! let pointer = Vec2::new(13.0, 24.0);
//! assert_eq!((pointer - origin).length(), 5.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;
