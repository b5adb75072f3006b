//! # Trellis Shared
//!
//! Math types used by both the GUI core and renderer backends.
//!
//! ## Rule
//!
//! This crate must never depend on a GPU, windowing or font crate. Backends
//! translate these types into whatever their drawing API needs.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Mat4, Vec2, Vec3};
