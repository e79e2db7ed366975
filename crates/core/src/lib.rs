#![deny(unsafe_code)]
//! Core types for the dot-field generator.
//!
//! Provides [`DotField`] (random dot placement and per-frame translation or
//! rotation), the [`Motion`] modes and their [`MotionParams`], the
//! [`UniformSource`] capability with its [`Xorshift64`] implementation,
//! [`Seed`] for reproducible runs, [`Srgb`], and parameter helpers.

pub mod color;
pub mod dot_field;
pub mod error;
pub mod motion;
pub mod params;
pub mod prng;
pub mod seed;

pub use color::Srgb;
pub use dot_field::{dot_count, DotField};
pub use error::FieldError;
pub use glam::DVec2;
pub use motion::{Motion, MotionParams};
pub use prng::{UniformSource, Xorshift64};
pub use seed::Seed;
