//! Camera system for the showcase scene.
//!
//! Provides a perspective camera with NDC unprojection for picking, and
//! orbit controls that the reveal overlay can switch off.

/// Orbit controls with an enable switch.
pub mod controller;
/// Core camera struct and projection helpers.
pub mod core;

pub use self::controller::OrbitControls;
pub use self::core::Camera;
