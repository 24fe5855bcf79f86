//! rosrustext_tf2_core: ROS-agnostic core for tf2 buffer clients.
//!
//! Design goals:
//! - Pure, testable logic (no ROS deps, no transport).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.

pub mod error;

/// Stamps, geometry messages, the buffer contract, registry and error taxonomy.
pub mod tf;

/// `tf2_msgs/LookupTransform` action DTOs (goal/result) without ROS transport.
pub mod action;
