//! Geometry message types (shape of `std_msgs` / `geometry_msgs`).
//!
//! Transport layers map real ROS messages into these.

use std::any::Any;

use serde::{Deserialize, Serialize};

use super::time::Time;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

impl Header {
    pub fn new(frame_id: impl Into<String>, stamp: Time) -> Self {
        Self {
            stamp,
            frame_id: frame_id.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Rotation quaternion. `Default` is the identity, unlike an all-zero message.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vector3::new(0.0, 0.0, 0.0),
        rotation: Quaternion::IDENTITY,
    };
}

/// Transform from `child_frame_id` into `header.frame_id`, valid at `header.stamp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformStamped {
    pub header: Header,
    pub child_frame_id: String,
    pub transform: Transform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointStamped {
    pub header: Header,
    pub point: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3Stamped {
    pub header: Header,
    pub vector: Vector3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

/// A value expressed in a named frame at a point in time.
///
/// Implement this for any payload that should go through
/// [`BufferInterface::transform`](super::BufferInterface::transform), then
/// register an apply-function for it.
pub trait Stamped: Any + Send + Sync {
    fn header(&self) -> &Header;

    fn frame_id(&self) -> &str {
        &self.header().frame_id
    }

    fn stamp(&self) -> Time {
        self.header().stamp
    }
}

impl Stamped for PointStamped {
    fn header(&self) -> &Header {
        &self.header
    }
}

impl Stamped for Vector3Stamped {
    fn header(&self) -> &Header {
        &self.header
    }
}

impl Stamped for PoseStamped {
    fn header(&self) -> &Header {
        &self.header
    }
}

/// Transforming a `TransformStamped` re-parents it; `child_frame_id` is kept.
impl Stamped for TransformStamped {
    fn header(&self) -> &Header {
        &self.header
    }
}
