//! rosrustext_tf2_core::tf
//!
//! Transport-agnostic tf2 semantics.
//! This module intentionally contains **no** ROS transport code.
//!
//! Key ideas:
//! - Lookups are abstract (`BufferInterface` primitives); a transport implements them
//! - Applying a transform to a payload is type-directed via `TransformRegistration`
//! - Remote failures decode into `TransformException`; everything else is a `CoreError`

mod apply;
mod buffer;
mod exception;
mod msg;
mod registry;
mod time;

pub use apply::{do_transform_point, do_transform_pose, do_transform_transform, do_transform_vector3};
pub use buffer::{probe, BoxFuture, BufferInterface};
pub use exception::{tf2_error_codes, BufferError, BufferResult, TransformException};
pub use msg::{
    Header, Point, PointStamped, Pose, PoseStamped, Quaternion, Stamped, Transform,
    TransformStamped, Vector3, Vector3Stamped,
};
pub use registry::{DoTransform, TransformRegistration};
pub use time::{Duration, Time};
