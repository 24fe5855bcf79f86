//! `tf2_msgs/LookupTransform` action DTOs.
//!
//! Field names match the ROS action definition so a transport layer can map
//! real messages 1:1 (serde or by hand).

use serde::{Deserialize, Serialize};

use crate::tf::{tf2_error_codes, Duration, Time, TransformException, TransformStamped};

/// Goal sent to the buffer server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTransformGoal {
    pub target_frame: String,
    pub source_frame: String,
    pub source_time: Time,
    pub timeout: Duration,

    // Only meaningful when `advanced` is set.
    pub target_time: Time,
    pub fixed_frame: String,

    pub advanced: bool,
}

impl LookupTransformGoal {
    /// Basic lookup (`advanced = false`).
    pub fn basic(
        target_frame: impl Into<String>,
        source_frame: impl Into<String>,
        source_time: Time,
        timeout: Duration,
    ) -> Self {
        Self {
            target_frame: target_frame.into(),
            source_frame: source_frame.into(),
            source_time,
            timeout,
            ..Default::default()
        }
    }

    /// Time-travelling lookup through `fixed_frame` (`advanced = true`).
    pub fn advanced(
        target_frame: impl Into<String>,
        target_time: Time,
        source_frame: impl Into<String>,
        source_time: Time,
        fixed_frame: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            target_frame: target_frame.into(),
            source_frame: source_frame.into(),
            source_time,
            timeout,
            target_time,
            fixed_frame: fixed_frame.into(),
            advanced: true,
        }
    }

    /// Check the goal before it goes on the wire.
    ///
    /// Frames must be non-empty (`fixed_frame` only when advanced) and the
    /// timeout must not be negative.
    pub fn validate(&self) -> Result<(), TransformException> {
        if self.target_frame.is_empty() {
            return Err(TransformException::InvalidArgument(
                "target_frame must not be empty".into(),
            ));
        }
        if self.source_frame.is_empty() {
            return Err(TransformException::InvalidArgument(
                "source_frame must not be empty".into(),
            ));
        }
        if self.advanced && self.fixed_frame.is_empty() {
            return Err(TransformException::InvalidArgument(
                "fixed_frame must not be empty".into(),
            ));
        }
        if self.timeout.is_negative() {
            return Err(TransformException::InvalidArgument(format!(
                "timeout must not be negative (got {}s)",
                self.timeout.sec
            )));
        }
        Ok(())
    }
}

/// Shape of `tf2_msgs/msg/TF2Error`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tf2Error {
    pub error: u8,
    pub error_string: String,
}

impl Tf2Error {
    pub fn ok() -> Self {
        Self::default()
    }
}

impl From<&TransformException> for Tf2Error {
    fn from(e: &TransformException) -> Self {
        Self {
            error: e.code(),
            error_string: e.message().to_string(),
        }
    }
}

/// Result returned by the buffer server.
///
/// `transform` is only meaningful when `error.error == NO_ERROR`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTransformResult {
    pub transform: TransformStamped,
    pub error: Tf2Error,
}

impl LookupTransformResult {
    pub fn success(transform: TransformStamped) -> Self {
        Self {
            transform,
            error: Tf2Error::ok(),
        }
    }

    pub fn failure(error: &TransformException) -> Self {
        Self {
            transform: TransformStamped::default(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.error == tf2_error_codes::NO_ERROR
    }

    /// Decode into exactly one of transform / exception.
    pub fn into_transform(self) -> Result<TransformStamped, TransformException> {
        TransformException::check(self.error.error, &self.error.error_string)?;
        Ok(self.transform)
    }
}
