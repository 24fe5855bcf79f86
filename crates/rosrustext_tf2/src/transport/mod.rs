//! Action transport seam.
//!
//! The client never talks to ROS directly: a transport provides these traits
//! for the `tf2_msgs/LookupTransform` action. Handshake, (de)serialization
//! and connection management belong to the implementation.

use rosrustext_tf2_core::action::{LookupTransformGoal, LookupTransformResult};
use rosrustext_tf2_core::error::Result;
use rosrustext_tf2_core::tf::BoxFuture;

pub mod loopback;

/// Something that can open action clients (a node handle, a bridge connection).
pub trait ActionNode: Send + Sync {
    type Client: LookupTransformClient;

    fn create_client<'a>(&'a self, action_name: &'a str) -> BoxFuture<'a, Result<Self::Client>>;
}

/// One action client bound to one action name.
pub trait LookupTransformClient: Send + Sync + 'static {
    type GoalHandle: GoalHandle;

    /// Submit a goal; resolves once the goal is on its way, not when it finishes.
    fn send_goal(&self, goal: LookupTransformGoal) -> BoxFuture<'_, Result<Self::GoalHandle>>;

    /// Suspend until the action server is reachable.
    fn wait_for_server(&self) -> BoxFuture<'_, Result<()>>;

    /// Release the channel. Goals sent afterwards must fail.
    fn close(&self) -> BoxFuture<'_, Result<()>>;
}

/// Handle to a goal in flight.
pub trait GoalHandle: Send + 'static {
    fn wait_for_result(self) -> BoxFuture<'static, Result<LookupTransformResult>>;
}
