//! rosrustext_tf2
//!
//! tf2 buffer client backed by the `tf2_msgs/LookupTransform` action.
//! Lookups are answered by a remote buffer server; this crate only builds
//! goals, waits for results and decodes them, while core semantics
//! (buffer contract, registry, error taxonomy) stay in `rosrustext_tf2_core`.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{
    create_buffer_action_client, create_buffer_action_client_with_config, BufferActionClient,
};
pub use config::BufferClientConfig;

// Re-export core types that client users will commonly need
pub use rosrustext_tf2_core::error::{CoreError, Result};
pub use rosrustext_tf2_core::tf::{
    BufferError, BufferInterface, BufferResult, Duration, Stamped, Time, TransformException,
    TransformRegistration, TransformStamped,
};
