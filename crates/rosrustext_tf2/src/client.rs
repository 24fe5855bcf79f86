//! Buffer client backed by the `LookupTransform` action.

use std::sync::Arc;

use rosrustext_tf2_core::action::LookupTransformGoal;
use rosrustext_tf2_core::error::{CoreError, Result};
use rosrustext_tf2_core::tf::{
    probe, BoxFuture, BufferInterface, BufferResult, Duration, Time, TransformRegistration,
    TransformStamped,
};
use tracing::{debug, info, warn};

use crate::config::BufferClientConfig;
use crate::error::log_core_error;
use crate::transport::{ActionNode, GoalHandle, LookupTransformClient};

/// [`BufferInterface`] answered by a remote tf2 buffer server.
///
/// Lifecycle:
/// - `init()` opens the action client on the configured namespace
/// - `wait_for_server()` suspends until the server is reachable
/// - `close()` releases it (idempotent)
///
/// Lookups take `&self` and may run concurrently; `init`/`close` take
/// `&mut self`, so the channel cannot be torn down under an in-flight lookup.
/// Every lookup is exactly one goal/result round trip: no caching, no retry,
/// and the timeout is only forwarded to the server.
pub struct BufferActionClient<C: LookupTransformClient> {
    config: BufferClientConfig,
    client: Option<C>,
    registration: Option<Arc<TransformRegistration>>,
}

impl<C: LookupTransformClient> BufferActionClient<C> {
    /// Unconnected client for `action_namespace`; call `init()` before use.
    pub fn new(action_namespace: impl Into<String>) -> Self {
        Self::with_config(BufferClientConfig::new(action_namespace))
    }

    pub fn with_config(config: BufferClientConfig) -> Self {
        Self {
            config,
            client: None,
            registration: None,
        }
    }

    /// Dispatch `transform*` through `registration` instead of the global registry.
    pub fn with_registration(mut self, registration: Arc<TransformRegistration>) -> Self {
        self.registration = Some(registration);
        self
    }

    pub fn action_namespace(&self) -> &str {
        &self.config.action_namespace
    }

    pub fn config(&self) -> &BufferClientConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Open the action client. A previously opened one is closed first.
    pub async fn init<N>(&mut self, node: &N) -> Result<()>
    where
        N: ActionNode<Client = C>,
    {
        if self.client.is_some() {
            debug!(action = %self.config.action_namespace, "re-initializing buffer action client");
            if let Err(err) = self.close().await {
                log_core_error(err);
            }
        }

        let client = node.create_client(&self.config.action_namespace).await?;
        self.client = Some(client);
        info!(action = %self.config.action_namespace, "buffer action client initialized");
        Ok(())
    }

    pub async fn wait_for_server(&self) -> Result<()> {
        self.connected()?.wait_for_server().await
    }

    /// Release the action client. No-op when not initialized.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.close().await?;
            debug!(action = %self.config.action_namespace, "buffer action client closed");
        }
        Ok(())
    }

    fn connected(&self) -> Result<&C> {
        self.client
            .as_ref()
            .ok_or_else(|| CoreError::client_not_initialized(self.config.action_namespace.clone()))
    }

    async fn call_action(&self, goal: LookupTransformGoal) -> BufferResult<TransformStamped> {
        let client = self.connected()?;
        goal.validate()?;

        debug!(
            target_frame = %goal.target_frame,
            source_frame = %goal.source_frame,
            advanced = goal.advanced,
            "sending lookup goal"
        );
        let handle = client.send_goal(goal).await.inspect_err(|err| {
            warn!(action = %self.config.action_namespace, "send_goal failed: {err}");
        })?;
        let result = handle.wait_for_result().await.inspect_err(|err| {
            warn!(action = %self.config.action_namespace, "waiting for lookup result failed: {err}");
        })?;

        match result.into_transform() {
            Ok(transform) => Ok(transform),
            Err(exception) => {
                debug!(error = %exception, "lookup rejected by buffer server");
                Err(exception.into())
            }
        }
    }
}

impl<C: LookupTransformClient> BufferInterface for BufferActionClient<C> {
    fn lookup_transform<'a>(
        &'a self,
        target_frame: &'a str,
        source_frame: &'a str,
        time: Time,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<TransformStamped>> {
        let goal = LookupTransformGoal::basic(
            target_frame,
            source_frame,
            time,
            timeout.unwrap_or(self.config.default_timeout),
        );
        Box::pin(self.call_action(goal))
    }

    fn lookup_transform_full<'a>(
        &'a self,
        target_frame: &'a str,
        target_time: Time,
        source_frame: &'a str,
        source_time: Time,
        fixed_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<TransformStamped>> {
        let goal = LookupTransformGoal::advanced(
            target_frame,
            target_time,
            source_frame,
            source_time,
            fixed_frame,
            timeout.unwrap_or(self.config.default_timeout),
        );
        Box::pin(self.call_action(goal))
    }

    fn can_transform<'a>(
        &'a self,
        target_frame: &'a str,
        source_frame: &'a str,
        time: Time,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<bool>> {
        Box::pin(async move {
            probe(
                self.lookup_transform(target_frame, source_frame, time, timeout)
                    .await,
            )
        })
    }

    fn can_transform_full<'a>(
        &'a self,
        target_frame: &'a str,
        target_time: Time,
        source_frame: &'a str,
        source_time: Time,
        fixed_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<bool>> {
        Box::pin(async move {
            probe(
                self.lookup_transform_full(
                    target_frame,
                    target_time,
                    source_frame,
                    source_time,
                    fixed_frame,
                    timeout,
                )
                .await,
            )
        })
    }

    fn registration(&self) -> &TransformRegistration {
        match &self.registration {
            Some(registration) => registration.as_ref(),
            None => TransformRegistration::global(),
        }
    }
}

impl<C: LookupTransformClient> Drop for BufferActionClient<C> {
    fn drop(&mut self) {
        if self.client.is_some() {
            warn!(
                action = %self.config.action_namespace,
                "buffer action client dropped without close()"
            );
        }
    }
}

/// Create a client on `action_namespace` and initialize it against `node`.
pub async fn create_buffer_action_client<N>(
    node: &N,
    action_namespace: impl Into<String>,
) -> Result<BufferActionClient<N::Client>>
where
    N: ActionNode,
{
    create_buffer_action_client_with_config(node, BufferClientConfig::new(action_namespace)).await
}

/// Same as [`create_buffer_action_client`] with explicit settings.
pub async fn create_buffer_action_client_with_config<N>(
    node: &N,
    config: BufferClientConfig,
) -> Result<BufferActionClient<N::Client>>
where
    N: ActionNode,
{
    let mut client = BufferActionClient::with_config(config);
    client.init(node).await?;
    Ok(client)
}
