//! In-process action transport over tokio channels.
//!
//! A [`LoopbackNode`] plays the role of a node handle: it hands out
//! [`LoopbackClient`]s, and `advertise()` registers an action server whose
//! goals arrive on a [`GoalQueue`]. Useful for embedding a resolver in the
//! same process and for exercising the client without ROS.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use rosrustext_tf2_core::action::{LookupTransformGoal, LookupTransformResult};
use rosrustext_tf2_core::error::{CoreError, Domain, ErrorKind, Payload, Result};
use rosrustext_tf2_core::tf::BoxFuture;
use tokio::sync::{mpsc, oneshot, Notify};
use tracing::debug;

use super::{ActionNode, GoalHandle, LookupTransformClient};

#[derive(Default)]
struct Shared {
    servers: Mutex<HashMap<String, mpsc::UnboundedSender<IncomingGoal>>>,
    advertised: Notify,
}

impl Shared {
    fn servers(&self) -> MutexGuard<'_, HashMap<String, mpsc::UnboundedSender<IncomingGoal>>> {
        match self.servers.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        }
    }

    fn server_for(&self, action_name: &str) -> Option<mpsc::UnboundedSender<IncomingGoal>> {
        self.servers()
            .get(action_name)
            .filter(|tx| !tx.is_closed())
            .cloned()
    }
}

/// In-process node handle.
#[derive(Clone, Default)]
pub struct LoopbackNode {
    shared: Arc<Shared>,
}

impl LoopbackNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action server under `action_name`, replacing any previous one.
    pub fn advertise(&self, action_name: &str) -> GoalQueue {
        let (tx, rx) = mpsc::unbounded_channel();
        self.shared.servers().insert(action_name.to_string(), tx);
        self.shared.advertised.notify_waiters();
        debug!(action = action_name, "loopback action server advertised");
        GoalQueue { rx }
    }

    /// Withdraw the server; its queue ends once pending goals are drained.
    pub fn unadvertise(&self, action_name: &str) {
        self.shared.servers().remove(action_name);
    }
}

impl ActionNode for LoopbackNode {
    type Client = LoopbackClient;

    fn create_client<'a>(&'a self, action_name: &'a str) -> BoxFuture<'a, Result<Self::Client>> {
        Box::pin(async move {
            Ok(LoopbackClient {
                shared: Arc::clone(&self.shared),
                action_name: action_name.to_string(),
                closed: AtomicBool::new(false),
            })
        })
    }
}

/// A goal delivered to a loopback action server.
#[derive(Debug)]
pub struct IncomingGoal {
    goal: LookupTransformGoal,
    reply: oneshot::Sender<LookupTransformResult>,
}

impl IncomingGoal {
    pub fn goal(&self) -> &LookupTransformGoal {
        &self.goal
    }

    /// Send the result back. Returns `false` if the client stopped waiting.
    pub fn respond(self, result: LookupTransformResult) -> bool {
        self.reply.send(result).is_ok()
    }
}

/// Server side of an advertised action.
pub struct GoalQueue {
    rx: mpsc::UnboundedReceiver<IncomingGoal>,
}

impl GoalQueue {
    /// Next goal, or `None` once the server was withdrawn and the queue drained.
    pub async fn next(&mut self) -> Option<IncomingGoal> {
        self.rx.recv().await
    }

    /// Answer every goal with `resolve` on a spawned task.
    pub fn serve<F>(mut self, mut resolve: F) -> tokio::task::JoinHandle<()>
    where
        F: FnMut(&LookupTransformGoal) -> LookupTransformResult + Send + 'static,
    {
        tokio::spawn(async move {
            while let Some(incoming) = self.next().await {
                let result = resolve(incoming.goal());
                if !incoming.respond(result) {
                    debug!("lookup result dropped: client no longer waiting");
                }
            }
        })
    }
}

/// Loopback action client.
pub struct LoopbackClient {
    shared: Arc<Shared>,
    action_name: String,
    closed: AtomicBool,
}

impl LoopbackClient {
    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CoreError::error()
                .domain(Domain::Action)
                .kind(ErrorKind::InvalidState)
                .msg("action client is closed")
                .payload(Payload::Action {
                    name: self.action_name.clone().into(),
                })
                .build());
        }
        Ok(())
    }

    fn no_server(&self) -> CoreError {
        CoreError::error()
            .domain(Domain::Transport)
            .kind(ErrorKind::Transport)
            .msgf(format_args!("no action server for {}", self.action_name))
            .payload(Payload::Action {
                name: self.action_name.clone().into(),
            })
            .build()
    }
}

impl LookupTransformClient for LoopbackClient {
    type GoalHandle = LoopbackGoalHandle;

    fn send_goal(&self, goal: LookupTransformGoal) -> BoxFuture<'_, Result<Self::GoalHandle>> {
        Box::pin(async move {
            self.ensure_open()?;
            let server = self
                .shared
                .server_for(&self.action_name)
                .ok_or_else(|| self.no_server())?;

            let (reply, rx) = oneshot::channel();
            server
                .send(IncomingGoal { goal, reply })
                .map_err(|_| self.no_server())?;
            Ok(LoopbackGoalHandle { rx })
        })
    }

    fn wait_for_server(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            loop {
                // Register before checking so an advertise() in between is not missed.
                let advertised = self.shared.advertised.notified();
                self.ensure_open()?;
                if self.shared.server_for(&self.action_name).is_some() {
                    return Ok(());
                }
                advertised.await;
            }
        })
    }

    fn close(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.closed.store(true, Ordering::Release);
            Ok(())
        })
    }
}

pub struct LoopbackGoalHandle {
    rx: oneshot::Receiver<LookupTransformResult>,
}

impl GoalHandle for LoopbackGoalHandle {
    fn wait_for_result(self) -> BoxFuture<'static, Result<LookupTransformResult>> {
        Box::pin(async move {
            self.rx
                .await
                .map_err(|_| CoreError::transport("goal dropped by action server without a result"))
        })
    }
}
