//! The poll loop: publishes a snapshot every interval and serializes command
//! handling with it on a single task.

use crate::action::ActionEvent;
use crate::command::CommandHandler;
use crate::config::{Config, TickErrorPolicy};
use crate::dom::Document;
use crate::error::{CoreError, Result};
use crate::locator::Locator;
use crate::port::{ActionRegistry, PlayerStateSink};
use crate::sync::Synchronizer;
use crate::time::DurationExt;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const LOG_TARGET_POLLER: &str = "tunerlink::poller";

/// Consecutive failed ticks before the failure is escalated to `error!`.
const ERROR_STREAK_THRESHOLD: u32 = 5;

/// Timed deferral between ticks.
#[async_trait(?Send)]
pub trait Scheduler {
    async fn sleep(&self, period: Duration);
}

/// [`Scheduler`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait(?Send)]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}

/// Host-side handle to a running [`PagePoller`].
#[derive(Debug, Clone)]
pub struct PollerHandle {
    commands: mpsc::UnboundedSender<ActionEvent>,
    ready: Arc<watch::Sender<bool>>,
    cancel_token: CancellationToken,
}

impl PollerHandle {
    /// Forward a command activation to the poll loop.
    ///
    /// Activations sent before the page is ready are discarded, since the
    /// host registry only delivers them once the loop has subscribed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CommandChannelClosed`] if the loop has exited.
    pub fn activate(&self, event: ActionEvent) -> Result<()> {
        self.commands
            .send(event)
            .map_err(|_| CoreError::CommandChannelClosed)
    }

    /// Signal that the page finished loading (`DOMContentLoaded`).
    pub fn mark_ready(&self) {
        self.ready.send_replace(true);
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Stop the poll loop
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }
}

/// Drives the [`Synchronizer`] on a fixed cadence and dispatches commands
/// through the [`CommandHandler`] between ticks.
pub struct PagePoller<D, S, R, T = TokioScheduler> {
    synchronizer: Synchronizer<D, S, R>,
    handler: CommandHandler<D>,
    scheduler: T,
    poll_interval: Duration,
    on_tick_error: TickErrorPolicy,
    commands: mpsc::UnboundedReceiver<ActionEvent>,
    command_tx: mpsc::UnboundedSender<ActionEvent>,
    ready: watch::Receiver<bool>,
    cancel_token: CancellationToken,
}

impl<D, S, R, T> PagePoller<D, S, R, T>
where
    D: Document + Clone,
    S: PlayerStateSink,
    R: ActionRegistry,
    T: Scheduler,
{
    /// Create a poller and the handle the host uses to drive it.
    #[must_use]
    pub fn new(
        document: D,
        sink: S,
        registry: R,
        scheduler: T,
        config: &Config,
    ) -> (Self, PollerHandle) {
        let locator = Locator::new(config.page.variant);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = watch::channel(false);
        let cancel_token = CancellationToken::new();

        let poller = Self {
            synchronizer: Synchronizer::new(document.clone(), sink, registry, locator),
            handler: CommandHandler::new(document, locator, config.page.volume_click_y),
            scheduler,
            poll_interval: config.polling.interval(),
            on_tick_error: config.polling.on_tick_error,
            commands: command_rx,
            command_tx: command_tx.clone(),
            ready: ready_rx,
            cancel_token: cancel_token.clone(),
        };
        let handle = PollerHandle {
            commands: command_tx,
            ready: Arc::new(ready_tx),
            cancel_token,
        };
        (poller, handle)
    }

    /// Run until stopped.
    ///
    /// Declares the extra actions, waits for the page to become ready,
    /// subscribes to the registry's activations, then alternates ticks and
    /// sleeps. Commands are handled as they arrive,
    /// without resetting the tick timer.
    ///
    /// # Errors
    ///
    /// Returns an error if startup host calls fail, if the readiness signal
    /// is dropped before the page is ready, or if a tick fails under
    /// [`TickErrorPolicy::Stop`].
    pub async fn run(mut self) -> Result<()> {
        info!(
            target: LOG_TARGET_POLLER,
            "Starting page poller (interval {}ms)",
            self.poll_interval.as_millis_u64()
        );
        self.synchronizer.declare_extra_actions()?;

        if !self.wait_until_ready().await? {
            info!(target: LOG_TARGET_POLLER, "Poller stopped before the page was ready");
            return Ok(());
        }
        self.discard_pending_commands();
        let command_tx = self.command_tx.clone();
        self.synchronizer.subscribe_actions(Box::new(move |event: ActionEvent| {
            if command_tx.send(event).is_err() {
                debug!(target: LOG_TARGET_POLLER, "Activation after poller exit dropped");
            }
        }))?;
        self.synchronizer.register_extra_actions()?;

        let mut consecutive_errors: u32 = 0;
        loop {
            match self.synchronizer.tick() {
                Ok(_) => consecutive_errors = 0,
                Err(e) => {
                    consecutive_errors = consecutive_errors.saturating_add(1);
                    if self.on_tick_error == TickErrorPolicy::Stop {
                        error!(target: LOG_TARGET_POLLER, "Tick failed, stopping: {}", e);
                        return Err(e);
                    }
                    warn!(target: LOG_TARGET_POLLER, "Tick error (attempt {}): {}", consecutive_errors, e);
                    if consecutive_errors == ERROR_STREAK_THRESHOLD {
                        error!(
                            target: LOG_TARGET_POLLER,
                            "{} consecutive ticks failed; host state is stale", consecutive_errors
                        );
                    }
                }
            }

            let sleep = self.scheduler.sleep(self.poll_interval);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    () = self.cancel_token.cancelled() => {
                        info!(target: LOG_TARGET_POLLER, "Poller shutting down gracefully");
                        return Ok(());
                    }
                    Some(event) = self.commands.recv() => dispatch(&self.handler, &event),
                    () = &mut sleep => break,
                }
            }
        }
    }

    fn discard_pending_commands(&mut self) {
        let mut discarded = 0_usize;
        while self.commands.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(
                target: LOG_TARGET_POLLER,
                "Discarded {} activations received before the page was ready", discarded
            );
        }
    }

    /// Returns `false` if cancelled first.
    async fn wait_until_ready(&mut self) -> Result<bool> {
        let ready_state = self.synchronizer.document().ready_state();
        if ready_state.is_ready() {
            return Ok(true);
        }
        info!(target: LOG_TARGET_POLLER, "Page is {:?}, waiting for it to load", ready_state);
        tokio::select! {
            () = self.cancel_token.cancelled() => Ok(false),
            ready = self.ready.wait_for(|ready| *ready) => {
                ready.map_err(|_| CoreError::PageNeverReady)?;
                info!(target: LOG_TARGET_POLLER, "Page ready");
                Ok(true)
            }
        }
    }
}

fn dispatch<D: Document>(handler: &CommandHandler<D>, event: &ActionEvent) {
    match handler.handle(event) {
        Ok(outcome) => {
            debug!(target: LOG_TARGET_POLLER, "Command {:?} -> {:?}", event.name, outcome);
        }
        Err(e) => warn!(target: LOG_TARGET_POLLER, "Command {:?} failed: {}", event.name, e),
    }
}
