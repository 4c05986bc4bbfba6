//! Session actor implementation with async message handling.

use super::{
    config::SessionConfig,
    messages::{
        SNAPSHOT_HISTORY_LIMIT, SessionError, SessionMessage, SessionResult, SessionSnapshot,
        SourceEvent, SubscriberId,
    },
};
use crate::{
    draw::{DrawStateManagement, PoolManagement, RaffleEvent, RaffleState},
    pool::Participant,
    reel::{DrawId, ReelPlan},
};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

/// Session actor handle for sending messages
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    next_subscriber_id: Arc<AtomicU64>,
    subscriber_capacity: usize,
}

impl SessionHandle {
    fn new(sender: mpsc::Sender<SessionMessage>, subscriber_capacity: usize) -> Self {
        Self {
            sender,
            next_subscriber_id: Arc::new(AtomicU64::new(1)),
            subscriber_capacity,
        }
    }

    /// Send a raw message to the session
    pub async fn send(&self, message: SessionMessage) -> SessionResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> SessionResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Merge registration candidates; returns how many were admitted
    pub async fn merge(&self, candidates: Vec<Participant>) -> SessionResult<usize> {
        self.request(|response| SessionMessage::Merge {
            candidates,
            response,
        })
        .await
    }

    /// Start a draw and get the reel plan to render
    pub async fn start_draw(&self) -> SessionResult<Arc<ReelPlan>> {
        let result = self
            .request(|response| SessionMessage::StartDraw { response })
            .await?;
        Ok(result?)
    }

    /// Report that the reel for `draw_id` stopped
    pub async fn animation_complete(&self, draw_id: DrawId) -> SessionResult<bool> {
        self.request(|response| SessionMessage::AnimationComplete { draw_id, response })
            .await
    }

    /// Commit the revealed winner and return to idle
    pub async fn next_round(&self) -> SessionResult<Arc<Participant>> {
        let result = self
            .request(|response| SessionMessage::NextRound { response })
            .await?;
        Ok(result?)
    }

    /// Reset the available pool; returns the new available count
    pub async fn reset_pool(&self) -> SessionResult<usize> {
        self.request(|response| SessionMessage::ResetPool { response })
            .await
    }

    pub async fn snapshot(&self) -> SessionResult<SessionSnapshot> {
        self.request(|response| SessionMessage::GetSnapshot { response })
            .await
    }

    /// Subscribe to session notifications
    pub async fn subscribe(
        &self,
    ) -> SessionResult<(SubscriberId, mpsc::Receiver<RaffleEvent>)> {
        let subscriber_id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.subscriber_capacity);
        self.send(SessionMessage::Subscribe {
            subscriber_id,
            sender,
        })
        .await?;
        Ok((subscriber_id, receiver))
    }

    pub async fn unsubscribe(&self, subscriber_id: SubscriberId) -> SessionResult<()> {
        self.send(SessionMessage::Unsubscribe { subscriber_id })
            .await
    }

    /// Close the session and wait for the actor to acknowledge
    pub async fn close(&self) -> SessionResult<()> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }

    /// Forward a registration source into this session.
    ///
    /// The task ends when the source hangs up or the session closes.
    pub fn attach_source(&self, mut source: mpsc::Receiver<SourceEvent>) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            while let Some(event) = source.recv().await {
                let result = match event {
                    SourceEvent::Upsert(batch) => handle.merge(batch).await.map(|admitted| {
                        log::debug!("Registration batch admitted {} participant(s)", admitted);
                    }),
                    SourceEvent::Failed(reason) => {
                        handle.send(SessionMessage::SourceFailed { reason }).await
                    }
                    SourceEvent::Restored => handle.send(SessionMessage::SourceRestored).await,
                };

                if result.is_err() {
                    log::debug!("Session closed, detaching registration source");
                    break;
                }
            }
        })
    }
}

/// Session actor owning the raffle engine for one live session
pub struct SessionActor {
    /// Session configuration
    config: SessionConfig,

    /// Raffle engine (FSM)
    state: RaffleState,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Subscribers for notifications
    subscribers: HashMap<SubscriberId, mpsc::Sender<RaffleEvent>>,

    /// Registration source reported a failure
    degraded: bool,

    /// Is session closed
    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    pub fn new(config: SessionConfig) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity);
        let state = RaffleState::from(config.reel.clone());
        let handle = SessionHandle::new(sender, config.subscriber_capacity);

        let actor = Self {
            config,
            state,
            inbox,
            subscribers: HashMap::new(),
            degraded: false,
            is_closed: false,
        };

        (actor, handle)
    }

    /// Create the actor and spawn it on the current runtime
    pub fn spawn(config: SessionConfig) -> (JoinHandle<()>, SessionHandle) {
        let (actor, handle) = Self::new(config);
        (tokio::spawn(actor.run()), handle)
    }

    /// Run the session actor event loop
    pub async fn run(mut self) {
        log::info!("Raffle session '{}' starting", self.config.name);

        while let Some(message) = self.inbox.recv().await {
            let extra = self.handle_message(message);
            self.broadcast(extra);

            if self.is_closed {
                break;
            }
        }

        log::info!(
            "Raffle session '{}' closed after {} draw(s)",
            self.config.name,
            self.state.history().len()
        );
    }

    /// Handle one message; returns session-level events to broadcast
    /// alongside those the engine produced.
    fn handle_message(&mut self, message: SessionMessage) -> Vec<RaffleEvent> {
        let mut extra = Vec::new();

        match message {
            SessionMessage::Merge {
                candidates,
                response,
            } => {
                let admitted = self.state.merge(candidates);
                let _ = response.send(admitted);
            }

            SessionMessage::StartDraw { response } => {
                let result = self.state.start_draw();
                if let Err(e) = &result {
                    log::warn!("Session '{}': draw rejected: {}", self.config.name, e);
                }
                let _ = response.send(result);
            }

            SessionMessage::AnimationComplete { draw_id, response } => {
                let ended = self.state.animation_complete(draw_id);
                let _ = response.send(ended);
            }

            SessionMessage::NextRound { response } => {
                let _ = response.send(self.state.next_round());
            }

            SessionMessage::ResetPool { response } => {
                self.state.reset_pool();
                let _ = response.send(self.state.pool().available_len());
            }

            SessionMessage::GetSnapshot { response } => {
                let _ = response.send(self.snapshot());
            }

            SessionMessage::SourceFailed { reason } => {
                log::warn!(
                    "Session '{}': registration source failed: {}",
                    self.config.name,
                    reason
                );
                self.degraded = true;
                extra.push(RaffleEvent::SourceUnavailable(reason));
            }

            SessionMessage::SourceRestored => {
                if self.degraded {
                    log::info!("Session '{}': registration source restored", self.config.name);
                    self.degraded = false;
                    extra.push(RaffleEvent::SourceRestored);
                }
            }

            SessionMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                self.subscribers.insert(subscriber_id, sender);
                log::debug!("Subscriber {} attached", subscriber_id);
            }

            SessionMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
                log::debug!("Subscriber {} detached", subscriber_id);
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }

        extra
    }

    /// Send pending notifications to all subscribers
    fn broadcast(&mut self, extra: Vec<RaffleEvent>) {
        let mut events: VecDeque<RaffleEvent> = self.state.drain_events();
        events.extend(extra);
        if events.is_empty() {
            return;
        }

        for event in &events {
            log::debug!("Session '{}': {}", self.config.name, event);
        }

        self.subscribers.retain(|subscriber_id, sender| {
            for event in &events {
                match sender.try_send(event.clone()) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        log::warn!(
                            "Subscriber {} channel full, dropping notification",
                            subscriber_id
                        );
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        log::debug!("Subscriber {} disconnected, removing", subscriber_id);
                        return false;
                    }
                }
            }
            true
        });
    }

    fn snapshot(&self) -> SessionSnapshot {
        let pool = self.state.pool();
        let history = self.state.history();
        let recent = history.len().saturating_sub(SNAPSHOT_HISTORY_LIMIT);
        SessionSnapshot {
            name: self.config.name.clone(),
            phase: self.state.phase(),
            registry_count: pool.registry_len(),
            available_count: pool.available_len(),
            current_winner: self
                .state
                .current_winner()
                .map(|p| p.display_name.clone()),
            draw_id: self.state.current_draw_id(),
            degraded: self.degraded,
            draws_completed: history.len(),
            recent_history: history[recent..].to_vec(),
        }
    }
}
