//! Worker implementation.
//!
//! [`GroopWorker`] owns a shared repository handle and turns each
//! [`WorkerMessage`] into one [`WorkerResponse`]. [`GroopWorker::spawn`]
//! moves it onto a tokio task that starts a separate task per message, so a
//! slow aggregation pass never blocks a join or a reload.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::app::screens::{AnnouncementDetail, ChatTranscript, GroopDetail, MemberList};
use crate::dashboard::aggregate;
use crate::domain::{Groop, GroopError, GroopId, GroopMessage, Result};
use crate::repository::GroopRepository;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Executes repository work on behalf of the runtime.
#[derive(Clone)]
pub struct GroopWorker {
    repository: Arc<dyn GroopRepository>,
}

impl std::fmt::Debug for GroopWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroopWorker").finish_non_exhaustive()
    }
}

/// Sending half of a spawned worker.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    sender: mpsc::UnboundedSender<WorkerMessage>,
}

impl WorkerHandle {
    /// Queues `message` for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Worker`] if the worker task has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| GroopError::Worker("worker channel closed".to_string()))
    }
}

impl GroopWorker {
    #[must_use]
    pub fn new(repository: Arc<dyn GroopRepository>) -> Self {
        Self { repository }
    }

    /// Moves the worker onto a background task.
    ///
    /// Returns the handle used to post messages and the receiver responses
    /// arrive on. Must be called from within a tokio runtime. The worker stops
    /// once every [`WorkerHandle`] is dropped.
    #[must_use]
    pub fn spawn(self) -> (WorkerHandle, mpsc::UnboundedReceiver<WorkerResponse>) {
        let (message_tx, mut message_rx) = mpsc::unbounded_channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let worker = Arc::new(self);

        tokio::spawn(async move {
            while let Some(message) = message_rx.recv().await {
                let worker = Arc::clone(&worker);
                let responses = response_tx.clone();
                tokio::spawn(async move {
                    let response = worker.handle_message(message).await;
                    if responses.send(response).is_err() {
                        tracing::debug!("runtime gone, discarding worker response");
                    }
                });
            }
            tracing::debug!("worker channel closed, stopping");
        });

        (WorkerHandle { sender: message_tx }, response_rx)
    }

    /// Links the worker span to the span that posted the message.
    fn attach_parent_trace_context(span: &tracing::Span, message: &WorkerMessage) {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let Some(trace_context) = message.trace_context() else {
            return;
        };
        let (Ok(trace_id), Ok(span_id)) = (
            TraceId::from_hex(&trace_context.trace_id),
            SpanId::from_hex(&trace_context.parent_span_id),
        ) else {
            tracing::debug!("malformed trace context on worker message");
            return;
        };

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        span.set_parent(opentelemetry::Context::new().with_remote_span_context(span_context));
    }

    /// Helper for turning operation results into responses with consistent logging.
    fn handle_result<T, F>(operation: &str, groop_id: Option<GroopId>, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                    groop_id,
                }
            }
        }
    }

    async fn require_groop(&self, groop_id: GroopId) -> Result<Groop> {
        self.repository
            .groop(groop_id)
            .await
            .ok_or_else(|| GroopError::NotFound(format!("groop {groop_id}")))
    }

    /// Reads the groop and its four content sources concurrently.
    async fn load_detail(&self, groop_id: GroopId) -> Result<GroopDetail> {
        let groop = self.require_groop(groop_id).await?;
        let ((announcements, feed), (mut messages, members)) = futures_util::future::join(
            futures_util::future::join(
                self.repository.fetch_announcements(groop_id),
                self.repository.feed_items(groop_id),
            ),
            futures_util::future::join(
                self.repository.fetch_messages(groop_id),
                self.repository.fetch_members(groop_id),
            ),
        )
        .await;
        GroopMessage::sort_chronologically(&mut messages);
        Ok(GroopDetail { groop, announcements, feed, messages, members })
    }

    async fn load_announcement(&self, announcement_id: uuid::Uuid) -> Result<AnnouncementDetail> {
        let announcement = self
            .repository
            .announcement(announcement_id)
            .await
            .ok_or_else(|| GroopError::NotFound(format!("announcement {announcement_id}")))?;
        let (groop, members) = futures_util::future::join(
            self.repository.groop(announcement.groop_id),
            self.repository.fetch_members(announcement.groop_id),
        )
        .await;
        Ok(AnnouncementDetail { announcement, groop, members })
    }

    /// Processes a message and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        Self::attach_parent_trace_context(&span, &message);

        async move {
            match message {
                WorkerMessage::LoadGroops { sequence, .. } => {
                    let (my_groops, discovery_groops) = futures_util::future::join(
                        self.repository.fetch_my_groops(),
                        self.repository.fetch_discovery_groops(),
                    )
                    .await;
                    WorkerResponse::GroopsLoaded { sequence, my_groops, discovery_groops }
                }

                WorkerMessage::JoinGroop { groop_id, .. } => {
                    let result = match self.require_groop(groop_id).await {
                        Ok(_) => {
                            self.repository.join_groop(groop_id).await;
                            Ok(())
                        }
                        Err(e) => Err(e),
                    };
                    Self::handle_result("join groop", Some(groop_id), result, |()| {
                        WorkerResponse::GroopJoined { groop_id }
                    })
                }

                WorkerMessage::CreateGroop { name, category, location, host_name, .. } => {
                    let groop = self
                        .repository
                        .create_groop(&name, &category, &location, &host_name)
                        .await;
                    WorkerResponse::GroopCreated { groop }
                }

                WorkerMessage::CreateAnnouncement { groop_id, title, body, .. } => {
                    let result = match self.require_groop(groop_id).await {
                        Ok(_) => Ok(self.repository.create_announcement(groop_id, &title, &body).await),
                        Err(e) => Err(e),
                    };
                    Self::handle_result("create announcement", Some(groop_id), result, |announcement| {
                        WorkerResponse::AnnouncementCreated { announcement }
                    })
                }

                WorkerMessage::SendMessage { groop_id, body, sender_name, .. } => {
                    let result = match self.require_groop(groop_id).await {
                        Ok(_) => Ok(self.repository.send_message(groop_id, &body, &sender_name, true).await),
                        Err(e) => Err(e),
                    };
                    Self::handle_result("send message", Some(groop_id), result, |message| {
                        WorkerResponse::MessageSent { message }
                    })
                }

                WorkerMessage::AggregateUpdates { generation, groops, display_name, .. } => {
                    let snapshot = aggregate(self.repository.as_ref(), &groops, &display_name).await;
                    WorkerResponse::UpdatesAggregated { generation, snapshot }
                }

                WorkerMessage::LoadGroopDetail { groop_id, .. } => {
                    let result = self.load_detail(groop_id).await;
                    Self::handle_result("load groop detail", Some(groop_id), result, |detail| {
                        WorkerResponse::GroopDetailLoaded { detail }
                    })
                }

                WorkerMessage::LoadChat { groop_id, .. } => {
                    let result = match self.require_groop(groop_id).await {
                        Ok(groop) => {
                            let mut messages = self.repository.fetch_messages(groop_id).await;
                            GroopMessage::sort_chronologically(&mut messages);
                            Ok(ChatTranscript { groop, messages })
                        }
                        Err(e) => Err(e),
                    };
                    Self::handle_result("load chat", Some(groop_id), result, |chat| {
                        WorkerResponse::ChatLoaded { chat }
                    })
                }

                WorkerMessage::LoadMembers { groop_id, .. } => {
                    let result = match self.require_groop(groop_id).await {
                        Ok(groop) => Ok(MemberList {
                            groop,
                            members: self.repository.fetch_members(groop_id).await,
                        }),
                        Err(e) => Err(e),
                    };
                    Self::handle_result("load members", Some(groop_id), result, |members| {
                        WorkerResponse::MembersLoaded { members }
                    })
                }

                WorkerMessage::LoadAnnouncement { announcement_id, .. } => {
                    let result = self.load_announcement(announcement_id).await;
                    Self::handle_result("load announcement", None, result, |detail| {
                        WorkerResponse::AnnouncementLoaded { detail }
                    })
                }
            }
        }
        .instrument(span)
        .await
    }
}
