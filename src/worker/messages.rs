//! Worker message types.
//!
//! This module defines the request and response protocol between the runtime
//! and the background worker. Requests carry the caller's trace context so
//! spans recorded on worker tasks link back to the event that caused them.

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::app::screens::{AnnouncementDetail, ChatTranscript, GroopDetail, MemberList};
use crate::app::Route;
use crate::dashboard::DashboardSnapshot;
use crate::domain::{Announcement, Groop, GroopId, GroopMessage};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when handing a message to a worker task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_groops(LoadGroops { sequence: u64 }),
    join_groop(JoinGroop { groop_id: GroopId }),
    create_groop(CreateGroop { name: String, category: String, location: String, host_name: String }),
    create_announcement(CreateAnnouncement { groop_id: GroopId, title: String, body: String }),
    send_message(SendMessage { groop_id: GroopId, body: String, sender_name: String }),
    aggregate_updates(AggregateUpdates { generation: u64, groops: Vec<Groop>, display_name: String }),
    load_groop_detail(LoadGroopDetail { groop_id: GroopId }),
    load_chat(LoadChat { groop_id: GroopId }),
    load_members(LoadMembers { groop_id: GroopId }),
    load_announcement(LoadAnnouncement { announcement_id: Uuid }),
}

/// Requests handled by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load the joined and discovery groop lists.
    LoadGroops {
        /// Request number; echoed back so older loads can be dropped.
        sequence: u64,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Join a groop.
    JoinGroop {
        groop_id: GroopId,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Found a new groop with `host_name` as its host.
    CreateGroop {
        name: String,
        category: String,
        location: String,
        host_name: String,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Post an announcement to a groop.
    CreateAnnouncement {
        groop_id: GroopId,
        title: String,
        body: String,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Send a chat message as the current user.
    SendMessage {
        groop_id: GroopId,
        body: String,
        sender_name: String,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Run one dashboard aggregation pass over `groops`.
    AggregateUpdates {
        /// Generation issued for this pass; echoed back in the response.
        generation: u64,
        groops: Vec<Groop>,
        display_name: String,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load everything the groop detail screen shows.
    LoadGroopDetail {
        groop_id: GroopId,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load a groop's chat transcript.
    LoadChat {
        groop_id: GroopId,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load a groop's members.
    LoadMembers {
        groop_id: GroopId,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load one announcement and its groop.
    LoadAnnouncement {
        announcement_id: Uuid,

        /// Trace context for linking spans across tasks.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The load request backing the screen at `route`.
    #[must_use]
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::GroopDetail(id) => Self::load_groop_detail(*id),
            Route::GroopChat { groop_id, .. } => Self::load_chat(*groop_id),
            Route::GroopMembers(id) => Self::load_members(*id),
            Route::AnnouncementDetail(id) => Self::load_announcement(*id),
        }
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadGroops { trace_context, .. }
            | Self::JoinGroop { trace_context, .. }
            | Self::CreateGroop { trace_context, .. }
            | Self::CreateAnnouncement { trace_context, .. }
            | Self::SendMessage { trace_context, .. }
            | Self::AggregateUpdates { trace_context, .. }
            | Self::LoadGroopDetail { trace_context, .. }
            | Self::LoadChat { trace_context, .. }
            | Self::LoadMembers { trace_context, .. }
            | Self::LoadAnnouncement { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the runtime.
///
/// Exactly one response is produced per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Both groop lists were loaded.
    GroopsLoaded {
        /// Sequence of the `LoadGroops` request this answers.
        sequence: u64,
        /// Joined groops, sorted by name.
        my_groops: Vec<Groop>,
        /// Groops not joined yet, largest first.
        discovery_groops: Vec<Groop>,
    },

    /// The join request completed.
    GroopJoined { groop_id: GroopId },

    /// A new groop was founded.
    GroopCreated { groop: Groop },

    AnnouncementCreated { announcement: Announcement },

    MessageSent { message: GroopMessage },

    GroopDetailLoaded { detail: GroopDetail },

    ChatLoaded { chat: ChatTranscript },

    MembersLoaded { members: MemberList },

    AnnouncementLoaded { detail: AnnouncementDetail },

    /// An aggregation pass finished. It may already be superseded.
    UpdatesAggregated {
        generation: u64,
        snapshot: DashboardSnapshot,
    },

    /// The operation failed.
    Error {
        /// Human-readable error message.
        message: String,
        /// Groop the failed operation targeted, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        groop_id: Option<GroopId>,
    },
}
