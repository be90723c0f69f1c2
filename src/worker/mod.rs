//! Background worker for repository operations.
//!
//! Repository calls are async and carry simulated latency, so the runtime
//! never awaits them inline. Instead it posts a [`WorkerMessage`]; the worker
//! runs each message on its own tokio task and sends back exactly one
//! [`WorkerResponse`]. Because messages run concurrently, responses can
//! arrive in a different order than the messages were posted.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{GroopWorker, WorkerHandle};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
