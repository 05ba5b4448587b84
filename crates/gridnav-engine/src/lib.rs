//! Request dispatch for concurrent grid path searches.
//!
//! A [`NavigationService`] owns a shared FIFO queue and a pool of worker
//! threads. Submitters hand it a [`Request`]; the service resolves both
//! endpoints against the grid, enqueues a [`RequestHandle`], and returns
//! the handle immediately. A worker dequeues it, runs one search to
//! completion, and publishes a [`NavResult`] the submitter can poll or
//! wait on.
//!
//! Workers only take work while the service is
//! [`Running`](ServiceState::Running); the host drives
//! [`Paused`](ServiceState::Paused) ⇄ `Running` with
//! [`NavigationService::set_ticking`].
//!
//! # Architecture
//!
//! ```text
//! Submitter(s)                  Queue                    Workers (N)
//!     |                           |                          |
//!     |--process(request)-------->| resolve begin/end        |
//!     |<--Arc<RequestHandle>------| tx.send(handle)          |
//!     |                           |                rx.recv_timeout()
//!     |                           |                Requesting → Processing
//!     |                           |                search(ctx)
//!     |                           |                handle.complete(result)
//!     |--handle.wait()/result()------------------------------>|
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod handle;
pub mod lifecycle;
pub mod metrics;
pub mod operation;
pub mod request;
pub mod result;
pub mod service;
mod worker;

pub use config::{ConfigError, ServiceConfig};
pub use handle::RequestHandle;
pub use lifecycle::ServiceState;
pub use metrics::{MetricsSnapshot, ServiceMetrics};
pub use operation::{RunSummary, SearchOperation};
pub use request::Request;
pub use result::{NavResult, Outcome, ResultState};
pub use service::{NavigationService, ShutdownReport};
