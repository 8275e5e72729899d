//! Session state, background generation and report distribution.
//!
//! A front end talks to [`worker_task`] through [`Command`] messages and
//! receives [`Update`]s back. Generation runs in a spawned task; at most one
//! is in flight per session.

mod commands;
mod config;
mod dispatch;
mod session;
mod worker;

pub use commands::{Command, Update};
pub use config::{AppConfig, ConfigError};
pub use dispatch::{
    DownloadSink, EmailSink, NasUploadSink, ReportDocument, ReportSink, ShareSink, SinkError,
    SinkOutcome, SinkReceipt, dispatch,
};
pub use session::{GenerationGuard, Session};
pub use worker::worker_task;

// Re-export types from library crates
pub use workorder_core::{Edit, ValidationError, WorkOrder};
pub use workorder_report::{CaptureError, ReportOptions};
