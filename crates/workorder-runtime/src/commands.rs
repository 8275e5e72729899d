use crate::dispatch::{ReportSink, SinkOutcome};
use std::sync::Arc;
use workorder_core::{Edit, ValidationError, WorkOrder};
use workorder_report::CaptureError;

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum Command {
    /// Apply one edit to the current snapshot
    Edit(Edit),
    /// Start over with an empty order
    Reset,
    /// Replace the current snapshot, e.g. with a loaded draft
    Load(WorkOrder),
    /// Generate the report from the current snapshot and hand it to `sinks`
    Generate { sinks: Vec<Arc<dyn ReportSink>> },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum Update {
    /// The snapshot changed
    Changed { order: WorkOrder },
    /// An edit was refused; the snapshot is unchanged
    EditRejected { error: ValidationError },
    /// A generation request arrived while another was running
    GenerationBusy,
    ReportReady {
        file_name: String,
        page_numbers: Vec<usize>,
        skipped: Vec<CaptureError>,
        partial: bool,
    },
    GenerationFailed { message: String },
    /// Per-sink results, in the order the sinks were given
    Dispatched { outcomes: Vec<SinkOutcome> },
}
