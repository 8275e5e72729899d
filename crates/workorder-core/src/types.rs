use crate::model::LineItemId;
use thiserror::Error;

/// An edit that the form boundary refuses to apply.
///
/// The snapshot the edit was applied to is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tasks and status would take {lines} lines, the limit is {limit}")]
    TasksStatusLimit { lines: usize, limit: usize },
    #[error("products and remarks would take {lines} lines, the limit is {limit}")]
    ProductsRemarksLimit { lines: usize, limit: usize },
    #[error("quantity {quantity} is outside 1..={max}")]
    QuantityOutOfRange { quantity: u32, max: u32 },
    #[error("no line item with id {0}")]
    UnknownLineItem(LineItemId),
    #[error("line item {id} has no serial number at position {index}")]
    SerialIndexOutOfRange { id: LineItemId, index: usize },
    #[error("no photo at position {0}")]
    PhotoIndexOutOfRange(usize),
}

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Draft format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid draft name: {0:?}")]
    InvalidName(String),
    #[error("Draft not found: {0}")]
    NotFound(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DraftError>;
