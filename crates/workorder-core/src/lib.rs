//! Work order data model, line estimation, edit transitions and drafts.

mod drafts;
mod edit;
mod estimate;
mod limits;
mod model;
mod payload;
mod types;

pub use drafts::{DraftStore, migrate_draft};
pub use edit::Edit;
pub use estimate::{ContentLines, estimate_lines, product_lines};
pub use limits::LineLimits;
pub use model::*;
pub use types::*;
