//! Layout calculation for reports
//!
//! This module decides what goes where before anything is drawn:
//! - Page planning (which fields and photos land on which page)
//! - Geometry (rectangles and the photo grid)

mod grid;
mod plan;
mod types;

pub use grid::*;
pub use plan::*;
pub use types::*;
