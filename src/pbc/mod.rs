pub mod unit_cell;

// Re-export types for convenience
pub use unit_cell::{MinImage, UnitCell};
