pub mod layers;

// Re-export types for convenience
pub use layers::{
    LineCollection, LineColor, LineWidths, MarkerGlyph, MarkerLayer, MarkerSizing, RenderedScene,
    SceneLayer, Segment,
};
