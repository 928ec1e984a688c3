use thiserror::Error;

/// Everything that can go wrong while turning a site network into a scene.
///
/// Configuration problems surface at plotter construction; data problems
/// surface at render time. Nothing is recovered internally and no partial
/// scene is ever returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlotError {
    #[error("Unknown site mapping channel: {0}")]
    UnknownSiteMapping(String),

    #[error("Unknown edge mapping channel: {0}")]
    UnknownEdgeMapping(String),

    #[error("Site mappings bind both 'marker' and 'text'; sites can carry only one glyph")]
    MarkerTextConflict,

    #[error("Marker palette is empty")]
    EmptyMarkerPalette,

    #[error("Site attribute '{0}' is mapped but missing from the network")]
    MissingSiteAttribute(String),

    #[error("Pair attribute '{0}' is mapped but missing from the network")]
    MissingEdgeAttribute(String),

    #[error("Marker mapping has {distinct} distinct values but the palette has {markers} markers")]
    TooManyCategories { distinct: usize, markers: usize },

    #[error("Edge group {group} does not fit a palette of {palette} colors")]
    TooManyGroups { group: i32, palette: usize },

    #[error("Group matrix '{0}' must be integer-typed")]
    GroupMatrixNotInteger(String),

    #[error("Pair attribute '{name}' must be a float matrix to drive the '{channel}' channel")]
    EdgeMatrixNotFloat { name: String, channel: String },

    #[error("Unsupported text format string: {0}")]
    BadFormat(String),
}
