use glam::f32::Vec3;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Color cycle for edge groups. The last entry (gray) is reserved for edges
/// with no group, so grouped edges can use one slot fewer than the palette
/// length.
pub const EDGE_GROUP_COLORS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 1.0),       // blue
    Vec3::new(0.0, 0.5, 0.0),       // green
    Vec3::new(0.75, 0.0, 0.75),     // magenta
    Vec3::new(0.863, 0.078, 0.235), // crimson
    Vec3::new(0.125, 0.698, 0.667), // light sea green
    Vec3::new(1.0, 0.549, 0.0),     // dark orange
    Vec3::new(0.957, 0.643, 0.376), // sandy brown
    Vec3::new(1.0, 0.843, 0.0),     // gold
    Vec3::new(1.0, 0.412, 0.706),   // hot pink
    Vec3::new(0.5, 0.5, 0.5),       // gray, reserved for ungrouped edges
];

// alpha for ghost site layers (periodic replicas drawn faded)
pub const GHOST_SITE_ALPHA: f32 = 0.2;

// draw priority of the edge line collection, behind every marker layer
pub const EDGE_Z_ORDER: i32 = -20;

/// One side of a site binding: which attribute feeds the channel, optionally
/// with a format string for text output.
///
/// In JSON a bare string binds an attribute, a two-element array adds the
/// format: `"site_types"` or `["occupancies", "%.2f"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingTarget {
    Attribute(String),
    Formatted(String, String),
}

impl MappingTarget {
    pub fn attribute(&self) -> &str {
        match self {
            MappingTarget::Attribute(name) => name,
            MappingTarget::Formatted(name, _) => name,
        }
    }

    pub fn format(&self) -> Option<&str> {
        match self {
            MappingTarget::Attribute(_) => None,
            MappingTarget::Formatted(_, format) => Some(format),
        }
    }
}

lazy_static! {
    /// Default site bindings: marker symbols driven by the site type column.
    static ref DEFAULT_SITE_MAPPINGS: IndexMap<String, MappingTarget> = {
        let mut mappings = IndexMap::new();
        mappings.insert(
            "marker".to_string(),
            MappingTarget::Attribute("site_types".to_string()),
        );
        mappings
    };
}

/// Full styling surface of a plot: channel bindings plus visual ranges.
///
/// All fields have defaults, so a JSON config only needs the fields it
/// overrides. Missing fields get defaults, extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Site channel -> attribute bindings. Channels: `marker`, `text`,
    /// `color`, `size`.
    #[serde(default = "default_site_mappings")]
    pub site_mappings: IndexMap<String, MappingTarget>,
    /// Edge channel -> pair matrix bindings. Channels: `intensity`, `width`,
    /// `group`. Edges are drawn only when `intensity` is bound.
    #[serde(default)]
    pub edge_mappings: IndexMap<String, String>,
    /// Marker symbols, assigned to discrete values in ascending value order.
    #[serde(default = "default_markers")]
    pub markers: Vec<char>,
    #[serde(default = "default_minmax_linewidth")]
    pub minmax_linewidth: (f64, f64),
    #[serde(default = "default_minmax_edge_alpha")]
    pub minmax_edge_alpha: (f32, f32),
    #[serde(default = "default_minmax_markersize")]
    pub minmax_markersize: (f64, f64),
    /// Edges whose normalized intensity is not above this are dropped.
    #[serde(default)]
    pub min_color_threshold: f64,
    /// Edges whose normalized width value is not above this are dropped.
    /// Only consulted when `width` is bound.
    #[serde(default)]
    pub min_width_threshold: f64,
    /// Colormap name hint handed through to the renderer.
    #[serde(default = "default_colormap")]
    pub colormap: String,
    #[serde(default)]
    pub title: String,
}

fn default_site_mappings() -> IndexMap<String, MappingTarget> {
    DEFAULT_SITE_MAPPINGS.clone()
}
fn default_markers() -> Vec<char> {
    vec!['x', '+', 'v', '<', '^', '>', '*', 'd', 'h', 'p']
}
fn default_minmax_linewidth() -> (f64, f64) {
    (1.5, 7.0)
}
fn default_minmax_edge_alpha() -> (f32, f32) {
    (0.15, 0.75)
}
fn default_minmax_markersize() -> (f64, f64) {
    (20.0, 80.0)
}
fn default_colormap() -> String {
    "winter".to_string()
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            site_mappings: default_site_mappings(),
            edge_mappings: IndexMap::new(),
            markers: default_markers(),
            minmax_linewidth: default_minmax_linewidth(),
            minmax_edge_alpha: default_minmax_edge_alpha(),
            minmax_markersize: default_minmax_markersize(),
            min_color_threshold: 0.0,
            min_width_threshold: 0.0,
            colormap: default_colormap(),
            title: String::new(),
        }
    }
}
