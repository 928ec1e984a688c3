use glam::f32::Vec3;
use glam::f64::DVec3;
use serde::Serialize;

use crate::util::serialization_utils::{dvec3_serializer, vec3_serializer, vec_dvec3_serializer};

/// What gets drawn at each site of a marker layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerGlyph {
    /// A marker symbol from the configured palette.
    Symbol(char),
    /// A formatted text label.
    Label(String),
}

/// Marker size for a layer, either one shared value or one value per site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerSizing {
    Uniform(f64),
    PerSite(Vec<f64>),
}

/// A group of sites sharing one glyph, drawn in a single scatter call.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerLayer {
    pub glyph: MarkerGlyph,
    /// Indices into the plotted site set, parallel to `positions`.
    pub sites: Vec<usize>,
    #[serde(with = "vec_dvec3_serializer")]
    pub positions: Vec<DVec3>,
    /// Normalized colormap inputs per site; `None` leaves the color to the
    /// renderer's default.
    pub color_values: Option<Vec<f64>>,
    pub sizing: MarkerSizing,
    pub alpha: f32,
}

/// A straight line segment between two real space points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    #[serde(with = "dvec3_serializer")]
    pub start: DVec3,
    #[serde(with = "dvec3_serializer")]
    pub end: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineColor {
    #[serde(with = "vec3_serializer")]
    pub rgb: Vec3,
    pub alpha: f32,
}

/// Line width for a collection, either one shared value or one per segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LineWidths {
    Uniform(f64),
    PerSegment(Vec<f64>),
}

/// A batch of line segments drawn together, one color per segment.
#[derive(Debug, Clone, Serialize)]
pub struct LineCollection {
    pub segments: Vec<Segment>,
    pub colors: Vec<LineColor>,
    pub widths: LineWidths,
    /// Draw priority; lower values draw first, behind higher ones.
    pub z_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub enum SceneLayer {
    Markers(MarkerLayer),
    Lines(LineCollection),
}

/// A complete, ordered description of one rendered view of a site network.
///
/// The scene carries everything a drawing surface needs: layers in draw
/// order, the colormap name to resolve normalized color values through, and
/// the figure-level settings. It holds no handles to any graphics API.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedScene {
    pub title: String,
    /// Colormap name, resolved by the host renderer's registry.
    pub colormap: String,
    pub hide_axes: bool,
    pub layers: Vec<SceneLayer>,
}

impl RenderedScene {
    /// Serializes the scene for an out-of-process renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
