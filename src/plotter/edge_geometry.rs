use glam::f32::Vec3;
use glam::f64::DVec3;
use glam::i32::IVec3;
use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashSet;

use crate::network::{PairMatrix, PairValues, SiteNetwork};
use crate::plotter::config::{EDGE_GROUP_COLORS, PlotterConfig};
use crate::plotter::error::PlotError;
use crate::plotter::normalize::normalize_masked;
use crate::scene::{LineColor, LineWidths, Segment};

/// Validated edge-channel bindings, resolved from the configured string table
/// before any network data is read.
#[derive(Debug, Clone)]
pub struct EdgeBindings {
    intensity: Option<String>,
    width: Option<String>,
    group: Option<String>,
}

impl EdgeBindings {
    /// Checks channel names. Channels: `intensity`, `width`, `group`.
    pub fn from_mappings(mappings: &IndexMap<String, String>) -> Result<EdgeBindings, PlotError> {
        let mut bindings = EdgeBindings {
            intensity: None,
            width: None,
            group: None,
        };
        for (channel, name) in mappings {
            match channel.as_str() {
                "intensity" => bindings.intensity = Some(name.clone()),
                "width" => bindings.width = Some(name.clone()),
                "group" => bindings.group = Some(name.clone()),
                other => return Err(PlotError::UnknownEdgeMapping(other.to_string())),
            }
        }
        Ok(bindings)
    }

    /// Edges are opt-in: nothing is drawn unless `intensity` is bound.
    pub fn draws_edges(&self) -> bool {
        self.intensity.is_some()
    }
}

/// A periodic replica of a site that a wrapped edge terminates on. The
/// replica gets its own faded marker so the segment does not end in empty
/// space near the cell boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSite {
    /// Index of the replicated site in the plotted network.
    pub site: usize,
    /// Real space position of the replica.
    pub position: DVec3,
    /// Lattice image shift from the site's primary position to the replica.
    pub shift: IVec3,
}

/// Geometry and per-segment styling for all qualifying edges of a network.
#[derive(Debug, Clone)]
pub struct EdgeGeometry {
    pub segments: Vec<Segment>,
    /// One color per segment.
    pub colors: Vec<LineColor>,
    pub widths: LineWidths,
    /// Wrapped partner replicas, deduplicated by (site, shift).
    pub ghosts: Vec<GhostSite>,
}

/// Turns the bound pair matrices into drawable segments under the minimum
/// image convention.
///
/// Every ordered pair is visited once. A direction qualifies when its
/// normalized intensity is above `min_color_threshold` and, with `width`
/// bound, its normalized width is above `min_width_threshold`. A qualifying
/// direction emits the unordered pair using the mean of both directions'
/// normalized values, so the reverse entry contributes even when it alone
/// would not have cleared the gates.
///
/// When the minimum image of j relative to i is the identity image, the
/// reverse direction is suppressed and the pair yields exactly one segment.
/// When it is a wrapped image, the reverse direction stays live so that each
/// boundary crossing draws its own wrapped segment, and the wrapped partner
/// is recorded as a ghost site.
pub fn build_edge_geometry(
    network: &SiteNetwork,
    bindings: &EdgeBindings,
    config: &PlotterConfig,
) -> Result<EdgeGeometry, PlotError> {
    let n = network.n_sites();
    let (width_lo, width_hi) = config.minmax_linewidth;
    let (alpha_lo, alpha_hi) = config.minmax_edge_alpha;

    let empty = || EdgeGeometry {
        segments: Vec::new(),
        colors: Vec::new(),
        widths: LineWidths::Uniform((width_lo + width_hi) / 2.0),
        ghosts: Vec::new(),
    };

    let Some(intensity_name) = &bindings.intensity else {
        return Ok(empty());
    };

    // Diagonal entries are meaningless self-relations; keep them out of the
    // normalization range.
    let off_diagonal = move |index: usize| index / n != index % n;

    let mut intensity = lookup_float_matrix(network, intensity_name, "intensity")?;
    normalize_masked(intensity.data_mut(), off_diagonal, None);

    let width = match &bindings.width {
        Some(name) => {
            let mut matrix = lookup_float_matrix(network, name, "width")?;
            normalize_masked(matrix.data_mut(), off_diagonal, None);
            Some(matrix)
        }
        None => None,
    };

    let group = match &bindings.group {
        Some(name) => {
            let matrix = lookup_pair_attribute(network, name)?
                .as_int()
                .cloned()
                .ok_or_else(|| PlotError::GroupMatrixNotInteger(name.clone()))?;
            Some(matrix)
        }
        None => None,
    };

    let positions = network.positions();
    let mut resolved: PairMatrix<bool> = PairMatrix::new(n);
    let mut ghost_seen: FxHashSet<(usize, IVec3)> = FxHashSet::default();

    let mut segments = Vec::new();
    let mut colors = Vec::new();
    let mut segment_widths = Vec::new();
    let mut ghosts = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j || resolved.get(i, j) {
                continue;
            }
            if intensity.get(i, j) <= config.min_color_threshold {
                continue;
            }
            if let Some(width) = &width {
                if width.get(i, j) <= config.min_width_threshold {
                    continue;
                }
            }

            let image = network.cell().min_image(&positions[i], &positions[j]);
            if image.is_identity() {
                // The reverse direction would draw the same segment backwards
                resolved.set(j, i, true);
            } else if ghost_seen.insert((j, image.shift)) {
                ghosts.push(GhostSite {
                    site: j,
                    position: image.position,
                    shift: image.shift,
                });
            }

            let mean_intensity = 0.5 * (intensity.get(i, j) + intensity.get(j, i));
            segments.push(Segment {
                start: positions[i],
                end: image.position,
            });
            colors.push(LineColor {
                rgb: group_color(group.as_ref(), i, j)?,
                alpha: alpha_lo + mean_intensity as f32 * (alpha_hi - alpha_lo),
            });
            if let Some(width) = &width {
                let mean_width = 0.5 * (width.get(i, j) + width.get(j, i));
                segment_widths.push(width_lo + mean_width * (width_hi - width_lo));
            }
        }
    }

    debug!(
        "Emitted {} edge segment(s) and {} ghost site(s)",
        segments.len(),
        ghosts.len()
    );

    let widths = if width.is_some() {
        LineWidths::PerSegment(segment_widths)
    } else {
        LineWidths::Uniform((width_lo + width_hi) / 2.0)
    };

    Ok(EdgeGeometry {
        segments,
        colors,
        widths,
        ghosts,
    })
}

fn lookup_pair_attribute<'a>(
    network: &'a SiteNetwork,
    name: &str,
) -> Result<&'a PairValues, PlotError> {
    network
        .pair_attribute(name)
        .ok_or_else(|| PlotError::MissingEdgeAttribute(name.to_string()))
}

fn lookup_float_matrix(
    network: &SiteNetwork,
    name: &str,
    channel: &str,
) -> Result<PairMatrix<f64>, PlotError> {
    lookup_pair_attribute(network, name)?
        .as_float()
        .cloned()
        .ok_or_else(|| PlotError::EdgeMatrixNotFloat {
            name: name.to_string(),
            channel: channel.to_string(),
        })
}

/// Resolves a segment's color. The last palette slot is the neutral color for
/// ungrouped edges; a bound group id must address one of the other slots.
/// Only the (i, j) entry is consulted; the group matrix is assumed symmetric.
fn group_color(group: Option<&PairMatrix<i32>>, i: usize, j: usize) -> Result<Vec3, PlotError> {
    let neutral = EDGE_GROUP_COLORS.len() - 1;
    match group {
        None => Ok(EDGE_GROUP_COLORS[neutral]),
        Some(matrix) => {
            let id = matrix.get(i, j);
            if id < 0 || id as usize >= neutral {
                return Err(PlotError::TooManyGroups {
                    group: id,
                    palette: EDGE_GROUP_COLORS.len(),
                });
            }
            Ok(EDGE_GROUP_COLORS[id as usize])
        }
    }
}
