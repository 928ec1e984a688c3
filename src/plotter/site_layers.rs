use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxHashMap;

use crate::network::{SiteAttribute, SiteNetwork};
use crate::plotter::config::{MappingTarget, PlotterConfig};
use crate::plotter::error::PlotError;
use crate::plotter::normalize::{NormalizationSession, normalize_masked};
use crate::plotter::text_format::TextFormat;
use crate::scene::{MarkerGlyph, MarkerLayer, MarkerSizing};

/// Validated site-channel bindings, resolved from the configured string table
/// before any network data is read.
#[derive(Debug, Clone)]
pub struct SiteBindings {
    marker: Option<String>,
    text: Option<(String, TextFormat)>,
    color: Option<String>,
    size: Option<String>,
}

impl SiteBindings {
    /// Checks channel names and parses text formats. Channels: `marker`,
    /// `text`, `color`, `size`. Binding both `marker` and `text` is rejected
    /// because a site draws exactly one glyph.
    pub fn from_mappings(
        mappings: &IndexMap<String, MappingTarget>,
    ) -> Result<SiteBindings, PlotError> {
        let mut bindings = SiteBindings {
            marker: None,
            text: None,
            color: None,
            size: None,
        };
        for (channel, target) in mappings {
            match channel.as_str() {
                "marker" => bindings.marker = Some(target.attribute().to_string()),
                "text" => {
                    let format = match target.format() {
                        Some(format) => TextFormat::parse(format)?,
                        None => TextFormat::general(),
                    };
                    bindings.text = Some((target.attribute().to_string(), format));
                }
                "color" => bindings.color = Some(target.attribute().to_string()),
                "size" => bindings.size = Some(target.attribute().to_string()),
                other => return Err(PlotError::UnknownSiteMapping(other.to_string())),
            }
        }
        if bindings.marker.is_some() && bindings.text.is_some() {
            return Err(PlotError::MarkerTextConflict);
        }
        Ok(bindings)
    }
}

/// How the sites split into layers.
enum SiteGrouping {
    /// One layer per distinct discrete value, ascending.
    Symbols {
        values: Vec<i32>,
        table: FxHashMap<i32, char>,
    },
    /// One layer per distinct formatted label, in first-appearance order.
    /// Values that format identically merge into one layer.
    Labels(Vec<String>),
    /// Every site in one layer under the first palette symbol.
    Single(char),
}

/// Splits the network's sites into marker layers and fills each layer's
/// visual channels from the bound attributes.
///
/// With `reuse_ranges` set, color/size scaling and symbol assignment come
/// from the session instead of being measured, so a subset of sites (ghost
/// replicas) renders exactly like its originals. Either way the session is
/// updated with the ranges that were used.
///
/// Every site lands in exactly one layer.
pub fn build_site_layers(
    network: &SiteNetwork,
    bindings: &SiteBindings,
    config: &PlotterConfig,
    session: &mut NormalizationSession,
    reuse_ranges: bool,
    alpha: f32,
) -> Result<Vec<MarkerLayer>, PlotError> {
    let n = network.n_sites();
    if n == 0 {
        debug!("No sites to lay out");
        return Ok(Vec::new());
    }
    if bindings.text.is_none() && config.markers.is_empty() {
        return Err(PlotError::EmptyMarkerPalette);
    }

    let grouping = resolve_grouping(network, bindings, config, session, reuse_ranges)?;

    // Normalized colormap inputs, one per site, shared scale across layers
    let color_values = match &bindings.color {
        Some(name) => {
            let attribute = lookup_site_attribute(network, name)?;
            let mut values = attribute.to_f64();
            let cached = if reuse_ranges { session.color_range } else { None };
            let range = normalize_masked(&mut values, |_| true, cached);
            session.color_range = Some(range);
            Some(values)
        }
        None => None,
    };

    let (size_lo, size_hi) = config.minmax_markersize;
    let sizes = match &bindings.size {
        Some(name) => {
            let attribute = lookup_site_attribute(network, name)?;
            let mut values = attribute.to_f64();
            let cached = if reuse_ranges { session.size_range } else { None };
            let range = normalize_masked(&mut values, |_| true, cached);
            session.size_range = Some(range);
            for value in &mut values {
                *value = size_lo + *value * (size_hi - size_lo);
            }
            Some(values)
        }
        None => None,
    };

    let groups: Vec<(MarkerGlyph, Vec<usize>)> = match grouping {
        SiteGrouping::Symbols { values, table } => {
            let mut distinct = values.clone();
            distinct.sort_unstable();
            distinct.dedup();
            distinct
                .iter()
                .map(|value| {
                    let symbol = *table
                        .get(value)
                        .expect("marker table covers every value of the mapped attribute");
                    let sites = (0..n).filter(|i| values[*i] == *value).collect();
                    (MarkerGlyph::Symbol(symbol), sites)
                })
                .collect()
        }
        SiteGrouping::Labels(labels) => {
            let mut grouped: IndexMap<String, Vec<usize>> = IndexMap::new();
            for (site, label) in labels.iter().enumerate() {
                grouped.entry(label.clone()).or_default().push(site);
            }
            grouped
                .into_iter()
                .map(|(label, sites)| (MarkerGlyph::Label(label), sites))
                .collect()
        }
        SiteGrouping::Single(symbol) => vec![(MarkerGlyph::Symbol(symbol), (0..n).collect())],
    };

    let layers: Vec<MarkerLayer> = groups
        .into_iter()
        .map(|(glyph, sites)| {
            let positions = sites.iter().map(|site| network.position(*site)).collect();
            let color_values = color_values
                .as_ref()
                .map(|all| sites.iter().map(|site| all[*site]).collect());
            let sizing = match &sizes {
                Some(all) => MarkerSizing::PerSite(sites.iter().map(|site| all[*site]).collect()),
                None => MarkerSizing::Uniform((size_lo + size_hi) / 2.0),
            };
            MarkerLayer {
                glyph,
                sites,
                positions,
                color_values,
                sizing,
                alpha,
            }
        })
        .collect();

    debug!("Built {} marker layer(s) over {} site(s)", layers.len(), n);
    Ok(layers)
}

fn lookup_site_attribute<'a>(
    network: &'a SiteNetwork,
    name: &str,
) -> Result<&'a SiteAttribute, PlotError> {
    network
        .site_attribute(name)
        .ok_or_else(|| PlotError::MissingSiteAttribute(name.to_string()))
}

fn resolve_grouping(
    network: &SiteNetwork,
    bindings: &SiteBindings,
    config: &PlotterConfig,
    session: &mut NormalizationSession,
    reuse_ranges: bool,
) -> Result<SiteGrouping, PlotError> {
    if let Some(name) = &bindings.marker {
        let values = lookup_site_attribute(network, name)?.to_discrete();

        let table = match (reuse_ranges, &session.marker_table) {
            (true, Some(table)) => table.clone(),
            _ => {
                let mut distinct = values.clone();
                distinct.sort_unstable();
                distinct.dedup();
                if distinct.len() > config.markers.len() {
                    return Err(PlotError::TooManyCategories {
                        distinct: distinct.len(),
                        markers: config.markers.len(),
                    });
                }
                let table: FxHashMap<i32, char> = distinct
                    .iter()
                    .copied()
                    .zip(config.markers.iter().copied())
                    .collect();
                session.marker_table = Some(table.clone());
                table
            }
        };
        return Ok(SiteGrouping::Symbols { values, table });
    }

    if let Some((name, format)) = &bindings.text {
        let labels = match lookup_site_attribute(network, name)? {
            SiteAttribute::Float(values) => {
                values.iter().map(|value| format.apply_float(*value)).collect()
            }
            SiteAttribute::Int(values) => {
                values.iter().map(|value| format.apply_int(*value)).collect()
            }
        };
        return Ok(SiteGrouping::Labels(labels));
    }

    Ok(SiteGrouping::Single(config.markers[0]))
}
