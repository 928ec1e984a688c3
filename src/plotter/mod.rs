pub mod config;
pub mod edge_geometry;
pub mod error;
pub mod normalize;
pub mod site_layers;
pub mod text_format;

// Re-export types for convenience
pub use config::{EDGE_GROUP_COLORS, EDGE_Z_ORDER, GHOST_SITE_ALPHA, MappingTarget, PlotterConfig};
pub use edge_geometry::{EdgeBindings, EdgeGeometry, GhostSite, build_edge_geometry};
pub use error::PlotError;
pub use normalize::{
    DEGENERATE_RANGE_THRESHOLD, NormalizationSession, ValueRange, normalize_masked,
};
pub use site_layers::{SiteBindings, build_site_layers};
pub use text_format::TextFormat;

use glam::f64::DVec3;
use log::debug;

use crate::network::SiteNetwork;
use crate::scene::{LineCollection, RenderedScene, SceneLayer};

/// Renders site networks into layered scene descriptions.
///
/// Construction validates the configuration's bindings and palettes, so a
/// misconfigured plotter fails before any network data is touched. One
/// plotter can render any number of networks; each render gets a fresh
/// normalization session.
#[derive(Debug, Clone)]
pub struct SiteNetworkPlotter {
    config: PlotterConfig,
    site_bindings: SiteBindings,
    edge_bindings: EdgeBindings,
}

impl SiteNetworkPlotter {
    pub fn new(config: PlotterConfig) -> Result<SiteNetworkPlotter, PlotError> {
        if config.markers.is_empty() {
            return Err(PlotError::EmptyMarkerPalette);
        }
        let site_bindings = SiteBindings::from_mappings(&config.site_mappings)?;
        let edge_bindings = EdgeBindings::from_mappings(&config.edge_mappings)?;
        Ok(SiteNetworkPlotter {
            config,
            site_bindings,
            edge_bindings,
        })
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Renders one network into an ordered scene.
    ///
    /// Layer order: primary marker layers, then the edge line collection
    /// (drawn behind the markers via its z-order), then the faded ghost
    /// marker layers for wrapped edge partners. Ghost layers reuse the
    /// primary pass's normalization ranges and symbol table, so replicas
    /// look exactly like the sites they copy.
    pub fn plot(&self, network: &SiteNetwork) -> Result<RenderedScene, PlotError> {
        let mut session = NormalizationSession::new();
        let mut layers = Vec::new();

        let primary = build_site_layers(
            network,
            &self.site_bindings,
            &self.config,
            &mut session,
            false,
            1.0,
        )?;
        layers.extend(primary.into_iter().map(SceneLayer::Markers));

        if self.edge_bindings.draws_edges() {
            let geometry = build_edge_geometry(network, &self.edge_bindings, &self.config)?;
            let ghosts = geometry.ghosts;
            if !geometry.segments.is_empty() {
                layers.push(SceneLayer::Lines(LineCollection {
                    segments: geometry.segments,
                    colors: geometry.colors,
                    widths: geometry.widths,
                    z_order: EDGE_Z_ORDER,
                }));
            }
            if !ghosts.is_empty() {
                let sources: Vec<usize> = ghosts.iter().map(|ghost| ghost.site).collect();
                let positions: Vec<DVec3> = ghosts.iter().map(|ghost| ghost.position).collect();
                let ghost_network = network.replicate_sites(&sources, positions);

                let mut ghost_layers = build_site_layers(
                    &ghost_network,
                    &self.site_bindings,
                    &self.config,
                    &mut session,
                    true,
                    GHOST_SITE_ALPHA,
                )?;
                // Replica indices point back at the sites they replicate
                for layer in &mut ghost_layers {
                    for site in &mut layer.sites {
                        *site = sources[*site];
                    }
                }
                layers.extend(ghost_layers.into_iter().map(SceneLayer::Markers));
            }
        }

        debug!(
            "Rendered scene with {} layer(s) for {} site(s)",
            layers.len(),
            network.n_sites()
        );

        Ok(RenderedScene {
            title: self.config.title.clone(),
            colormap: self.config.colormap.clone(),
            hide_axes: true,
            layers,
        })
    }
}
