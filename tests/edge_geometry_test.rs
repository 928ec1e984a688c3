use glam::f32::Vec3;
use glam::f64::DVec3;
use glam::i32::IVec3;
use indexmap::IndexMap;
use sitenet_viz::network::{PairMatrix, PairValues, SiteNetwork};
use sitenet_viz::pbc::UnitCell;
use sitenet_viz::plotter::{
    EDGE_GROUP_COLORS, EdgeBindings, PlotError, PlotterConfig, build_edge_geometry,
};
use sitenet_viz::scene::{LineColor, LineWidths};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a network in a cell large enough that no pair wraps.
fn open_network(positions: &[DVec3]) -> SiteNetwork {
    SiteNetwork::new(UnitCell::cubic(100.0), positions.to_vec())
}

/// Creates a network in a 10x10x10 cell so boundary pairs wrap.
fn tight_network(positions: &[DVec3]) -> SiteNetwork {
    SiteNetwork::new(UnitCell::cubic(10.0), positions.to_vec())
}

fn add_float_matrix(network: &mut SiteNetwork, name: &str, flat: &[f64]) {
    let n = network.n_sites();
    let matrix = PairMatrix::from_flat(n, flat.to_vec());
    network.add_pair_attribute(name, PairValues::Float(matrix)).unwrap();
}

fn add_int_matrix(network: &mut SiteNetwork, name: &str, flat: &[i32]) {
    let n = network.n_sites();
    let matrix = PairMatrix::from_flat(n, flat.to_vec());
    network.add_pair_attribute(name, PairValues::Int(matrix)).unwrap();
}

fn bindings_of(pairs: &[(&str, &str)]) -> EdgeBindings {
    let mut mappings = IndexMap::new();
    for (channel, attribute) in pairs {
        mappings.insert(channel.to_string(), attribute.to_string());
    }
    EdgeBindings::from_mappings(&mappings).unwrap()
}

fn intensity_bindings() -> EdgeBindings {
    bindings_of(&[("intensity", "hops")])
}

/// Inverts the alpha ramp to recover the averaged normalized intensity.
fn recovered_intensity(color: &LineColor, config: &PlotterConfig) -> f64 {
    let (lo, hi) = config.minmax_edge_alpha;
    ((color.alpha - lo) / (hi - lo)) as f64
}

/// Finds which site a segment endpoint coincides with (identity images only).
fn endpoint_index(positions: &[DVec3], point: DVec3) -> usize {
    positions
        .iter()
        .position(|p| *p == point)
        .unwrap_or_else(|| panic!("Endpoint {:?} is not a site position", point))
}

// ============================================================================
// Intensity Averaging Tests
// ============================================================================

#[test]
fn interior_pair_draws_one_segment() {
    // Normalized hops: (0,1) -> 1.0, (1,0) -> 0.0; only the forward direction
    // qualifies, and the identity image suppresses the reverse visit.
    let p0 = DVec3::new(10.0, 10.0, 10.0);
    let p1 = DVec3::new(12.0, 10.0, 10.0);
    let mut network = open_network(&[p0, p1]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    assert_eq!(geometry.segments[0].start, p0);
    assert_eq!(geometry.segments[0].end, p1);
    assert!(geometry.ghosts.is_empty());

    // Averaged intensity is the mean of both normalized directions: (1 + 0)/2
    let mean = recovered_intensity(&geometry.colors[0], &config);
    assert!((mean - 0.5).abs() < 1e-6, "mean intensity = {}", mean);

    // No width binding: one collection-wide width at the middle of the range
    match geometry.widths {
        LineWidths::Uniform(w) => assert!((w - 4.25).abs() < 1e-12),
        LineWidths::PerSegment(_) => panic!("Expected a uniform width"),
    }
}

#[test]
fn averaged_intensity_uses_both_directions() {
    // Three sites, hops only between 0 and 1. Off-diagonal range is [0, 0.9],
    // so (0,1) normalizes to 1 and (1,0) to 1/9. The drawn edge carries their
    // mean, 5/9.
    let positions = [
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
        DVec3::new(10.0, 12.0, 10.0),
    ];
    let mut network = open_network(&positions);
    add_float_matrix(
        &mut network,
        "hops",
        &[0.0, 0.9, 0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    let mean = recovered_intensity(&geometry.colors[0], &config);
    assert!((mean - 5.0 / 9.0).abs() < 1e-5, "mean intensity = {}", mean);
}

#[test]
fn reverse_direction_alone_emits() {
    // Only (1,0) survives normalization, so the segment starts at site 1.
    let p0 = DVec3::new(10.0, 10.0, 10.0);
    let p1 = DVec3::new(12.0, 10.0, 10.0);
    let mut network = open_network(&[p0, p1]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.1, 0.9, 0.0]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    assert_eq!(geometry.segments[0].start, p1);
    assert_eq!(geometry.segments[0].end, p0);
}

#[test]
fn identity_pairs_emit_each_unordered_pair_once() {
    // Fully connected four sites. Every unordered pair appears exactly once
    // even though both directions qualify for most pairs. The (0,1) entry
    // normalizes to zero and is skipped, but a threshold skip leaves the pair
    // open: the (1,0) visit still draws it.
    let positions = [
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(13.0, 10.0, 10.0),
        DVec3::new(10.0, 13.0, 10.0),
        DVec3::new(10.0, 10.0, 13.0),
    ];
    let mut network = open_network(&positions);
    let mut flat = vec![0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            if i != j {
                flat[i * 4 + j] = (i * 4 + j + 1) as f64;
            }
        }
    }
    add_float_matrix(&mut network, "hops", &flat);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 6, "expected N(N-1)/2 segments");
    let mut seen = std::collections::HashSet::new();
    for segment in &geometry.segments {
        let a = endpoint_index(&positions, segment.start);
        let b = endpoint_index(&positions, segment.end);
        assert!(
            seen.insert((a.min(b), a.max(b))),
            "Pair ({}, {}) was drawn twice",
            a,
            b
        );
    }
}

// ============================================================================
// Periodic Wrapping Tests
// ============================================================================

#[test]
fn wrapped_pair_draws_both_sides() {
    // Sites on opposite faces of the cell. Each direction wraps through its
    // own face, so the edge is drawn as two half segments, each ending at a
    // ghost replica of the partner site.
    let p0 = DVec3::new(0.5, 5.0, 5.0);
    let p1 = DVec3::new(9.5, 5.0, 5.0);
    let mut network = tight_network(&[p0, p1]);
    // Equal entries: the range is degenerate and the raw 0.7 passes the gate.
    add_float_matrix(&mut network, "hops", &[0.0, 0.7, 0.7, 0.0]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 2);
    assert_eq!(geometry.segments[0].start, p0);
    assert_eq!(geometry.segments[0].end, DVec3::new(-0.5, 5.0, 5.0));
    assert_eq!(geometry.segments[1].start, p1);
    assert_eq!(geometry.segments[1].end, DVec3::new(10.5, 5.0, 5.0));

    assert_eq!(geometry.ghosts.len(), 2);
    assert_eq!(geometry.ghosts[0].site, 1);
    assert_eq!(geometry.ghosts[0].position, DVec3::new(-0.5, 5.0, 5.0));
    assert_eq!(geometry.ghosts[0].shift, IVec3::new(-1, 0, 0));
    assert_eq!(geometry.ghosts[1].site, 0);
    assert_eq!(geometry.ghosts[1].position, DVec3::new(10.5, 5.0, 5.0));
    assert_eq!(geometry.ghosts[1].shift, IVec3::new(1, 0, 0));

    // Both half segments carry the same averaged intensity
    let mean = recovered_intensity(&geometry.colors[0], &config);
    assert!((mean - 0.7).abs() < 1e-6);
    assert_eq!(geometry.colors[0].alpha, geometry.colors[1].alpha);
}

#[test]
fn wrapped_pair_single_direction_one_ghost() {
    // Only (0,1) qualifies, so just one half segment and one ghost appear.
    let p0 = DVec3::new(0.5, 5.0, 5.0);
    let p1 = DVec3::new(9.5, 5.0, 5.0);
    let mut network = tight_network(&[p0, p1]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    assert_eq!(geometry.segments[0].start, p0);
    assert_eq!(geometry.segments[0].end, DVec3::new(-0.5, 5.0, 5.0));
    assert_eq!(geometry.ghosts.len(), 1);
    assert_eq!(geometry.ghosts[0].site, 1);
    assert_eq!(geometry.ghosts[0].shift, IVec3::new(-1, 0, 0));
}

#[test]
fn ghost_replicas_dedup_by_site_and_shift() {
    // Two edges wrap to the same replica of site 1; it is recorded once.
    let a = DVec3::new(0.5, 5.0, 5.0);
    let b = DVec3::new(9.5, 5.0, 5.0);
    let c = DVec3::new(0.5, 7.0, 5.0);
    let mut network = tight_network(&[a, b, c]);
    add_float_matrix(
        &mut network,
        "hops",
        &[0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8, 0.0],
    );
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    assert_eq!(geometry.segments.len(), 2);
    assert_eq!(geometry.ghosts.len(), 1);
    assert_eq!(geometry.ghosts[0].site, 1);
    assert_eq!(geometry.ghosts[0].position, DVec3::new(-0.5, 5.0, 5.0));
}

// ============================================================================
// Group Color Tests
// ============================================================================

#[test]
fn grouped_edges_use_palette_colors() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_int_matrix(&mut network, "paths", &[0, 2, 2, 0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("group", "paths")]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &bindings, &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    assert_eq!(geometry.colors[0].rgb, EDGE_GROUP_COLORS[2]);
}

#[test]
fn ungrouped_edges_use_reserved_gray() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();

    let neutral = EDGE_GROUP_COLORS[EDGE_GROUP_COLORS.len() - 1];
    assert_eq!(geometry.colors[0].rgb, neutral);
    assert_eq!(neutral, Vec3::new(0.5, 0.5, 0.5));
}

#[test]
fn negative_group_id_is_rejected() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_int_matrix(&mut network, "paths", &[0, -1, -1, 0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("group", "paths")]);
    let config = PlotterConfig::default();

    let result = build_edge_geometry(&network, &bindings, &config);
    assert_eq!(
        result.unwrap_err(),
        PlotError::TooManyGroups {
            group: -1,
            palette: EDGE_GROUP_COLORS.len(),
        }
    );
}

#[test]
fn group_id_cannot_take_the_reserved_slot() {
    // Group 9 would land on the gray reserved for ungrouped edges.
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_int_matrix(&mut network, "paths", &[0, 9, 9, 0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("group", "paths")]);
    let config = PlotterConfig::default();

    let result = build_edge_geometry(&network, &bindings, &config);
    assert_eq!(
        result.unwrap_err(),
        PlotError::TooManyGroups {
            group: 9,
            palette: EDGE_GROUP_COLORS.len(),
        }
    );
}

#[test]
fn float_group_matrix_is_rejected() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_float_matrix(&mut network, "paths", &[0.0, 2.0, 2.0, 0.0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("group", "paths")]);
    let config = PlotterConfig::default();

    let result = build_edge_geometry(&network, &bindings, &config);
    assert_eq!(
        result.unwrap_err(),
        PlotError::GroupMatrixNotInteger("paths".to_string())
    );
}

#[test]
fn integer_intensity_matrix_is_rejected() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_int_matrix(&mut network, "hops", &[0, 9, 1, 0]);
    let config = PlotterConfig::default();

    let result = build_edge_geometry(&network, &intensity_bindings(), &config);
    assert_eq!(
        result.unwrap_err(),
        PlotError::EdgeMatrixNotFloat {
            name: "hops".to_string(),
            channel: "intensity".to_string(),
        }
    );
}

// ============================================================================
// Width Channel Tests
// ============================================================================

#[test]
fn width_gate_skips_independently() {
    // (0,1) passes the intensity gate but its normalized width is zero,
    // which fails the width gate; nothing is drawn.
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_float_matrix(&mut network, "traffic", &[0.0, 0.2, 0.9, 0.0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("width", "traffic")]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &bindings, &config).unwrap();
    assert!(geometry.segments.is_empty());
}

#[test]
fn width_lerps_into_configured_range() {
    // Normalized traffic: (0,1) -> 1, (1,0) -> 0, mean 0.5, which lands at
    // the midpoint of the default (1.5, 7.0) linewidth range.
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    add_float_matrix(&mut network, "traffic", &[0.0, 0.9, 0.2, 0.0]);
    let bindings = bindings_of(&[("intensity", "hops"), ("width", "traffic")]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &bindings, &config).unwrap();

    assert_eq!(geometry.segments.len(), 1);
    match &geometry.widths {
        LineWidths::PerSegment(widths) => {
            assert_eq!(widths.len(), 1);
            assert!((widths[0] - 4.25).abs() < 1e-12, "width = {}", widths[0]);
        }
        LineWidths::Uniform(_) => panic!("Expected per-segment widths"),
    }
}

// ============================================================================
// Gating and Error Tests
// ============================================================================

#[test]
fn all_edges_below_threshold_yields_empty() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    let mut config = PlotterConfig::default();
    // Normalized intensities top out at 1.0, so nothing clears this gate
    config.min_color_threshold = 1.0;

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();
    assert!(geometry.segments.is_empty());
    assert!(geometry.ghosts.is_empty());
}

#[test]
fn zero_matrix_yields_empty() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
        DVec3::new(10.0, 12.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0; 9]);
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &intensity_bindings(), &config).unwrap();
    assert!(geometry.segments.is_empty());
}

#[test]
fn unbound_intensity_draws_nothing() {
    let mut network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    add_float_matrix(&mut network, "hops", &[0.0, 0.9, 0.1, 0.0]);
    let bindings = bindings_of(&[]);
    assert!(!bindings.draws_edges());
    let config = PlotterConfig::default();

    let geometry = build_edge_geometry(&network, &bindings, &config).unwrap();
    assert!(geometry.segments.is_empty());
    assert!(geometry.ghosts.is_empty());
}

#[test]
fn missing_intensity_matrix_is_reported() {
    let network = open_network(&[
        DVec3::new(10.0, 10.0, 10.0),
        DVec3::new(12.0, 10.0, 10.0),
    ]);
    let config = PlotterConfig::default();

    let result = build_edge_geometry(&network, &intensity_bindings(), &config);
    assert_eq!(
        result.unwrap_err(),
        PlotError::MissingEdgeAttribute("hops".to_string())
    );
}

#[test]
fn unknown_edge_channel_is_rejected() {
    let mut mappings = IndexMap::new();
    mappings.insert("sparkle".to_string(), "hops".to_string());
    let result = EdgeBindings::from_mappings(&mappings);
    assert_eq!(
        result.unwrap_err(),
        PlotError::UnknownEdgeMapping("sparkle".to_string())
    );
}
