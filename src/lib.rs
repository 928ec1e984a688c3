//! Renders a site network (discrete spatial locations in a periodic cell,
//! together with directed pairwise relations between them) as an annotated
//! 3D scene description.
//!
//! The crate stops at fully materialized layer descriptors (see [`scene`]):
//! marker layers for the sites themselves and one line collection for the
//! pairwise relations, with periodic-boundary handling throughout. Edge
//! segments follow the minimum-image convention, and sites whose nearest
//! periodic image lies outside the primary cell get faded "ghost" replicas.
//! Actually putting those layers onto a rendering surface, drawing the
//! reference structure underneath, and resolving colormap names are the
//! embedding application's job.
//!
//! Entry point: build a [`network::SiteNetwork`], configure a
//! [`plotter::SiteNetworkPlotter`], call
//! [`plot`](plotter::SiteNetworkPlotter::plot).

pub mod network;
pub mod pbc;
pub mod plotter;
pub mod scene;
pub mod util;
