use glam::f64::DVec3;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::network::site_attribute::{PairValues, SiteAttribute};
use crate::pbc::UnitCell;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Attribute '{name}' has {len} values but the network has {sites} sites")]
    AttributeLength {
        name: String,
        len: usize,
        sites: usize,
    },

    #[error("Pair attribute '{name}' relates {n} sites but the network has {sites} sites")]
    MatrixSize { name: String, n: usize, sites: usize },
}

/// A set of sites in a periodic cell, together with named data columns.
///
/// Per-site attributes hold one value per site; per-pair attributes hold a
/// full n-by-n matrix of directed relations between sites. Both are looked
/// up by name; insertion validates shapes against the site count.
#[derive(Debug, Clone)]
pub struct SiteNetwork {
    cell: UnitCell,
    positions: Vec<DVec3>,
    site_attributes: FxHashMap<String, SiteAttribute>,
    pair_attributes: FxHashMap<String, PairValues>,
}

impl SiteNetwork {
    pub fn new(cell: UnitCell, positions: Vec<DVec3>) -> Self {
        SiteNetwork {
            cell,
            positions,
            site_attributes: FxHashMap::default(),
            pair_attributes: FxHashMap::default(),
        }
    }

    pub fn n_sites(&self) -> usize {
        self.positions.len()
    }

    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn position(&self, site: usize) -> DVec3 {
        self.positions[site]
    }

    /// Attaches a per-site attribute column under the given name, replacing
    /// any previous column with that name.
    ///
    /// Fails if the column length does not match the number of sites.
    pub fn add_site_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: SiteAttribute,
    ) -> Result<(), NetworkError> {
        let name = name.into();
        if attribute.len() != self.n_sites() {
            return Err(NetworkError::AttributeLength {
                name,
                len: attribute.len(),
                sites: self.n_sites(),
            });
        }
        self.site_attributes.insert(name, attribute);
        Ok(())
    }

    /// Attaches a per-pair attribute matrix under the given name, replacing
    /// any previous matrix with that name.
    ///
    /// Fails if the matrix does not relate exactly the network's sites.
    pub fn add_pair_attribute(
        &mut self,
        name: impl Into<String>,
        values: PairValues,
    ) -> Result<(), NetworkError> {
        let name = name.into();
        if values.n() != self.n_sites() {
            return Err(NetworkError::MatrixSize {
                name,
                n: values.n(),
                sites: self.n_sites(),
            });
        }
        self.pair_attributes.insert(name, values);
        Ok(())
    }

    pub fn site_attribute(&self, name: &str) -> Option<&SiteAttribute> {
        self.site_attributes.get(name)
    }

    pub fn pair_attribute(&self, name: &str) -> Option<&PairValues> {
        self.pair_attributes.get(name)
    }

    /// Builds a derived network containing the listed sites at new positions.
    ///
    /// Entry k of the result takes its attributes from site `keep[k]` of this
    /// network and sits at `positions[k]`. Per-pair attributes do not carry
    /// over: the derived sites are replicas, not a relabeling, so the original
    /// pair relations do not apply to them.
    ///
    /// # Panics
    /// * Panics if `keep` and `positions` differ in length
    /// * Panics if any index in `keep` is out of bounds
    pub fn replicate_sites(&self, keep: &[usize], positions: Vec<DVec3>) -> SiteNetwork {
        assert_eq!(
            keep.len(),
            positions.len(),
            "Site index list and position list must have the same length"
        );
        let site_attributes = self
            .site_attributes
            .iter()
            .map(|(name, attribute)| (name.clone(), attribute.filtered(keep)))
            .collect();
        SiteNetwork {
            cell: self.cell.clone(),
            positions,
            site_attributes,
            pair_attributes: FxHashMap::default(),
        }
    }
}
