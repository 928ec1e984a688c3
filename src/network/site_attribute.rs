use crate::network::pair_matrix::PairMatrix;

/// A per-site attribute column: one value for each site in the network.
///
/// Continuous quantities (occupancies, energies) are stored as `Float`,
/// categorical ones (site types, cluster labels) as `Int`. Mapping code
/// decides per channel which variants it accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteAttribute {
    Float(Vec<f64>),
    Int(Vec<i32>),
}

impl SiteAttribute {
    pub fn len(&self) -> usize {
        match self {
            SiteAttribute::Float(values) => values.len(),
            SiteAttribute::Int(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the values as floats, widening integer attributes.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            SiteAttribute::Float(values) => values.clone(),
            SiteAttribute::Int(values) => values.iter().map(|v| *v as f64).collect(),
        }
    }

    /// Returns the values as discrete categories, rounding float attributes
    /// to the nearest integer.
    pub fn to_discrete(&self) -> Vec<i32> {
        match self {
            SiteAttribute::Float(values) => values.iter().map(|v| v.round() as i32).collect(),
            SiteAttribute::Int(values) => values.clone(),
        }
    }

    /// Builds a new attribute containing only the sites named in `keep`,
    /// in the given order.
    ///
    /// # Panics
    /// * Panics if any index in `keep` is out of bounds
    pub fn filtered(&self, keep: &[usize]) -> SiteAttribute {
        match self {
            SiteAttribute::Float(values) => {
                SiteAttribute::Float(keep.iter().map(|i| values[*i]).collect())
            }
            SiteAttribute::Int(values) => {
                SiteAttribute::Int(keep.iter().map(|i| values[*i]).collect())
            }
        }
    }
}

/// A per-pair attribute: one value for each ordered pair of sites.
#[derive(Debug, Clone, PartialEq)]
pub enum PairValues {
    Float(PairMatrix<f64>),
    Int(PairMatrix<i32>),
}

impl PairValues {
    /// Number of sites the underlying matrix relates.
    pub fn n(&self) -> usize {
        match self {
            PairValues::Float(matrix) => matrix.n(),
            PairValues::Int(matrix) => matrix.n(),
        }
    }

    pub fn as_float(&self) -> Option<&PairMatrix<f64>> {
        match self {
            PairValues::Float(matrix) => Some(matrix),
            PairValues::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<&PairMatrix<i32>> {
        match self {
            PairValues::Float(_) => None,
            PairValues::Int(matrix) => Some(matrix),
        }
    }
}
