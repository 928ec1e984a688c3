pub mod pair_matrix;
pub mod site_attribute;
pub mod site_network;

// Re-export types for convenience
pub use pair_matrix::PairMatrix;
pub use site_attribute::{PairValues, SiteAttribute};
pub use site_network::{NetworkError, SiteNetwork};
