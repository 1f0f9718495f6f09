//! # EoKit Algorithms
//!
//! Earth Observation helper algorithms for EoKit.
//!
//! ## Available Algorithm Categories
//!
//! - **imagery**: Normalized-difference spectral indices (NDVI, NDWI)
//! - **projection**: Geographic (WGS84) to UTM coordinate conversion
//!
//! Raster clipping lives with the I/O backends in
//! [`eokit_core::io`](eokit_core::io).

pub(crate) mod maybe_rayon;

pub mod imagery;
pub mod projection;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{ndvi, ndwi, normalized_difference};
    pub use crate::projection::{latlon_to_utm, utm_zone};
    pub use eokit_core::prelude::*;
}
