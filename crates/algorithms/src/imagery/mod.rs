//! Imagery analysis algorithms
//!
//! Normalized-difference spectral indices computed from single-band
//! reflectance rasters (one band per raster).

mod indices;

pub use indices::{ndvi, ndwi, normalized_difference};
