//! # EoKit Core
//!
//! Core types and I/O for the EoKit Earth Observation utilities.
//!
//! This crate provides:
//! - `Raster<T>`: Generic georeferenced raster grid
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `BoundingBox` / `PixelWindow`: Geographic extents and the pixel windows
//!   derived from them
//! - `Crs`: Coordinate Reference System handling
//! - GeoTIFF reading, writing and clipping

pub mod bounds;
pub mod crs;
pub mod error;
pub mod io;
pub mod raster;

pub use bounds::{BoundingBox, PixelWindow};
pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bounds::{BoundingBox, PixelWindow};
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
}
