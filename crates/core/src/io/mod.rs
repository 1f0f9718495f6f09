//! Reading, writing and clipping of georeferenced raster files

#[cfg(feature = "gdal")]
mod gdal_io;
mod native;

#[cfg(feature = "gdal")]
pub use gdal_io::{clip_geotiff, read_geotiff, read_geotiff_window, write_geotiff, GeoTiffOptions};

#[cfg(not(feature = "gdal"))]
pub use native::{clip_geotiff, read_geotiff, read_geotiff_window, write_geotiff, GeoTiffOptions};

// Buffer-based I/O (always available, no filesystem dependency)
pub use native::{read_geotiff_from_buffer, write_geotiff_to_buffer};
