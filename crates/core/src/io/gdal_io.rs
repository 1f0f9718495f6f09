//! GeoTIFF reading, writing and clipping using GDAL

use crate::bounds::{BoundingBox, PixelWindow};
use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use gdal::raster::{Buffer, GdalDataType, GdalType, RasterCreationOptions};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use std::path::Path;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Compression type: "DEFLATE", "LZW", "ZSTD", "NONE"
    pub compression: String,
    /// Tile size for tiled TIFFs (0 for strips)
    pub tile_size: usize,
    /// BigTIFF for files > 4GB
    pub bigtiff: bool,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self {
            compression: "DEFLATE".to_string(),
            tile_size: 256,
            bigtiff: false,
        }
    }
}

fn creation_options(opts: &GeoTiffOptions) -> RasterCreationOptions {
    let mut options = vec![format!("COMPRESS={}", opts.compression)];

    if opts.tile_size > 0 {
        options.push("TILED=YES".to_string());
        options.push(format!("BLOCKXSIZE={}", opts.tile_size));
        options.push(format!("BLOCKYSIZE={}", opts.tile_size));
    }

    if opts.bigtiff {
        options.push("BIGTIFF=YES".to_string());
    }

    RasterCreationOptions::from_iter(options.iter().map(String::as_str))
}

fn spatial_ref_from_crs(crs: &Crs) -> Result<Option<SpatialRef>> {
    if let Some(epsg) = crs.epsg() {
        return Ok(Some(SpatialRef::from_epsg(epsg)?));
    }
    if let Some(wkt) = crs.wkt() {
        return Ok(Some(SpatialRef::from_wkt(wkt)?));
    }
    if let Some(proj) = crs.proj() {
        return Ok(Some(SpatialRef::from_proj4(proj)?));
    }
    Ok(None)
}

/// Read a GeoTIFF file into a Raster
///
/// # Arguments
/// * `path` - Path to the GeoTIFF file
/// * `band` - Band number (1-indexed), defaults to 1
pub fn read_geotiff<T, P>(path: P, band: Option<usize>) -> Result<Raster<T>>
where
    T: RasterElement + GdalType,
    P: AsRef<Path>,
{
    let dataset = Dataset::open(path.as_ref())?;
    let (cols, rows) = dataset.raster_size();
    read_band(&dataset, band.unwrap_or(1), PixelWindow::full(cols, rows))
}

/// Read a window of a GeoTIFF file into a Raster.
///
/// Only the window is read from disk. The window is clamped to the file's
/// extent; the returned raster carries the shifted geotransform.
pub fn read_geotiff_window<T, P>(
    path: P,
    window: &PixelWindow,
    band: Option<usize>,
) -> Result<Raster<T>>
where
    T: RasterElement + GdalType,
    P: AsRef<Path>,
{
    let dataset = Dataset::open(path.as_ref())?;
    let (cols, rows) = dataset.raster_size();
    read_band(&dataset, band.unwrap_or(1), window.intersect_extent(cols, rows))
}

/// Internal: read one band of an open dataset over a clamped window
fn read_band<T>(dataset: &Dataset, band_idx: usize, window: PixelWindow) -> Result<Raster<T>>
where
    T: RasterElement + GdalType,
{
    let rasterband = dataset.rasterband(band_idx)?;

    let buffer = rasterband.read_as::<T>(
        (window.col_off, window.row_off),
        (window.cols, window.rows),
        (window.cols, window.rows),
        None,
    )?;

    let mut raster = Raster::from_vec(buffer.data().to_vec(), window.rows, window.cols)?;

    if let Ok(gt) = dataset.geo_transform() {
        raster.set_transform(GeoTransform::from_gdal(gt).window_transform(&window));
    }

    if let Some(crs) = dataset_crs(dataset) {
        raster.set_crs(Some(crs));
    }

    if let Some(nodata) = rasterband.no_data_value() {
        if let Some(nd) = T::from_f64(nodata) {
            raster.set_nodata(Some(nd));
        }
    }

    Ok(raster)
}

fn dataset_crs(dataset: &Dataset) -> Option<Crs> {
    let srs = dataset.spatial_ref().ok()?;
    if let Ok(code) = srs.auth_code() {
        return Some(Crs::from_epsg(code as u32));
    }
    srs.to_wkt().ok().map(Crs::from_wkt)
}

/// Write a Raster to a GeoTIFF file
///
/// # Arguments
/// * `raster` - The raster to write
/// * `path` - Output file path
/// * `options` - Optional GeoTIFF options
pub fn write_geotiff<T, P>(
    raster: &Raster<T>,
    path: P,
    options: Option<GeoTiffOptions>,
) -> Result<()>
where
    T: RasterElement + GdalType,
    P: AsRef<Path>,
{
    let opts = options.unwrap_or_default();
    let driver = DriverManager::get_driver_by_name("GTiff")?;

    let (rows, cols) = raster.shape();

    let mut dataset = driver.create_with_band_type_with_options::<T, _>(
        path.as_ref(),
        cols,
        rows,
        1,
        &creation_options(&opts),
    )?;

    dataset.set_geo_transform(&raster.transform().to_gdal())?;

    if let Some(crs) = raster.crs() {
        if let Some(srs) = spatial_ref_from_crs(crs)? {
            dataset.set_spatial_ref(&srs)?;
        }
    }

    let mut band = dataset.rasterband(1)?;

    if let Some(nodata) = raster.nodata().and_then(RasterElement::to_f64) {
        band.set_no_data_value(Some(nodata))?;
    }

    let data: Vec<T> = raster.data().iter().copied().collect();
    let mut buffer = Buffer::new((cols, rows), data);
    band.write((0, 0), (cols, rows), &mut buffer)?;

    Ok(())
}

/// Clip a GeoTIFF to a bounding box and write the result.
///
/// The read window is derived from `bounds` and the source geotransform,
/// clamped to the source extent, and only that window is read. The output
/// preserves the source's band count, per-band pixel format, CRS and nodata
/// values, with width, height and geotransform updated for the window.
/// Creates or overwrites `output`. A box that does not intersect the source
/// yields an empty window; GDAL's handling of zero-sized datasets is
/// surfaced unchanged.
pub fn clip_geotiff<P, Q>(input: P, bounds: &BoundingBox, output: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src = Dataset::open(input.as_ref())?;
    let transform = GeoTransform::from_gdal(src.geo_transform()?);
    let (cols, rows) = src.raster_size();
    let window = transform.window_from_bounds(bounds).intersect_extent(cols, rows);

    // GDALCreate takes a single pixel type for all bands; GeoTIFF bands are
    // homogeneous, so band 1 decides.
    match src.rasterband(1)?.band_type() {
        GdalDataType::UInt8 => clip_typed::<u8, _>(&src, &transform, &window, output),
        GdalDataType::UInt16 => clip_typed::<u16, _>(&src, &transform, &window, output),
        GdalDataType::Int16 => clip_typed::<i16, _>(&src, &transform, &window, output),
        GdalDataType::UInt32 => clip_typed::<u32, _>(&src, &transform, &window, output),
        GdalDataType::Int32 => clip_typed::<i32, _>(&src, &transform, &window, output),
        GdalDataType::Float32 => clip_typed::<f32, _>(&src, &transform, &window, output),
        GdalDataType::Float64 => clip_typed::<f64, _>(&src, &transform, &window, output),
        other => Err(Error::UnsupportedDataType(format!("{other:?}"))),
    }
}

/// Internal: copy every band of `src` over `window` into a new dataset
fn clip_typed<T, P>(
    src: &Dataset,
    transform: &GeoTransform,
    window: &PixelWindow,
    output: P,
) -> Result<()>
where
    T: GdalType + Copy,
    P: AsRef<Path>,
{
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let band_count = src.raster_count();

    let mut dst = driver.create_with_band_type_with_options::<T, _>(
        output.as_ref(),
        window.cols,
        window.rows,
        band_count,
        &creation_options(&GeoTiffOptions::default()),
    )?;

    dst.set_geo_transform(&transform.window_transform(window).to_gdal())?;

    if let Ok(srs) = src.spatial_ref() {
        dst.set_spatial_ref(&srs)?;
    }

    for idx in 1..=band_count {
        let src_band = src.rasterband(idx)?;
        let mut dst_band = dst.rasterband(idx)?;

        let mut buffer = src_band.read_as::<T>(
            (window.col_off, window.row_off),
            (window.cols, window.rows),
            (window.cols, window.rows),
            None,
        )?;
        dst_band.write((0, 0), (window.cols, window.rows), &mut buffer)?;

        if let Some(nodata) = src_band.no_data_value() {
            dst_band.set_no_data_value(Some(nodata))?;
        }
    }

    Ok(())
}
