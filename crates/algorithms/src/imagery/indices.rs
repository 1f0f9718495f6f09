//! Normalized-difference spectral indices

use crate::maybe_rayon::*;
use eokit_core::raster::{Raster, RasterElement};
use eokit_core::{Error, Result};
use ndarray::Array2;

/// Offset added to the denominator to keep all-zero cells finite.
const EPSILON: f64 = 1e-6;

/// Compute the normalized difference between two bands:
///
/// `(band_a - band_b) / (band_a + band_b + 1e-6)`
///
/// Cell values are cast to f64 before the subtraction, so integer bands
/// never overflow or truncate. The result is clamped to [-1, 1]. Cells where
/// both bands are zero come out as 0, not NaN; cells where either band is
/// nodata come out as NaN, and the output's nodata value is NaN.
///
/// # Arguments
/// * `band_a` - Numerator positive band
/// * `band_b` - Numerator negative band
pub fn normalized_difference<T: RasterElement>(
    band_a: &Raster<T>,
    band_b: &Raster<T>,
) -> Result<Raster<f64>> {
    if band_a.shape() != band_b.shape() {
        return Err(Error::SizeMismatch {
            er: band_a.rows(),
            ec: band_a.cols(),
            ar: band_b.rows(),
            ac: band_b.cols(),
        });
    }

    let (rows, cols) = band_a.shape();
    let nodata_a = band_a.nodata();
    let nodata_b = band_b.nodata();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for col in 0..cols {
                let a = unsafe { band_a.get_unchecked(row, col) };
                let b = unsafe { band_b.get_unchecked(row, col) };

                if a.is_nodata(nodata_a) || b.is_nodata(nodata_b) {
                    continue;
                }
                let (Some(a), Some(b)) = (a.to_f64(), b.to_f64()) else {
                    continue;
                };

                let nd = (a - b) / (a + b + EPSILON);
                row_data[col] = nd.clamp(-1.0, 1.0);
            }
            row_data
        })
        .collect();

    let mut output = band_a.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Values range from -1 to 1:
/// - Dense vegetation: 0.6 to 0.9
/// - Sparse vegetation: 0.2 to 0.5
/// - Bare soil: 0.1 to 0.2
/// - Water/clouds: -1.0 to 0.0
///
/// # Arguments
/// * `nir` - Near-infrared band
/// * `red` - Red band
pub fn ndvi<T: RasterElement>(nir: &Raster<T>, red: &Raster<T>) -> Result<Raster<f64>> {
    normalized_difference(nir, red)
}

/// Normalized Difference Water Index (McFeeters, 1996)
///
/// `NDWI = (Green - NIR) / (Green + NIR)`
///
/// Positive values indicate water bodies.
pub fn ndwi<T: RasterElement>(green: &Raster<T>, nir: &Raster<T>) -> Result<Raster<f64>> {
    normalized_difference(green, nir)
}
