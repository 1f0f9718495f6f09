//! Geographic (WGS84) to UTM coordinate conversion
//!
//! The zone number is derived from longitude alone; the forward projection
//! runs through GDAL/PROJ when the `gdal` feature is enabled and through a
//! pure-Rust transverse Mercator otherwise. Both routes use the zone's
//! projection without a south flag, so the returned triple carries no
//! hemisphere indicator and southern-hemisphere latitudes come back with
//! negative northings; callers needing the hemisphere infer it from the
//! latitude sign.

#[cfg(not(feature = "gdal"))]
mod tmerc;

use eokit_core::Result;

#[cfg(feature = "gdal")]
use eokit_core::{Crs, Error};
#[cfg(not(feature = "gdal"))]
use eokit_core::Error;

/// UTM zone number for a longitude in decimal degrees:
/// `floor((lon + 180) / 6) + 1`.
///
/// No special-casing of polar regions or the antimeridian; out-of-range
/// longitudes produce out-of-range zones.
pub fn utm_zone(lon: f64) -> u32 {
    (((lon + 180.0) / 6.0).floor() + 1.0) as u32
}

/// Convert geographic coordinates (latitude, longitude in decimal degrees,
/// WGS84) to UTM coordinates.
///
/// Returns `(easting, northing, zone)` in metres and the zone number. The
/// projection is rebuilt on every call; nothing is cached. Inputs outside
/// the valid geographic range are passed through to the projection
/// unchanged.
pub fn latlon_to_utm(lat: f64, lon: f64) -> Result<(f64, f64, u32)> {
    let zone = utm_zone(lon);
    let (easting, northing) = project_to_zone(lon, lat, zone)?;
    Ok((easting, northing, zone))
}

#[cfg(feature = "gdal")]
fn project_to_zone(lon: f64, lat: f64, zone: u32) -> Result<(f64, f64)> {
    use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

    let crs = Crs::utm(zone);
    let Some(proj) = crs.proj() else {
        return Err(Error::Projection(format!(
            "no projection definition for zone {zone}"
        )));
    };

    let geographic = SpatialRef::from_epsg(4326)?;
    let projected = SpatialRef::from_proj4(proj)?;
    // Force (lon, lat) / (easting, northing) axis order on both ends
    geographic.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    projected.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let transform = CoordTransform::new(&geographic, &projected)?;

    let mut xs = [lon];
    let mut ys = [lat];
    transform.transform_coords(&mut xs, &mut ys, &mut [])?;

    Ok((xs[0], ys[0]))
}

#[cfg(not(feature = "gdal"))]
fn project_to_zone(lon: f64, lat: f64, zone: u32) -> Result<(f64, f64)> {
    // PROJ rejects a zone outside 1-60 when parsing the projection string;
    // the native route fails the same way.
    if !(1..=60).contains(&zone) {
        return Err(Error::Projection(format!(
            "invalid UTM zone {zone} for longitude {lon}"
        )));
    }

    Ok(tmerc::wgs84_to_utm(lon, lat, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert two values are within `tol` of each other.
    fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
        let diff = (a - b).abs();
        assert!(
            diff < tol,
            "{msg}: expected {b}, got {a}, diff {diff} exceeds tolerance {tol}"
        );
    }

    #[test]
    fn zone_from_longitude() {
        assert_eq!(utm_zone(3.0), 31);
        assert_eq!(utm_zone(-177.0), 1);
        assert_eq!(utm_zone(-180.0), 1);
        assert_eq!(utm_zone(179.9), 60);
        assert_eq!(utm_zone(0.0), 31);
    }

    #[test]
    fn zone_reported_in_result() {
        let (_, _, zone) = latlon_to_utm(0.0, 3.0).unwrap();
        assert_eq!(zone, 31);

        let (_, _, zone) = latlon_to_utm(0.0, -177.0).unwrap();
        assert_eq!(zone, 1);
    }

    // Equator on the zone 31 central meridian (3°E): easting is the false
    // easting, northing is zero.
    #[test]
    fn equator_central_meridian() {
        let (easting, northing, zone) = latlon_to_utm(0.0, 3.0).unwrap();
        assert_eq!(zone, 31);
        assert_close(easting, 500_000.0, 0.01, "easting at CM");
        assert_close(northing, 0.0, 0.01, "northing at equator");
    }

    // Reference values from PROJ 9.x:
    //   Transformer.from_crs("epsg:4326",
    //       "+proj=utm +zone=30 +datum=WGS84 +units=m +no_defs",
    //       always_xy=True).transform(-3.7037, 40.4168)
    //   -> (440298.94, 4474257.31)
    #[test]
    fn madrid_utm30() {
        let (easting, northing, zone) = latlon_to_utm(40.4168, -3.7037).unwrap();
        assert_eq!(zone, 30);
        assert_close(easting, 440_298.94, 1.0, "easting");
        assert_close(northing, 4_474_257.31, 1.0, "northing");
    }

    // Buenos Aires lands in zone 21; without a south flag in the zone
    // definition the northing is negative:
    //   (-58.3816, -34.6037) -> (373317.50, -3829963.83)
    #[test]
    fn buenos_aires_negative_northing() {
        let (easting, northing, zone) = latlon_to_utm(-34.6037, -58.3816).unwrap();
        assert_eq!(zone, 21);
        assert_close(easting, 373_317.50, 1.0, "easting");
        assert_close(northing, -3_829_963.83, 1.0, "northing");
    }

    #[test]
    fn conversion_is_deterministic() {
        let first = latlon_to_utm(47.3769, 8.5417).unwrap();
        let second = latlon_to_utm(47.3769, 8.5417).unwrap();
        assert_eq!(first, second);
    }
}
