//! End-to-end run over the native I/O backend: synthesize two bands,
//! compute NDVI, write it out, clip it to a sub-extent, read the clip back
//! and convert its origin to UTM.

use eokit_algorithms::imagery::ndvi;
use eokit_algorithms::projection::latlon_to_utm;
use eokit_core::bounds::BoundingBox;
use eokit_core::io::{clip_geotiff, read_geotiff, write_geotiff};
use eokit_core::{GeoTransform, Raster};

/// 20x20 synthetic scene near 3°E, 40°N. The cell size is an exact binary
/// fraction (1/64°) so window edges land on pixel boundaries.
const CELL: f64 = 0.015625;

fn scene_transform() -> GeoTransform {
    GeoTransform::new(3.0, 40.0, CELL, -CELL)
}

fn make_band(vegetated: f64, bare: f64) -> Raster<f64> {
    let mut band = Raster::filled(20, 20, bare);
    band.set_transform(scene_transform());
    // Vegetated block in the upper-left quadrant
    for row in 0..10 {
        for col in 0..10 {
            band.set(row, col, vegetated).unwrap();
        }
    }
    band
}

#[test]
fn ndvi_clip_and_convert() {
    let nir = make_band(0.8, 0.3);
    let red = make_band(0.2, 0.3);

    let index = ndvi(&nir, &red).unwrap();
    assert_eq!(index.shape(), (20, 20));

    let vegetated = index.get(5, 5).unwrap();
    let bare = index.get(15, 15).unwrap();
    assert!((vegetated - (0.8 - 0.2) / (0.8 + 0.2 + 1e-6)).abs() < 1e-6);
    assert!(bare.abs() < 1e-6);

    let dir = tempfile::tempdir().unwrap();
    let full_path = dir.path().join("ndvi.tif");
    let clip_path = dir.path().join("ndvi_clip.tif");

    write_geotiff(&index, &full_path, None).unwrap();

    // Clip to the vegetated quadrant (10 x 10 cells)
    let bounds = BoundingBox::new(3.0, 40.0 - 10.0 * CELL, 3.0 + 10.0 * CELL, 40.0);
    clip_geotiff(&full_path, &bounds, &clip_path).unwrap();

    let clipped: Raster<f32> = read_geotiff(&clip_path, None).unwrap();
    assert_eq!(clipped.shape(), (10, 10));
    assert!((clipped.transform().origin_x - 3.0).abs() < 1e-9);
    assert!((clipped.transform().origin_y - 40.0).abs() < 1e-9);
    assert!((clipped.get(5, 5).unwrap() as f64 - vegetated).abs() < 1e-6);

    // The clip origin in UTM: 3°E is the zone 31 central meridian
    let (easting, northing, zone) = latlon_to_utm(40.0, 3.0).unwrap();
    assert_eq!(zone, 31);
    assert!((easting - 500_000.0).abs() < 0.01);
    assert!(northing > 4_400_000.0 && northing < 4_500_000.0);
}

#[test]
fn clip_outside_extent_does_not_panic() {
    let nir = make_band(0.8, 0.3);

    let dir = tempfile::tempdir().unwrap();
    let full_path = dir.path().join("band.tif");
    let clip_path = dir.path().join("band_clip.tif");
    write_geotiff(&nir, &full_path, None).unwrap();

    // Entirely west of the scene; the empty window is handed to the
    // encoder, whose verdict is surfaced as a plain Result.
    let bounds = BoundingBox::new(-10.0, 39.5, -9.5, 40.0);
    let _ = clip_geotiff(&full_path, &bounds, &clip_path);
}
