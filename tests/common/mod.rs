#![allow(dead_code)]

use std::path::Path;

use gdal::DriverManager;
use gdal::raster::{Buffer, GdalType};
use ndarray::Array2;

pub const GROUND_GT: [f64; 6] = [500_000.0, 10.0, 0.0, 6_500_000.0, 0.0, -10.0];

/// Write `bands` into a new GeoTIFF of sample type `T`.
pub fn write_tiff<T: GdalType + Copy>(
    path: &Path,
    bands: &[Array2<T>],
    geotransform: Option<[f64; 6]>,
) {
    let (rows, cols) = bands[0].dim();
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<T, _>(path, cols, rows, bands.len())
        .unwrap();
    if let Some(gt) = geotransform {
        ds.set_geo_transform(&gt).unwrap();
    }
    for (i, band) in bands.iter().enumerate() {
        let mut rb = ds.rasterband(i + 1).unwrap();
        let mut buf = Buffer::new((cols, rows), band.iter().copied().collect::<Vec<T>>());
        rb.write((0, 0), (cols, rows), &mut buf).unwrap();
    }
}

pub fn write_f32(path: &Path, bands: &[Array2<f64>], geotransform: Option<[f64; 6]>) {
    let bands: Vec<Array2<f32>> = bands.iter().map(|b| b.mapv(|v| v as f32)).collect();
    write_tiff(path, &bands, geotransform);
}

/// Lookups are stored as UInt16, like the files produced by the geocoding chain.
pub fn write_lookups(dir: &Path, azimuth: &Array2<i32>, range: &Array2<i32>) -> (std::path::PathBuf, std::path::PathBuf) {
    let az_path = dir.join("az.tiff");
    let rg_path = dir.join("rg.tiff");
    write_tiff(&az_path, &[azimuth.mapv(|v| v as u16)], Some(GROUND_GT));
    write_tiff(&rg_path, &[range.mapv(|v| v as u16)], Some(GROUND_GT));
    (az_path, rg_path)
}

pub fn read_bands(path: &Path) -> Vec<Array2<f64>> {
    let reader = sarproj::RasterReader::open(path).unwrap();
    (1..=reader.metadata.bands)
        .map(|index| reader.read_band(index).unwrap())
        .collect()
}

pub fn same_or_both_nan(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
