use std::path::Path;

use gdal::raster::{Buffer, GdalDataType};
use gdal::{Dataset, DriverManager};
use ndarray::Array2;

use crate::error::{Error, Result};
use crate::io::gdal::Georeference;

/// Create a floating-point GeoTIFF with `bands` bands of `sample_type`.
/// Every band gets NaN as its no-data value.
pub fn create_float_tiff(
    output: &Path,
    cols: usize,
    rows: usize,
    bands: usize,
    sample_type: GdalDataType,
) -> Result<Dataset> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let ds = match sample_type {
        GdalDataType::Float32 => driver.create_with_band_type::<f32, _>(output, cols, rows, bands),
        GdalDataType::Float64 => driver.create_with_band_type::<f64, _>(output, cols, rows, bands),
        other => {
            return Err(Error::UnsupportedType {
                path: output.to_path_buf(),
                sample_type: format!("{:?}", other),
            });
        }
    }
    .map_err(|e| Error::open(output, e))?;

    for index in 1..=bands {
        ds.rasterband(index)?.set_no_data_value(Some(f64::NAN))?;
    }
    Ok(ds)
}

/// Copy geotransform and projection onto `ds`. Identity transforms are skipped
/// so ungeoreferenced outputs stay ungeoreferenced.
pub fn apply_georeference(ds: &mut Dataset, georef: &Georeference) -> Result<()> {
    if georef.is_identity() {
        return Ok(());
    }
    ds.set_geo_transform(&georef.geotransform)?;
    if !georef.projection.is_empty() {
        ds.set_projection(&georef.projection)?;
    }
    Ok(())
}

/// Write a full band (1-based index); GDAL converts f64 to the band type.
pub fn write_band(ds: &Dataset, index: usize, data: &Array2<f64>) -> Result<()> {
    let (rows, cols) = data.dim();
    let mut band = ds.rasterband(index)?;
    let mut buf = Buffer::new((cols, rows), data.iter().copied().collect::<Vec<f64>>());
    band.write((0, 0), (cols, rows), &mut buf)?;
    Ok(())
}
