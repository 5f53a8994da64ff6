use std::ffi::c_int;

use gdal::DriverManager;
use gdal::raster::Buffer;
use ndarray::Array2;
use tracing::{debug, info};

use crate::core::params::GapFillParams;
use crate::core::processing::scatter::count_holes;
use crate::error::{Error, Result};

/// Fill NaN pixels of `band` in place from nearby valid samples.
///
/// Delegates to GDAL's `FillNodata` (inverse-distance weighting over a
/// quadrant search) on a scratch in-memory dataset. Pixels farther than
/// `search_radius` from any valid sample stay NaN. Returns the number of
/// pixels filled.
pub fn fill_gaps(band: &mut Array2<f64>, params: &GapFillParams) -> Result<usize> {
    let smoothing = c_int::try_from(params.smoothing_iterations).map_err(|_| {
        Error::InvalidArgument {
            arg: "smoothing_iterations",
            value: params.smoothing_iterations.to_string(),
        }
    })?;

    let holes = count_holes(band);
    if holes == 0 || holes == band.len() || params.search_radius <= 0.0 {
        debug!(
            "gap fill skipped: {} holes of {} pixels, radius {}",
            holes,
            band.len(),
            params.search_radius
        );
        return Ok(0);
    }

    let (rows, cols) = band.dim();
    let driver = DriverManager::get_driver_by_name("MEM")?;

    let data_ds = driver.create_with_band_type::<f64, _>("", cols, rows, 1)?;
    let mut data_band = data_ds.rasterband(1)?;
    let mut data_buf = Buffer::new((cols, rows), band.iter().copied().collect::<Vec<f64>>());
    data_band.write((0, 0), (cols, rows), &mut data_buf)?;

    // 1 = valid sample, 0 = pixel to interpolate
    let mask_ds = driver.create_with_band_type::<u8, _>("", cols, rows, 1)?;
    let mut mask_band = mask_ds.rasterband(1)?;
    let mut mask_buf = Buffer::new(
        (cols, rows),
        band.iter().map(|v| u8::from(!v.is_nan())).collect::<Vec<u8>>(),
    );
    mask_band.write((0, 0), (cols, rows), &mut mask_buf)?;

    let rc = unsafe {
        gdal_sys::GDALFillNodata(
            data_band.c_rasterband(),
            mask_band.c_rasterband(),
            params.search_radius,
            0,
            smoothing,
            std::ptr::null_mut(),
            None,
            std::ptr::null_mut(),
        )
    };
    if rc != gdal_sys::CPLErr::CE_None {
        return Err(Error::Processing(format!(
            "GDALFillNodata failed on {}x{} band (CPLErr {})",
            cols, rows, rc
        )));
    }

    let filled = data_band.read_as::<f64>((0, 0), (cols, rows), (cols, rows), None)?;
    let filled = Array2::from_shape_vec((rows, cols), filled.data().to_vec())
        .map_err(|e| Error::Processing(e.to_string()))?;
    *band = filled;

    let remaining = count_holes(band);
    let count = holes - remaining;
    info!(
        "gap fill: {} of {} holes filled ({} left beyond radius {})",
        count, holes, remaining, params.search_radius
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn oversized_smoothing_count_is_rejected() {
        let mut band = array![[1.0, f64::NAN], [3.0, 4.0]];
        let params = GapFillParams {
            search_radius: 5.0,
            smoothing_iterations: u32::MAX,
        };
        let err = fill_gaps(&mut band, &params).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                arg: "smoothing_iterations",
                ..
            }
        ));
        assert!(band[[0, 1]].is_nan());
    }
}
