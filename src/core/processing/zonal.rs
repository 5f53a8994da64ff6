//! Zonal statistics of a raster window under a rasterised ROI mask.
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Pixel window of a raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub x_off: usize,
    pub y_off: usize,
    pub cols: usize,
    pub rows: usize,
}

/// Summary of the samples inside one ROI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonalStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std: f64,
    /// Pixels inside the ROI, NaN samples included
    pub count: usize,
}

/// Window covering the envelope `(min_x, max_x, min_y, max_y)` of an ROI on a
/// north-up raster, or `None` when it is not fully inside `size` (cols, rows).
pub fn roi_window(
    envelope: (f64, f64, f64, f64),
    geotransform: &[f64; 6],
    size: (usize, usize),
) -> Option<Window> {
    let (min_x, max_x, min_y, max_y) = envelope;
    let pixel_width = geotransform[1];
    let pixel_height = geotransform[5].abs();
    if pixel_width <= 0.0 || pixel_height <= 0.0 {
        return None;
    }

    let x_off = ((min_x - geotransform[0]) / pixel_width).trunc();
    let y_off = ((geotransform[3] - max_y) / pixel_height).trunc();
    let cols = ((max_x - min_x) / pixel_width).trunc() + 1.0;
    let rows = ((max_y - min_y) / pixel_height).trunc() + 1.0;

    if !(x_off.is_finite() && y_off.is_finite() && cols.is_finite() && rows.is_finite()) {
        return None;
    }
    if x_off < 0.0
        || y_off < 0.0
        || x_off + cols > size.0 as f64
        || y_off + rows > size.1 as f64
    {
        return None;
    }

    Some(Window {
        x_off: x_off as usize,
        y_off: y_off as usize,
        cols: cols as usize,
        rows: rows as usize,
    })
}

/// Statistics of `values` where `mask` is non-zero. NaN samples count towards
/// `count` but are ignored by the other fields, which are NaN when no finite
/// sample remains.
pub fn zonal_stats(values: &Array2<f64>, mask: &Array2<u8>) -> ZonalStats {
    let mut count = 0usize;
    let mut n = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (&v, &m) in values.iter().zip(mask.iter()) {
        if m == 0 {
            continue;
        }
        count += 1;
        if v.is_nan() {
            continue;
        }
        n += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if n == 0 {
        return ZonalStats {
            mean: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std: f64::NAN,
            count,
        };
    }

    let mean = sum / n as f64;
    let var = values
        .iter()
        .zip(mask.iter())
        .filter(|&(v, &m)| m != 0 && !v.is_nan())
        .map(|(&v, _)| (v - mean) * (v - mean))
        .sum::<f64>()
        / n as f64;

    ZonalStats {
        mean,
        min,
        max,
        std: var.sqrt(),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    const GT: [f64; 6] = [1000.0, 10.0, 0.0, 5000.0, 0.0, -10.0];

    #[test]
    fn window_inside_raster() {
        let w = roi_window((1020.0, 1050.0, 4930.0, 4980.0), &GT, (100, 100)).unwrap();
        assert_eq!(
            w,
            Window {
                x_off: 2,
                y_off: 2,
                cols: 4,
                rows: 6
            }
        );
    }

    #[test]
    fn window_outside_raster_is_none() {
        assert!(roi_window((990.0, 1050.0, 4930.0, 4980.0), &GT, (100, 100)).is_none());
        assert!(roi_window((1020.0, 1050.0, 4930.0, 5010.0), &GT, (100, 100)).is_none());
        assert!(roi_window((1020.0, 1050.0, 4930.0, 4980.0), &GT, (5, 100)).is_none());
    }

    #[test]
    fn stats_ignore_masked_and_nan_samples() {
        let values = array![[1.0, 2.0, 100.0], [3.0, f64::NAN, 4.0]];
        let mask = array![[1u8, 1, 0], [1, 1, 1]];
        let stats = zonal_stats(&values, &mask);
        assert_eq!(stats.count, 5);
        assert_relative_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_relative_eq!(stats.std, 1.25f64.sqrt());
    }

    #[test]
    fn all_nan_roi_has_nan_stats() {
        let values = array![[f64::NAN, f64::NAN]];
        let mask = array![[1u8, 1]];
        let stats = zonal_stats(&values, &mask);
        assert_eq!(stats.count, 2);
        assert!(stats.mean.is_nan() && stats.std.is_nan());
    }
}
