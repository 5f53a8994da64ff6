use ndarray::Array2;
use tracing::debug;

use crate::core::lookup::LookupTable;
use crate::error::Result;

/// Project one slant-range band onto the ground grid described by `lookup`.
///
/// Mapped pixels take `source[azimuth, range]`; unmapped pixels are NaN.
/// No interpolation is done.
pub fn project_band_to_ground(source: &Array2<f64>, lookup: &LookupTable) -> Result<Array2<f64>> {
    let (rows, cols) = source.dim();
    lookup.ensure_within(rows, cols)?;
    Ok(gather_band(source, lookup))
}

/// [`project_band_to_ground`] for a lookup already checked with
/// `ensure_within` against the shape of `source`.
pub(crate) fn gather_band(source: &Array2<f64>, lookup: &LookupTable) -> Array2<f64> {
    let mut ground = Array2::from_elem(lookup.dim(), f64::NAN);
    for ((y, x), (row, col)) in lookup.mapped_pixels() {
        ground[[y, x]] = source[[row, col]];
    }
    debug!(
        "gathered {}x{} slant band onto {}x{} ground grid",
        source.dim().0,
        source.dim().1,
        lookup.dim().0,
        lookup.dim().1
    );
    ground
}

/// Band-by-band [`project_band_to_ground`].
pub fn project_bands_to_ground(
    bands: &[Array2<f64>],
    lookup: &LookupTable,
) -> Result<Vec<Array2<f64>>> {
    bands
        .iter()
        .map(|band| project_band_to_ground(band, lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lookup::UNMAPPED_PIXEL;
    use crate::error::Error;
    use ndarray::array;

    fn source_4x4() -> Array2<f64> {
        array![
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0]
        ]
    }

    #[test]
    fn boundary_scenario() {
        let lookup = LookupTable::new(
            array![[0, 0], [UNMAPPED_PIXEL, 1]],
            array![[0, 1], [0, UNMAPPED_PIXEL]],
        )
        .unwrap();
        let ground = project_band_to_ground(&source_4x4(), &lookup).unwrap();
        assert_eq!(ground[[0, 0]], 1.0);
        assert_eq!(ground[[0, 1]], 2.0);
        assert!(ground[[1, 0]].is_nan());
        assert!(ground[[1, 1]].is_nan());
    }

    #[test]
    fn gather_reads_azimuth_as_row_and_range_as_column() {
        let lookup = LookupTable::new(array![[2, 3]], array![[1, 0]]).unwrap();
        let ground = project_band_to_ground(&source_4x4(), &lookup).unwrap();
        assert_eq!(ground, array![[10.0, 13.0]]);
    }

    #[test]
    fn lookup_outside_source_fails() {
        let lookup = LookupTable::new(array![[4]], array![[0]]).unwrap();
        let err = project_band_to_ground(&source_4x4(), &lookup).unwrap_err();
        assert!(matches!(err, Error::GeometryMismatch(_)));
    }

    #[test]
    fn bands_are_independent() {
        let lookup = LookupTable::new(
            array![[3, 0], [1, UNMAPPED_PIXEL]],
            array![[3, 2], [0, 1]],
        )
        .unwrap();
        let a = source_4x4();
        let b = source_4x4().mapv(|v| -v * 10.0);

        let forward = project_bands_to_ground(&[a.clone(), b.clone()], &lookup).unwrap();
        let swapped = project_bands_to_ground(&[b, a], &lookup).unwrap();

        assert_eq!(forward[0][[0, 0]], 16.0);
        assert_eq!(forward[1][[0, 0]], -160.0);
        for (f, s) in forward.iter().zip(swapped.iter().rev()) {
            for (fv, sv) in f.iter().zip(s.iter()) {
                assert!(fv == sv || (fv.is_nan() && sv.is_nan()));
            }
        }
    }

    #[test]
    fn prevalidated_gather_matches_checked_gather() {
        let lookup = LookupTable::new(
            array![[3, 0, UNMAPPED_PIXEL], [1, 2, 0]],
            array![[3, 2, 0], [0, 1, 1]],
        )
        .unwrap();
        lookup.ensure_within(4, 4).unwrap();
        let checked = project_band_to_ground(&source_4x4(), &lookup).unwrap();
        let unchecked = gather_band(&source_4x4(), &lookup);
        for (c, u) in checked.iter().zip(unchecked.iter()) {
            assert!(c == u || (c.is_nan() && u.is_nan()));
        }
        assert_eq!(unchecked[[1, 1]], 10.0);
    }
}
