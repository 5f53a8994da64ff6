use ndarray::Array2;
use tracing::debug;

use crate::core::lookup::LookupTable;
use crate::error::{Error, Result};
use crate::types::CollisionPolicy;

/// Scatter one ground-projected band back onto a `(rows, cols)` slant-range grid.
///
/// The output starts as NaN; slant pixels no ground pixel maps to stay NaN
/// (holes for [`crate::core::processing::fill::fill_gaps`]). Collisions are
/// resolved by `policy`.
pub fn project_band_to_slant(
    ground: &Array2<f64>,
    lookup: &LookupTable,
    target: (usize, usize),
    policy: CollisionPolicy,
) -> Result<Array2<f64>> {
    if ground.dim() != lookup.dim() {
        return Err(Error::ShapeMismatch {
            what: "ground band",
            expected: lookup.dim(),
            actual: ground.dim(),
        });
    }
    lookup.ensure_within(target.0, target.1)?;
    Ok(scatter_band(ground, lookup, target, policy))
}

/// [`project_band_to_slant`] for a ground band of the lookup's shape and a
/// lookup already checked with `ensure_within` against `target`.
pub(crate) fn scatter_band(
    ground: &Array2<f64>,
    lookup: &LookupTable,
    target: (usize, usize),
    policy: CollisionPolicy,
) -> Array2<f64> {
    let slant = match policy {
        CollisionPolicy::LastWrite => {
            let mut slant = Array2::from_elem(target, f64::NAN);
            for ((y, x), (row, col)) in lookup.mapped_pixels() {
                slant[[row, col]] = ground[[y, x]];
            }
            slant
        }
        CollisionPolicy::Mean => {
            let mut sum = Array2::<f64>::zeros(target);
            let mut hits = Array2::<u32>::zeros(target);
            for ((y, x), (row, col)) in lookup.mapped_pixels() {
                let v = ground[[y, x]];
                if v.is_finite() {
                    sum[[row, col]] += v;
                    hits[[row, col]] += 1;
                }
            }
            let mut slant = sum;
            slant.zip_mut_with(&hits, |s, &n| {
                *s = if n > 0 { *s / n as f64 } else { f64::NAN };
            });
            slant
        }
    };

    debug!(
        "scattered {}x{} ground band onto {}x{} slant grid ({})",
        ground.dim().0,
        ground.dim().1,
        target.0,
        target.1,
        policy
    );
    slant
}

/// Count of NaN pixels in a band.
pub fn count_holes(band: &Array2<f64>) -> usize {
    band.iter().filter(|v| v.is_nan()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lookup::UNMAPPED_PIXEL;
    use ndarray::array;

    #[test]
    fn scatter_inverts_gather_on_mapped_pixels() {
        let lookup = LookupTable::new(
            array![[0, 0], [1, UNMAPPED_PIXEL]],
            array![[0, 1], [1, 0]],
        )
        .unwrap();
        let ground = array![[1.0, 2.0], [6.0, 99.0]];
        let slant =
            project_band_to_slant(&ground, &lookup, (2, 3), CollisionPolicy::LastWrite).unwrap();

        assert_eq!(slant[[0, 0]], 1.0);
        assert_eq!(slant[[0, 1]], 2.0);
        assert_eq!(slant[[1, 1]], 6.0);
        assert_eq!(count_holes(&slant), 3);
    }

    #[test]
    fn last_write_follows_row_major_order() {
        let lookup = LookupTable::new(array![[0, 0], [0, 0]], array![[0, 0], [0, 0]]).unwrap();
        let ground = array![[1.0, 2.0], [3.0, 4.0]];
        let slant =
            project_band_to_slant(&ground, &lookup, (1, 1), CollisionPolicy::LastWrite).unwrap();
        assert_eq!(slant[[0, 0]], 4.0);
    }

    #[test]
    fn mean_averages_finite_contributions() {
        let lookup = LookupTable::new(array![[0, 0, 0, 1]], array![[0, 0, 0, 0]]).unwrap();
        let ground = array![[1.0, f64::NAN, 3.0, f64::NAN]];
        let slant =
            project_band_to_slant(&ground, &lookup, (2, 1), CollisionPolicy::Mean).unwrap();
        assert_eq!(slant[[0, 0]], 2.0);
        assert!(slant[[1, 0]].is_nan());
    }

    #[test]
    fn ground_band_must_match_lookup() {
        let lookup = LookupTable::new(Array2::zeros((2, 2)), Array2::zeros((2, 2))).unwrap();
        let err = project_band_to_slant(
            &Array2::zeros((3, 2)),
            &lookup,
            (4, 4),
            CollisionPolicy::LastWrite,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn target_too_small_is_geometry_mismatch() {
        let lookup = LookupTable::new(array![[3]], array![[0]]).unwrap();
        let err = project_band_to_slant(
            &array![[1.0]],
            &lookup,
            (3, 1),
            CollisionPolicy::LastWrite,
        )
        .unwrap_err();
        assert!(matches!(err, Error::GeometryMismatch(_)));
    }
}
