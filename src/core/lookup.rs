//! Azimuth / range coordinate lookup rasters.
//!
//! For every pixel of the ground-projected grid the two rasters hold the
//! (row, column) of the matching pixel in the slant-range image. Pixels
//! outside the illuminated swath carry [`UNMAPPED_PIXEL`] in either grid.
use ndarray::{Array2, Zip};

use crate::error::{Error, Result};

/// Value written into the lookup rasters for ground pixels with no slant-range
/// counterpart. Existing lookup files use this exact number, so it must not
/// change.
pub const UNMAPPED_PIXEL: i32 = 55537;

/// Paired azimuth (row) and range (column) lookup grids of identical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    azimuth: Array2<i32>,
    range: Array2<i32>,
}

impl LookupTable {
    pub fn new(azimuth: Array2<i32>, range: Array2<i32>) -> Result<Self> {
        if azimuth.dim() != range.dim() {
            return Err(Error::ShapeMismatch {
                what: "range lookup",
                expected: azimuth.dim(),
                actual: range.dim(),
            });
        }
        Ok(Self { azimuth, range })
    }

    /// Shape of the ground-projected grid as (rows, cols).
    pub fn dim(&self) -> (usize, usize) {
        self.azimuth.dim()
    }

    pub fn azimuth(&self) -> &Array2<i32> {
        &self.azimuth
    }

    pub fn range(&self) -> &Array2<i32> {
        &self.range
    }

    /// True where both lookups hold a mapping.
    pub fn validity_mask(&self) -> Array2<bool> {
        let mut mask = Array2::from_elem(self.dim(), false);
        Zip::from(&mut mask)
            .and(&self.azimuth)
            .and(&self.range)
            .for_each(|m, &az, &rg| *m = az != UNMAPPED_PIXEL && rg != UNMAPPED_PIXEL);
        mask
    }

    pub fn valid_count(&self) -> usize {
        self.azimuth
            .iter()
            .zip(self.range.iter())
            .filter(|&(&az, &rg)| az != UNMAPPED_PIXEL && rg != UNMAPPED_PIXEL)
            .count()
    }

    /// Slant-range (row, col) for ground pixel (y, x), `None` when unmapped.
    ///
    /// Assumes [`LookupTable::ensure_within`] has accepted the table.
    pub fn source_index(&self, y: usize, x: usize) -> Option<(usize, usize)> {
        let az = self.azimuth[[y, x]];
        let rg = self.range[[y, x]];
        if az == UNMAPPED_PIXEL || rg == UNMAPPED_PIXEL {
            None
        } else {
            Some((az as usize, rg as usize))
        }
    }

    /// Iterate mapped pixels in row-major ground order as
    /// `((y, x), (row, col))`.
    pub fn mapped_pixels(&self) -> impl Iterator<Item = ((usize, usize), (usize, usize))> + '_ {
        let cols = self.dim().1;
        (0..self.azimuth.len()).filter_map(move |i| {
            let (y, x) = (i / cols, i % cols);
            self.source_index(y, x).map(|src| ((y, x), src))
        })
    }

    /// Fail unless every mapped entry addresses a pixel of a `rows x cols` grid.
    pub fn ensure_within(&self, rows: usize, cols: usize) -> Result<()> {
        for ((y, x), &az) in self.azimuth.indexed_iter() {
            let rg = self.range[[y, x]];
            if az == UNMAPPED_PIXEL || rg == UNMAPPED_PIXEL {
                continue;
            }
            if az < 0 || rg < 0 || az as usize >= rows || rg as usize >= cols {
                return Err(Error::GeometryMismatch(format!(
                    "lookup at ground pixel ({y}, {x}) points to ({az}, {rg}), outside the {rows}x{cols} slant-range grid"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn boundary_table() -> LookupTable {
        LookupTable::new(
            array![[0, 0], [UNMAPPED_PIXEL, 1]],
            array![[0, 1], [0, UNMAPPED_PIXEL]],
        )
        .unwrap()
    }

    #[test]
    fn mask_requires_both_lookups() {
        let table = boundary_table();
        assert_eq!(
            table.validity_mask(),
            array![[true, true], [false, false]]
        );
        assert_eq!(table.valid_count(), 2);
    }

    #[test]
    fn mask_matches_definition_everywhere() {
        let az = Array2::from_shape_fn((5, 7), |(y, x)| {
            if (y + x) % 3 == 0 { UNMAPPED_PIXEL } else { y as i32 }
        });
        let rg = Array2::from_shape_fn((5, 7), |(y, x)| {
            if (y * x) % 4 == 1 { UNMAPPED_PIXEL } else { x as i32 }
        });
        let table = LookupTable::new(az.clone(), rg.clone()).unwrap();
        let mask = table.validity_mask();
        for ((y, x), &m) in mask.indexed_iter() {
            assert_eq!(m, az[[y, x]] != UNMAPPED_PIXEL && rg[[y, x]] != UNMAPPED_PIXEL);
        }
    }

    #[test]
    fn differing_shapes_are_rejected() {
        let err = LookupTable::new(Array2::zeros((2, 3)), Array2::zeros((3, 2))).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn mapped_pixels_are_row_major() {
        let table = boundary_table();
        let mapped: Vec<_> = table.mapped_pixels().collect();
        assert_eq!(mapped, vec![((0, 0), (0, 0)), ((0, 1), (0, 1))]);
    }

    #[test]
    fn out_of_grid_entries_are_geometry_mismatch() {
        let table = LookupTable::new(array![[0, 4]], array![[0, 0]]).unwrap();
        assert!(table.ensure_within(5, 1).is_ok());
        assert!(matches!(
            table.ensure_within(4, 1),
            Err(Error::GeometryMismatch(_))
        ));

        let negative = LookupTable::new(array![[-1]], array![[0]]).unwrap();
        assert!(matches!(
            negative.ensure_within(4, 4),
            Err(Error::GeometryMismatch(_))
        ));
    }

    #[test]
    fn unmapped_entries_skip_bounds_check() {
        let table = LookupTable::new(array![[UNMAPPED_PIXEL]], array![[900]]).unwrap();
        assert!(table.ensure_within(1, 1).is_ok());
    }
}
