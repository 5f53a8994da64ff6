//! ROI polygons read from shapefiles through GDAL/OGR, and their
//! rasterisation onto an in-memory byte grid.
use std::path::{Path, PathBuf};

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::vector::{Geometry, LayerAccess};
use gdal::{Dataset, DriverManager};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Error, Result};

/// One named region of interest, in the coordinates of the raster it will be
/// measured on.
#[derive(Debug, Clone)]
pub struct RoiPolygon {
    pub name: String,
    pub geometry: Geometry,
}

impl RoiPolygon {
    /// Bounding box as (min_x, max_x, min_y, max_y).
    pub fn envelope(&self) -> (f64, f64, f64, f64) {
        let env = self.geometry.envelope();
        (env.MinX, env.MaxX, env.MinY, env.MaxY)
    }
}

/// `<prefix><name>.shp`, the layout ROI collections are stored in.
pub fn roi_shapefile_path(prefix: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}{name}.shp"))
}

/// Read the first feature of `path` and reproject it to `target_wkt`.
/// Layers without a spatial reference, or an empty target, are taken as-is.
pub fn load_roi(path: &Path, name: &str, target_wkt: &str) -> Result<RoiPolygon> {
    let ds = Dataset::open(path).map_err(|e| Error::open(path, e))?;
    let layer = ds.layer(0)?;
    let feature = layer.feature(0).ok_or_else(|| Error::InvalidArgument {
        arg: "roi",
        value: format!("{} has no feature", path.display()),
    })?;
    let geometry = feature.geometry().ok_or_else(|| Error::InvalidArgument {
        arg: "roi",
        value: format!("{} feature has no geometry", path.display()),
    })?;

    let geometry = match layer.spatial_ref() {
        Some(mut source_srs) if !target_wkt.is_empty() => {
            let mut target_srs = SpatialRef::from_wkt(target_wkt)?;
            source_srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
            target_srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
            let transform = CoordTransform::new(&source_srs, &target_srs)?;
            geometry.transform(&transform)?
        }
        _ => geometry.clone(),
    };

    debug!("loaded ROI {} from {:?}", name, path);
    Ok(RoiPolygon {
        name: name.to_string(),
        geometry,
    })
}

/// Burn `roi` (value 1) into a `cols x rows` byte grid with the given
/// georeference. Pixels whose centre lies inside the polygon are set.
pub fn rasterize_roi(
    roi: &RoiPolygon,
    geotransform: [f64; 6],
    projection: &str,
    cols: usize,
    rows: usize,
) -> Result<Array2<u8>> {
    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut ds = driver.create_with_band_type::<u8, _>("", cols, rows, 1)?;
    ds.set_geo_transform(&geotransform)?;
    if !projection.is_empty() {
        ds.set_projection(projection)?;
    }

    gdal::raster::rasterize(
        &mut ds,
        &[1],
        std::slice::from_ref(&roi.geometry),
        &[1.0],
        None,
    )?;

    let band = ds.rasterband(1)?;
    let buf = band.read_as::<u8>((0, 0), (cols, rows), (cols, rows), None)?;
    Array2::from_shape_vec((rows, cols), buf.data().to_vec())
        .map_err(|e| Error::Processing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapefile_path_from_prefix() {
        assert_eq!(
            roi_shapefile_path("/in/biosar1_roi_", "lidar7"),
            PathBuf::from("/in/biosar1_roi_lidar7.shp")
        );
    }

    #[test]
    fn square_rasterizes_to_interior_pixels() {
        let roi = RoiPolygon {
            name: "square".into(),
            geometry: Geometry::from_wkt("POLYGON ((0 10, 4 10, 4 6, 0 6, 0 10))").unwrap(),
        };
        assert_eq!(roi.envelope(), (0.0, 4.0, 6.0, 10.0));

        let mask = rasterize_roi(&roi, [0.0, 1.0, 0.0, 10.0, 0.0, -1.0], "", 6, 6).unwrap();
        assert_eq!(mask.iter().filter(|&&m| m == 1).count(), 16);
        assert_eq!(mask[[0, 0]], 1);
        assert_eq!(mask[[3, 3]], 1);
        assert_eq!(mask[[4, 0]], 0);
        assert_eq!(mask[[0, 4]], 0);
    }
}
