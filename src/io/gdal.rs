use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gdal::raster::{GdalDataType, GdalType, ResampleAlg};
use gdal::{Dataset, Metadata};
use ndarray::Array2;
use tracing::debug;

use crate::core::lookup::LookupTable;
use crate::error::{Error, Result};

/// Affine geotransform plus projection WKT of a raster
#[derive(Debug, Clone, PartialEq)]
pub struct Georeference {
    /// [origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height]
    pub geotransform: [f64; 6],
    /// Projection in WKT format, empty when unknown
    pub projection: String,
}

impl Georeference {
    pub const IDENTITY: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    /// GDAL reports the identity transform for rasters without georeferencing.
    pub fn is_identity(&self) -> bool {
        self.geotransform == Self::IDENTITY
    }

    /// `EPSG:XXXX` when the WKT carries an EPSG authority tag.
    pub fn epsg(&self) -> Option<String> {
        parse_epsg(&self.projection)
    }
}

/// Metadata extracted from a GDAL-supported raster
#[derive(Debug, Clone)]
pub struct RasterMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands
    pub bands: usize,
    /// Sample type of band 1
    pub sample_type: GdalDataType,
    pub georeference: Georeference,
    /// Additional metadata key-value pairs (default domain)
    pub metadata: HashMap<String, String>,
}

impl RasterMetadata {
    /// Shape as (rows, cols), the order used by `ndarray`.
    pub fn dim(&self) -> (usize, usize) {
        (self.size_y, self.size_x)
    }
}

/// Read-only raster opened through GDAL. The dataset is closed on drop.
pub struct RasterReader {
    pub path: PathBuf,
    pub dataset: Dataset,
    pub metadata: RasterMetadata,
}

// Helper to extract EPSG code from WKT authority tag
fn parse_epsg(wkt: &str) -> Option<String> {
    const KEY: &str = "AUTHORITY[\"EPSG\",\"";
    let idx = wkt.rfind(KEY)?;
    let start = idx + KEY.len();
    let end = wkt[start..].find('"')?;
    Some(format!("EPSG:{}", &wkt[start..start + end]))
}

/// True for sample types able to hold NaN.
pub fn holds_nan(sample_type: GdalDataType) -> bool {
    matches!(sample_type, GdalDataType::Float32 | GdalDataType::Float64)
}

impl RasterReader {
    /// Open a GDAL-supported raster (GeoTIFF, ENVI, ...)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Dataset::open(path).map_err(|e| Error::open(path, e))?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(Error::InvalidArgument {
                arg: "raster",
                value: format!("{} has no raster bands", path.display()),
            });
        }
        let sample_type = dataset.rasterband(1)?.band_type();
        let geotransform = dataset.geo_transform().unwrap_or(Georeference::IDENTITY);
        let projection = dataset.projection();

        let mut metadata_map = HashMap::new();
        if let Some(entries) = dataset.metadata_domain("") {
            for entry in entries {
                if let Some((key, val)) = entry.split_once('=') {
                    metadata_map.insert(key.to_string(), val.to_string());
                }
            }
        }

        debug!(
            "opened {:?}: {}x{} x{} bands, {:?}",
            path, size_x, size_y, bands, sample_type
        );
        Ok(RasterReader {
            path: path.to_path_buf(),
            dataset,
            metadata: RasterMetadata {
                size_x,
                size_y,
                bands,
                sample_type,
                georeference: Georeference {
                    geotransform,
                    projection,
                },
                metadata: metadata_map,
            },
        })
    }

    /// Fail with `UnsupportedType` unless the sample type can hold NaN.
    pub fn ensure_float(&self) -> Result<()> {
        if holds_nan(self.metadata.sample_type) {
            Ok(())
        } else {
            Err(Error::UnsupportedType {
                path: self.path.clone(),
                sample_type: format!("{:?}", self.metadata.sample_type),
            })
        }
    }

    fn check_band(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.metadata.bands {
            return Err(Error::InvalidArgument {
                arg: "band",
                value: format!("{} (raster has {} bands)", index, self.metadata.bands),
            });
        }
        Ok(())
    }

    /// Read a window of a band (1-based index), resampled to `shape` (cols, rows).
    pub fn read_window_as<T: GdalType + Copy>(
        &self,
        index: usize,
        offset: (usize, usize),
        window: (usize, usize),
        shape: (usize, usize),
    ) -> Result<Array2<T>> {
        self.check_band(index)?;
        let band = self.dataset.rasterband(index)?;
        let buf = band.read_as::<T>(
            (offset.0 as isize, offset.1 as isize),
            window,
            shape,
            Some(ResampleAlg::NearestNeighbour),
        )?;
        let data = buf.data().to_vec();
        let len = data.len();
        let array = Array2::from_shape_vec((shape.1, shape.0), data).map_err(|_| {
            Error::ShapeMismatch {
                what: "band buffer",
                expected: (shape.1, shape.0),
                actual: (len / shape.0.max(1), shape.0),
            }
        })?;
        Ok(array)
    }

    /// Read a full band (1-based index) as an ndarray of shape (height, width)
    pub fn read_band_as<T: GdalType + Copy>(&self, index: usize) -> Result<Array2<T>> {
        let window = (self.metadata.size_x, self.metadata.size_y);
        self.read_window_as(index, (0, 0), window, window)
    }

    /// Read a full band as f64
    pub fn read_band(&self, index: usize) -> Result<Array2<f64>> {
        self.read_band_as::<f64>(index)
    }

    /// Read a full band decimated by an integer `ratio` (nearest neighbour).
    pub fn read_band_decimated(&self, index: usize, ratio: usize) -> Result<Array2<f64>> {
        let ratio = ratio.max(1);
        let window = (self.metadata.size_x, self.metadata.size_y);
        let shape = ((window.0 / ratio).max(1), (window.1 / ratio).max(1));
        self.read_window_as(index, (0, 0), window, shape)
    }
}

/// Load the azimuth and range lookup rasters (band 1 of each).
/// The georeference of the ground grid is taken from the range raster.
pub fn read_lookup_table(azimuth: &Path, range: &Path) -> Result<(LookupTable, Georeference)> {
    let az = RasterReader::open(azimuth)?;
    let rg = RasterReader::open(range)?;
    let table = LookupTable::new(az.read_band_as::<i32>(1)?, rg.read_band_as::<i32>(1)?)?;
    debug!(
        "lookup table {}x{}: {} mapped pixels",
        table.dim().0,
        table.dim().1,
        table.valid_count()
    );
    Ok((table, rg.metadata.georeference.clone()))
}
