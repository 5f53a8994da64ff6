//! I/O layer over GDAL: raster reading (`gdal`), ROI polygon loading and
//! rasterisation (`vector`), and `writers` for GeoTIFF/JPEG outputs.
pub mod gdal;
pub use gdal::{Georeference, RasterMetadata, RasterReader, read_lookup_table};

pub mod vector;

pub mod writers;
