//! Output writers: float GeoTIFFs for projected images, JPEG quicklooks with
//! world files, and metadata embedding/sidecars.
pub mod jpeg;
pub mod metadata;
pub mod tiff;
pub mod worldfile;
