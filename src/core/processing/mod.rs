//! In-memory band primitives: lookup-driven gather and scatter, GDAL-backed
//! gap filling, zonal statistics and quicklook colouring.
pub mod fill;
pub mod gather;
pub mod quicklook;
pub mod scatter;
pub mod zonal;
