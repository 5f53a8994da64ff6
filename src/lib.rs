#![doc = r#"
SARPROJ: slant-range / ground-projected projectors for SAR imagery.

This crate moves raster images between the slant-range geometry of a SAR
acquisition and a ground-projected (map) geometry using a pair of precomputed
coordinate lookup rasters: for every ground pixel, the azimuth raster holds the
slant-range row and the range raster the slant-range column. Pixels outside the
illuminated swath carry the reserved value [`UNMAPPED_PIXEL`] (55537).

It also computes zonal statistics of an image over ROI polygons and renders
colour quicklooks. Raster and vector I/O, polygon rasterisation, reprojection
and hole filling are delegated to GDAL.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Slant range to ground
---------------------
```rust,no_run
use std::path::Path;
use sarproj::{slant_to_ground, ProjectionParams};

fn main() -> sarproj::Result<()> {
    let report = slant_to_ground(
        Path::new("/data/slc_dB.tiff"),
        Path::new("/out/slc_dB_GRD.tiff"),
        Path::new("/data/az.tiff"),
        Path::new("/data/rg.tiff"),
        &ProjectionParams::default(),
    )?;
    println!("{} bands, {} mapped pixels", report.bands, report.mapped_pixels);
    Ok(())
}
```

Ground back to slant range
--------------------------
The inverse path scatters each ground pixel onto its slant-range position and
then fills the holes left behind (GDAL `FillNodata`, search radius 5 pixels and
no smoothing by default). It is slow on large scenes.

```rust,no_run
use std::path::Path;
use sarproj::{ground_to_slant, CollisionPolicy, ProjectionParams};

fn main() -> sarproj::Result<()> {
    let mut params = ProjectionParams::default();
    params.collision = CollisionPolicy::Mean;
    params.gap_fill.search_radius = 8.0;

    ground_to_slant(
        Path::new("/out/slc_dB_GRD.tiff"),
        Path::new("/out/slc_dB_GRD_SLR.tiff"),
        Path::new("/data/az.tiff"),
        Path::new("/data/rg.tiff"),
        Path::new("/data/slc_dB.tiff"),
        &params,
    )?;
    Ok(())
}
```

In-memory bands
---------------
```rust
use ndarray::array;
use sarproj::{project_band_to_ground, LookupTable, UNMAPPED_PIXEL};

let source = array![[1.0, 2.0], [3.0, 4.0]];
let lookup = LookupTable::new(
    array![[1, UNMAPPED_PIXEL]],
    array![[0, 1]],
).unwrap();
let ground = project_band_to_ground(&source, &lookup).unwrap();
assert_eq!(ground[[0, 0]], 3.0);
assert!(ground[[0, 1]].is_nan());
```

Error handling
--------------
All public functions return `sarproj::Result<T>`; match on `sarproj::Error` to
tell apart shape, geometry and sample-type problems from I/O failures.

Useful modules
--------------
- [`api`] — file-level entry points.
- [`core`] — lookup tables, parameters and in-memory band primitives.
- [`io`] — GDAL readers and writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::lookup::{LookupTable, UNMAPPED_PIXEL};
pub use core::params::{GapFillParams, ProjectionParams};
pub use error::{Error, Result};
pub use types::{CollisionPolicy, ProjectionDirection, QuicklookKind};

// In-memory primitives
pub use core::processing::fill::fill_gaps;
pub use core::processing::gather::{project_band_to_ground, project_bands_to_ground};
pub use core::processing::scatter::project_band_to_slant;
pub use core::processing::zonal::ZonalStats;

// Readers
pub use io::gdal::{Georeference, RasterMetadata, RasterReader, read_lookup_table};

// High-level API re-exports
pub use api::{
    ProjectionReport, RoiStatistics, ground_to_slant, roi_statistics, slant_to_ground,
    write_quicklook,
};
