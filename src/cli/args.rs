use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sarproj::{CollisionPolicy, QuicklookKind};

#[derive(Parser)]
#[command(name = "sarproj", version, about = "SARPROJ CLI")]
pub struct CliArgs {
    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project an image from slant-range to ground-projected geometry
    SlrToGrd(SlrToGrdArgs),
    /// Project an image from ground-projected back to slant-range geometry (slow)
    GrdToSlr(GrdToSlrArgs),
    /// Compute mean/min/max/std/count of an image over ROI polygons
    RoiStats(RoiStatsArgs),
    /// Render a colour quicklook JPEG of an image
    Quicklook(QuicklookArgs),
}

/// Lookup rasters shared by both projection directions
#[derive(Args)]
pub struct LookupArgs {
    /// Azimuth (row) lookup raster
    #[arg(long)]
    pub azimuth: PathBuf,

    /// Range (column) lookup raster
    #[arg(long)]
    pub range: PathBuf,

    /// JSON file with projection parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not embed provenance metadata in the output GeoTIFF
    #[arg(long, default_value_t = false)]
    pub no_metadata: bool,
}

#[derive(Args)]
pub struct SlrToGrdArgs {
    /// Input image in slant-range geometry
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output GeoTIFF in ground-projected geometry
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Args)]
pub struct GrdToSlrArgs {
    /// Input image in ground-projected geometry
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output GeoTIFF in slant-range geometry
    #[arg(short, long)]
    pub output: PathBuf,

    /// Image in the target slant-range geometry (defines the output size)
    #[arg(long)]
    pub reference: PathBuf,

    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Gap-fill search radius in pixels (0 disables filling)
    #[arg(long)]
    pub search_radius: Option<f64>,

    /// Gap-fill smoothing iterations
    #[arg(long)]
    pub smoothing_iterations: Option<u32>,

    /// How to resolve several ground pixels landing on one slant pixel
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,
}

#[derive(Args)]
pub struct RoiStatsArgs {
    /// Image to measure (band 1)
    #[arg(short, long)]
    pub image: PathBuf,

    /// Shapefile prefix; ROI `name` is read from `<prefix><name>.shp`
    #[arg(long)]
    pub shape_prefix: String,

    /// ROI names (comma separated or repeated)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub rois: Vec<String>,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct QuicklookArgs {
    /// Image to render (band 1)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output base path; the quicklook is written to `<base>_<kind>_QL.jpg`
    #[arg(short, long)]
    pub output_base: PathBuf,

    /// Quantity shown (selects the colour ramp)
    #[arg(long, value_enum, default_value_t = QuicklookKind::Biomass)]
    pub kind: QuicklookKind,
}
