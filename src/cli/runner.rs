use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sarproj::{ProjectionParams, ProjectionReport};

use super::args::{CliArgs, Command, GrdToSlrArgs, LookupArgs, QuicklookArgs, RoiStatsArgs, SlrToGrdArgs};
use super::errors::AppError;

fn load_params(lookup: &LookupArgs) -> Result<ProjectionParams, AppError> {
    let mut params = match &lookup.config {
        Some(path) => {
            info!("Loading projection parameters from {:?}", path);
            ProjectionParams::from_json_file(path)?
        }
        None => ProjectionParams::default(),
    };
    if lookup.no_metadata {
        params.embed_metadata = false;
    }
    Ok(params)
}

fn log_report(report: &ProjectionReport) {
    info!(
        "{}: {}x{} x{} bands, {} mapped pixels, {} filled pixels",
        report.direction,
        report.width,
        report.height,
        report.bands,
        report.mapped_pixels,
        report.filled_pixels
    );
}

fn run_slr_to_grd(args: SlrToGrdArgs) -> Result<(), AppError> {
    let params = load_params(&args.lookup)?;
    let report = sarproj::slant_to_ground(
        &args.input,
        &args.output,
        &args.lookup.azimuth,
        &args.lookup.range,
        &params,
    )?;
    log_report(&report);
    info!("Successfully projected: {:?} -> {:?}", args.input, args.output);
    Ok(())
}

fn run_grd_to_slr(args: GrdToSlrArgs) -> Result<(), AppError> {
    let mut params = load_params(&args.lookup)?;
    if let Some(radius) = args.search_radius {
        if !radius.is_finite() || radius < 0.0 {
            return Err(AppError::InvalidSearchRadius { radius });
        }
        params.gap_fill.search_radius = radius;
    }
    if let Some(iterations) = args.smoothing_iterations {
        params.gap_fill.smoothing_iterations = iterations;
    }
    if let Some(collision) = args.collision {
        params.collision = collision;
    }

    let report = sarproj::ground_to_slant(
        &args.input,
        &args.output,
        &args.lookup.azimuth,
        &args.lookup.range,
        &args.reference,
        &params,
    )?;
    log_report(&report);
    info!("Successfully projected: {:?} -> {:?}", args.input, args.output);
    Ok(())
}

fn run_roi_stats(args: RoiStatsArgs) -> Result<(), AppError> {
    if args.rois.is_empty() {
        return Err(AppError::MissingArgument {
            arg: "--rois".to_string(),
        });
    }
    let stats = sarproj::roi_statistics(&args.image, &args.shape_prefix, &args.rois)?;
    let json = serde_json::to_string_pretty(&stats)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!("ROI statistics written to {:?}", path);
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_quicklook(args: QuicklookArgs) -> Result<(), AppError> {
    let output = sarproj::write_quicklook(&args.input, &args.output_base, args.kind)?;
    info!("Quicklook written to {:?}", output);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match args.command {
        Command::SlrToGrd(a) => run_slr_to_grd(a)?,
        Command::GrdToSlr(a) => run_grd_to_slr(a)?,
        Command::RoiStats(a) => run_roi_stats(a)?,
        Command::Quicklook(a) => run_quicklook(a)?,
    }

    Ok(())
}
