//! High-level library API: project images between slant-range and
//! ground-projected geometry through lookup rasters, compute ROI statistics,
//! and render quicklooks. Prefer these entrypoints over the low-level
//! processing modules when integrating SARPROJ.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::params::ProjectionParams;
use crate::core::processing::fill::fill_gaps;
use crate::core::processing::gather::gather_band;
use crate::core::processing::quicklook::{colorize, decimation_ratio};
use crate::core::processing::scatter::scatter_band;
use crate::core::processing::zonal::{ZonalStats, roi_window, zonal_stats};
use crate::error::{Error, Result};
use crate::io::gdal::{RasterReader, read_lookup_table};
use crate::io::vector::{load_roi, rasterize_roi, roi_shapefile_path};
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::io::writers::metadata::{
    ProjectionMetadata, QuicklookMetadata, create_quicklook_sidecar, embed_tiff_metadata,
};
use crate::io::writers::tiff::{apply_georeference, create_float_tiff, write_band};
use crate::io::writers::worldfile::{decimated_geotransform, write_prj_file, write_world_file};
use crate::types::{ProjectionDirection, QuicklookKind};

/// Summary of a completed projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionReport {
    pub direction: ProjectionDirection,
    /// Output width (pixels)
    pub width: usize,
    /// Output height (lines)
    pub height: usize,
    pub bands: usize,
    /// Ground pixels with a valid lookup entry
    pub mapped_pixels: usize,
    /// Slant-range pixels recovered by gap filling, summed over bands
    pub filled_pixels: usize,
}

/// Project an image from slant-range geometry to ground-projected geometry.
///
/// The output has the shape and georeference of the lookup rasters and the
/// band count and sample type of `slr_file`. Unmapped pixels are NaN.
pub fn slant_to_ground(
    slr_file: &Path,
    grd_file: &Path,
    azimuth_file: &Path,
    range_file: &Path,
    params: &ProjectionParams,
) -> Result<ProjectionReport> {
    let source = RasterReader::open(slr_file)?;
    source.ensure_float()?;
    let (lookup, ground_georef) = read_lookup_table(azimuth_file, range_file)?;
    lookup.ensure_within(source.metadata.size_y, source.metadata.size_x)?;
    debug!(
        "ground grid from {:?}: {:?}",
        range_file,
        ground_georef.epsg().unwrap_or_else(|| "no EPSG code".to_string())
    );

    let (rows, cols) = lookup.dim();
    let bands = source.metadata.bands;
    info!(
        "slant->ground: {:?} ({}x{}, {} bands) -> {:?} ({}x{})",
        slr_file, source.metadata.size_x, source.metadata.size_y, bands, grd_file, cols, rows
    );

    let mut out = create_float_tiff(grd_file, cols, rows, bands, source.metadata.sample_type)?;
    apply_georeference(&mut out, &ground_georef)?;
    if params.embed_metadata {
        embed_tiff_metadata(
            &mut out,
            &ProjectionMetadata {
                direction: ProjectionDirection::SlantToGround,
                input: slr_file,
                azimuth: azimuth_file,
                range: range_file,
                reference: None,
                params,
            },
        )?;
    }

    for index in 1..=bands {
        let slant = source.read_band(index)?;
        let ground = gather_band(&slant, &lookup);
        write_band(&out, index, &ground)?;
        out.flush_cache()?;
        info!("band {}/{} projected to ground geometry", index, bands);
    }

    out.close()?;

    Ok(ProjectionReport {
        direction: ProjectionDirection::SlantToGround,
        width: cols,
        height: rows,
        bands,
        mapped_pixels: lookup.valid_count(),
        filled_pixels: 0,
    })
}

/// Project an image from ground-projected geometry back to slant-range
/// geometry, with gap filling.
///
/// `reference_file` is an image in the target slant-range geometry; only its
/// size (and georeference, if any) is used. Each band is scattered, filled
/// and written before the next one is read. This is slow on large scenes.
pub fn ground_to_slant(
    grd_file: &Path,
    slr_file: &Path,
    azimuth_file: &Path,
    range_file: &Path,
    reference_file: &Path,
    params: &ProjectionParams,
) -> Result<ProjectionReport> {
    let ground = RasterReader::open(grd_file)?;
    ground.ensure_float()?;
    let (lookup, _) = read_lookup_table(azimuth_file, range_file)?;
    let reference = RasterReader::open(reference_file)?;

    if ground.metadata.dim() != lookup.dim() {
        return Err(Error::ShapeMismatch {
            what: "ground image",
            expected: lookup.dim(),
            actual: ground.metadata.dim(),
        });
    }
    if ground.metadata.metadata.get("PROJECTION_DIRECTION").map(String::as_str)
        == Some("ground_to_slant")
    {
        warn!(
            "{:?} was produced by a ground->slant projection and is already in slant-range geometry",
            grd_file
        );
    }
    let target = reference.metadata.dim();
    lookup.ensure_within(target.0, target.1)?;

    let bands = ground.metadata.bands;
    info!(
        "ground->slant: {:?} ({} bands) -> {:?} ({}x{}), radius {}, {} smoothing, {} collisions",
        grd_file,
        bands,
        slr_file,
        target.1,
        target.0,
        params.gap_fill.search_radius,
        params.gap_fill.smoothing_iterations,
        params.collision
    );

    let mut out = create_float_tiff(slr_file, target.1, target.0, bands, ground.metadata.sample_type)?;
    apply_georeference(&mut out, &reference.metadata.georeference)?;
    if params.embed_metadata {
        embed_tiff_metadata(
            &mut out,
            &ProjectionMetadata {
                direction: ProjectionDirection::GroundToSlant,
                input: grd_file,
                azimuth: azimuth_file,
                range: range_file,
                reference: Some(reference_file),
                params,
            },
        )?;
    }

    let mut filled_pixels = 0;
    for index in 1..=bands {
        let band = ground.read_band(index)?;
        let mut slant = scatter_band(&band, &lookup, target, params.collision);
        filled_pixels += fill_gaps(&mut slant, &params.gap_fill)?;
        write_band(&out, index, &slant)?;
        out.flush_cache()?;
        info!("band {}/{} projected to slant-range geometry", index, bands);
    }

    out.close()?;

    Ok(ProjectionReport {
        direction: ProjectionDirection::GroundToSlant,
        width: target.1,
        height: target.0,
        bands,
        mapped_pixels: lookup.valid_count(),
        filled_pixels,
    })
}

/// Statistics of one ROI; `stats` is `None` when the ROI is not fully inside
/// the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiStatistics {
    pub roi: String,
    pub stats: Option<ZonalStats>,
}

/// Mean, min, max, std and pixel count of band 1 of `image_file` over each
/// ROI polygon `<shape_prefix><roi>.shp`.
pub fn roi_statistics(
    image_file: &Path,
    shape_prefix: &str,
    rois: &[String],
) -> Result<Vec<RoiStatistics>> {
    let image = RasterReader::open(image_file)?;
    let georef = &image.metadata.georeference;
    let size = (image.metadata.size_x, image.metadata.size_y);

    let mut results = Vec::with_capacity(rois.len());
    for name in rois {
        let roi = load_roi(&roi_shapefile_path(shape_prefix, name), name, &georef.projection)?;
        let envelope = roi.envelope();

        let Some(window) = roi_window(envelope, &georef.geotransform, size) else {
            warn!("ROI {} lies outside {:?}, no statistics", name, image_file);
            results.push(RoiStatistics {
                roi: name.clone(),
                stats: None,
            });
            continue;
        };

        let gt = georef.geotransform;
        let roi_gt = [envelope.0, gt[1], 0.0, envelope.3, 0.0, gt[5]];
        let mask = rasterize_roi(&roi, roi_gt, &georef.projection, window.cols, window.rows)?;
        let values = image.read_window_as::<f64>(
            1,
            (window.x_off, window.y_off),
            (window.cols, window.rows),
            (window.cols, window.rows),
        )?;
        let stats = zonal_stats(&values, &mask);
        info!(
            "ROI {}: mean={:.3} count={} window={:?}",
            name, stats.mean, stats.count, window
        );
        results.push(RoiStatistics {
            roi: name.clone(),
            stats: Some(stats),
        });
    }
    Ok(results)
}

/// Render band 1 of `input_file` as a colour JPEG `<base>_<kind>_QL.jpg`,
/// decimated to about a thousand pixels on its long side. Georeferenced
/// inputs also get a world file and `.prj`. Returns the JPEG path.
pub fn write_quicklook(input_file: &Path, base: &Path, kind: QuicklookKind) -> Result<PathBuf> {
    let input = RasterReader::open(input_file)?;
    let ratio = decimation_ratio(input.metadata.size_x, input.metadata.size_y);
    let data = input.read_band_decimated(1, ratio)?;
    let (rows, cols) = data.dim();
    let rgb = colorize(&data, kind);

    let mut file_name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name.push_str(&format!("_{kind}_QL.jpg"));
    let output = base.with_file_name(file_name);

    write_rgb_jpeg(&output, cols, rows, &rgb)?;

    let georef = &input.metadata.georeference;
    let geotransform = if georef.is_identity() {
        None
    } else {
        let gt = decimated_geotransform(georef.geotransform, ratio);
        write_world_file(&output, gt)?;
        if !georef.projection.is_empty() {
            write_prj_file(&output, &georef.projection)?;
        }
        Some(gt)
    };

    let (value_min, value_max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::NAN, f64::NAN), |(lo, hi), &v| (v.min(lo), v.max(hi)));
    create_quicklook_sidecar(
        &output,
        &QuicklookMetadata {
            source: input_file,
            kind,
            ratio,
            value_min,
            value_max,
            geotransform,
            projection: (!georef.projection.is_empty()).then_some(georef.projection.as_str()),
        },
    )?;

    info!(
        "quicklook {:?}: {}x{} (1/{} of {:?})",
        output, cols, rows, ratio, input_file
    );
    Ok(output)
}
