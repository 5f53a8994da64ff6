use std::collections::BTreeMap;
use std::path::Path;

use gdal::{Dataset, Metadata};
use tracing::info;

use crate::core::lookup::UNMAPPED_PIXEL;
use crate::core::params::ProjectionParams;
use crate::types::{ProjectionDirection, QuicklookKind};

/// Provenance of one projection run
#[derive(Debug, Clone)]
pub struct ProjectionMetadata<'a> {
    pub direction: ProjectionDirection,
    pub input: &'a Path,
    pub azimuth: &'a Path,
    pub range: &'a Path,
    pub reference: Option<&'a Path>,
    pub params: &'a ProjectionParams,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract all metadata fields. Ordered and free of timestamps so that
/// re-running a projection produces an identical file.
pub fn extract_metadata_fields(meta: &ProjectionMetadata<'_>) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    metadata.insert("PROJECTION_DIRECTION".to_string(), meta.direction.to_string());
    metadata.insert("SOURCE_IMAGE".to_string(), file_name(meta.input));
    metadata.insert("AZIMUTH_LOOKUP".to_string(), file_name(meta.azimuth));
    metadata.insert("RANGE_LOOKUP".to_string(), file_name(meta.range));
    metadata.insert("UNMAPPED_PIXEL_VALUE".to_string(), UNMAPPED_PIXEL.to_string());

    if let Some(reference) = meta.reference {
        metadata.insert("REFERENCE_IMAGE".to_string(), file_name(reference));
    }

    // Inverse-only parameters
    if meta.direction == ProjectionDirection::GroundToSlant {
        metadata.insert(
            "COLLISION_POLICY".to_string(),
            meta.params.collision.to_string(),
        );
        metadata.insert(
            "GAP_FILL_SEARCH_RADIUS".to_string(),
            meta.params.gap_fill.search_radius.to_string(),
        );
        metadata.insert(
            "GAP_FILL_SMOOTHING_ITERATIONS".to_string(),
            meta.params.gap_fill.smoothing_iterations.to_string(),
        );
    }

    metadata.insert("CONVERSION_TOOL".to_string(), "sarproj".to_string());
    metadata.insert(
        "CONVERSION_VERSION".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );

    metadata
}

/// Embed projection provenance into a GeoTIFF dataset
pub fn embed_tiff_metadata(
    ds: &mut Dataset,
    meta: &ProjectionMetadata<'_>,
) -> crate::Result<()> {
    for (key, value) in extract_metadata_fields(meta) {
        ds.set_metadata_item(&key, &value, "")?;
    }
    Ok(())
}

/// Describes a rendered quicklook for its JSON sidecar
#[derive(Debug, Clone)]
pub struct QuicklookMetadata<'a> {
    pub source: &'a Path,
    pub kind: QuicklookKind,
    pub ratio: usize,
    pub value_min: f64,
    pub value_max: f64,
    pub geotransform: Option<[f64; 6]>,
    pub projection: Option<&'a str>,
}

/// Create a sidecar metadata file next to a quicklook JPEG
pub fn create_quicklook_sidecar(
    output_path: &Path,
    meta: &QuicklookMetadata<'_>,
) -> crate::Result<()> {
    let mut json = serde_json::Map::new();
    json.insert("source".into(), file_name(meta.source).into());
    json.insert("kind".into(), meta.kind.to_string().into());
    json.insert("decimation_ratio".into(), meta.ratio.into());

    // NaN has no JSON representation
    let number = |v: f64| {
        serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    };
    json.insert("value_min".into(), number(meta.value_min));
    json.insert("value_max".into(), number(meta.value_max));

    if let Some(gt) = meta.geotransform {
        json.insert(
            "geotransform".into(),
            serde_json::Value::Array(gt.iter().map(|&v| number(v)).collect()),
        );
    }
    if let Some(p) = meta.projection {
        json.insert("projection".into(), p.into());
    }

    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(&serde_json::Value::Object(json))?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created quicklook metadata sidecar: {:?}", sidecar_path);
    Ok(())
}
