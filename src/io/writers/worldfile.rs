use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// World file path for an image: `.jgw` for JPEG, `.tfw` for TIFF, ...
pub fn world_file_path(output_image: &Path) -> PathBuf {
    let ext = output_image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let world_ext = match ext.as_str() {
        "jpg" | "jpeg" => "jgw".to_string(),
        "png" => "pgw".to_string(),
        "tif" | "tiff" => "tfw".to_string(),
        // first letter + last letter + "w"
        other => match (other.chars().next(), other.chars().last()) {
            (Some(first), Some(last)) if other.chars().count() >= 2 => {
                format!("{first}{last}w")
            }
            _ => "wld".to_string(),
        },
    };

    output_image.with_extension(world_ext)
}

/// Write a world file next to the raster image using the provided geotransform.
/// The world file stores the transform in pixel-center convention.
pub fn write_world_file(output_image: &Path, geotransform: [f64; 6]) -> Result<PathBuf> {
    let world_path = world_file_path(output_image);

    // A: pixel size in X, D: rotation about Y, B: rotation about X, E: pixel size Y
    // C, F: center of upper-left pixel
    let a = geotransform[1];
    let d = geotransform[4];
    let b = geotransform[2];
    let e = geotransform[5];
    let c = geotransform[0] + 0.5 * a + 0.5 * b;
    let f = geotransform[3] + 0.5 * d + 0.5 * e;

    let mut file = File::create(&world_path)?;
    for value in [a, d, b, e, c, f] {
        writeln!(file, "{:.12}", value)?;
    }

    Ok(world_path)
}

/// Write a .prj file with the provided projection WKT
pub fn write_prj_file(output_image: &Path, projection: &str) -> Result<PathBuf> {
    let prj_path = output_image.with_extension("prj");
    std::fs::write(&prj_path, projection.as_bytes())?;
    Ok(prj_path)
}

/// Geotransform of an image decimated by `ratio` in both directions.
pub fn decimated_geotransform(geotransform: [f64; 6], ratio: usize) -> [f64; 6] {
    let r = ratio.max(1) as f64;
    let mut gt = geotransform;
    gt[1] *= r;
    gt[2] *= r;
    gt[4] *= r;
    gt[5] *= r;
    gt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_extensions() {
        assert_eq!(world_file_path(Path::new("a/ql.jpg")), Path::new("a/ql.jgw"));
        assert_eq!(world_file_path(Path::new("ql.TIFF")), Path::new("ql.tfw"));
        assert_eq!(world_file_path(Path::new("ql.bmp")), Path::new("ql.bpw"));
        assert_eq!(world_file_path(Path::new("ql")), Path::new("ql.wld"));
    }

    #[test]
    fn world_file_uses_pixel_centres() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("ql.jpg");
        let path = write_world_file(&image, [100.0, 2.0, 0.0, 500.0, 0.0, -2.0]).unwrap();
        let lines: Vec<f64> = std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.parse().unwrap())
            .collect();
        assert_eq!(lines, vec![2.0, 0.0, 0.0, -2.0, 101.0, 499.0]);
    }

    #[test]
    fn decimation_scales_pixel_size_only() {
        let gt = decimated_geotransform([100.0, 2.0, 0.0, 500.0, 0.0, -2.0], 3);
        assert_eq!(gt, [100.0, 6.0, 0.0, 500.0, 0.0, -6.0]);
    }
}
