use ndarray::Array2;

use crate::types::QuicklookKind;

/// Longest side a quicklook is decimated down to, roughly.
pub const QUICKLOOK_TARGET: usize = 1000;

/// Integer decimation ratio keeping the quicklook around [`QUICKLOOK_TARGET`] pixels.
pub fn decimation_ratio(cols: usize, rows: usize) -> usize {
    1.max(cols / QUICKLOOK_TARGET).max(rows / QUICKLOOK_TARGET)
}

// (position, value) control points per channel
type Channel = &'static [(f64, f64)];

const BIOMASS: [Channel; 3] = [
    &[(0.0, 245.0 / 255.0), (0.5, 0.0), (1.0, 0.0)],
    &[(0.0, 245.0 / 255.0), (0.5, 128.0 / 255.0), (1.0, 69.0 / 255.0)],
    &[(0.0, 220.0 / 255.0), (0.5, 0.0), (1.0, 0.0)],
];

const JET: [Channel; 3] = [
    &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    &[(0.0, 0.0), (0.125, 0.0), (0.375, 1.0), (0.64, 1.0), (0.91, 0.0), (1.0, 0.0)],
    &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
];

fn ramp(kind: QuicklookKind) -> &'static [Channel; 3] {
    match kind {
        QuicklookKind::Biomass => &BIOMASS,
        QuicklookKind::Height => &JET,
    }
}

fn interpolate(channel: Channel, t: f64) -> f64 {
    for pair in channel.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            if x1 <= x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    channel.last().map(|&(_, y)| y).unwrap_or(0.0)
}

/// RGB triple for a normalised value in [0, 1].
pub fn color_at(kind: QuicklookKind, t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channels = ramp(kind);
    let mut rgb = [0u8; 3];
    for (out, channel) in rgb.iter_mut().zip(channels.iter()) {
        *out = (interpolate(channel, t) * 255.0).round() as u8;
    }
    rgb
}

/// Interleaved RGB rendering of `data`, stretched over its finite min/max.
/// Non-finite pixels are white.
pub fn colorize(data: &Array2<f64>, kind: QuicklookKind) -> Vec<u8> {
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = if max > min { max - min } else { 1.0 };

    let mut rgb = Vec::with_capacity(data.len() * 3);
    for &v in data.iter() {
        if v.is_finite() {
            rgb.extend_from_slice(&color_at(kind, (v - min) / span));
        } else {
            rgb.extend_from_slice(&[255, 255, 255]);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn ratio_never_below_one() {
        assert_eq!(decimation_ratio(10, 10), 1);
        assert_eq!(decimation_ratio(2500, 900), 2);
        assert_eq!(decimation_ratio(1200, 4100), 4);
    }

    #[test]
    fn biomass_ramp_endpoints() {
        assert_eq!(color_at(QuicklookKind::Biomass, 0.0), [245, 245, 220]);
        assert_eq!(color_at(QuicklookKind::Biomass, 0.5), [0, 128, 0]);
        assert_eq!(color_at(QuicklookKind::Biomass, 1.0), [0, 69, 0]);
    }

    #[test]
    fn jet_runs_blue_to_dark_red() {
        assert_eq!(color_at(QuicklookKind::Height, 0.0), [0, 0, 128]);
        assert_eq!(color_at(QuicklookKind::Height, 1.0), [128, 0, 0]);
    }

    #[test]
    fn nan_pixels_render_white() {
        let rgb = colorize(&array![[0.0, f64::NAN, 10.0]], QuicklookKind::Height);
        assert_eq!(rgb.len(), 9);
        assert_eq!(&rgb[0..3], &[0, 0, 128]);
        assert_eq!(&rgb[3..6], &[255, 255, 255]);
        assert_eq!(&rgb[6..9], &[128, 0, 0]);
    }
}
