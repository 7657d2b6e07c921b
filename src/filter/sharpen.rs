//! Contrast-adaptive luma sharpening over a 3×3 direct-sampled window.
//!
//! The reconstructed estimate is split into luma and chroma; only luma is
//! sharpened, scaled by the local contrast amplitude and boosted where the
//! diagonal corners detect an edge. Chroma passes through untouched, so a
//! uniform window leaves the estimate exactly as it came in.

use crate::filter::config::FilterConfig;
use crate::filter::edge::edge_strength;
use crate::foundation::core::{REC709_LUMA, Sample, rec709_luma};
use crate::foundation::math::{add3, clamp01, dot3, max3, min3, mix, mix3, rsqrt};

/// Floor for the summed max channel before its reciprocal; an all-black
/// window would otherwise divide by zero.
const MAX_CHANNEL_EPSILON: f32 = 1e-4;

/// The eight direct letterbox samples around an output pixel.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood {
    /// Top-left diagonal.
    pub tl: Sample,
    /// Directly above.
    pub top: Sample,
    /// Top-right diagonal.
    pub tr: Sample,
    /// Directly left.
    pub left: Sample,
    /// Directly right.
    pub right: Sample,
    /// Bottom-left diagonal.
    pub bl: Sample,
    /// Directly below.
    pub bottom: Sample,
    /// Bottom-right diagonal.
    pub br: Sample,
}

/// Sharpen the reconstructed estimate `e` against its direct neighborhood.
pub fn sharpen_pixel(e: Sample, nb: &Neighborhood, cfg: &FilterConfig) -> Sample {
    let edge = edge_strength(
        nb.tl.rgb(),
        nb.tr.rgb(),
        nb.bl.rgb(),
        nb.br.rgb(),
        cfg.edge_threshold,
    );

    let e_rgb = e.rgb();
    let e_luma = rec709_luma(e_rgb);
    let chroma = [e_rgb[0] - e_luma, e_rgb[1] - e_luma, e_rgb[2] - e_luma];

    // Two successive per-channel reductions, summed: the plus-shaped five
    // first, then widened to the full nine-sample window.
    let mn5 = min3(
        min3(min3(nb.left.rgb(), e_rgb), min3(nb.right.rgb(), nb.top.rgb())),
        nb.bottom.rgb(),
    );
    let mn9 = min3(
        mn5,
        min3(
            min3(nb.tl.rgb(), nb.tr.rgb()),
            min3(nb.bl.rgb(), nb.br.rgb()),
        ),
    );
    let mn = add3(mn5, mn9);

    let mx5 = max3(
        max3(max3(nb.left.rgb(), e_rgb), max3(nb.right.rgb(), nb.top.rgb())),
        nb.bottom.rgb(),
    );
    let mx9 = max3(
        mx5,
        max3(
            max3(nb.tl.rgb(), nb.tr.rgb()),
            max3(nb.bl.rgb(), nb.br.rgb()),
        ),
    );
    let mx = add3(mx5, mx9);

    let amp = |i: usize| clamp01(mn[i].min(2.0 - mx[i]) / mx[i].max(MAX_CHANNEL_EPSILON));
    // Gain saturates to +inf where a channel bottoms out; the weight math
    // below collapses that to "leave luma alone", never NaN.
    let gain = [rsqrt(amp(0)), rsqrt(amp(1)), rsqrt(amp(2))];

    let peak = -3.0 * clamp01(cfg.contrast) + 8.0;
    let mut luma_weight = -1.0 / (dot3(gain, REC709_LUMA) * peak);
    luma_weight *= mix(1.0, cfg.edge_weight, edge);

    let window = nb.top.luma() + nb.left.luma() + nb.right.luma() + nb.bottom.luma();
    let sharpened = clamp01((window * luma_weight + e_luma) / (4.0 * luma_weight + 1.0));

    let out = [chroma[0] + sharpened, chroma[1] + sharpened, chroma[2] + sharpened];
    Sample::opaque(mix3(e_rgb, out, cfg.sharpening))
}
