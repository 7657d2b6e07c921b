//! Edge-adaptive spatial upsampling: a 12-tap anisotropic reconstruction
//! filter evaluated independently for every output pixel.
//!
//! The kernel walks a fixed cross/diamond stencil around the mapped source
//! position, estimates a local gradient direction from the four quadrants
//! surrounding the center, stretches a windowed-sinc kernel along that
//! direction, and accumulates edge-weighted taps. Interpolation happens in
//! XYZ space; the result is converted back to RGB on the way out.

use crate::color::convert::{rgb_to_xyz, xyz_to_rgb};
use crate::filter::config::{FilterConfig, QualityMode};
use crate::filter::edge::{edge_adjusted_weight, edge_strength};
use crate::filter::letterbox::Letterbox;
use crate::foundation::core::Sample;
use crate::foundation::math::{clamp01, max3, min3, mul_add3, rsqrt};
use crate::frame::source::Sampler;

/// Squared gradient magnitude below which normalizing the direction would
/// be singular; such pixels take the bilinear fast path.
const DEGENERATE_DIR2: f32 = 1.0 / 32768.0;

/// Per-frame constants mapping output pixels into source texel space.
///
/// Derived once per frame from the input viewport, input size, and output
/// size; the letterbox fit (area rectangle, vertical flip, edge inset) is
/// folded into the affine scale/offset so the per-pixel mapping stays one
/// multiply-add per axis. Recomputed whenever any geometry input changes,
/// never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasuConstants {
    scale: [f32; 2],
    offset: [f32; 2],
    /// Normalized step between stencil taps: one source texel.
    texel: [f32; 2],
}

impl EasuConstants {
    /// Derive the constants for one geometry.
    pub fn new(letterbox: &Letterbox, source_width: u32, source_height: u32) -> Self {
        let in_w = source_width as f32;
        let in_h = source_height as f32;
        let (uv_scale, uv_offset) = letterbox.uv_affine();
        Self {
            scale: [uv_scale[0] * in_w, uv_scale[1] * in_h],
            offset: [uv_offset[0] * in_w - 0.5, uv_offset[1] * in_h - 0.5],
            texel: [1.0 / in_w, 1.0 / in_h],
        }
    }

    /// Split an output pixel position into the containing source texel and
    /// the subpixel remainder in `[0, 1)²`.
    fn source_pos(&self, ip: [f32; 2]) -> ([f32; 2], [f32; 2]) {
        let pos = [
            ip[0] * self.scale[0] + self.offset[0],
            ip[1] * self.scale[1] + self.offset[1],
        ];
        let fp = [pos[0].floor(), pos[1].floor()];
        ([fp[0], fp[1]], [pos[0] - fp[0], pos[1] - fp[1]])
    }
}

/// One stencil tap: XYZ color plus its luma proxy `Y + 0.5*(X+Z)`.
#[derive(Clone, Copy)]
struct Tap {
    c: [f32; 3],
    l: f32,
}

fn tap<S: Sampler + ?Sized>(src: &S, con: &EasuConstants, fp: [f32; 2], dx: f32, dy: f32) -> Tap {
    let u = (fp[0] + dx + 0.5) * con.texel[0];
    let v = (fp[1] + dy + 0.5) * con.texel[1];
    let c = rgb_to_xyz(src.sample(u, v).rgb());
    Tap {
        c,
        l: c[1] + 0.5 * (c[0] + c[2]),
    }
}

/// Gradient direction and anisotropy accumulated over the four quadrants.
#[derive(Default)]
struct GradientAccum {
    dir: [f32; 2],
    len: f32,
}

impl GradientAccum {
    /// Fold in one quadrant's finite differences.
    ///
    /// `lumas` is the quadrant's cross of proxies `(a, b, c, d, e)` where
    /// `c` is the quadrant center, `b`/`d` its horizontal neighbors and
    /// `a`/`e` its vertical neighbors.
    fn add_quadrant(&mut self, w: f32, lumas: [f32; 5], edge: f32, edge_weight: f32) {
        let [la, lb, lc, ld, le] = lumas;
        let ew = edge_adjusted_weight(edge, edge_weight);

        let span_x = (ld - lc).abs().max((lc - lb).abs());
        let dir_x = ld - lb;
        self.dir[0] += dir_x * w * ew;
        if span_x > 0.0 {
            let f = clamp01(dir_x.abs() / span_x);
            self.len += f * f * w * ew;
        }

        let span_y = (le - lc).abs().max((lc - la).abs());
        let dir_y = le - la;
        self.dir[1] += dir_y * w * ew;
        if span_y > 0.0 {
            let f = clamp01(dir_y.abs() / span_y);
            self.len += f * f * w * ew;
        }
    }
}

/// Color and weight accumulated over the 12 taps.
#[derive(Default)]
struct TapAccum {
    color: [f32; 3],
    weight: f32,
}

impl TapAccum {
    /// Windowed-sinc weight of one tap at `off` from the output position,
    /// rotated into the gradient frame and scaled by the kernel shape.
    #[allow(clippy::too_many_arguments)]
    fn add_tap(
        &mut self,
        off: [f32; 2],
        dir: [f32; 2],
        len2: [f32; 2],
        lob: f32,
        clp: f32,
        color: [f32; 3],
        edge: f32,
        edge_weight: f32,
    ) {
        let vx = (off[0] * dir[0] + off[1] * dir[1]) * len2[0];
        let vy = (off[0] * -dir[1] + off[1] * dir[0]) * len2[1];
        let d2 = (vx * vx + vy * vy).min(clp);

        let mut wb = 0.4 * d2 - 1.0;
        let mut wa = lob * d2 - 1.0;
        wb *= wb;
        wa *= wa;
        wb = 1.5625 * wb - 0.5625;
        let w = wb * wa * edge_adjusted_weight(edge, edge_weight);

        self.color = mul_add3(self.color, color, w);
        self.weight += w;
    }
}

fn bilinear_central(f: &Tap, g: &Tap, j: &Tap, k: &Tap, pp: [f32; 2]) -> [f32; 3] {
    let wf = (1.0 - pp[0]) * (1.0 - pp[1]);
    let wg = pp[0] * (1.0 - pp[1]);
    let wj = (1.0 - pp[0]) * pp[1];
    let wk = pp[0] * pp[1];
    let mut acc = [0.0; 3];
    acc = mul_add3(acc, f.c, wf);
    acc = mul_add3(acc, g.c, wg);
    acc = mul_add3(acc, j.c, wj);
    mul_add3(acc, k.c, wk)
}

/// Reconstruct one output pixel at `ip` (output pixel index).
///
/// The stencil, in source texels around the mapped position:
///
/// ```text
///      b c
///    e f g h
///    i j k l
///      n o
/// ```
pub fn easu_pixel<S: Sampler + ?Sized>(
    src: &S,
    con: &EasuConstants,
    cfg: &FilterConfig,
    ip: [f32; 2],
) -> Sample {
    let (fp, pp) = con.source_pos(ip);

    let b = tap(src, con, fp, 0.0, -1.0);
    let c = tap(src, con, fp, 1.0, -1.0);
    let e = tap(src, con, fp, -1.0, 0.0);
    let f = tap(src, con, fp, 0.0, 0.0);
    let g = tap(src, con, fp, 1.0, 0.0);
    let h = tap(src, con, fp, 2.0, 0.0);
    let i = tap(src, con, fp, -1.0, 1.0);
    let j = tap(src, con, fp, 0.0, 1.0);
    let k = tap(src, con, fp, 1.0, 1.0);
    let l = tap(src, con, fp, 2.0, 1.0);
    let n = tap(src, con, fp, 0.0, 2.0);
    let o = tap(src, con, fp, 1.0, 2.0);

    let t = cfg.edge_threshold;
    let edge_tl = edge_strength(b.c, c.c, f.c, g.c, t);
    let edge_tr = edge_strength(c.c, b.c, g.c, f.c, t);
    let edge_bl = edge_strength(f.c, g.c, j.c, k.c, t);
    let edge_br = edge_strength(g.c, f.c, k.c, j.c, t);

    let ew = cfg.edge_weight;
    let mut grad = GradientAccum::default();
    let (px, py) = (pp[0], pp[1]);
    grad.add_quadrant((1.0 - px) * (1.0 - py), [b.l, e.l, f.l, g.l, j.l], edge_tl, ew);
    grad.add_quadrant(px * (1.0 - py), [c.l, f.l, g.l, h.l, k.l], edge_tr, ew);
    grad.add_quadrant((1.0 - px) * py, [f.l, i.l, j.l, k.l, n.l], edge_bl, ew);
    grad.add_quadrant(px * py, [g.l, j.l, k.l, l.l, o.l], edge_br, ew);

    let dir2 = grad.dir[0] * grad.dir[0] + grad.dir[1] * grad.dir[1];
    if dir2 < DEGENERATE_DIR2 {
        // A near-zero direction cannot be normalized; constant regions
        // reduce to the plain bilinear blend of the central quad.
        return Sample::opaque(xyz_to_rgb(bilinear_central(&f, &g, &j, &k, pp)));
    }

    let dir_r = rsqrt(dir2);
    let dir = [grad.dir[0] * dir_r, grad.dir[1] * dir_r];

    let len = grad.len * 0.5;
    let len = len * len;
    let stretch = (dir[0] * dir[0] + dir[1] * dir[1]) / dir[0].abs().max(dir[1].abs());
    let len2 = [1.0 + (stretch - 1.0) * len, 1.0 - 0.5 * len];
    let lob = 0.5 - 0.29 * len;
    let clp = 1.0 / lob;

    let center_edge = (edge_tl + edge_tr + edge_bl + edge_br) * 0.25;

    let off = |dx: f32, dy: f32| [dx - px, dy - py];
    let mut acc = TapAccum::default();
    acc.add_tap(off(0.0, -1.0), dir, len2, lob, clp, b.c, edge_tl, ew);
    acc.add_tap(off(1.0, -1.0), dir, len2, lob, clp, c.c, edge_tr, ew);
    acc.add_tap(off(-1.0, 1.0), dir, len2, lob, clp, i.c, edge_bl, ew);
    acc.add_tap(off(0.0, 1.0), dir, len2, lob, clp, j.c, edge_bl, ew);
    acc.add_tap(off(0.0, 0.0), dir, len2, lob, clp, f.c, center_edge, ew);
    acc.add_tap(off(-1.0, 0.0), dir, len2, lob, clp, e.c, edge_tl, ew);
    acc.add_tap(off(1.0, 1.0), dir, len2, lob, clp, k.c, edge_br, ew);
    acc.add_tap(off(2.0, 1.0), dir, len2, lob, clp, l.c, edge_br, ew);
    acc.add_tap(off(2.0, 0.0), dir, len2, lob, clp, h.c, edge_tr, ew);
    acc.add_tap(off(1.0, 0.0), dir, len2, lob, clp, g.c, edge_tr, ew);
    acc.add_tap(off(1.0, 2.0), dir, len2, lob, clp, o.c, edge_br, ew);
    acc.add_tap(off(0.0, 2.0), dir, len2, lob, clp, n.c, edge_bl, ew);

    // The lobe/clip shaping keeps the denominator away from zero on the
    // anisotropic path, but constant-color corners can get pathological.
    let mut pix = if acc.weight.abs() <= f32::EPSILON {
        bilinear_central(&f, &g, &j, &k, pp)
    } else {
        [
            acc.color[0] / acc.weight,
            acc.color[1] / acc.weight,
            acc.color[2] / acc.weight,
        ]
    };

    if cfg.quality == QualityMode::Accurate {
        // De-ringing: constrain to the local min/max of the central quad.
        let min4 = min3(min3(f.c, g.c), min3(j.c, k.c));
        let max4 = max3(max3(f.c, g.c), max3(j.c, k.c));
        pix = min3(max4, max3(min4, pix));
    }

    Sample::opaque(xyz_to_rgb(pix))
}
