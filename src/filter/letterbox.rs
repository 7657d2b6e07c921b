//! Output-pixel to source-coordinate mapping with aspect-preserving fit.

use crate::filter::config::QualityMode;
use crate::foundation::core::{AspectState, Canvas, Sample};
use crate::foundation::error::FrameliftResult;
use crate::foundation::math::mix;
use crate::frame::source::Sampler;

/// Maps output pixels to normalized source coordinates.
///
/// In [`QualityMode::Accurate`] the fit preserves the source aspect ratio
/// (letterbox/pillarbox bars as needed), flips the vertical axis to
/// texture-space convention, and insets the sampled region a few texels so
/// bilinear taps never bleed bar color into the picture. Coordinates that
/// land outside `[0, 1]²` after the fit have **no sample**: callers must
/// produce opaque black, not a clamped edge texel.
///
/// When the two aspect ratios are equal the mapper is exact: no rescale
/// and no inset, the mapped coordinate is the plain normalized pixel
/// center (flipped). [`QualityMode::Fast`] behaves that way for every
/// geometry.
#[derive(Clone, Copy, Debug)]
pub struct Letterbox {
    canvas: Canvas,
    aspect: AspectState,
    /// Per-axis rescale factor about the 0.5 center.
    scale: [f32; 2],
    /// Per-axis normalized inset for the `[inset, 1-inset]` remap.
    inset: [f32; 2],
}

impl Letterbox {
    /// Build the mapper for one geometry.
    pub fn new(
        source_width: u32,
        source_height: u32,
        canvas: Canvas,
        quality: QualityMode,
    ) -> FrameliftResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let aspect = AspectState::new(source_width, source_height, canvas)?;

        let (scale, inset) = if quality == QualityMode::Fast || aspect.is_neutral() {
            ([1.0, 1.0], [0.0, 0.0])
        } else if aspect.is_letterboxed() {
            // Source wider than canvas: bars top/bottom, stretch v past the
            // unit range so the picture fills the width.
            (
                [1.0, aspect.video_aspect / aspect.canvas_aspect],
                [2.0 / source_width as f32, 3.0 / source_height as f32],
            )
        } else {
            // Source taller than canvas: bars left/right.
            (
                [aspect.canvas_aspect / aspect.video_aspect, 1.0],
                [3.0 / source_width as f32, 2.0 / source_height as f32],
            )
        };

        Ok(Self {
            canvas,
            aspect,
            scale,
            inset,
        })
    }

    /// The aspect state this mapper was built from.
    pub fn aspect(&self) -> AspectState {
        self.aspect
    }

    /// Map an output pixel (by index, sampling its center) to a normalized
    /// source coordinate, or `None` outside the fitted video area.
    ///
    /// Signed coordinates let neighborhood gathers walk off the surface at
    /// its borders and still resolve consistently.
    pub fn map(&self, x: i32, y: i32) -> Option<(f32, f32)> {
        let u = (x as f32 + 0.5) / self.canvas.width as f32;
        let v = (y as f32 + 0.5) / self.canvas.height as f32;

        let u = (u - 0.5) * self.scale[0] + 0.5;
        let v = (v - 0.5) * self.scale[1] + 0.5;
        let v = 1.0 - v;

        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        let u = mix(self.inset[0], 1.0 - self.inset[0], u);
        let v = mix(self.inset[1], 1.0 - self.inset[1], v);
        Some((u, v))
    }

    /// Direct sample: map then bilinear-sample, opaque black outside.
    pub fn sample<S: Sampler + ?Sized>(&self, src: &S, x: i32, y: i32) -> Sample {
        match self.map(x, y) {
            Some((u, v)) => src.sample(u, v),
            None => Sample::BLACK,
        }
    }

    /// Per-axis affine taking an output pixel index to the final sampled
    /// normalized coordinate, with fit, flip, and inset folded in. Used to
    /// derive the reconstruction kernel constants.
    pub(crate) fn uv_affine(&self) -> ([f32; 2], [f32; 2]) {
        let w = self.canvas.width as f32;
        let h = self.canvas.height as f32;

        // u(x) = ((x + 0.5)/w - 0.5) * sx + 0.5
        let ax = self.scale[0] / w;
        let bx = 0.5 * self.scale[0] / w + 0.5 - 0.5 * self.scale[0];

        // v(y) = 1 - (((y + 0.5)/h - 0.5) * sy + 0.5)
        let ay = -self.scale[1] / h;
        let by = 1.0 - (0.5 * self.scale[1] / h + 0.5 - 0.5 * self.scale[1]);

        let (ax, bx) = inset_axis(ax, bx, self.inset[0]);
        let (ay, by) = inset_axis(ay, by, self.inset[1]);
        ([ax, ay], [bx, by])
    }
}

fn inset_axis(a: f32, b: f32, inset: f32) -> (f32, f32) {
    let k = 1.0 - 2.0 * inset;
    (a * k, b * k + inset)
}
