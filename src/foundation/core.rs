use crate::foundation::error::{FrameliftError, FrameliftResult};

/// Rec.709 luma weights.
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Rec.709-weighted luma of a color triple.
pub fn rec709_luma(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA[0] + rgb[1] * REC709_LUMA[1] + rgb[2] * REC709_LUMA[2]
}

/// An RGBA color sample, each channel nominally in `[0, 1]`.
///
/// Filter outputs always carry `a == 1.0`; sharpening with intensity above
/// 1 extrapolates, so color channels may transiently leave `[0, 1]` until
/// quantization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Sample {
    /// Opaque black, the defined result for coordinates outside the video area.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Build an opaque sample from a color triple.
    pub fn opaque(rgb: [f32; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 1.0,
        }
    }

    /// The color channels as a triple.
    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Rec.709-weighted luma of the color channels.
    pub fn luma(self) -> f32 {
        rec709_luma(self.rgb())
    }

    /// Quantize to RGBA8 with rounding, clamping each channel to `[0, 1]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> FrameliftResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameliftError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Aspect ratios of the source frame and the output surface.
///
/// A pure function of the two sizes; recomputed whenever either changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectState {
    /// Source width over source height.
    pub video_aspect: f32,
    /// Canvas width over canvas height.
    pub canvas_aspect: f32,
}

impl AspectState {
    /// Derive the aspect state from a source size and a canvas.
    pub fn new(source_width: u32, source_height: u32, canvas: Canvas) -> FrameliftResult<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(FrameliftError::validation("source dimensions must be > 0"));
        }
        Ok(Self {
            video_aspect: source_width as f32 / source_height as f32,
            canvas_aspect: canvas.aspect(),
        })
    }

    /// True when the source is wider than the canvas (bars top/bottom).
    pub fn is_letterboxed(self) -> bool {
        self.video_aspect > self.canvas_aspect
    }

    /// True when no aspect correction is needed at all.
    pub fn is_neutral(self) -> bool {
        self.video_aspect == self.canvas_aspect
    }
}
