use crate::foundation::core::Sample;
use crate::foundation::error::{FrameliftError, FrameliftResult};

/// Sampling capability over the current source frame.
///
/// This is the seam between the filter and the external frame source: any
/// `(u, v) ∈ [0,1]² -> Sample` function with known pixel dimensions can
/// drive the pipeline. `Sync` is required so a frame pass can fan out
/// across rows.
///
/// Implementations must behave like a bilinear, clamp-to-edge texture
/// sampler; the stricter out-of-range policy (opaque black outside the
/// fitted video area) is owned by the letterbox mapper, not the sampler.
pub trait Sampler: Sync {
    /// Source width in pixels.
    fn width(&self) -> u32;

    /// Source height in pixels.
    fn height(&self) -> u32;

    /// Bilinear sample at a normalized coordinate.
    fn sample(&self, u: f32, v: f32) -> Sample;
}

/// A decoded source frame: tightly packed RGBA8 rows plus dimensions.
///
/// Alpha is carried through sampling but the filter treats frames as
/// opaque; outputs always have alpha 1.
#[derive(Clone, Debug)]
pub struct SourceFrame {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl SourceFrame {
    /// Wrap an RGBA8 buffer, checking dimensions against its length.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> FrameliftResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameliftError::validation("source dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FrameliftError::validation("source buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(FrameliftError::validation(
                "source buffer must be width*height*4 bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// Build a frame by evaluating a color function at every texel.
    pub fn from_fn(
        width: u32,
        height: u32,
        f: impl Fn(u32, u32) -> Sample,
    ) -> FrameliftResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameliftError::validation("source dimensions must be > 0"));
        }
        let mut rgba8 = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba8.extend_from_slice(&f(x, y).to_rgba8());
            }
        }
        Self::new(width, height, rgba8)
    }

    fn texel(&self, x: u32, y: u32) -> Sample {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8[idx..idx + 4];
        Sample {
            r: px[0] as f32 / 255.0,
            g: px[1] as f32 / 255.0,
            b: px[2] as f32 / 255.0,
            a: px[3] as f32 / 255.0,
        }
    }
}

impl Sampler for SourceFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, u: f32, v: f32) -> Sample {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let px = (u * self.width as f32 - 0.5).clamp(0.0, max_x);
        let py = (v * self.height as f32 - 0.5).clamp(0.0, max_y);

        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;

        let x0 = x0 as u32;
        let y0 = y0 as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x1, y0);
        let c01 = self.texel(x0, y1);
        let c11 = self.texel(x1, y1);

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let bilerp = |a: f32, b: f32, c: f32, d: f32| lerp(lerp(a, b, fx), lerp(c, d, fx), fy);

        Sample {
            r: bilerp(c00.r, c10.r, c01.r, c11.r),
            g: bilerp(c00.g, c10.g, c01.g, c11.g),
            b: bilerp(c00.b, c10.b, c01.b, c11.b),
            a: bilerp(c00.a, c10.a, c01.a, c11.a),
        }
    }
}

/// A filtered output frame: tightly packed RGBA8 rows plus dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Read back one pixel; panics on out-of-range coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of range");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one(left: [u8; 4], right: [u8; 4]) -> SourceFrame {
        let mut data = Vec::new();
        data.extend_from_slice(&left);
        data.extend_from_slice(&right);
        SourceFrame::new(2, 1, data).unwrap()
    }

    #[test]
    fn new_rejects_mismatched_buffer() {
        assert!(SourceFrame::new(2, 2, vec![0u8; 15]).is_err());
        assert!(SourceFrame::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn sample_at_texel_center_is_exact() {
        let f = two_by_one([255, 0, 0, 255], [0, 255, 0, 255]);
        let s = f.sample(0.25, 0.5);
        assert!((s.r - 1.0).abs() < 1e-6 && s.g.abs() < 1e-6);
        let s = f.sample(0.75, 0.5);
        assert!(s.r.abs() < 1e-6 && (s.g - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sample_midway_blends_evenly() {
        let f = two_by_one([255, 0, 0, 255], [0, 0, 255, 255]);
        let s = f.sample(0.5, 0.5);
        assert!((s.r - 0.5).abs() < 1e-3);
        assert!((s.b - 0.5).abs() < 1e-3);
    }

    #[test]
    fn sample_clamps_to_edge() {
        let f = two_by_one([255, 0, 0, 255], [0, 0, 255, 255]);
        let s = f.sample(-2.0, 0.5);
        assert!((s.r - 1.0).abs() < 1e-6);
        let s = f.sample(3.0, 0.5);
        assert!((s.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn from_fn_lays_out_rows() {
        let f = SourceFrame::from_fn(2, 2, |x, y| {
            if (x, y) == (1, 0) {
                Sample::opaque([1.0, 1.0, 1.0])
            } else {
                Sample::BLACK
            }
        })
        .unwrap();
        assert_eq!(f.texel(1, 0).to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(f.texel(0, 1).to_rgba8(), [0, 0, 0, 255]);
    }
}
