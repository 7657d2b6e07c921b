use anyhow::Context;

use crate::foundation::error::FrameliftResult;
use crate::frame::source::SourceFrame;

/// Decode encoded image bytes into an RGBA8 source frame.
///
/// Alpha stays straight; the filter treats frames as opaque and never
/// composites, so there is no premultiplication step here.
pub fn decode_image(bytes: &[u8]) -> FrameliftResult<SourceFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceFrame::new(width, height, rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::source::Sampler;

    #[test]
    fn decodes_png_bytes() {
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, image::Rgba([255, 255, 255, 255]));

        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let frame = decode_image(&bytes).unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 2));
        let s = frame.sample(0.25, 0.25);
        assert!((s.r - 1.0).abs() < 1e-6 && s.g.abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }
}
