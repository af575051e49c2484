use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// Default JPEG quality for captured frames (≈0.8).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// A self-contained `data:` reference to `bytes`.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Lossy-compress a frame. Alpha is dropped; quality is clamped to 1..=100.
pub fn compress_jpeg(frame: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    DynamicImage::ImageRgb8(frame.to_rgb8()).write_with_encoder(encoder)?;
    Ok(buf)
}

pub fn jpeg_data_url(frame: &DynamicImage, quality: u8) -> Result<String> {
    let bytes = compress_jpeg(frame, quality)?;
    Ok(data_url("image/jpeg", &bytes))
}

/// Where a card's image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Remote(&'a str),
    Embedded { mime: &'a str, bytes: usize },
}

/// Classify a card url without decoding the payload.
pub fn describe(url: &str) -> ImageSource<'_> {
    let Some(rest) = url.strip_prefix("data:") else {
        return ImageSource::Remote(url);
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return ImageSource::Remote(url);
    };
    let mime = header.strip_suffix(";base64").unwrap_or(header);
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    ImageSource::Embedded {
        mime,
        bytes: (payload.len() / 4 * 3).saturating_sub(padding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn frame() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 8, Rgb([200, 40, 90])))
    }

    #[test]
    fn jpeg_payload_is_embedded() {
        let url = jpeg_data_url(&frame(), DEFAULT_JPEG_QUALITY).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let payload = url.split_once(',').unwrap().1;
        let bytes = STANDARD.decode(payload).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn lower_quality_is_not_larger() {
        let noisy = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 7 % 255) as u8, (y * 13 % 255) as u8, ((x ^ y) % 255) as u8])
        }));
        let high = compress_jpeg(&noisy, 95).unwrap();
        let low = compress_jpeg(&noisy, 20).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn describes_sources() {
        assert_eq!(
            describe("https://i.pinimg.com/a.jpg"),
            ImageSource::Remote("https://i.pinimg.com/a.jpg")
        );
        let url = data_url("image/png", &[1, 2, 3, 4, 5]);
        assert_eq!(
            describe(&url),
            ImageSource::Embedded {
                mime: "image/png",
                bytes: 5
            }
        );
    }
}
