use super::encode::data_url;
use crate::error::{ArchiveError, Result};
use image::ImageFormat;
use std::fs;
use std::path::Path;

/// An image file read into an embedded reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub title: String,
    pub url: String,
}

/// Read `path` fully and embed it as-is, without re-encoding.
pub fn read_image_file(path: &Path) -> Result<UploadedImage> {
    let bytes = fs::read(path).map_err(ArchiveError::Io)?;
    let mime = sniff_mime(path, &bytes);
    Ok(UploadedImage {
        title: title_from_path(path),
        url: data_url(&mime, &bytes),
    })
}

/// File name up to its first dot: `IMG_01.final.jpg` -> `IMG_01`.
pub fn title_from_path(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => "Untitled".to_string(),
    }
}

fn sniff_mime(path: &Path, bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::encode::{describe, ImageSource};
    use image::{DynamicImage, Rgb, RgbImage};
    use std::path::PathBuf;

    #[test]
    fn titles_stop_at_first_dot() {
        assert_eq!(title_from_path(Path::new("/x/IMG_01.final.jpg")), "IMG_01");
        assert_eq!(title_from_path(Path::new("doyoung.png")), "doyoung");
        assert_eq!(title_from_path(Path::new(".hidden")), "Untitled");
        assert_eq!(title_from_path(&PathBuf::from("noext")), "noext");
    }

    #[test]
    fn embeds_png_with_sniffed_mime() {
        let dir = tempfile::tempdir().unwrap();
        // Misleading extension: content wins.
        let path = dir.path().join("card.jpg");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([9, 9, 9])))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        let size = fs::metadata(&path).unwrap().len() as usize;

        let uploaded = read_image_file(&path).unwrap();
        assert_eq!(uploaded.title, "card");
        assert_eq!(
            describe(&uploaded.url),
            ImageSource::Embedded {
                mime: "image/png",
                bytes: size
            }
        );
    }

    #[test]
    fn unknown_content_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.bin");
        fs::write(&path, b"hello").unwrap();
        let uploaded = read_image_file(&path).unwrap();
        assert!(uploaded.url.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_image_file(Path::new("/no/such/file.png")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
    }
}
