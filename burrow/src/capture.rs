use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;

const JPEG_QUALITY: u8 = 100;

/// Decode an image file and re-encode it as a maximum quality JPEG.
pub(crate) fn encode_jpeg(path: &Path) -> Result<Vec<u8>> {
    let image = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?;
    let rgb = image.to_rgb8();

    let mut bytes = Vec::new();
    {
        let mut encoder =
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        encoder
            .encode_image(&rgb)
            .with_context(|| format!("failed to encode {}", path.display()))?;
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use image::{Rgba, RgbaImage};

    use super::encode_jpeg;

    #[test]
    fn given_png_file_when_encoded_then_jpeg_bytes_are_returned() {
        let root = test_temp_dir("png");
        let path = root.join("pixel.png");
        RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 255]))
            .save(&path)
            .expect("png should be written");

        let bytes = encode_jpeg(&path).expect("png should encode");

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    #[test]
    fn given_non_image_file_when_encoded_then_error_is_returned() {
        let root = test_temp_dir("not_image");
        let path = root.join("notes.txt");
        fs::write(&path, "plain text").expect("file should be written");

        assert!(encode_jpeg(&path).is_err());

        fs::remove_dir_all(root).expect("test directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "burrow-capture-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir).expect("test directory should be created");
        dir
    }
}
