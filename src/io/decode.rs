use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::{Error, Result};

/// Decode `path` as an image. The format is sniffed from the content, so a
/// PNG saved under a `.jpg` name still decodes. Anything unreadable or not an
/// image is reported as `Error::Decode`.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}
