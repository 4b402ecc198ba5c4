use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::processing::Canvas;
use crate::error::{Error, Result};

pub fn write_rgb_jpeg(
    output: &Path,
    cols: u32,
    rows: u32,
    rgb_data: &[u8],
    quality: u8,
) -> Result<()> {
    let (cols16, rows16) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            return Err(Error::persist(
                output,
                format!("{}x{} exceeds JPEG dimension limit", cols, rows),
            ));
        }
    };

    let file = File::create(output).map_err(|e| Error::persist(output, e))?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(rgb_data, cols16, rows16, ColorType::Rgb)
        .map_err(|e| Error::persist(output, e))?;
    // BufWriter's drop swallows flush errors
    writer.flush().map_err(|e| Error::persist(output, e))?;
    Ok(())
}

pub fn write_canvas_jpeg(output: &Path, canvas: &Canvas, quality: u8) -> Result<()> {
    write_rgb_jpeg(output, canvas.width, canvas.height, &canvas.data, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_file_decodes_with_same_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.jpg");
        write_rgb_jpeg(&path, 8, 4, &[128u8; 8 * 4 * 3], 90).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[test]
    fn unwritable_path_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("1.jpg");
        let err = write_rgb_jpeg(&path, 1, 1, &[0, 0, 0], 75).unwrap_err();
        assert!(matches!(err, Error::Persist { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_disk_is_persist_error() {
        let err = write_rgb_jpeg(Path::new("/dev/full"), 8, 4, &[128u8; 8 * 4 * 3], 90)
            .unwrap_err();
        assert_eq!(err.kind(), "persist");
    }
}
