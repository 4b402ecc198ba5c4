use fast_image_resize::{PixelType, ResizeOptions, Resizer, images::Image};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ResizeFilter;

/// Largest size that fits inside `box_w`x`box_h` with the source aspect ratio.
///
/// Thumbnail semantics: sources that already fit are returned unchanged, larger
/// ones shrink until the binding axis equals the box edge exactly. The free axis
/// is whichever of floor/ceil keeps the aspect ratio closest to the source
/// (floor on a tie), and never drops below 1.
pub fn calculate_fit_dimensions(
    original_cols: u32,
    original_rows: u32,
    box_cols: u32,
    box_rows: u32,
) -> (u32, u32) {
    if original_cols <= box_cols && original_rows <= box_rows {
        return (original_cols, original_rows);
    }

    let aspect = f64::from(original_cols) / f64::from(original_rows);
    let (bw, bh) = (f64::from(box_cols), f64::from(box_rows));

    if bw / bh >= aspect {
        let cols = closest_aspect(bh * aspect, |n| (aspect - n / bh).abs());
        (cols.min(box_cols), box_rows)
    } else {
        let rows = closest_aspect(bw / aspect, |n| {
            if n == 0.0 { 0.0 } else { (aspect - bw / n).abs() }
        });
        (box_cols, rows.min(box_rows))
    }
}

/// Floor or ceil of `value`, whichever has the smaller `error`; at least 1.
fn closest_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (lo, hi) = (value.floor(), value.ceil());
    let pick = if error(hi) < error(lo) { hi } else { lo };
    (pick as u32).max(1)
}

/// Scale factor `min(box_w / w, box_h / h, 1.0)`.
pub fn fit_scale(original_cols: u32, original_rows: u32, box_cols: u32, box_rows: u32) -> f64 {
    let sx = f64::from(box_cols) / f64::from(original_cols);
    let sy = f64::from(box_rows) / f64::from(original_rows);
    sx.min(sy).min(1.0)
}

/// Resample a packed RGB8 buffer.
pub fn resize_rgb_image(
    data: &[u8],
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
    filter: ResizeFilter,
) -> Result<Vec<u8>> {
    if original_cols == 0 || original_rows == 0 {
        return Err(Error::Resize(format!(
            "source has no pixels ({}x{})",
            original_cols, original_rows
        )));
    }
    if (original_cols, original_rows) == (target_cols, target_rows) {
        return Ok(data.to_vec());
    }

    debug!(
        "Resampling {}x{} -> {}x{} ({:?})",
        original_cols, original_rows, target_cols, target_rows, filter
    );

    let resize_options = ResizeOptions::new().resize_alg(filter.to_resize_alg());
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols,
        original_rows,
        data.to_vec(),
        PixelType::U8x3,
    )?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x3);
    resizer.resize(&src_image, &mut dst_image, &resize_options)?;

    Ok(dst_image.into_vec())
}
