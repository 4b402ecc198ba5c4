use tracing::debug;

use crate::types::Rgb;

const CHANNELS: usize = 3;

/// Offset that centers `inner` within `outer`; zero when it already fills it.
pub fn center_offset(inner: u32, outer: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Packed RGB8 buffer of `cols`x`rows` filled with `background`.
pub fn filled_canvas(cols: u32, rows: u32, background: Rgb) -> Vec<u8> {
    let pixels = cols as usize * rows as usize;
    let mut data = Vec::with_capacity(pixels * CHANNELS);
    for _ in 0..pixels {
        data.extend_from_slice(&background.0);
    }
    data
}

/// Copy `src` into `canvas` with its top-left corner at (`dx`, `dy`).
/// Rows or columns falling outside the canvas are clipped.
pub fn paste_rgb(
    canvas: &mut [u8],
    canvas_cols: u32,
    canvas_rows: u32,
    src: &[u8],
    cols: u32,
    rows: u32,
    dx: u32,
    dy: u32,
) {
    let (canvas_cols, canvas_rows) = (canvas_cols as usize, canvas_rows as usize);
    let (cols, rows, dx, dy) = (cols as usize, rows as usize, dx as usize, dy as usize);
    if dx >= canvas_cols || dy >= canvas_rows {
        return;
    }
    let copy_cols = cols.min(canvas_cols - dx);
    let copy_rows = rows.min(canvas_rows - dy);

    debug!(
        "Pasting {}x{} at ({}, {}) on {}x{} canvas",
        cols, rows, dx, dy, canvas_cols, canvas_rows
    );

    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..copy_rows {
        let src_offset = row * cols * CHANNELS;
        let dst_offset = ((row + dy) * canvas_cols + dx) * CHANNELS;
        let len = copy_cols * CHANNELS;
        canvas[dst_offset..dst_offset + len].copy_from_slice(&src[src_offset..src_offset + len]);
    }
}
