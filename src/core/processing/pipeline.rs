use image::DynamicImage;
use serde::Serialize;
use tracing::debug;

use crate::core::params::CanvasProfile;
use crate::core::processing::padding::{center_offset, filled_canvas, paste_rgb};
use crate::core::processing::resize::{calculate_fit_dimensions, fit_scale, resize_rgb_image};
use crate::error::Result;

/// Where the fitted source landed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A fully composed output frame: always exactly the profile's size.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8, row-major
    pub data: Vec<u8>,
    pub placement: Placement,
}

impl Canvas {
    /// RGB value at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        self.data.get(i..i + 3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Shrink `image` to fit the profile's box (never enlarging), center it and
/// fill the rest of the canvas with the profile background.
pub fn fit_to_box(image: &DynamicImage, profile: &CanvasProfile) -> Result<Canvas> {
    // Alpha is dropped, not composited
    let rgb = image.to_rgb8();
    let (cols, rows) = rgb.dimensions();

    let (fit_cols, fit_rows) =
        calculate_fit_dimensions(cols, rows, profile.width, profile.height);
    debug!(
        "Fit {}x{} into {}x{}: scale={:.6}, result {}x{}",
        cols,
        rows,
        profile.width,
        profile.height,
        fit_scale(cols, rows, profile.width, profile.height),
        fit_cols,
        fit_rows
    );

    let fitted = resize_rgb_image(
        rgb.as_raw(),
        cols,
        rows,
        fit_cols,
        fit_rows,
        profile.filter,
    )?;

    let dx = center_offset(fit_cols, profile.width);
    let dy = center_offset(fit_rows, profile.height);

    let mut data = filled_canvas(profile.width, profile.height, profile.background);
    paste_rgb(
        &mut data,
        profile.width,
        profile.height,
        &fitted,
        fit_cols,
        fit_rows,
        dx,
        dy,
    );

    Ok(Canvas {
        width: profile.width,
        height: profile.height,
        data,
        placement: Placement {
            x: dx,
            y: dy,
            width: fit_cols,
            height: fit_rows,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb as Px, RgbImage, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Px(color)))
    }

    #[test]
    fn landscape_is_shrunk_and_centered_vertically() {
        let profile = CanvasProfile {
            filter: crate::types::ResizeFilter::Nearest,
            ..Default::default()
        };
        let canvas = fit_to_box(&solid(1600, 1200, [250, 10, 10]), &profile).unwrap();

        assert_eq!((canvas.width, canvas.height), (825, 1200));
        assert_eq!(canvas.data.len(), 825 * 1200 * 3);
        assert_eq!(
            canvas.placement,
            Placement {
                x: 0,
                y: 290,
                width: 825,
                height: 619
            }
        );
        assert_eq!(canvas.pixel(0, 289), Some([4, 4, 4]));
        assert_eq!(canvas.pixel(412, 600), Some([250, 10, 10]));
        assert_eq!(canvas.pixel(824, 909), Some([4, 4, 4]));
    }

    #[test]
    fn small_image_is_pasted_unscaled() {
        let canvas =
            fit_to_box(&solid(400, 300, [0, 200, 0]), &CanvasProfile::default()).unwrap();

        assert_eq!(
            canvas.placement,
            Placement {
                x: 212,
                y: 450,
                width: 400,
                height: 300
            }
        );
        assert_eq!(canvas.pixel(211, 450), Some([4, 4, 4]));
        assert_eq!(canvas.pixel(212, 450), Some([0, 200, 0]));
        assert_eq!(canvas.pixel(611, 749), Some([0, 200, 0]));
        assert_eq!(canvas.pixel(612, 749), Some([4, 4, 4]));
        assert_eq!(canvas.pixel(212, 750), Some([4, 4, 4]));
    }

    #[test]
    fn exact_size_covers_whole_canvas() {
        let canvas =
            fit_to_box(&solid(825, 1200, [1, 2, 3]), &CanvasProfile::default()).unwrap();
        assert_eq!(canvas.placement.x, 0);
        assert_eq!(canvas.placement.y, 0);
        assert!(canvas.data.chunks_exact(3).all(|p| p == [1, 2, 3]));
    }

    #[test]
    fn pixel_outside_canvas_is_none() {
        let canvas = fit_to_box(&solid(4, 4, [1, 1, 1]), &CanvasProfile::default()).unwrap();
        assert_eq!(canvas.pixel(824, 1199), Some([4, 4, 4]));
        assert_eq!(canvas.pixel(825, 0), None);
        assert_eq!(canvas.pixel(0, 1200), None);
    }

    #[test]
    fn grayscale_and_alpha_sources_become_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([77])));
        let canvas = fit_to_box(&gray, &CanvasProfile::default()).unwrap();
        assert_eq!(canvas.pixel(412, 600), Some([77, 77, 77]));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            10,
            10,
            image::Rgba([9, 8, 7, 0]),
        ));
        let canvas = fit_to_box(&rgba, &CanvasProfile::default()).unwrap();
        assert_eq!(canvas.pixel(412, 600), Some([9, 8, 7]));
    }

    #[test]
    fn custom_profile_controls_size_and_background() {
        let profile = CanvasProfile {
            width: 100,
            height: 50,
            background: crate::types::Rgb::new(255, 255, 255),
            ..Default::default()
        };
        let canvas = fit_to_box(&solid(400, 400, [0, 0, 0]), &profile).unwrap();
        assert_eq!((canvas.width, canvas.height), (100, 50));
        assert_eq!(
            canvas.placement,
            Placement {
                x: 25,
                y: 0,
                width: 50,
                height: 50
            }
        );
        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255]));
    }
}
