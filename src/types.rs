//! Shared types and enums used across inkprep.
//! Includes the `Rgb` background color, `ResizeFilter` and `EnumerationOrder`.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{},{},{}", r, g, b)
    }
}

/// Accepts `R,G,B` (decimal) or `#RRGGBB`.
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("expected #RRGGBB, got {s:?}"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{s:?}: {e}"))
            };
            return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected R,G,B, got {s:?}"));
        }
        let mut out = [0u8; 3];
        for (slot, part) in out.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|e| format!("{s:?}: {e}"))?;
        }
        Ok(Rgb(out))
    }
}

/// Resampling filter used when a source has to shrink.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_resize_alg(self) -> fast_image_resize::ResizeAlg {
        use fast_image_resize::{FilterType, ResizeAlg};
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Order in which input files are numbered.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationOrder {
    /// File name, ascending byte order
    #[default]
    Name,
    /// Modification time, oldest first; ties broken by name
    Modified,
}
