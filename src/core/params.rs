use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ResizeFilter, Rgb};

/// Inkplate 6PLUS panel in portrait orientation.
pub const INKPLATE_WIDTH: u32 = 825;
pub const INKPLATE_HEIGHT: u32 = 1200;
pub const INKPLATE_BACKGROUND: Rgb = Rgb::new(4, 4, 4);

/// Target canvas description, suitable for config files and device presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasProfile {
    pub width: u32,
    pub height: u32,
    /// Fill for the margins around the fitted image
    pub background: Rgb,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
    pub filter: ResizeFilter,
}

impl Default for CanvasProfile {
    fn default() -> Self {
        Self {
            width: INKPLATE_WIDTH,
            height: INKPLATE_HEIGHT,
            background: INKPLATE_BACKGROUND,
            jpeg_quality: 75,
            filter: ResizeFilter::Lanczos3,
        }
    }
}

impl CanvasProfile {
    pub fn validate(&self) -> Result<()> {
        // JPEG stores dimensions as u16
        for (arg, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > u32::from(u16::MAX) {
                return Err(Error::InvalidArgument {
                    arg,
                    value: value.to_string(),
                });
            }
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }

    /// Load a profile from a JSON file. Missing fields take the Inkplate defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let profile: CanvasProfile =
            serde_json::from_str(&text).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Where and how the fetcher stores downloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchParams {
    pub working_dir: PathBuf,
    /// Appended verbatim to each identifier to form the retrieval URL
    pub url_suffix: String,
    /// The local name is the segment after the first occurrence of this
    pub delimiter: char,
    pub extension: String,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("raw_images"),
            url_suffix: "/datastream/OBJ/view".to_string(),
            delimiter: '%',
            extension: "jpg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_inkplate() {
        let p = CanvasProfile::default();
        assert_eq!((p.width, p.height), (825, 1200));
        assert_eq!(p.background, Rgb::new(4, 4, 4));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_profiles() {
        let zero = CanvasProfile {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(Error::InvalidArgument { arg: "width", .. })
        ));

        let huge = CanvasProfile {
            height: 70_000,
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        let quality = CanvasProfile {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            quality.validate(),
            Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                ..
            })
        ));
    }

    #[test]
    fn partial_json_profile_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kindle.json");
        std::fs::write(&path, r#"{ "width": 1072, "height": 1448, "filter": "bilinear" }"#)
            .unwrap();

        let p = CanvasProfile::from_json_file(&path).unwrap();
        assert_eq!((p.width, p.height), (1072, 1448));
        assert_eq!(p.filter, ResizeFilter::Bilinear);
        assert_eq!(p.background, INKPLATE_BACKGROUND);
        assert_eq!(p.jpeg_quality, 75);
    }

    #[test]
    fn malformed_json_profile_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ width: ").unwrap();
        assert!(matches!(
            CanvasProfile::from_json_file(&path),
            Err(Error::Config { .. })
        ));
    }
}
