//! Image filters applied to stories and posts at upload time.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Visual filter chosen when uploading media.
///
/// The filter is stored alongside the media reference and applied by the
/// renderer; the domain only carries the choice and its presentation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Blur,
    Brightness,
    Contrast,
    Saturate,
}

impl ImageFilter {
    /// All filters in picker order.
    pub const ALL: [ImageFilter; 7] = [
        Self::None,
        Self::Grayscale,
        Self::Sepia,
        Self::Blur,
        Self::Brightness,
        Self::Contrast,
        Self::Saturate,
    ];

    /// Short label shown under the filter preview.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Original",
            Self::Grayscale => "B&W",
            Self::Sepia => "Sepia",
            Self::Blur => "Blur",
            Self::Brightness => "Bright",
            Self::Contrast => "Sharp",
            Self::Saturate => "Vivid",
        }
    }

    /// CSS `filter` value, or `None` for the original image.
    pub fn css(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Grayscale => Some("grayscale(100%)"),
            Self::Sepia => Some("sepia(100%)"),
            Self::Blur => Some("blur(1px)"),
            Self::Brightness => Some("brightness(120%)"),
            Self::Contrast => Some("contrast(120%)"),
            Self::Saturate => Some("saturate(150%)"),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturate => "saturate",
        }
    }
}

impl std::fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted.is_empty() || wanted == "original" {
            return Ok(Self::None);
        }
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown image filter: {}", s)))
    }
}
