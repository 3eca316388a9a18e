//! Image inspection and resizing
//!
//! The processing pipeline only needs two operations from an image library:
//! reading the pixel size of an encoded image and re-encoding it at a new
//! size in the same format. [`ImageTransform`] captures exactly that, so the
//! pipeline can be driven by the `image` crate in production and by an
//! in-memory fake in tests.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Pixel dimensions of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Image capability used by the texture processor
pub trait ImageTransform: Send + Sync {
    /// Read the pixel size of an encoded image
    fn identify(&self, data: &[u8]) -> Result<Dimensions>;

    /// Re-encode `data` at exactly `width`x`height`, keeping its format
    fn resize(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>>;
}

/// Resampling filter used when downscaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// [`ImageTransform`] backed by the `image` crate.
///
/// DDS is decode-only in `image`, so resizing a DDS texture fails.
#[derive(Debug, Clone, Default)]
pub struct ImageCrateTransform {
    filter: ResizeFilter,
}

impl ImageCrateTransform {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    fn detect_format(data: &[u8]) -> Result<ImageFormat> {
        image::guess_format(data).context("Unrecognized image format")
    }
}

impl ImageTransform for ImageCrateTransform {
    fn identify(&self, data: &[u8]) -> Result<Dimensions> {
        let (width, height) = ImageReader::with_format(Cursor::new(data), Self::detect_format(data)?)
            .into_dimensions()
            .context("Failed to read image dimensions")?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let format = Self::detect_format(data)?;
        let image = image::load_from_memory_with_format(data, format)
            .context("Failed to decode image")?;

        let resized = image.resize_exact(width, height, self.filter.into());

        let mut encoded = Cursor::new(Vec::new());
        resized
            .write_to(&mut encoded, format)
            .with_context(|| format!("Failed to encode {format:?} image"))?;
        Ok(encoded.into_inner())
    }
}
