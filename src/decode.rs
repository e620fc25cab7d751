//! Image decoding into normalized single-channel planes
//!
//! The packer never talks to a decoder directly. It receives a
//! `DecodedImage` from an `ImageSource`, which by default is backed by the
//! `image` crate:
//! - 8-bit images are normalized by 255
//! - 16-bit and float images go through 16-bit RGB(A) and are normalized by 65535
//! - grayscale images are expanded to RGB so any channel can be selected

use image::{ColorType, DynamicImage, ImageReader};
use log::debug;
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use crate::error::ConvertError;

// ============================================================================
// Decoded Image
// ============================================================================

/// Row-major grid of normalized intensities, indexed `[row][column][channel]`
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl DecodedImage {
    /// Build an image from interleaved normalized samples.
    ///
    /// `data.len()` must equal `width * height * channels`.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, ConvertError> {
        if channels == 0 {
            return Err(ConvertError::Decode("image has no channels".to_string()));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ConvertError::Decode(format!(
                "pixel data size mismatch: expected {} samples, got {}",
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per pixel (3 for RGB, 4 with alpha)
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Intensity at (x, y) for one channel
    ///
    /// # Panics
    ///
    /// Panics if `x`, `y` or `channel` is out of range.
    pub fn get(&self, x: usize, y: usize, channel: usize) -> f32 {
        assert!(
            x < self.width && y < self.height && channel < self.channels,
            "pixel ({}, {}) channel {} out of range for {}x{}x{} image",
            x,
            y,
            channel,
            self.width,
            self.height,
            self.channels
        );
        self.data[(y * self.width + x) * self.channels + channel]
    }

    /// Borrow one channel as a 2-D plane.
    ///
    /// Channel 0 is red, 1 green, 2 blue, 3 alpha (when present).
    pub fn channel_plane(&self, channel: usize) -> Result<ChannelPlane<'_>, ConvertError> {
        if channel >= self.channels {
            return Err(ConvertError::InvalidChannel {
                channel,
                channels: self.channels,
            });
        }
        Ok(ChannelPlane {
            image: self,
            channel,
        })
    }
}

/// Read-only view over a single channel of a `DecodedImage`
#[derive(Debug, Clone, Copy)]
pub struct ChannelPlane<'a> {
    image: &'a DecodedImage,
    channel: usize,
}

impl<'a> ChannelPlane<'a> {
    pub fn width(&self) -> usize {
        self.image.width
    }

    pub fn height(&self) -> usize {
        self.image.height
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Copy out row `y` of this channel
    ///
    /// # Panics
    ///
    /// Panics if `y >= self.height()`.
    pub fn row(&self, y: usize) -> Vec<f32> {
        assert!(
            y < self.image.height,
            "row {} out of range for image height {}",
            y,
            self.image.height
        );
        let stride = self.image.width * self.image.channels;
        let start = y * stride;
        self.image.data[start..start + stride]
            .chunks_exact(self.image.channels)
            .map(|px| px[self.channel])
            .collect()
    }

    /// Rows in top-to-bottom order
    pub fn rows(&self) -> impl Iterator<Item = Vec<f32>> + 'a {
        let plane = *self;
        (0..plane.height()).map(move |y| plane.row(y))
    }
}

// ============================================================================
// Image Sources
// ============================================================================

/// Capability to turn a file path into a `DecodedImage`
pub trait ImageSource {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ConvertError>;
}

/// Default source backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateSource;

impl ImageSource for ImageCrateSource {
    fn decode(&self, path: &Path) -> Result<DecodedImage, ConvertError> {
        load_image_from_path(path)
    }
}

// ============================================================================
// Image Loading
// ============================================================================

/// Load and normalize an image from a file path
pub fn load_image_from_path<P: AsRef<Path>>(path: P) -> Result<DecodedImage, ConvertError> {
    let path = path.as_ref();
    let open_err = |e: std::io::Error| ConvertError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let reader = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?;

    load_from_reader(reader)
}

/// Load and normalize an image from an in-memory encoded file
pub fn load_image_from_bytes(data: &[u8]) -> Result<DecodedImage, ConvertError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ConvertError::Decode(format!("failed to detect format: {}", e)))?;

    load_from_reader(reader)
}

fn load_from_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<DecodedImage, ConvertError> {
    let decoder = reader
        .into_decoder()
        .map_err(|e| ConvertError::Decode(e.to_string()))?;
    let image = DynamicImage::from_decoder(decoder)
        .map_err(|e| ConvertError::Decode(e.to_string()))?;

    debug!(
        "decoded {}x{} {:?}",
        image.width(),
        image.height(),
        image.color()
    );

    from_dynamic_image(&image)
}

/// Normalize a `DynamicImage` to 0-1 intensities, keeping alpha when present
pub fn from_dynamic_image(img: &DynamicImage) -> Result<DecodedImage, ConvertError> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let color = img.color();
    let channels = if color.has_alpha() { 4 } else { 3 };

    let high_precision = matches!(
        color,
        ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16
            | ColorType::Rgb32F
            | ColorType::Rgba32F
    );

    let data: Vec<f32> = match (high_precision, channels) {
        (true, 4) => normalize_u16(img.to_rgba16().as_raw()),
        (true, _) => normalize_u16(img.to_rgb16().as_raw()),
        (false, 4) => normalize_u8(img.to_rgba8().as_raw()),
        (false, _) => normalize_u8(img.to_rgb8().as_raw()),
    };

    DecodedImage::new(width, height, channels, data)
}

fn normalize_u8(raw: &[u8]) -> Vec<f32> {
    raw.iter().map(|&v| v as f32 / 255.0).collect()
}

fn normalize_u16(raw: &[u16]) -> Vec<f32> {
    raw.iter().map(|&v| v as f32 / 65535.0).collect()
}
