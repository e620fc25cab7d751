//! Load -> threshold -> pack pipeline.

use log::{debug, info};
use std::path::Path;

use crate::binary_format::{convert_plane, validate_threshold, PackedImage, RowPadding};
use crate::c_array::{validate_array_name, DEFAULT_ARRAY_NAME};
use crate::decode::{DecodedImage, ImageSource};
use crate::error::ConvertError;

/// Conversion parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Channel to threshold: 0 red, 1 green, 2 blue, 3 alpha
    pub channel: usize,
    /// Pixels strictly above this value become white (1)
    pub threshold: f32,
    pub padding: RowPadding,
    /// Identifier for the emitted C array
    pub array_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            channel: 0,
            threshold: 0.5,
            padding: RowPadding::ZeroFill,
            array_name: DEFAULT_ARRAY_NAME.to_string(),
        }
    }
}

impl ConvertOptions {
    /// Check everything that can be checked before decoding
    pub fn validate(&self) -> Result<(), ConvertError> {
        validate_threshold(self.threshold)?;
        validate_array_name(&self.array_name)
    }
}

/// Threshold and pack an already decoded image
pub fn convert_image(
    image: &DecodedImage,
    options: &ConvertOptions,
) -> Result<PackedImage, ConvertError> {
    info!("converting");
    debug!(
        "channel={} threshold={} padding={:?}",
        options.channel, options.threshold, options.padding
    );

    let plane = image.channel_plane(options.channel)?;
    let packed = convert_plane(&plane, options.threshold, options.padding)?;

    debug!(
        "packed {} rows x {} bytes ({} bytes total)",
        packed.height,
        packed.bytes_per_row(),
        packed.total_bytes()
    );
    Ok(packed)
}

/// Decode `path` through `source`, then threshold and pack it
pub fn convert_path<S: ImageSource + ?Sized>(
    source: &S,
    path: &Path,
    options: &ConvertOptions,
) -> Result<PackedImage, ConvertError> {
    options.validate()?;

    info!("loading image: {}", path.display());
    let image = source.decode(path)?;
    debug!(
        "image {}x{} with {} channels",
        image.width(),
        image.height(),
        image.channels()
    );

    convert_image(&image, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Source that hands out a fixed image and counts calls
    struct FixedSource {
        image: DecodedImage,
        calls: Cell<usize>,
    }

    impl ImageSource for FixedSource {
        fn decode(&self, _path: &Path) -> Result<DecodedImage, ConvertError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.image.clone())
        }
    }

    struct FailingSource;

    impl ImageSource for FailingSource {
        fn decode(&self, _path: &Path) -> Result<DecodedImage, ConvertError> {
            Err(ConvertError::Decode("corrupt".to_string()))
        }
    }

    fn checker_8x2() -> DecodedImage {
        // Red channel alternates; green is the inverse
        let mut data = Vec::new();
        for y in 0..2 {
            for x in 0..8 {
                let on = (x + y) % 2 == 0;
                data.extend_from_slice(&[on as u8 as f32, !on as u8 as f32, 0.0]);
            }
        }
        DecodedImage::new(8, 2, 3, data).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.channel, 0);
        assert_eq!(options.threshold, 0.5);
        assert_eq!(options.padding, RowPadding::ZeroFill);
        assert_eq!(options.array_name, "IMAGE_DATA");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_convert_path_uses_source() {
        let source = FixedSource {
            image: checker_8x2(),
            calls: Cell::new(0),
        };
        let packed = convert_path(&source, Path::new("in.png"), &ConvertOptions::default()).unwrap();

        assert_eq!(source.calls.get(), 1);
        assert_eq!(packed.rows, vec![vec![0xAA], vec![0x55]]);
    }

    #[test]
    fn test_channel_selection() {
        let options = ConvertOptions {
            channel: 1,
            ..Default::default()
        };
        let packed = convert_image(&checker_8x2(), &options).unwrap();
        assert_eq!(packed.rows, vec![vec![0x55], vec![0xAA]]);

        let options = ConvertOptions {
            channel: 2,
            ..Default::default()
        };
        let packed = convert_image(&checker_8x2(), &options).unwrap();
        assert_eq!(packed.rows, vec![vec![0x00], vec![0x00]]);
    }

    #[test]
    fn test_invalid_options_skip_decoding() {
        let source = FixedSource {
            image: checker_8x2(),
            calls: Cell::new(0),
        };
        let options = ConvertOptions {
            threshold: -1.0,
            ..Default::default()
        };
        assert!(convert_path(&source, Path::new("in.png"), &options).is_err());

        let options = ConvertOptions {
            array_name: "bad name".to_string(),
            ..Default::default()
        };
        assert!(convert_path(&source, Path::new("in.png"), &options).is_err());
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_decode_error_propagates() {
        let err = convert_path(&FailingSource, Path::new("x"), &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_missing_channel() {
        let options = ConvertOptions {
            channel: 3,
            ..Default::default()
        };
        assert!(matches!(
            convert_image(&checker_8x2(), &options),
            Err(ConvertError::InvalidChannel { .. })
        ));
    }
}
