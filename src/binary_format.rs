//! 1-bit packing of thresholded channel rows.
//!
//! Each row is packed independently: 8 pixels per byte, first pixel in the
//! most significant bit. A pixel becomes a 1 (white) only when it is strictly
//! greater than the threshold.
//!
//! Rows whose width is not a multiple of 8 are handled according to
//! `RowPadding`: zero-filled to the next byte boundary, or rejected.

use crate::decode::ChannelPlane;
use crate::error::ConvertError;

/// Pixels packed into each output byte
pub const PIXELS_PER_BYTE: usize = 8;

/// What to do with the trailing partial byte of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPadding {
    /// Pad the last byte's low bits with black (0)
    #[default]
    ZeroFill,
    /// Fail on rows whose width is not a multiple of 8
    Reject,
}

/// Packed bitmap, one `Vec<u8>` per source row in top-to-bottom order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedImage {
    /// Source width in pixels
    pub width: usize,
    /// Source height in pixels (equals `rows.len()`)
    pub height: usize,
    pub rows: Vec<Vec<u8>>,
}

impl PackedImage {
    pub fn bytes_per_row(&self) -> usize {
        bytes_per_row(self.width)
    }

    pub fn total_bytes(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Bytes needed for a row of `width` pixels
pub fn bytes_per_row(width: usize) -> usize {
    (width + PIXELS_PER_BYTE - 1) / PIXELS_PER_BYTE
}

/// Check that a threshold is usable for packing
pub fn validate_threshold(threshold: f32) -> Result<(), ConvertError> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConvertError::InvalidThreshold(threshold))
    }
}

/// Pack up to 8 pixels into one byte, MSB first.
///
/// Fewer than 8 pixels leave the remaining low bits at 0.
///
/// # Panics
///
/// Panics if `pixels` holds more than 8 values.
pub fn pack_pixels(pixels: &[f32], threshold: f32) -> u8 {
    assert!(
        pixels.len() <= PIXELS_PER_BYTE,
        "cannot pack {} pixels into one byte",
        pixels.len()
    );
    let mut packed: u8 = 0;
    for &p in pixels {
        packed <<= 1;
        packed |= (p > threshold) as u8;
    }
    packed
        .checked_shl((PIXELS_PER_BYTE - pixels.len()) as u32)
        .unwrap_or(0)
}

/// Pack one row of intensities
pub fn convert_row(
    row: &[f32],
    threshold: f32,
    padding: RowPadding,
) -> Result<Vec<u8>, ConvertError> {
    if padding == RowPadding::Reject && row.len() % PIXELS_PER_BYTE != 0 {
        return Err(ConvertError::UnalignedRow { width: row.len() });
    }

    Ok(row
        .chunks(PIXELS_PER_BYTE)
        .map(|group| pack_pixels(group, threshold))
        .collect())
}

/// Pack every row of a channel plane
pub fn convert_plane(
    plane: &ChannelPlane<'_>,
    threshold: f32,
    padding: RowPadding,
) -> Result<PackedImage, ConvertError> {
    validate_threshold(threshold)?;

    let rows = plane
        .rows()
        .map(|row| convert_row(&row, threshold, padding))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PackedImage {
        width: plane.width(),
        height: plane.height(),
        rows,
    })
}
