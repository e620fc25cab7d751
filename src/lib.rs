//! EPD bitmap conversion
//!
//! Converts a raster image into a 1-bit-per-pixel bitmap for e-paper and
//! monochrome LCD firmware, emitted as a C `uint8_t` array.
//!
//! Pipeline: decode -> select channel -> threshold + pack (MSB first) -> C array text

pub mod binary_format;
pub mod c_array;
pub mod convert;
pub mod decode;
pub mod error;

pub use binary_format::{PackedImage, RowPadding};
pub use c_array::{format_c_array, write_c_array, DEFAULT_ARRAY_NAME};
pub use convert::{convert_image, convert_path, ConvertOptions};
pub use decode::{ChannelPlane, DecodedImage, ImageCrateSource, ImageSource};
pub use error::ConvertError;
