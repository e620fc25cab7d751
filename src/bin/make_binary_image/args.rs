//! Command-line argument definitions and type conversions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use epd_bitmap::{ConvertOptions, RowPadding, DEFAULT_ARRAY_NAME};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum Padding {
    /// Pad the last byte of each row with black bits
    #[default]
    ZeroFill,
    /// Fail when the image width is not a multiple of 8
    Reject,
}

impl Padding {
    pub fn to_row_padding(self) -> RowPadding {
        match self {
            Padding::ZeroFill => RowPadding::ZeroFill,
            Padding::Reject => RowPadding::Reject,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "make_binary_image")]
#[command(author, version, about = "Convert image into a black and white binary image", long_about = None)]
pub struct Args {
    /// Path to an image to be converted
    #[arg(value_name = "IMAGE")]
    pub image_path: PathBuf,

    /// Channel used for thresholding (0: red, 1: green, 2: blue, 3: alpha)
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub channel: u8,

    /// Pixels strictly above this value (0-1) become white
    #[arg(short, long, default_value_t = 0.5)]
    pub threshold: f32,

    /// Handling of rows whose width is not a multiple of 8
    #[arg(long, value_enum, default_value_t = Padding::ZeroFill)]
    pub padding: Padding,

    /// Name of the emitted C array
    #[arg(long, default_value = DEFAULT_ARRAY_NAME)]
    pub name: String,
}

impl Args {
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            channel: self.channel as usize,
            threshold: self.threshold,
            padding: self.padding.to_row_padding(),
            array_name: self.name.clone(),
        }
    }
}
