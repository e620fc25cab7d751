//! C source output for packed bitmaps.
//!
//! Writes a `static const uint8_t` array with one line per bitmap row:
//!
//! ```text
//! static const uint8_t IMAGE_DATA[] = {
//!     0xFFu, 0x0Fu,
//! };
//! ```
//!
//! Body lines are indented with a single tab.

use std::io::{self, Write};

use crate::binary_format::PackedImage;
use crate::error::ConvertError;

/// Array name used when none is given
pub const DEFAULT_ARRAY_NAME: &str = "IMAGE_DATA";

/// Check that `name` can be used as a C identifier
pub fn validate_array_name(name: &str) -> Result<(), ConvertError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConvertError::InvalidArrayName(name.to_string()))
    }
}

/// Render a single body line: tab, comma-separated bytes, trailing comma
pub fn format_row(row: &[u8]) -> String {
    let bytes: Vec<String> = row.iter().map(|b| format!("0x{:02X}u", b)).collect();
    format!("\t{},\n", bytes.join(", "))
}

/// Write a single body line
pub fn write_row<W: Write>(out: &mut W, row: &[u8]) -> io::Result<()> {
    out.write_all(format_row(row).as_bytes())
}

/// Render the full array declaration
pub fn format_c_array(name: &str, image: &PackedImage) -> String {
    let mut text = format!("static const uint8_t {}[] = {{\n", name);
    for row in &image.rows {
        text.push_str(&format_row(row));
    }
    text.push_str("};\n");
    text
}

/// Write the full array declaration in one piece
pub fn write_c_array<W: Write>(out: &mut W, name: &str, image: &PackedImage) -> io::Result<()> {
    out.write_all(format_c_array(name, image).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(rows: Vec<Vec<u8>>, width: usize) -> PackedImage {
        PackedImage {
            width,
            height: rows.len(),
            rows,
        }
    }

    #[test]
    fn test_two_by_two_layout() {
        let image = packed(vec![vec![0xAA, 0x01], vec![0xFF, 0x00]], 16);
        let text = format_c_array(DEFAULT_ARRAY_NAME, &image);

        assert_eq!(
            text,
            "static const uint8_t IMAGE_DATA[] = {\n\
             \t0xAAu, 0x01u,\n\
             \t0xFFu, 0x00u,\n\
             };\n"
        );

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "static const uint8_t IMAGE_DATA[] = {");
        assert_eq!(lines[3], "};");
        for body in &lines[1..3] {
            assert!(body.starts_with('\t'));
            assert!(body.ends_with("u,"));
            assert_eq!(body.matches("0x").count(), 2);
        }
    }

    #[test]
    fn test_uppercase_hex() {
        let image = packed(vec![vec![0xab, 0x0c]], 16);
        let text = format_c_array(DEFAULT_ARRAY_NAME, &image);
        assert!(text.contains("\t0xABu, 0x0Cu,\n"));
    }

    #[test]
    fn test_empty_image() {
        let text = format_c_array("EMPTY", &PackedImage::default());
        assert_eq!(text, "static const uint8_t EMPTY[] = {\n};\n");
    }

    #[test]
    fn test_empty_row_line() {
        let mut out = Vec::new();
        write_row(&mut out, &[]).unwrap();
        assert_eq!(out, b"\t,\n");
    }

    #[test]
    fn test_write_matches_format() {
        let image = packed(vec![vec![0x12, 0x34], vec![0x56]], 12);
        let mut out = Vec::new();
        write_c_array(&mut out, "LOGO", &image).unwrap();
        assert_eq!(out, format_c_array("LOGO", &image).into_bytes());
        assert_eq!(format_row(&[0x01]), "\t0x01u,\n");
    }

    #[test]
    fn test_array_name_validation() {
        assert!(validate_array_name("IMAGE_DATA").is_ok());
        assert!(validate_array_name("_logo2").is_ok());
        assert!(validate_array_name("").is_err());
        assert!(validate_array_name("2fast").is_err());
        assert!(validate_array_name("my-image").is_err());
    }
}
