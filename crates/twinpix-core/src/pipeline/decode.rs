//! Image decoding with content-based format detection.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

use crate::error::ScanError;

/// Decode an image from disk.
///
/// The format is sniffed from the file's leading bytes, so a PNG saved with a
/// `.jpg` extension still decodes. The extension is only consulted when the
/// content is not recognised.
pub fn decode(path: &Path) -> Result<DynamicImage, ScanError> {
    let mut reader = ImageReader::open(path)
        .map_err(|e| ScanError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {}", e),
        })?
        .with_guessed_format()
        .map_err(|e| ScanError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;

    if reader.format().is_none() {
        let format = ImageFormat::from_path(path).map_err(|_| ScanError::Decode {
            path: path.to_path_buf(),
            message: format!(
                "Unsupported format: {}",
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("unknown")
            ),
        })?;
        reader.set_format(format);
    }

    reader.decode().map_err(|e| ScanError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
