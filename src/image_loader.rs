//! Image decoding and resizing.
//! The content format is sniffed by the `image` crate; the extension is not trusted.

use std::path::Path;

use image::imageops::FilterType;
use image::{GenericImageView, ImageError, ImageReader};

use crate::error::{Result, ViewerError};

/// Decoded, resized RGBA pixels ready to upload as a texture.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Dimensions of the file before resizing
    pub original_width: u32,
    pub original_height: u32,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("original_width", &self.original_width)
            .field("original_height", &self.original_height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Convert to an egui image for texture upload
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

/// Decode `path` and resize it to exactly `width` x `height`.
///
/// Aspect ratio is not preserved. The file handle and the full-size decode
/// buffer are dropped before this returns, on both success and failure.
pub fn load_resized(path: &Path, width: u32, height: u32, filter: FilterType) -> Result<Bitmap> {
    let decode_err = |source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(decode_err)?;
    let (original_width, original_height) = img.dimensions();

    let rgba = img.resize_exact(width, height, filter).to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Bitmap {
        pixels: rgba.into_raw(),
        width,
        height,
        original_width,
        original_height,
    })
}
