// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode uploaded bytes, normalise to 8-bit RGB, and encode
// rasters as PNG. Operates on in-memory images using the `image` crate.

use image::{DynamicImage, ImageFormat, RgbImage};
use retouch_core::error::{Result, RetouchError};
use tracing::{debug, instrument};

/// An 8-bit, 3-channel RGB raster. The only pixel layout the pipeline accepts.
pub type Raster = RgbImage;

/// A decoded image awaiting normalisation.
///
/// ```ignore
/// let raster = ImageProcessor::from_bytes(&upload)?.into_rgb()?;
/// let png = ImageProcessor::encode_png(&raster)?;
/// ```
pub struct ImageProcessor {
    /// The decoded image in whatever colour type the source used.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes. The format is sniffed from the content:
    /// PNG, JPEG, GIF, BMP, WebP, TIFF, PNM (PBM/PGM/PPM/PAM), TGA, ICO, QOI,
    /// HDR, DDS and farbfeld.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(RetouchError::Decode("empty input".into()));
        }
        // TGA has no magic number (and an uncompressed one starts like a
        // cursor file), so it is the fallback whenever sniffing fails. The
        // sniffed error is the one reported.
        let image = image::load_from_memory(data)
            .or_else(|err| {
                image::load_from_memory_with_format(data, ImageFormat::Tga).map_err(|_| err)
            })
            .map_err(|err| RetouchError::Decode(format!("failed to decode image: {err}")))?;
        debug!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Image decoded from bytes"
        );
        Ok(Self { image })
    }

    // -- Normalisation --------------------------------------------------------

    /// Convert to 8-bit RGB, dropping alpha and expanding grayscale.
    ///
    /// Fails on zero-sized images, which some decoders accept but which
    /// cannot be enhanced.
    pub fn into_rgb(self) -> Result<Raster> {
        let (width, height) = (self.image.width(), self.image.height());
        if width == 0 || height == 0 {
            return Err(RetouchError::InvalidRaster(format!(
                "image has zero extent ({width}x{height})"
            )));
        }
        Ok(match self.image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode a raster as PNG bytes.
    pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        raster
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| RetouchError::Encode(format!("PNG encoding failed: {err}")))?;
        Ok(buffer)
    }
}
