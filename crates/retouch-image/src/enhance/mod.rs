// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement pipeline — the `Enhancer` abstraction, the sharpen-kernel
// implementation, and the decode -> enhance -> encode driver.

pub mod kernel;
pub mod sharpen;

use retouch_core::error::Result;
use tracing::{debug, instrument};

use crate::image::processor::{ImageProcessor, Raster};

pub use kernel::{Kernel3x3, SHARPEN_KERNEL};
pub use sharpen::SharpenEnhancer;

/// Turns one RGB raster into an enhanced raster of the same size.
///
/// Implementations must be pure: no shared mutable state, the same input
/// always yields the same output. The server calls them concurrently from
/// blocking worker threads.
pub trait Enhancer: Send + Sync {
    /// Short identifier reported by the health endpoint and in logs.
    fn name(&self) -> &str;

    /// Enhance `raster`. Fails only on rasters the implementation cannot
    /// process (e.g. zero extent).
    fn enhance(&self, raster: &Raster) -> Result<Raster>;
}

/// Decode `data`, normalise it to RGB, enhance it, and return PNG bytes.
#[instrument(skip_all, fields(enhancer = enhancer.name(), data_len = data.len()))]
pub fn enhance_bytes(enhancer: &dyn Enhancer, data: &[u8]) -> Result<Vec<u8>> {
    let raster = ImageProcessor::from_bytes(data)?.into_rgb()?;
    let enhanced = enhancer.enhance(&raster)?;
    let png = ImageProcessor::encode_png(&enhanced)?;
    debug!(png_len = png.len(), "Enhanced image encoded");
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use retouch_core::RetouchError;

    #[test]
    fn enhance_bytes_returns_same_sized_png() {
        let src = Raster::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 90]));
        let input = ImageProcessor::encode_png(&src).unwrap();

        let png = enhance_bytes(&SharpenEnhancer::default(), &input).unwrap();
        let out = ImageProcessor::from_bytes(&png).unwrap().into_rgb().unwrap();

        assert_eq!(out.dimensions(), (6, 4));
        assert_eq!(out, SHARPEN_KERNEL.apply(&src));
    }

    #[test]
    fn enhance_bytes_rejects_non_images() {
        let err = enhance_bytes(&SharpenEnhancer::default(), b"GIF89a-but-not-really").unwrap_err();
        assert!(matches!(err, RetouchError::Decode(_)));
    }

    #[test]
    fn enhancer_is_object_safe() {
        let boxed: Box<dyn Enhancer> = Box::new(SharpenEnhancer::default());
        assert_eq!(boxed.name(), "sharpen-3x3");
    }
}
