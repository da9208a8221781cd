// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-kernel sharpening. Stands in for a learned enhancement model until
// one is wired up behind the same `Enhancer` trait.

use retouch_core::error::{Result, RetouchError};
use tracing::{info, instrument};

use super::Enhancer;
use super::kernel::{Kernel3x3, SHARPEN_KERNEL};
use crate::image::processor::Raster;

/// Sharpens a raster with a constant 3x3 kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharpenEnhancer {
    kernel: Kernel3x3,
}

impl SharpenEnhancer {
    /// Use a kernel other than [`SHARPEN_KERNEL`].
    pub fn with_kernel(kernel: Kernel3x3) -> Self {
        Self { kernel }
    }
}

impl Default for SharpenEnhancer {
    fn default() -> Self {
        Self::with_kernel(SHARPEN_KERNEL)
    }
}

impl Enhancer for SharpenEnhancer {
    fn name(&self) -> &str {
        "sharpen-3x3"
    }

    #[instrument(skip_all, fields(width = raster.width(), height = raster.height()))]
    fn enhance(&self, raster: &Raster) -> Result<Raster> {
        let (width, height) = raster.dimensions();
        if width == 0 || height == 0 {
            return Err(RetouchError::InvalidRaster(format!(
                "cannot enhance a {width}x{height} raster"
            )));
        }
        info!("Sharpening image");
        Ok(self.kernel.apply(raster))
    }
}
