// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// retouch-image — Image enhancement pipeline for the Retouch service.
//
// Provides decoding and RGB normalisation of uploaded images, the fixed 3x3
// sharpening convolution that stands in for a learned enhancement model, and
// PNG encoding of the result.

pub mod enhance;
pub mod image;

// Re-export the primary items so callers can use `retouch_image::SharpenEnhancer` etc.
pub use crate::enhance::kernel::{Kernel3x3, SHARPEN_KERNEL};
pub use crate::enhance::sharpen::SharpenEnhancer;
pub use crate::enhance::{Enhancer, enhance_bytes};
pub use crate::image::processor::{ImageProcessor, Raster};
