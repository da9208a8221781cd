// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed 3x3 integer kernels and their application to RGB rasters.
//
// # Border policy
//
// Out-of-range neighbours are fetched with reflect-101 addressing
// (`c b | a b c d | c b`): the edge pixel itself is not repeated. On an axis
// of length 1 every neighbour maps back onto the single pixel.
//
// The kernel is applied as a correlation (not flipped), channel by channel,
// with the sum saturated to 0..=255.

use image::Rgb;
use tracing::{debug, instrument};

use crate::image::processor::Raster;

/// The standard sharpen kernel: centre 5, orthogonal neighbours -1, corners 0.
pub const SHARPEN_KERNEL: Kernel3x3 = Kernel3x3::new([[0, -1, 0], [-1, 5, -1], [0, -1, 0]]);

/// A 3x3 matrix of integer weights, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3x3 {
    weights: [[i32; 3]; 3],
}

impl Kernel3x3 {
    pub const fn new(weights: [[i32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Apply the kernel to every channel of `src`, producing a raster of the
    /// same size.
    #[instrument(skip_all, fields(width = src.width(), height = src.height()))]
    pub fn apply(&self, src: &Raster) -> Raster {
        let (width, height) = src.dimensions();
        let mut out = Raster::new(width, height);

        for y in 0..height {
            let rows = neighbours(y, height);
            for x in 0..width {
                let cols = neighbours(x, width);
                let mut acc = [0i32; 3];

                for (ky, &sy) in rows.iter().enumerate() {
                    for (kx, &sx) in cols.iter().enumerate() {
                        let weight = self.weights[ky][kx];
                        if weight == 0 {
                            continue;
                        }
                        let Rgb(px) = *src.get_pixel(sx, sy);
                        for (sum, channel) in acc.iter_mut().zip(px) {
                            *sum += weight * i32::from(channel);
                        }
                    }
                }

                out.put_pixel(x, y, Rgb(acc.map(saturate)));
            }
        }

        debug!("Kernel applied");
        out
    }
}

/// Indices of `i - 1`, `i`, `i + 1` along an axis of length `len`, reflected
/// at the borders.
fn neighbours(i: u32, len: u32) -> [u32; 3] {
    let i = i64::from(i);
    [reflect_101(i - 1, len), reflect_101(i, len), reflect_101(i + 1, len)]
}

/// Reflect-101 index mapping for offsets at most one step outside `0..len`.
fn reflect_101(i: i64, len: u32) -> u32 {
    let last = i64::from(len) - 1;
    if last <= 0 {
        return 0;
    }
    let reflected = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    reflected.clamp(0, last) as u32
}

fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
