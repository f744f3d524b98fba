//! Binarization: reduce an RGBA raster to a 0/1 foreground mask.
//!
//! A pixel is foreground when all three color channels fall below the ink
//! threshold, a near-black test tuned for scanned strokes and glyphs on
//! light backgrounds. Alpha is ignored. This is the first pipeline stage:
//! raw bytes in, [`BinaryMask`] out.

use image::RgbaImage;

use crate::grid::PixelGrid;
use crate::types::{Dimensions, PipelineError};

/// Channel value below which a pixel counts as ink.
///
/// All of R, G, and B must be under this threshold for the pixel to be
/// foreground.
pub const INK_THRESHOLD: u8 = 125;

/// A 0/1 foreground mask.
///
/// Invariant: every cell is 0 (background) or 1 (foreground). The mask is
/// immutable after construction; downstream stages only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    grid: PixelGrid<u8>,
}

impl BinaryMask {
    pub(crate) const fn from_grid(grid: PixelGrid<u8>) -> Self {
        Self { grid }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Mask dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Mask value at `(x, y)`: 0 or 1.
    #[must_use]
    pub fn value(&self, x: u32, y: u32) -> u8 {
        *self.grid.get(x, y)
    }

    /// The underlying row-major 0/1 buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.grid.data()
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.grid.data().iter().filter(|&&v| v == 1).count()
    }
}

/// Binarize a flat RGBA buffer.
///
/// A pixel is foreground (1) when its R, G, and B channels are all below
/// [`INK_THRESHOLD`]; alpha is ignored. The rule is idempotent: feeding a
/// rendering of the mask (black foreground on white) back through produces
/// the same mask.
///
/// # Errors
///
/// Returns [`PipelineError::BufferLength`] when `pixels.len()` is not
/// `4 * width * height`.
pub fn binarize(pixels: &[u8], width: u32, height: u32) -> Result<BinaryMask, PipelineError> {
    let cells = width as usize * height as usize;
    let expected = cells * 4;
    if pixels.len() != expected {
        return Err(PipelineError::BufferLength {
            expected,
            actual: pixels.len(),
        });
    }

    let mut data = vec![0u8; cells];
    for (cell, rgba) in data.iter_mut().zip(pixels.chunks_exact(4)) {
        if rgba[0] < INK_THRESHOLD && rgba[1] < INK_THRESHOLD && rgba[2] < INK_THRESHOLD {
            *cell = 1;
        }
    }

    // Length checked above, so from_raw cannot fail.
    PixelGrid::from_raw(width, height, data)
        .map(BinaryMask::from_grid)
        .ok_or(PipelineError::BufferLength {
            expected,
            actual: pixels.len(),
        })
}

/// Binarize a decoded [`RgbaImage`].
///
/// Convenience wrapper over [`binarize`] for callers holding an `image`
/// buffer; the dimensions always agree, so this cannot fail.
#[must_use]
pub fn binarize_image(image: &RgbaImage) -> BinaryMask {
    // RgbaImage guarantees the raw buffer is exactly 4 * width * height.
    binarize(image.as_raw(), image.width(), image.height()).unwrap_or_else(|_| {
        BinaryMask::from_grid(PixelGrid::new(image.width(), image.height()))
    })
}
