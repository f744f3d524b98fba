//! Dense row-major pixel grids.
//!
//! Every pipeline stage consumes one grid and produces another: RGBA bytes
//! become a [`BinaryMask`](crate::binarize::BinaryMask) (`PixelGrid<u8>`),
//! the mask becomes a [`DistanceField`](crate::distance::DistanceField)
//! (`PixelGrid<u32>`), and so on. The grid owns its buffer; downstream
//! stages only ever borrow it.

use crate::types::Dimensions;

/// A width×height dense array of `T`, stored row-major
/// (`index = y * width + x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Clone + Default> PixelGrid<T> {
    /// Create a grid filled with `T::default()`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width as usize * height as usize],
        }
    }
}

impl<T> PixelGrid<T> {
    /// Create a grid from an existing buffer.
    ///
    /// Returns `None` if `data.len() != width * height`, mirroring
    /// `image::ImageBuffer::from_raw`.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, data: Vec<T>) -> Option<Self> {
        if data.len() == width as usize * height as usize {
            Some(Self {
                width,
                height,
                data,
            })
        } else {
            None
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Total number of cells (`width * height`).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat buffer index of `(x, y)`.
    #[must_use]
    pub const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.data[self.index(x, y)]
    }

    /// The underlying row-major buffer.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the underlying buffer.
    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid, returning the underlying buffer.
    #[must_use]
    pub fn into_raw(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_with_default() {
        let grid: PixelGrid<u8> = PixelGrid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(PixelGrid::from_raw(2, 2, vec![0u8; 4]).is_some());
        assert!(PixelGrid::from_raw(2, 2, vec![0u8; 5]).is_none());
    }

    #[test]
    fn index_is_row_major() {
        let grid: PixelGrid<u8> = PixelGrid::new(5, 3);
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(4, 0), 4);
        assert_eq!(grid.index(0, 1), 5);
        assert_eq!(grid.index(2, 2), 12);
    }

    #[test]
    fn get_reads_written_value() {
        let mut grid: PixelGrid<u32> = PixelGrid::new(4, 4);
        let idx = grid.index(3, 1);
        grid.data_mut()[idx] = 42;
        assert_eq!(*grid.get(3, 1), 42);
    }

    #[test]
    fn zero_sized_grid_is_empty() {
        let grid: PixelGrid<u8> = PixelGrid::new(0, 7);
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
    }
}
