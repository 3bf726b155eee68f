use image::Luma;
use imageproc::definitions::Image;

use crate::error::MaskError;

/// Value stored for a pixel that should keep its original color
pub const KEEP: u8 = 0;
/// Value stored for a pixel selected for replacement
pub const REPLACE: u8 = 1;

/// Dense binary selection over a pixel grid
///
/// One value per pixel, row-major with the origin at the top left, indexed
/// as `y * width + x`. Every value is either [`KEEP`] or [`REPLACE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Mask {
    /// Creates an all-[`KEEP`] mask for a `width` x `height` grid
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![KEEP; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wraps existing row-major data as a mask
    ///
    /// # Errors
    ///
    /// * `MaskError::LengthMismatch` - When `data` does not hold `width * height` values
    /// * `MaskError::NonBinaryValue` - When any value is neither 0 nor 1
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_backdrop::Mask;
    ///
    /// let mask = Mask::from_raw(2, 2, vec![0, 1, 1, 0]).unwrap();
    /// assert_eq!(mask.count_selected(), 2);
    /// assert!(Mask::from_raw(2, 2, vec![0, 1, 2, 0]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(MaskError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|(_, value)| **value != KEEP && **value != REPLACE)
        {
            return Err(MaskError::NonBinaryValue { index, value });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a mask from a grayscale image, treating any non-zero value as selected
    #[must_use]
    pub fn from_luma(image: &Image<Luma<u8>>) -> Self {
        let (width, height) = image.dimensions();
        let data = image
            .pixels()
            .map(|Luma([value])| u8::from(*value != 0))
            .collect();

        Self {
            data,
            width,
            height,
        }
    }

    /// Renders the mask as a grayscale image (selected = 255, kept = 0)
    #[must_use]
    pub fn to_luma(&self) -> Image<Luma<u8>> {
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([self.get(x, y) * u8::MAX])
        })
    }

    /// Width of the grid
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Grid dimensions as (width, height)
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of entries, equal to `width * height`
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major values
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the mask and returns its raw values
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Value at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) is outside the {}x{} mask",
            self.width,
            self.height
        );
        self.data[self.index(x, y)]
    }

    #[must_use]
    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == REPLACE
    }

    /// Number of selected pixels
    #[must_use]
    pub fn count_selected(&self) -> usize {
        self.data.iter().filter(|&&value| value == REPLACE).count()
    }

    /// Fraction of the grid that is selected, in `[0, 1]`
    ///
    /// An empty grid has zero coverage.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.data.is_empty() {
            0.0
        } else {
            self.count_selected() as f64 / self.data.len() as f64
        }
    }

    /// Returns true when every pixel selected here is also selected in `other`
    ///
    /// Masks with different dimensions are never subsets of each other.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&mine, &theirs)| mine <= theirs)
    }

    /// Pixel-wise OR of two masks of equal dimensions
    ///
    /// Returns `None` when the dimensions differ.
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self> {
        if self.dimensions() != other.dimensions() {
            return None;
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a | b)
            .collect();

        Some(Self {
            data,
            width: self.width,
            height: self.height,
        })
    }

    /// Wraps data already known to be binary and correctly sized
    pub(crate) fn from_binary(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        debug_assert!(data.iter().all(|&value| value <= REPLACE));
        Self {
            data,
            width,
            height,
        }
    }

    #[inline]
    pub(crate) const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn select(&mut self, index: usize) {
        self.data[index] = REPLACE;
    }

    #[inline]
    pub(crate) fn is_selected_at(&self, index: usize) -> bool {
        self.data[index] == REPLACE
    }
}
