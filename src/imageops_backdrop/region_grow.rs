use image::{Pixel, Rgb};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::SegmentError;
use crate::imageops_backdrop::color::format_hex_color;
use crate::imageops_backdrop::mask::Mask;

/// Pixel coordinate chosen by the user as a sample of the background
///
/// Signed so that coordinates mapped from pointer positions outside the
/// image are rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedPoint {
    pub x: i64,
    pub y: i64,
}

impl SeedPoint {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate as unsigned pixel indices when it lies inside
    /// a `width` x `height` grid
    #[must_use]
    pub fn within(self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x = u32::try_from(self.x).ok().filter(|&x| x < width)?;
        let y = u32::try_from(self.y).ok().filter(|&y| y < height)?;
        Some((x, y))
    }
}

impl From<(i64, i64)> for SeedPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for SeedPoint {
    fn from((x, y): (u32, u32)) -> Self {
        Self {
            x: i64::from(x),
            y: i64::from(y),
        }
    }
}

/// Trait providing seeded region growing over 8-bit images
///
/// The alpha channel, if any, never takes part in the comparison.
pub trait RegionGrow {
    /// Grows a mask of pixels 4-connected to `seed` whose RGB channels each
    /// differ from the seed color by at most `tolerance`
    ///
    /// Every candidate is compared against the seed's own color, not against
    /// the neighbor it was reached from.
    ///
    /// # Errors
    ///
    /// * `SegmentError::EmptyImage` - When the image has no pixels
    /// * `SegmentError::OutOfBounds` - When the seed lies outside the image
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_backdrop::{Image, RegionGrow};
    /// use image::Rgba;
    ///
    /// let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
    /// let mask = image.grow_region((0u32, 0u32), 0).unwrap();
    /// assert_eq!(mask.count_selected(), 16);
    /// ```
    fn grow_region(&self, seed: impl Into<SeedPoint>, tolerance: u32)
        -> Result<Mask, SegmentError>;
}

impl<P> RegionGrow for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn grow_region(
        &self,
        seed: impl Into<SeedPoint>,
        tolerance: u32,
    ) -> Result<Mask, SegmentError> {
        grow_region(self, seed, tolerance)
    }
}

/// Free-function form of [`RegionGrow::grow_region`]
pub fn grow_region<P>(
    image: &Image<P>,
    seed: impl Into<SeedPoint>,
    tolerance: u32,
) -> Result<Mask, SegmentError>
where
    P: Pixel<Subpixel = u8>,
{
    let seed = seed.into();
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(SegmentError::EmptyImage);
    }

    let (seed_x, seed_y) = seed.within(width, height).ok_or(SegmentError::OutOfBounds {
        x: seed.x,
        y: seed.y,
        width,
        height,
    })?;

    let target = image.get_pixel(seed_x, seed_y).to_rgb();
    let mut mask = Mask::new(width, height);

    // Explicit LIFO work-list; recursion would overflow on large regions
    let mut stack = vec![(i64::from(seed_x), i64::from(seed_y))];

    while let Some((x, y)) = stack.pop() {
        let Some((x, y)) = SeedPoint::new(x, y).within(width, height) else {
            continue;
        };

        let index = mask.index(x, y);
        if mask.is_selected_at(index) {
            continue;
        }

        if !is_color_similar(image.get_pixel(x, y).to_rgb(), target, tolerance) {
            continue;
        }

        mask.select(index);

        let (x, y) = (i64::from(x), i64::from(y));
        stack.extend([(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
    }

    debug!(
        seed_x,
        seed_y,
        seed_color = %format_hex_color(target),
        tolerance,
        selected = mask.count_selected(),
        coverage = mask.coverage(),
        "Region growing finished"
    );

    Ok(mask)
}

/// Per-channel similarity test used by region growing
///
/// True when each of R, G and B differs by at most `tolerance`.
#[inline]
#[must_use]
pub fn is_color_similar(a: Rgb<u8>, b: Rgb<u8>, tolerance: u32) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(&lhs, &rhs)| u32::from(lhs.abs_diff(rhs)) <= tolerance)
}
