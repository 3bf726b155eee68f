//! Click-then-process background replacement.
//!
//! The interactive flow has two steps: the user clicks a background pixel,
//! which produces a [`BackgroundSelection`], and later commits the
//! replacement with [`replace_background`]. The selection's mask is the only
//! input to the second step; nothing is re-segmented there.

use image::{Pixel, Rgb, Rgba};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::Error;
use crate::imageops_backdrop::color::{
    format_hex_color, parse_hex_color, parse_hex_color_or_default,
};
use crate::imageops_backdrop::mask::Mask;
use crate::imageops_backdrop::mask_filter::SmoothMask;
use crate::imageops_backdrop::region_grow::{RegionGrow, SeedPoint};
use crate::imageops_backdrop::replace_masked::ReplaceMasked;

/// Default per-channel tolerance
pub const DEFAULT_TOLERANCE: u32 = 30;
/// Default smoothing radius
pub const DEFAULT_BLUR_RADIUS: u32 = 2;
/// Default replacement color (`#0066CC`)
pub const DEFAULT_BACKGROUND_COLOR: Rgb<u8> = Rgb([0x00, 0x66, 0xcc]);

/// Parameters for a background replacement run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Maximum per-channel difference from the seed color
    pub tolerance: u32,
    /// Half-width of the smoothing window; 0 disables smoothing
    pub blur_radius: u32,
    /// Color written over the selected background
    pub color: Rgb<u8>,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            blur_radius: DEFAULT_BLUR_RADIUS,
            color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

impl ReplaceOptions {
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub const fn with_blur_radius(mut self, blur_radius: u32) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: Rgb<u8>) -> Self {
        self.color = color;
        self
    }

    /// Sets the color from a `#RRGGBB` string, using white when it is malformed
    #[must_use]
    pub fn with_hex_color(self, hex: &str) -> Self {
        self.with_color(parse_hex_color_or_default(hex))
    }

    /// Sets the color from a `#RRGGBB` string
    ///
    /// # Errors
    ///
    /// * `Error::ColorParse` - When `hex` is not six hex digits after an optional `#`
    pub fn try_with_hex_color(self, hex: &str) -> Result<Self, Error> {
        Ok(self.with_color(parse_hex_color(hex)?))
    }
}

/// Result of the click step: the seed, what it sampled and the grown mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundSelection {
    seed: SeedPoint,
    seed_color: Rgb<u8>,
    tolerance: u32,
    mask: Mask,
}

impl BackgroundSelection {
    /// Grows a selection from `seed` on `image`
    ///
    /// # Errors
    ///
    /// * `Error::Segment` - When the image is empty or the seed is out of bounds
    pub fn select<P>(
        image: &Image<P>,
        seed: impl Into<SeedPoint>,
        tolerance: u32,
    ) -> Result<Self, Error>
    where
        P: Pixel<Subpixel = u8>,
    {
        let seed = seed.into();
        let mask = image.grow_region(seed, tolerance)?;

        // grow_region has already validated the seed
        let seed_color = image.get_pixel(seed.x as u32, seed.y as u32).to_rgb();

        Ok(Self {
            seed,
            seed_color,
            tolerance,
            mask,
        })
    }

    #[must_use]
    pub const fn seed(&self) -> SeedPoint {
        self.seed
    }

    /// RGB of the seed pixel, the reference every candidate was compared to
    #[must_use]
    pub const fn seed_color(&self) -> Rgb<u8> {
        self.seed_color
    }

    #[must_use]
    pub const fn tolerance(&self) -> u32 {
        self.tolerance
    }

    #[must_use]
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    #[must_use]
    pub fn into_mask(self) -> Mask {
        self.mask
    }

    /// Semi-transparent red preview of the selection over `image`
    ///
    /// # Errors
    ///
    /// * `Error::Composite` - When `image` is not the image the selection was grown on
    pub fn preview(&self, image: &Image<Rgba<u8>>) -> Result<Image<Rgba<u8>>, Error> {
        Ok(image.preview_overlay(&self.mask)?)
    }
}

/// Smooths the selection's mask per `options` and paints `options.color`
/// over a copy of `image`
///
/// `options.tolerance` is not consulted; the selection already fixed it.
///
/// # Errors
///
/// * `Error::Composite` - When the selection was grown on an image of a different size
///
/// # Examples
///
/// ```
/// use imageops_backdrop::{replace_background, BackgroundSelection, Image, ReplaceOptions};
/// use image::{Rgb, Rgba};
///
/// let image: Image<Rgba<u8>> = Image::from_pixel(8, 8, Rgba([240, 240, 240, 255]));
/// let selection = BackgroundSelection::select(&image, (0u32, 0u32), 10).unwrap();
///
/// let options = ReplaceOptions::default().with_color(Rgb([0, 0, 255]));
/// let result = replace_background(&image, &selection, &options).unwrap();
/// assert_eq!(result.get_pixel(4, 4), &Rgba([0, 0, 255, 255]));
/// ```
pub fn replace_background(
    image: &Image<Rgba<u8>>,
    selection: &BackgroundSelection,
    options: &ReplaceOptions,
) -> Result<Image<Rgba<u8>>, Error> {
    apply_options(image, selection.mask(), options)
}

/// Replaces the background using a mask produced elsewhere
///
/// `mask_data` holds one row-major 0/1 value per pixel of `image`. It is
/// smoothed and painted exactly as a click-step mask would be.
///
/// # Errors
///
/// * `Error::Mask` - When `mask_data` does not match the image size or holds
///   values other than 0 and 1
pub fn replace_background_with_mask(
    image: &Image<Rgba<u8>>,
    mask_data: Vec<u8>,
    options: &ReplaceOptions,
) -> Result<Image<Rgba<u8>>, Error> {
    let (width, height) = image.dimensions();
    let mask = Mask::from_raw(width, height, mask_data)?;
    apply_options(image, &mask, options)
}

fn apply_options(
    image: &Image<Rgba<u8>>,
    mask: &Mask,
    options: &ReplaceOptions,
) -> Result<Image<Rgba<u8>>, Error> {
    let (width, height) = image.dimensions();
    debug!(
        width,
        height,
        blur_radius = options.blur_radius,
        color = %format_hex_color(options.color),
        "Replacing background"
    );

    let mask = if options.blur_radius > 0 {
        mask.smooth(options.blur_radius)
    } else {
        mask.clone()
    };

    Ok(image.clone().replace_masked(&mask, options.color)?)
}

/// Selects from `seed` with `options.tolerance` and replaces in one call
///
/// # Errors
///
/// * `Error::Segment` - When the image is empty or the seed is out of bounds
pub fn replace_background_at(
    image: &Image<Rgba<u8>>,
    seed: impl Into<SeedPoint>,
    options: &ReplaceOptions,
) -> Result<Image<Rgba<u8>>, Error> {
    let selection = BackgroundSelection::select(image, seed, options.tolerance)?;
    replace_background(image, &selection, options)
}
