use image::{Luma, Rgb, Rgba};
use imageproc::{definitions::Image, map::map_colors2};
use tracing::debug;

use crate::error::CompositeError;
use crate::imageops_backdrop::color::format_hex_color;
use crate::imageops_backdrop::mask::Mask;

/// Color painted over selected pixels by [`ReplaceMasked::preview_overlay`]
pub const PREVIEW_COLOR: Rgba<u8> = Rgba([255, 0, 0, 128]);

/// Trait for painting a solid color onto the pixels selected by a mask
///
/// Only the RGB channels of selected pixels change; their alpha is kept.
/// Unselected pixels are left untouched.
pub trait ReplaceMasked {
    /// Replaces the selected pixels' color
    ///
    /// This consumes the original image.
    ///
    /// # Errors
    ///
    /// * `CompositeError::ShapeMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_backdrop::{Image, Mask, ReplaceMasked};
    /// use image::{Rgb, Rgba};
    ///
    /// let image: Image<Rgba<u8>> = Image::from_pixel(2, 1, Rgba([9, 9, 9, 77]));
    /// let mask = Mask::from_raw(2, 1, vec![1, 0]).unwrap();
    ///
    /// let result = image.replace_masked(&mask, Rgb([255, 0, 0])).unwrap();
    /// assert_eq!(result.get_pixel(0, 0), &Rgba([255, 0, 0, 77]));
    /// assert_eq!(result.get_pixel(1, 0), &Rgba([9, 9, 9, 77]));
    /// ```
    fn replace_masked(self, mask: &Mask, color: Rgb<u8>) -> Result<Self, CompositeError>
    where
        Self: Sized;

    /// Replaces the selected pixels' color in-place
    ///
    /// The image is not modified when an error is returned.
    ///
    /// # Errors
    ///
    /// * `CompositeError::ShapeMismatch` - When image and mask dimensions don't match
    fn replace_masked_mut(&mut self, mask: &Mask, color: Rgb<u8>)
        -> Result<&mut Self, CompositeError>;

    /// Renders a preview where selected pixels are painted [`PREVIEW_COLOR`]
    ///
    /// Returns a new image; `self` is not modified.
    ///
    /// # Errors
    ///
    /// * `CompositeError::ShapeMismatch` - When image and mask dimensions don't match
    fn preview_overlay(&self, mask: &Mask) -> Result<Image<Rgba<u8>>, CompositeError>;
}

impl ReplaceMasked for Image<Rgba<u8>> {
    fn replace_masked(mut self, mask: &Mask, color: Rgb<u8>) -> Result<Self, CompositeError> {
        self.replace_masked_mut(mask, color)?;
        Ok(self)
    }

    fn replace_masked_mut(
        &mut self,
        mask: &Mask,
        color: Rgb<u8>,
    ) -> Result<&mut Self, CompositeError> {
        let replaced = fill_masked(self, mask, color)?;

        debug!(
            replaced,
            color = %format_hex_color(color),
            "Replaced masked pixels"
        );

        Ok(self)
    }

    fn preview_overlay(&self, mask: &Mask) -> Result<Image<Rgba<u8>>, CompositeError> {
        preview_overlay(self, mask)
    }
}

/// Writes `color` into the RGB channels of every selected pixel
///
/// Returns the number of pixels written.
///
/// # Errors
///
/// * `CompositeError::ShapeMismatch` - When image and mask dimensions don't match
pub fn fill_masked(
    image: &mut Image<Rgba<u8>>,
    mask: &Mask,
    color: Rgb<u8>,
) -> Result<usize, CompositeError> {
    validate_dimensions(image, mask)?;

    let Rgb([red, green, blue]) = color;
    let mut replaced = 0;

    image
        .pixels_mut()
        .zip(mask.as_raw())
        .filter(|(_, selected)| **selected != 0)
        .for_each(|(pixel, _)| {
            let Rgba([_, _, _, alpha]) = *pixel;
            *pixel = Rgba([red, green, blue, alpha]);
            replaced += 1;
        });

    Ok(replaced)
}

/// Free-function form of [`ReplaceMasked::preview_overlay`]
///
/// # Errors
///
/// * `CompositeError::ShapeMismatch` - When image and mask dimensions don't match
pub fn preview_overlay(
    image: &Image<Rgba<u8>>,
    mask: &Mask,
) -> Result<Image<Rgba<u8>>, CompositeError> {
    validate_dimensions(image, mask)?;

    let overlay = map_colors2(image, &mask.to_luma(), |pixel, Luma([selected])| {
        if selected == 0 {
            pixel
        } else {
            PREVIEW_COLOR
        }
    });

    Ok(overlay)
}

#[inline]
fn validate_dimensions(image: &Image<Rgba<u8>>, mask: &Mask) -> Result<(), CompositeError> {
    if image.dimensions() == mask.dimensions() {
        Ok(())
    } else {
        Err(CompositeError::ShapeMismatch {
            expected: image.dimensions(),
            actual: mask.dimensions(),
        })
    }
}
