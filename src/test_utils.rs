//! Test utilities for imageops-backdrop
//!
//! Shared fixtures for the unit tests. Only compiled when running tests.

use image::Rgba;
use imageproc::definitions::Image;

/// Creates a 2x2 RGBA image with known pixel values:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a 3x3 light gray image whose top-left corner is black
///
/// Alpha varies per pixel (`255 - 10 * (x + y)`) so tests can check it is
/// carried through.
pub fn create_corner_rgba_image() -> Image<Rgba<u8>> {
    Image::from_fn(3, 3, |x, y| {
        let alpha = 255 - 10 * (x + y) as u8;
        if (x, y) == (0, 0) {
            Rgba([0, 0, 0, alpha])
        } else {
            Rgba([200, 200, 200, alpha])
        }
    })
}

/// Creates an image of vertical two-pixel-wide stripes alternating between
/// dark and light gray, starting dark at x = 0
pub fn create_striped_rgba_image(width: u32, height: u32) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, _| {
        if (x / 2) % 2 == 0 {
            Rgba([30, 30, 30, 255])
        } else {
            Rgba([220, 220, 220, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_corner_rgba_image_has_dark_corner() {
        let image = create_corner_rgba_image();
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgba([200, 200, 200, 215]));
    }

    #[test]
    fn create_striped_rgba_image_alternates_every_two_columns() {
        let image = create_striped_rgba_image(6, 1);
        let reds: Vec<u8> = image.pixels().map(|pixel| pixel[0]).collect();
        assert_eq!(reds, vec![30, 30, 220, 220, 30, 30]);
    }
}
