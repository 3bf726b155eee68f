#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::trace;

use crate::imageops_backdrop::mask::{Mask, KEEP, REPLACE};
use crate::imageops_backdrop::summed_area_table::SummedAreaTable;

/// Trait providing box-average smoothing for binary masks
pub trait SmoothMask {
    /// Averages each pixel over a `(2 * radius + 1)` square window and
    /// re-binarizes at 0.5
    ///
    /// Window cells outside the grid are excluded from both the sum and the
    /// count. A pixel is selected only when strictly more than half of its
    /// window is selected, so an exact tie clears it. Every output value is
    /// computed from the unsmoothed input.
    ///
    /// A radius of 0 returns an identical copy. Radii larger than the image
    /// are valid; the window is clipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageops_backdrop::{Mask, SmoothMask};
    ///
    /// // A single hole in a fully selected 3x3 mask is filled
    /// let mask = Mask::from_raw(3, 3, vec![1, 1, 1, 1, 0, 1, 1, 1, 1]).unwrap();
    /// assert_eq!(mask.smooth(1).count_selected(), 9);
    /// ```
    fn smooth(&self, radius: u32) -> Mask;
}

impl SmoothMask for Mask {
    fn smooth(&self, radius: u32) -> Mask {
        smooth_mask(self, radius)
    }
}

/// Free-function form of [`SmoothMask::smooth`]
#[must_use]
pub fn smooth_mask(mask: &Mask, radius: u32) -> Mask {
    let (width, height) = mask.dimensions();
    trace!(width, height, radius, "smooth_mask");

    if radius == 0 || mask.is_empty() {
        return mask.clone();
    }

    let sat = SummedAreaTable::from_mask(mask);
    let radius = i64::from(radius);
    let (max_x, max_y) = (i64::from(width) - 1, i64::from(height) - 1);

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let y = y as i64;
        let y1 = (y - radius).max(0);
        let y2 = (y + radius).min(max_y);

        for (x, value) in row.iter_mut().enumerate() {
            let x = x as i64;
            let x1 = (x - radius).max(0);
            let x2 = (x + radius).min(max_x);

            let sum = sat.rectangle_sum(x1, y1, x2, y2);
            let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as u64;

            // mean > 0.5 without floating point
            *value = if 2 * sum > count { REPLACE } else { KEEP };
        }
    };

    let mut output = vec![KEEP; mask.len()];

    #[cfg(feature = "rayon")]
    output
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(fill_row);

    #[cfg(not(feature = "rayon"))]
    output.chunks_mut(width as usize).enumerate().for_each(fill_row);

    Mask::from_binary(width, height, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    /// Direct window average, used as a reference for the table-based pass
    fn naive_smooth(mask: &Mask, radius: u32) -> Mask {
        let (width, height) = mask.dimensions();
        let r = i64::from(radius);
        let mut data = vec![KEEP; mask.len()];

        for (y, x) in iproduct!(0..height, 0..width) {
            let mut sum = 0u32;
            let mut count = 0u32;
            for (dy, dx) in iproduct!(-r..=r, -r..=r) {
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                if nx >= 0 && ny >= 0 && nx < i64::from(width) && ny < i64::from(height) {
                    sum += u32::from(mask.get(nx as u32, ny as u32));
                    count += 1;
                }
            }
            let mean = f64::from(sum) / f64::from(count);
            data[(y * width + x) as usize] = u8::from(mean > 0.5);
        }

        Mask::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let mask = Mask::from_raw(3, 2, vec![1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(mask.smooth(0), mask);
    }

    #[test]
    fn test_single_hole_is_filled() {
        let mut data = vec![1u8; 25];
        data[2 * 5 + 2] = 0;
        let mask = Mask::from_raw(5, 5, data).unwrap();

        let smoothed = mask.smooth(1);
        assert!(smoothed.is_selected(2, 2));
        assert_eq!(smoothed.count_selected(), 25);
    }

    #[test]
    fn test_isolated_pixel_is_removed() {
        let mut data = vec![0u8; 25];
        data[2 * 5 + 2] = 1;
        let mask = Mask::from_raw(5, 5, data).unwrap();

        assert_eq!(mask.smooth(1).count_selected(), 0);
    }

    #[test]
    fn test_exact_tie_resolves_to_keep() {
        // 2x1 grid: each window covers both cells, mean is exactly 0.5
        let mask = Mask::from_raw(2, 1, vec![1, 0]).unwrap();
        assert_eq!(mask.smooth(1).as_raw(), &[0, 0]);
    }

    #[test]
    fn test_window_is_clipped_not_zero_padded() {
        // A full mask stays full at the corners because out-of-grid cells
        // are not counted as zeros
        let mask = Mask::from_raw(4, 4, vec![1; 16]).unwrap();
        assert_eq!(mask.smooth(2).count_selected(), 16);
    }

    #[test]
    fn test_radius_larger_than_image_averages_whole_grid() {
        let mask = Mask::from_raw(3, 1, vec![1, 1, 0]).unwrap();
        assert_eq!(mask.smooth(10).as_raw(), &[1, 1, 1]);
    }

    #[test]
    fn test_uses_original_values_not_partial_output() {
        // An in-place pass would clear (1, 0) after clearing (0, 0)
        let mask = Mask::from_raw(5, 1, vec![1, 0, 1, 0, 1]).unwrap();
        assert_eq!(mask.smooth(1).as_raw(), &[0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_matches_naive_reference() {
        let data: Vec<u8> = (0..63u32).map(|i| u8::from((i * 7 + i / 5) % 3 == 0)).collect();
        let mask = Mask::from_raw(9, 7, data).unwrap();

        for radius in 0..5 {
            assert_eq!(mask.smooth(radius), naive_smooth(&mask, radius), "radius {radius}");
        }
    }

    #[test]
    fn test_empty_mask_is_returned_unchanged() {
        let mask = Mask::new(0, 0);
        assert_eq!(smooth_mask(&mask, 3), mask);
    }
}
