use crate::imageops_backdrop::mask::Mask;

/// Summed-area table over a binary mask
///
/// Each entry holds the number of selected pixels in the rectangle from the
/// origin to (x, y) inclusive, so any axis-aligned window can be counted in
/// constant time.
pub(crate) struct SummedAreaTable {
    data: Vec<u64>,
    width: u32,
    height: u32,
}

impl SummedAreaTable {
    /// Builds the table from a mask
    #[must_use]
    pub(crate) fn from_mask(mask: &Mask) -> Self {
        let (width, height) = mask.dimensions();
        Self::build(mask.as_raw().iter().map(|&value| u64::from(value)), width, height)
    }

    /// Builds the table from arbitrary row-major weights
    #[cfg(test)]
    fn from_values(values: &[u32], width: u32, height: u32) -> Self {
        assert_eq!(values.len(), width as usize * height as usize);
        Self::build(values.iter().map(|&value| u64::from(value)), width, height)
    }

    fn build(values: impl Iterator<Item = u64>, width: u32, height: u32) -> Self {
        let w = width as usize;
        let mut table: Vec<u64> = Vec::with_capacity(w * height as usize);

        // sat(x, y) = row_sum(0..=x, y) + sat(x, y - 1)
        let mut row_sum = 0u64;
        for (index, value) in values.enumerate() {
            if index % w == 0 {
                row_sum = 0;
            }
            row_sum += value;
            let above = if index >= w { table[index - w] } else { 0 };
            table.push(row_sum + above);
        }

        Self {
            data: table,
            width,
            height,
        }
    }

    /// Table value at (x, y), or 0 for coordinates left of or above the grid
    #[must_use]
    pub(crate) fn get(&self, x: i64, y: i64) -> u64 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            0
        } else {
            self.data[y as usize * self.width as usize + x as usize]
        }
    }

    /// Sum of the inclusive rectangle (x1, y1)-(x2, y2), clipped to the grid
    ///
    /// Sum = sat(x2, y2) - sat(x1-1, y2) - sat(x2, y1-1) + sat(x1-1, y1-1)
    #[must_use]
    pub(crate) fn rectangle_sum(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> u64 {
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(i64::from(self.width) - 1);
        let y2 = y2.min(i64::from(self.height) - 1);

        if x1 > x2 || y1 > y2 {
            return 0;
        }

        let bottom_right = self.get(x2, y2);
        let top_right = self.get(x2, y1 - 1);
        let bottom_left = self.get(x1 - 1, y2);
        let top_left = self.get(x1 - 1, y1 - 1);

        bottom_right + top_left - top_right - bottom_left
    }
}
