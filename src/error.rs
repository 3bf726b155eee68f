use thiserror::Error;

/// Error type for seeded region growing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// The seed coordinate lies outside the pixel grid
    ///
    /// No mask is produced when this is returned.
    #[error("Seed ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// The image has no pixels, so there is nothing to select
    #[error("Cannot grow a region on an empty image")]
    EmptyImage,
}

/// Error type for constructing masks from raw data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    /// The raw data does not contain exactly one value per pixel
    #[error("Mask data has {actual} values, expected {expected} for a {width}x{height} grid")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A mask value other than 0 or 1 was found
    #[error("Mask value {value} at index {index} is not binary")]
    NonBinaryValue { index: usize, value: u8 },
}

/// Error type for writing a mask back onto an image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    /// Image and mask grids do not match
    ///
    /// Checked before any pixel is touched, so the image is left unchanged.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    ShapeMismatch {
        /// Image dimensions (width, height)
        expected: (u32, u32),
        /// Mask dimensions (width, height)
        actual: (u32, u32),
    },
}

/// Error type for color string parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string is not six hex digits with an optional leading `#`
    #[error("Invalid color format: {0:?} (expected #RRGGBB)")]
    InvalidFormat(String),
}

/// Aggregate error for the full background replacement pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    ColorParse(#[from] ColorParseError),
}
