mod error;
mod imageops_backdrop;
#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{ColorParseError, CompositeError, Error, MaskError, SegmentError};
pub use imageops_backdrop::color::{
    format_hex_color, parse_hex_color, parse_hex_color_or_default, DEFAULT_REPLACEMENT_COLOR,
};
pub use imageops_backdrop::mask::{Mask, KEEP, REPLACE};
pub use imageops_backdrop::mask_filter::{smooth_mask, SmoothMask};
pub use imageops_backdrop::pipeline::{
    replace_background, replace_background_at, replace_background_with_mask, BackgroundSelection,
    ReplaceOptions, DEFAULT_BACKGROUND_COLOR, DEFAULT_BLUR_RADIUS, DEFAULT_TOLERANCE,
};
pub use imageops_backdrop::region_grow::{grow_region, is_color_similar, RegionGrow, SeedPoint};
pub use imageops_backdrop::replace_masked::{
    fill_masked, preview_overlay, ReplaceMasked, PREVIEW_COLOR,
};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
