use image::Rgb;
use tracing::warn;

use crate::error::ColorParseError;

/// Color substituted when a color string cannot be parsed
pub const DEFAULT_REPLACEMENT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Parses a `#RRGGBB` color string
///
/// The leading `#` is optional and hex digits are case-insensitive.
///
/// # Errors
///
/// * `ColorParseError::InvalidFormat` - When the string is not exactly six
///   hex digits after the optional `#`
///
/// # Examples
///
/// ```
/// use imageops_backdrop::parse_hex_color;
/// use image::Rgb;
///
/// assert_eq!(parse_hex_color("#0066CC").unwrap(), Rgb([0, 102, 204]));
/// assert_eq!(parse_hex_color("ff8000").unwrap(), Rgb([255, 128, 0]));
/// assert!(parse_hex_color("#fff").is_err());
/// ```
pub fn parse_hex_color(input: &str) -> Result<Rgb<u8>, ColorParseError> {
    let digits = input.strip_prefix('#').unwrap_or(input);

    // from_str_radix alone would accept a leading sign
    if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidFormat(input.to_owned()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorParseError::InvalidFormat(input.to_owned()))
    };

    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Parses a color string, falling back to [`DEFAULT_REPLACEMENT_COLOR`]
///
/// Malformed input is logged and replaced rather than reported.
#[must_use]
pub fn parse_hex_color_or_default(input: &str) -> Rgb<u8> {
    parse_hex_color(input).unwrap_or_else(|error| {
        warn!(
            %error,
            fallback = %format_hex_color(DEFAULT_REPLACEMENT_COLOR),
            "Using default replacement color"
        );
        DEFAULT_REPLACEMENT_COLOR
    })
}

/// Formats a color as lowercase `#rrggbb`
#[must_use]
pub fn format_hex_color(Rgb([red, green, blue]): Rgb<u8>) -> String {
    format!("#{red:02x}{green:02x}{blue:02x}")
}
