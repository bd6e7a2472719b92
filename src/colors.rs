//! Colour helpers: the mIRC palette, hex colours and nickname buckets.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Number of display buckets [`color_hash`] maps nicknames into.
pub const NICK_COLOR_BUCKETS: u8 = 8;

/// Pick a display bucket for a nickname.
///
/// Sums the code points of the name and reduces modulo
/// [`NICK_COLOR_BUCKETS`]. The empty name lands in bucket 0.
///
/// # Examples
///
/// ```
/// use slirc_richtext::colors::color_hash;
///
/// assert_eq!(color_hash(""), 0);
/// assert_eq!(color_hash("a"), 97 % 8);
/// assert!(color_hash("straylight") < 8);
/// ```
pub fn color_hash(nickname: &str) -> u8 {
    let buckets = u32::from(NICK_COLOR_BUCKETS);
    nickname
        .chars()
        .fold(0u32, |acc, c| (acc + u32::from(c) % buckets) % buckets) as u8
}

/// A 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = FormatError;

    /// Parse six hex digits, e.g. `FF0000`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FormatError::InvalidHexColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| FormatError::InvalidHexColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The sixteen standard mIRC colours.
const MIRC_PALETTE: [Rgb; 16] = [
    Rgb::new(0xFF, 0xFF, 0xFF), // white
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0x00, 0x00, 0x7F), // blue
    Rgb::new(0x00, 0x93, 0x00), // green
    Rgb::new(0xFF, 0x00, 0x00), // red
    Rgb::new(0x7F, 0x00, 0x00), // brown
    Rgb::new(0x9C, 0x00, 0x9C), // magenta
    Rgb::new(0xFC, 0x7F, 0x00), // orange
    Rgb::new(0xFF, 0xFF, 0x00), // yellow
    Rgb::new(0x00, 0xFC, 0x00), // light green
    Rgb::new(0x00, 0x93, 0x93), // cyan
    Rgb::new(0x00, 0xFF, 0xFF), // light cyan
    Rgb::new(0x00, 0x00, 0xFC), // light blue
    Rgb::new(0xFF, 0x00, 0xFF), // pink
    Rgb::new(0x7F, 0x7F, 0x7F), // grey
    Rgb::new(0xD2, 0xD2, 0xD2), // light grey
];

/// RGB value of a standard palette index.
///
/// Indices outside 0-15 (extended colours, and 99 meaning "default")
/// have no fixed value here and return `None`.
pub fn mirc_rgb(index: u8) -> Option<Rgb> {
    MIRC_PALETTE.get(usize::from(index)).copied()
}
