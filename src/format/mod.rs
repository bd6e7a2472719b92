//! mIRC formatting code handling.
//!
//! Message text carries single-character control codes that switch
//! formatting on and off instead of being displayed. This module names
//! them, detects them, and turns formatted text into [`StyledSpan`]s.
//!
//! # Format Codes
//! - 0x02 (^B): Bold
//! - 0x03 (^C): Color (followed by optional foreground,background)
//! - 0x04 (^D): Hex color (followed by optional RRGGBB,RRGGBB)
//! - 0x0F (^O): Reset all formatting
//! - 0x11 (^Q): Monospace
//! - 0x16 (^V): Reverse (accepted, no effect)
//! - 0x17 (^W): Link marker
//! - 0x19 (^Y): Nickname marker
//! - 0x1D (^]): Italic
//! - 0x1E (^^): Strikethrough
//! - 0x1F (^_): Underline
//!
//! [`StyledSpan`]: crate::style::StyledSpan

mod parser;

pub use self::parser::{parse_spans, Spans};

use std::borrow::Cow;

use crate::segment::IMAGE_SENTINEL;

pub const BOLD: char = '\x02';
pub const COLOR: char = '\x03';
pub const HEX_COLOR: char = '\x04';
pub const RESET: char = '\x0F';
pub const MONOSPACE: char = '\x11';
pub const REVERSE: char = '\x16';
pub const LINK: char = '\x17';
pub const NICKNAME: char = '\x19';
pub const ITALIC: char = '\x1D';
pub const STRIKETHROUGH: char = '\x1E';
pub const UNDERLINE: char = '\x1F';

/// Returns true if the character is a formatting code understood by
/// [`parse_spans`].
///
/// # Examples
///
/// ```
/// use slirc_richtext::format::is_irc_format_code;
///
/// assert!(is_irc_format_code('\x02')); // Bold
/// assert!(is_irc_format_code('\x03')); // Color
/// assert!(!is_irc_format_code('\x01')); // CTCP delimiter is not formatting
/// assert!(!is_irc_format_code('a'));
/// ```
#[inline]
pub fn is_irc_format_code(ch: char) -> bool {
    matches!(
        ch,
        BOLD | COLOR
            | HEX_COLOR
            | RESET
            | MONOSPACE
            | REVERSE
            | LINK
            | NICKNAME
            | ITALIC
            | STRIKETHROUGH
            | UNDERLINE
    )
}

/// Extension trait for handling formatted IRC strings.
pub trait FormattedStringExt<'a> {
    /// Check if the string contains anything [`strip_formatting`] removes:
    /// IRC formatting codes or the image sentinel.
    ///
    /// [`strip_formatting`]: FormattedStringExt::strip_formatting
    fn is_formatted(&self) -> bool;

    /// Strip all IRC formatting codes, including colour arguments.
    ///
    /// Returns `Cow::Borrowed` if there was nothing to strip.
    fn strip_formatting(self) -> Cow<'a, str>;
}

fn plain_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for span in parse_spans(s) {
        result.push_str(&span.content);
    }
    result
}

impl<'a> FormattedStringExt<'a> for &'a str {
    fn is_formatted(&self) -> bool {
        self.contains(|c: char| is_irc_format_code(c) || c == IMAGE_SENTINEL)
    }

    fn strip_formatting(self) -> Cow<'a, str> {
        if !self.is_formatted() {
            return Cow::Borrowed(self);
        }
        Cow::Owned(plain_text(self))
    }
}

impl FormattedStringExt<'static> for String {
    fn is_formatted(&self) -> bool {
        self.as_str().is_formatted()
    }

    fn strip_formatting(self) -> Cow<'static, str> {
        if !self.is_formatted() {
            return Cow::Owned(self);
        }
        Cow::Owned(plain_text(&self))
    }
}
