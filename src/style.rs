//! Formatting attributes and the spans that carry them.

use std::collections::BTreeSet;

/// Name of the custom style attached to nickname-marked text.
pub const NICKNAME_STYLE: &str = "irc-nickname";

/// A single formatting attribute.
///
/// Styles are plain values; two styles are the same attribute when they
/// compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// Bold text (`^B`).
    Bold,
    /// Italic text (`^]`).
    Italic,
    /// Monospace text (`^Q`).
    Monospace,
    /// Underlined text (`^_`).
    Underline,
    /// Struck-through text (`^^`).
    Strikethrough,
    /// mIRC palette colour (`^C`).
    Color {
        /// Foreground palette index.
        foreground: u8,
        /// Background palette index, if one was given.
        background: Option<u8>,
    },
    /// RGB colour as six hex digits (`^D`).
    HexColor {
        /// Foreground, six uppercase hex digits.
        foreground: String,
        /// Background, six uppercase hex digits, if one was given.
        background: Option<String>,
    },
    /// Hyperlink whose target is the linked text itself.
    Link {
        /// Link target.
        url: String,
    },
    /// Host-defined style, e.g. [`NICKNAME_STYLE`].
    Custom(String),
}

impl Style {
    /// The style applied to nickname-marked text.
    pub fn nickname() -> Self {
        Style::Custom(NICKNAME_STYLE.to_string())
    }

    /// Returns true for [`Style::Color`] and [`Style::HexColor`].
    pub fn is_color(&self) -> bool {
        matches!(self, Style::Color { .. } | Style::HexColor { .. })
    }

    /// Returns true if this style marks a nickname.
    pub fn is_nickname(&self) -> bool {
        matches!(self, Style::Custom(name) if name == NICKNAME_STYLE)
    }
}

/// An unordered, de-duplicated set of styles.
pub type StyleSet = BTreeSet<Style>;

/// A run of text sharing one style set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledSpan {
    /// The displayed text.
    pub content: String,
    /// Styles applied to the whole of `content`.
    pub styles: StyleSet,
}

impl StyledSpan {
    /// Create a span with the given styles.
    pub fn new(content: impl Into<String>, styles: impl IntoIterator<Item = Style>) -> Self {
        Self {
            content: content.into(),
            styles: styles.into_iter().collect(),
        }
    }

    /// Create an unstyled span.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            styles: StyleSet::new(),
        }
    }

    /// The link target, if this span carries a [`Style::Link`].
    pub fn link(&self) -> Option<&str> {
        self.styles.iter().find_map(|style| match style {
            Style::Link { url } => Some(url.as_str()),
            _ => None,
        })
    }
}

/// One transcript row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Spans in document order.
    pub spans: Vec<StyledSpan>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    /// Parse raw message text into a line.
    pub fn parse(raw: &str) -> Self {
        Self {
            spans: crate::format::parse_spans(raw).collect(),
        }
    }

    /// Returns true if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The line's text without any formatting.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }
}

impl From<Vec<StyledSpan>> for Line {
    fn from(spans: Vec<StyledSpan>) -> Self {
        Self::new(spans)
    }
}

impl FromIterator<StyledSpan> for Line {
    fn from_iter<I: IntoIterator<Item = StyledSpan>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
