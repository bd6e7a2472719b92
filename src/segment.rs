//! Turning styled spans into renderable segments.
//!
//! A renderer consumes [`RenderSegment`]s: what to draw ([`Segment`]) and
//! how to decorate it ([`Decoration`]). Segments are cheap to derive and
//! are recomputed on every render pass rather than stored.
//!
//! Image lines synthesised by the embedder are encoded as spans whose
//! content starts with [`IMAGE_SENTINEL`]. The parser strips that
//! character from message text, so only [`image_span`] can produce one.

use tracing::trace;

use crate::colors::{color_hash, mirc_rgb, Rgb};
use crate::style::{Line, Style, StyleSet, StyledSpan};

/// Marks span content as an image URL. Never appears in parsed text.
pub const IMAGE_SENTINEL: char = '\x1A';

/// Build the span that renders as an inline image of `url`.
pub fn image_span(url: &str) -> StyledSpan {
    let mut content = String::with_capacity(url.len() + IMAGE_SENTINEL.len_utf8());
    content.push(IMAGE_SENTINEL);
    content.push_str(url);
    StyledSpan::plain(content)
}

/// What a span draws as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Ordinary text.
    Text(String),
    /// Inline image loaded from a URL.
    Image(String),
    /// A span with no content; drawn as a placeholder.
    Empty,
}

impl Segment {
    /// Classify span content.
    pub fn from_content(content: &str) -> Self {
        if content.is_empty() {
            return Segment::Empty;
        }
        match content.strip_prefix(IMAGE_SENTINEL) {
            Some(url) => Segment::Image(url.to_string()),
            None => Segment::Text(content.to_string()),
        }
    }
}

/// A colour as the renderer should apply it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// mIRC palette index, with its RGB value when the index is standard.
    Palette(u8, Option<Rgb>),
    /// Explicit RGB.
    Rgb(Rgb),
}

impl Color {
    fn palette(index: u8) -> Self {
        Color::Palette(index, mirc_rgb(index))
    }

    fn hex(hex: &str) -> Option<Self> {
        match hex.parse() {
            Ok(rgb) => Some(Color::Rgb(rgb)),
            Err(err) => {
                trace!("ignoring hex color: {}", err);
                None
            }
        }
    }
}

/// Renderer-facing directives derived from a style set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Target to open when the segment is activated.
    pub link: Option<String>,
    /// Nickname colour bucket, set for nickname-marked text.
    pub nick_color: Option<u8>,
}

impl Decoration {
    /// Derive decoration for `content` styled with `styles`.
    ///
    /// Links are underlined. Nickname text gets the [`color_hash`] bucket
    /// of its content.
    pub fn from_styles(styles: &StyleSet, content: &str) -> Self {
        let mut deco = Decoration::default();
        for style in styles {
            match style {
                Style::Bold => deco.bold = true,
                Style::Italic => deco.italic = true,
                Style::Monospace => deco.monospace = true,
                Style::Underline => deco.underline = true,
                Style::Strikethrough => deco.strikethrough = true,
                Style::Color {
                    foreground,
                    background,
                } => {
                    deco.foreground = Some(Color::palette(*foreground));
                    deco.background = background.map(Color::palette);
                }
                Style::HexColor {
                    foreground,
                    background,
                } => {
                    deco.foreground = Color::hex(foreground);
                    deco.background = background.as_deref().and_then(Color::hex);
                }
                Style::Link { url } => {
                    deco.underline = true;
                    deco.link = Some(url.clone());
                }
                Style::Custom(_) if style.is_nickname() => {
                    deco.nick_color = Some(color_hash(content));
                }
                Style::Custom(_) => {}
            }
        }
        deco
    }
}

/// A segment together with its decoration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSegment {
    pub segment: Segment,
    pub decoration: Decoration,
}

/// Resolve one span.
pub fn resolve_span(span: &StyledSpan) -> RenderSegment {
    RenderSegment {
        segment: Segment::from_content(&span.content),
        decoration: Decoration::from_styles(&span.styles, &span.content),
    }
}

/// Resolve every span of a line, in order.
pub fn resolve_line(line: &Line) -> Vec<RenderSegment> {
    line.spans.iter().map(resolve_span).collect()
}
