//! Control-code parser producing styled spans.
//!
//! The parser walks the input once, left to right, holding the current
//! style set and a text buffer. Whenever the style set is about to change
//! the buffer is flushed as a span carrying the styles in effect for it.
//! Malformed colour arguments are never an error: whatever was not
//! consumed as syntax stays in the text.

use std::collections::VecDeque;
use std::mem;

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{map, map_res, opt},
    sequence::{pair, preceded},
    IResult,
};

use super::{
    BOLD, COLOR, HEX_COLOR, ITALIC, LINK, MONOSPACE, NICKNAME, RESET, REVERSE, STRIKETHROUGH,
    UNDERLINE,
};
use crate::segment::IMAGE_SENTINEL;
use crate::style::{Style, StyleSet, StyledSpan};

type ParseResult<'a, O> = IResult<&'a str, O>;

/// One or two decimal digits.
fn palette_index(input: &str) -> ParseResult<'_, u8> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), |digits: &str| {
        digits.parse::<u8>()
    })(input)
}

/// `fg[,bg]` after `^C`. A comma without a digit after it is left unconsumed.
fn color_args(input: &str) -> ParseResult<'_, Style> {
    map(
        pair(palette_index, opt(preceded(char(','), palette_index))),
        |(foreground, background)| Style::Color {
            foreground,
            background,
        },
    )(input)
}

/// Exactly six hex digits, normalised to uppercase.
fn hex_triplet(input: &str) -> ParseResult<'_, String> {
    map(
        take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()),
        str::to_ascii_uppercase,
    )(input)
}

/// `RRGGBB[,RRGGBB]` after `^D`.
fn hex_color_args(input: &str) -> ParseResult<'_, Style> {
    map(
        pair(hex_triplet, opt(preceded(char(','), hex_triplet))),
        |(foreground, background)| Style::HexColor {
            foreground,
            background,
        },
    )(input)
}

/// Parse formatted message text into styled spans.
///
/// The returned iterator is lazy and borrows `input`; calling this again
/// on the same input yields the same spans. Empty input yields nothing.
///
/// # Examples
///
/// ```
/// use slirc_richtext::format::parse_spans;
/// use slirc_richtext::style::{Style, StyledSpan};
///
/// let spans: Vec<_> = parse_spans("\x02bold\x02 plain").collect();
/// assert_eq!(
///     spans,
///     vec![
///         StyledSpan::new("bold", [Style::Bold]),
///         StyledSpan::plain(" plain"),
///     ]
/// );
/// ```
pub fn parse_spans(input: &str) -> Spans<'_> {
    Spans {
        rest: input,
        state: ScanState::default(),
        finished: false,
    }
}

/// Lazy iterator over the spans of a formatted string.
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    rest: &'a str,
    state: ScanState,
    finished: bool,
}

/// Formatting state carried across characters.
#[derive(Debug, Clone, Default)]
struct ScanState {
    styles: StyleSet,
    buffer: String,
    /// Spans inside an open link, held until the closing marker names the URL.
    link: Option<Vec<StyledSpan>>,
    ready: VecDeque<StyledSpan>,
}

impl ScanState {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let span = StyledSpan {
            content: mem::take(&mut self.buffer),
            styles: self.styles.clone(),
        };
        match &mut self.link {
            Some(pending) => pending.push(span),
            None => self.ready.push_back(span),
        }
    }

    fn toggle(&mut self, style: Style) {
        self.flush();
        if !self.styles.remove(&style) {
            self.styles.insert(style);
        }
    }

    fn reset(&mut self) {
        self.flush();
        self.styles.clear();
    }

    fn set_color(&mut self, color: Style) {
        self.styles.retain(|s| !s.is_color());
        self.styles.insert(color);
    }

    fn clear_color(&mut self) {
        self.styles.retain(|s| !s.is_color());
    }

    fn toggle_link(&mut self) {
        self.flush();
        match self.link.take() {
            None => self.link = Some(Vec::new()),
            Some(pending) => {
                let url: String = pending.iter().map(|s| s.content.as_str()).collect();
                for mut span in pending {
                    span.styles.insert(Style::Link { url: url.clone() });
                    self.ready.push_back(span);
                }
            }
        }
    }

    fn finish(&mut self) {
        self.flush();
        // An unterminated link is plain text.
        if let Some(pending) = self.link.take() {
            self.ready.extend(pending);
        }
    }
}

impl Spans<'_> {
    /// Consume one character (and any colour arguments following it).
    fn step(&mut self) {
        let mut chars = self.rest.chars();
        let Some(c) = chars.next() else {
            return;
        };
        self.rest = chars.as_str();

        match c {
            BOLD => self.state.toggle(Style::Bold),
            ITALIC => self.state.toggle(Style::Italic),
            MONOSPACE => self.state.toggle(Style::Monospace),
            UNDERLINE => self.state.toggle(Style::Underline),
            STRIKETHROUGH => self.state.toggle(Style::Strikethrough),
            NICKNAME => self.state.toggle(Style::nickname()),
            RESET => self.state.reset(),
            COLOR => self.color(color_args),
            HEX_COLOR => self.color(hex_color_args),
            LINK => self.state.toggle_link(),
            REVERSE | IMAGE_SENTINEL => {}
            _ => self.state.buffer.push(c),
        }
    }

    fn color(&mut self, args: fn(&str) -> ParseResult<'_, Style>) {
        self.state.flush();
        match args(self.rest) {
            Ok((rest, color)) => {
                self.rest = rest;
                self.state.set_color(color);
            }
            Err(_) => self.state.clear_color(),
        }
    }
}

impl Iterator for Spans<'_> {
    type Item = StyledSpan;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(span) = self.state.ready.pop_front() {
                return Some(span);
            }
            if self.finished {
                return None;
            }
            if self.rest.is_empty() {
                self.state.finish();
                self.finished = true;
            } else {
                self.step();
            }
        }
    }
}
