//! # slirc-richtext
//!
//! Rich-text handling for IRC clients: mIRC control codes in, renderable
//! segments out, with inline images for linked pictures.
//!
//! ## Features
//!
//! - Lazy control-code parser producing styled spans (bold, italic,
//!   monospace, underline, strikethrough, palette and hex colours, links,
//!   nickname markers)
//! - Span to segment resolution with renderer decoration directives
//! - Deterministic nickname colour buckets
//! - Append-only window transcripts with incremental image embedding
//! - Optional Tokio task that serialises appends and image insertions
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_richtext::format::parse_spans;
//! use slirc_richtext::segment::{resolve_span, Segment};
//! use slirc_richtext::style::Style;
//!
//! let spans: Vec<_> = parse_spans("\x0304,01alert\x0f all clear").collect();
//! assert_eq!(spans.len(), 2);
//! assert!(spans[0].styles.contains(&Style::Color { foreground: 4, background: Some(1) }));
//!
//! let rendered = resolve_span(&spans[1]);
//! assert_eq!(rendered.segment, Segment::Text(" all clear".to_string()));
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod colors;
pub mod config;
pub mod error;
pub mod format;
pub mod segment;
pub mod style;
pub mod transcript;

pub use self::colors::{color_hash, Rgb};
pub use self::config::{EmbedSwitch, FormatConfig};
pub use self::error::{FormatError, Result};
pub use self::format::{parse_spans, FormattedStringExt, Spans};
pub use self::segment::{resolve_line, resolve_span, Decoration, RenderSegment, Segment};
pub use self::style::{Line, Style, StyleSet, StyledSpan};
pub use self::transcript::{AppendEvent, ImageEmbedder, Transcript, Window};

#[cfg(feature = "tokio")]
pub use self::transcript::actor::{spawn_window, WindowHandle};
