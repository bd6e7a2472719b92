//! Window transcripts and inline image embedding.
//!
//! A [`Transcript`] only grows. Every mutation reports the index range it
//! added as an [`AppendEvent`]; the [`ImageEmbedder`] looks at those ranges
//! and proposes image-only lines, and a [`Window`] applies the proposals on
//! a later turn so that no observer ever mutates the transcript it is
//! scanning.
//!
//! # Example
//!
//! ```
//! use slirc_richtext::config::FormatConfig;
//! use slirc_richtext::segment::{resolve_line, Segment};
//! use slirc_richtext::transcript::Window;
//!
//! let config = FormatConfig { embed_images: true, ..FormatConfig::default() };
//! let mut window = Window::new(&config);
//!
//! window.push_message("look: \x17https://example.com/cat.png\x17");
//! assert_eq!(window.transcript().len(), 1);
//!
//! // The image line lands on the next turn.
//! window.run_pending();
//! assert_eq!(window.transcript().len(), 2);
//!
//! let image_line = window.transcript().get(1).unwrap();
//! assert_eq!(
//!     resolve_line(image_line)[0].segment,
//!     Segment::Image("https://example.com/cat.png".to_string())
//! );
//! ```

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod actor;
mod embed;
mod window;

pub use self::embed::{ImageEmbedder, PendingImageLine};
pub use self::window::Window;

use std::ops::Range;
use std::sync::Arc;

use crate::style::Line;

/// Lines `range` were just added to a transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendEvent {
    pub range: Range<usize>,
}

/// Append-only sequence of lines belonging to one window.
///
/// Published lines are never modified. Readers that need to iterate
/// while the owner keeps appending take a [`snapshot`](Self::snapshot).
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    lines: Vec<Arc<Line>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().map(Arc::as_ref)
    }

    /// Shared handles to the lines present right now.
    pub fn snapshot(&self) -> Vec<Arc<Line>> {
        self.lines.clone()
    }

    /// Append lines at the end.
    ///
    /// Returns `None` if `lines` was empty.
    pub fn append<I>(&mut self, lines: I) -> Option<AppendEvent>
    where
        I: IntoIterator<Item = Line>,
    {
        let start = self.lines.len();
        self.lines.extend(lines.into_iter().map(Arc::new));
        let end = self.lines.len();
        (end > start).then_some(AppendEvent { range: start..end })
    }

    /// Insert a line directly after `index`, or at the end if `index` is
    /// the last line or past it.
    pub(crate) fn insert_after(&mut self, index: usize, line: Line) -> AppendEvent {
        let at = index.saturating_add(1).min(self.lines.len());
        self.lines.insert(at, Arc::new(line));
        AppendEvent { range: at..at + 1 }
    }
}
