//! Incremental scanner that finds image links in new transcript lines.

use tracing::{debug, trace};

use super::{AppendEvent, Transcript};
use crate::config::FormatConfig;
use crate::segment::image_span;
use crate::style::Line;

/// An image-only line waiting to be inserted after line `after`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingImageLine {
    pub after: usize,
    pub line: Line,
}

/// Watermarked image scanner for a single transcript.
///
/// Lines below the watermark have been scanned already. Every append
/// event moves the watermark to the end of its range before any image
/// line is proposed, and every proposed line that gets inserted bumps it
/// once more via [`note_insertion`](Self::note_insertion). The events
/// raised by those insertions therefore fall under the watermark and are
/// ignored, so each image link is embedded exactly once.
#[derive(Clone, Debug)]
pub struct ImageEmbedder {
    last_processed: usize,
    extensions: Vec<String>,
}

impl ImageEmbedder {
    pub fn new(config: &FormatConfig) -> Self {
        Self {
            last_processed: 0,
            extensions: config
                .image_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Index below which every line has been scanned.
    pub fn watermark(&self) -> usize {
        self.last_processed
    }

    /// Returns true if the path of `url` ends in a configured extension.
    ///
    /// Query strings and fragments are ignored.
    pub fn is_image_url(&self, url: &str) -> bool {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        match path.rsplit_once('.') {
            Some((_, ext)) => self
                .extensions
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Image-only line for every image link in `line`, in order.
    ///
    /// Formatting inside a link splits it into several spans carrying the
    /// same URL; those count as one link until their text spells the URL.
    pub fn image_line(&self, line: &Line) -> Option<Line> {
        let mut images = Vec::new();
        // URL of the link being read and the text seen for it so far.
        let mut open: Option<(&str, String)> = None;

        for span in &line.spans {
            let Some(url) = span.link() else {
                open = None;
                continue;
            };
            if let Some((open_url, text)) = &mut open {
                if *open_url == url && text.len() < url.len() {
                    text.push_str(&span.content);
                    continue;
                }
            }
            open = Some((url, span.content.clone()));
            if self.is_image_url(url) {
                images.push(image_span(url));
            }
        }

        (!images.is_empty()).then(|| Line::new(images))
    }

    /// React to lines added to `transcript`.
    ///
    /// Returns the image lines to insert, highest source index first, so
    /// that inserting them in order never shifts a source line that is
    /// still waiting.
    pub fn observe(
        &mut self,
        transcript: &Transcript,
        event: &AppendEvent,
        enabled: bool,
    ) -> Vec<PendingImageLine> {
        let AppendEvent { range } = event;
        if !enabled {
            trace!("image embedding disabled, skipping {:?}", range);
            return Vec::new();
        }
        if range.end <= self.last_processed {
            trace!(
                "{:?} already below watermark {}",
                range,
                self.last_processed
            );
            return Vec::new();
        }

        let start = self.last_processed.max(range.start);
        self.last_processed = range.end;

        let pending: Vec<PendingImageLine> = (start..range.end)
            .rev()
            .filter_map(|index| {
                let line = transcript.get(index)?;
                self.image_line(line).map(|line| PendingImageLine { after: index, line })
            })
            .collect();

        if !pending.is_empty() {
            debug!(
                "scanned lines {}..{}, {} image line(s) to embed",
                start,
                range.end,
                pending.len()
            );
        }
        pending
    }

    /// Account for one proposed line about to be inserted.
    pub fn note_insertion(&mut self) {
        self.last_processed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{resolve_line, Segment};
    use crate::style::{Style, StyledSpan};

    fn embedder() -> ImageEmbedder {
        ImageEmbedder::new(&FormatConfig::default())
    }

    fn link(url: &str) -> StyledSpan {
        StyledSpan::new(url, [Style::Link { url: url.into() }])
    }

    #[test]
    fn test_is_image_url() {
        let embedder = embedder();
        assert!(embedder.is_image_url("http://x/a.png"));
        assert!(embedder.is_image_url("http://x/a.JPG"));
        assert!(embedder.is_image_url("https://x/a.jpeg?size=large"));
        assert!(embedder.is_image_url("https://x/a.Jpeg#top"));
        assert!(!embedder.is_image_url("http://x/a.gif"));
        assert!(!embedder.is_image_url("http://x/png"));
        assert!(!embedder.is_image_url("http://x/a.png.html"));
        assert!(!embedder.is_image_url("localhost"));
    }

    #[test]
    fn test_custom_extensions() {
        let config = FormatConfig {
            embed_images: true,
            image_extensions: vec!["GIF".into()],
        };
        let embedder = ImageEmbedder::new(&config);
        assert!(embedder.is_image_url("http://x/a.gif"));
        assert!(!embedder.is_image_url("http://x/a.png"));
    }

    #[test]
    fn test_image_line_keeps_link_order() {
        let line = Line::new(vec![
            link("http://x/1.png"),
            StyledSpan::plain(" and "),
            link("http://x/page.html"),
            StyledSpan::new("http://x/plain.png", [Style::Bold]),
            link("http://x/2.jpg"),
        ]);
        let images = embedder().image_line(&line).unwrap();
        let segments: Vec<Segment> = resolve_line(&images)
            .into_iter()
            .map(|r| r.segment)
            .collect();
        assert_eq!(
            segments,
            vec![
                Segment::Image("http://x/1.png".into()),
                Segment::Image("http://x/2.jpg".into()),
            ]
        );
    }

    #[test]
    fn test_image_line_formatted_link_counts_once() {
        let line = Line::parse("\x17https://x/\x02cat\x02.png\x17");
        assert_eq!(line.spans.len(), 3);
        let images = embedder().image_line(&line).unwrap();
        assert_eq!(images.spans, vec![image_span("https://x/cat.png")]);
    }

    #[test]
    fn test_image_line_repeated_links_stay_separate() {
        let line = Line::parse("\x17http://x/a.png\x17\x17http://x/\x1da.png\x1d\x17");
        let images = embedder().image_line(&line).unwrap();
        assert_eq!(
            images.spans,
            vec![image_span("http://x/a.png"), image_span("http://x/a.png")]
        );
    }

    #[test]
    fn test_image_line_none_without_images() {
        let line = Line::new(vec![link("http://x/page.html")]);
        assert_eq!(embedder().image_line(&line), None);
    }

    #[test]
    fn test_observe_disabled_leaves_watermark() {
        let mut transcript = Transcript::new();
        let event = transcript
            .append([Line::new(vec![link("http://x/a.png")])])
            .unwrap();

        let mut embedder = embedder();
        assert!(embedder.observe(&transcript, &event, false).is_empty());
        assert_eq!(embedder.watermark(), 0);
    }

    #[test]
    fn test_observe_scans_descending() {
        let mut transcript = Transcript::new();
        let event = transcript
            .append([
                Line::new(vec![link("http://x/a.png")]),
                Line::new(vec![StyledSpan::plain("nothing")]),
                Line::new(vec![link("http://x/b.png")]),
            ])
            .unwrap();

        let mut embedder = embedder();
        let pending = embedder.observe(&transcript, &event, true);
        let after: Vec<usize> = pending.iter().map(|p| p.after).collect();
        assert_eq!(after, vec![2, 0]);
        assert_eq!(embedder.watermark(), 3);

        // The same range again is below the watermark.
        assert!(embedder.observe(&transcript, &event, true).is_empty());
    }

    #[test]
    fn test_observe_clips_to_watermark() {
        let mut transcript = Transcript::new();
        transcript.append([Line::new(vec![link("http://x/a.png")])]);
        let mut embedder = embedder();
        embedder.observe(&transcript, &AppendEvent { range: 0..1 }, true);

        transcript.append([Line::new(vec![link("http://x/b.png")])]);
        let pending = embedder.observe(&transcript, &AppendEvent { range: 0..2 }, true);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].after, 1);
    }
}
