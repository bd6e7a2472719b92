use std::collections::VecDeque;

use tracing::debug;

use super::{AppendEvent, ImageEmbedder, PendingImageLine, Transcript};
use crate::config::{EmbedSwitch, FormatConfig};
use crate::style::Line;

/// A transcript plus the deferred work its observers have asked for.
///
/// Appending scans the new lines immediately but only queues the image
/// lines it finds. [`run_pending`](Self::run_pending) is the next turn:
/// it inserts them, and each insertion is observed like any other append.
#[derive(Debug)]
pub struct Window {
    transcript: Transcript,
    embedder: ImageEmbedder,
    switch: EmbedSwitch,
    pending: VecDeque<PendingImageLine>,
}

impl Window {
    pub fn new(config: &FormatConfig) -> Self {
        Self::with_switch(config, EmbedSwitch::new(config.embed_images))
    }

    /// Create a window whose embedding flag is controlled by `switch`.
    pub fn with_switch(config: &FormatConfig, switch: EmbedSwitch) -> Self {
        Self {
            transcript: Transcript::new(),
            embedder: ImageEmbedder::new(config),
            switch,
            pending: VecDeque::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle to this window's embedding flag.
    pub fn embed_switch(&self) -> EmbedSwitch {
        self.switch.clone()
    }

    pub fn watermark(&self) -> usize {
        self.embedder.watermark()
    }

    /// Parse raw message text and append it as one line.
    pub fn push_message(&mut self, raw: &str) {
        self.append([Line::parse(raw)]);
    }

    /// Append lines at the end of the transcript.
    pub fn append<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = Line>,
    {
        if let Some(event) = self.transcript.append(lines) {
            self.observe(&event);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Insert every queued image line, including any queued while doing so.
    ///
    /// Returns the number of lines inserted.
    pub fn run_pending(&mut self) -> usize {
        let mut inserted = 0;
        while let Some(PendingImageLine { after, line }) = self.pending.pop_front() {
            self.embedder.note_insertion();
            let event = self.transcript.insert_after(after, line);
            debug!("inserted image line at {}", event.range.start);

            // Queued lines from an earlier batch may sit at or past the new line.
            for waiting in &mut self.pending {
                if waiting.after >= event.range.start {
                    waiting.after += 1;
                }
            }

            self.observe(&event);
            inserted += 1;
        }
        inserted
    }

    fn observe(&mut self, event: &AppendEvent) {
        let found = self
            .embedder
            .observe(&self.transcript, event, self.switch.is_enabled());
        self.pending.extend(found);
    }
}
