//! Tokio task owning a [`Window`].
//!
//! Producers send lines through a [`WindowHandle`]. Image lines found by
//! the embedder are not inserted while handling the append; the task posts
//! itself a flush command on the same channel, so insertions are
//! serialised behind whatever was already queued.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use super::Window;
use crate::config::{EmbedSwitch, FormatConfig};
use crate::error::{FormatError, Result};
use crate::style::Line;

#[derive(Debug)]
enum WindowCommand {
    Append(Vec<Line>),
    Flush,
    Snapshot(oneshot::Sender<Vec<Arc<Line>>>),
}

/// Cloneable handle for feeding a window task.
#[derive(Clone, Debug)]
pub struct WindowHandle {
    tx: mpsc::UnboundedSender<WindowCommand>,
    switch: EmbedSwitch,
}

impl WindowHandle {
    /// Queue lines for appending.
    pub fn append(&self, lines: Vec<Line>) -> Result<()> {
        self.tx
            .send(WindowCommand::Append(lines))
            .map_err(|_| FormatError::WindowClosed)
    }

    /// Parse raw message text and queue it as one line.
    pub fn push_message(&self, raw: &str) -> Result<()> {
        self.append(vec![Line::parse(raw)])
    }

    /// The transcript once all work queued so far, including image lines
    /// derived from it, has been applied.
    pub async fn snapshot(&self) -> Result<Vec<Arc<Line>>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(WindowCommand::Snapshot(reply))
            .map_err(|_| FormatError::WindowClosed)?;
        rx.await.map_err(|_| FormatError::WindowClosed)
    }

    /// Turn image embedding on or off for subsequent appends.
    pub fn set_embed_images(&self, enabled: bool) {
        self.switch.set(enabled);
    }
}

/// Spawn a window task on the current tokio runtime.
///
/// The task ends once every handle is dropped and returns the window.
pub fn spawn_window(config: &FormatConfig) -> (WindowHandle, JoinHandle<Window>) {
    let window = Window::new(config);
    let switch = window.embed_switch();
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(window, rx, tx.downgrade()));
    (WindowHandle { tx, switch }, task)
}

async fn run(
    window: Window,
    mut rx: mpsc::UnboundedReceiver<WindowCommand>,
    this: mpsc::WeakUnboundedSender<WindowCommand>,
) -> Window {
    let mut task = WindowTask {
        window,
        this,
        flush_posted: false,
    };
    while let Some(command) = rx.recv().await {
        task.handle(command);
    }

    let mut window = task.window;
    window.run_pending();
    debug!("window task stopped with {} lines", window.transcript().len());
    window
}

/// State owned by the window task between commands.
struct WindowTask {
    window: Window,
    this: mpsc::WeakUnboundedSender<WindowCommand>,
    /// A `Flush` is queued and not yet handled.
    flush_posted: bool,
}

impl WindowTask {
    fn handle(&mut self, command: WindowCommand) {
        match command {
            WindowCommand::Append(lines) => self.window.append(lines),
            WindowCommand::Flush => {
                self.flush_posted = false;
                self.window.run_pending();
            }
            WindowCommand::Snapshot(reply) if self.window.has_pending() => {
                // Answer after the flush that is already queued.
                match self.this.upgrade() {
                    Some(tx) if self.schedule_flush(&tx) => {
                        let _ = tx.send(WindowCommand::Snapshot(reply));
                    }
                    _ => {
                        self.window.run_pending();
                        let _ = reply.send(self.window.transcript().snapshot());
                    }
                }
            }
            WindowCommand::Snapshot(reply) => {
                let _ = reply.send(self.window.transcript().snapshot());
            }
        }

        if self.window.has_pending() {
            let posted = self
                .this
                .upgrade()
                .is_some_and(|tx| self.schedule_flush(&tx));
            if !posted {
                self.window.run_pending();
            }
        }
    }

    /// Queue a `Flush` unless one is already waiting.
    fn schedule_flush(&mut self, tx: &mpsc::UnboundedSender<WindowCommand>) -> bool {
        if self.flush_posted {
            return true;
        }
        self.flush_posted = tx.send(WindowCommand::Flush).is_ok();
        self.flush_posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> FormatConfig {
        FormatConfig {
            embed_images: true,
            ..FormatConfig::default()
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<WindowCommand>) -> Vec<WindowCommand> {
        let mut queued = Vec::new();
        while let Ok(command) = rx.try_recv() {
            queued.push(command);
        }
        queued
    }

    #[test]
    fn test_backlog_posts_one_flush() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut task = WindowTask {
            window: Window::new(&enabled()),
            this: tx.downgrade(),
            flush_posted: false,
        };

        for i in 0..5 {
            task.handle(WindowCommand::Append(vec![Line::parse(&format!(
                "\x17http://x/{}.png\x17",
                i
            ))]));
        }
        let queued = drain(&mut rx);
        assert_eq!(queued.len(), 1);
        assert!(matches!(queued[0], WindowCommand::Flush));
        assert_eq!(task.window.transcript().len(), 5);

        task.handle(WindowCommand::Flush);
        assert!(!task.flush_posted);
        assert_eq!(task.window.transcript().len(), 10);
        assert!(drain(&mut rx).is_empty());
        drop(tx);
    }

    #[test]
    fn test_new_work_after_flush_posts_again() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut task = WindowTask {
            window: Window::new(&enabled()),
            this: tx.downgrade(),
            flush_posted: false,
        };

        task.handle(WindowCommand::Append(vec![Line::parse("\x17http://x/a.png\x17")]));
        task.handle(WindowCommand::Flush);
        task.handle(WindowCommand::Append(vec![Line::parse("\x17http://x/b.png\x17")]));

        let queued = drain(&mut rx);
        assert_eq!(queued.len(), 2);
        assert!(queued.iter().all(|c| matches!(c, WindowCommand::Flush)));
        drop(tx);
    }
}
