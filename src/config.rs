//! Configuration for image embedding.
//!
//! Loading and saving are the host's business; with the `serde` feature
//! [`FormatConfig`] deserialises from whatever format the host uses, with
//! every field optional.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{FormatError, Result};

/// Image extensions embedded when nothing else is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Settings consumed by the image embedder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Whether image links get an inline image line.
    pub embed_images: bool,
    /// File extensions, without the dot, treated as images. Case-insensitive.
    pub image_extensions: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            embed_images: false,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl FormatConfig {
    /// Check that every extension is a bare, non-empty word.
    pub fn validate(&self) -> Result<()> {
        for ext in &self.image_extensions {
            if ext.is_empty() || ext.contains(|c: char| c == '.' || c.is_whitespace()) {
                return Err(FormatError::InvalidExtension(ext.clone()));
            }
        }
        Ok(())
    }
}

/// Shared on/off switch for image embedding.
///
/// Clones share one flag. The host flips it when its settings change and
/// the embedder reads it on every append.
#[derive(Clone, Debug, Default)]
pub struct EmbedSwitch(Arc<AtomicBool>);

impl EmbedSwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}
