//! Fuzz target for control-code parsing
//!
//! Feeds arbitrary text through the parser, the resolver and the image
//! embedder, none of which may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_richtext::segment::resolve_line;
use slirc_richtext::{FormatConfig, FormattedStringExt, Line, Window};
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 4096 {
            return;
        }

        let line = Line::parse(input);
        let _ = resolve_line(&line);
        let _ = input.strip_formatting();

        let mut window = Window::new(&FormatConfig {
            embed_images: true,
            ..FormatConfig::default()
        });
        window.append([line]);
        window.run_pending();
        assert_eq!(window.watermark(), window.transcript().len());
    }
});
