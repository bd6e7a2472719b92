//! Integration tests for transcript image embedding.
//!
//! These tests verify that:
//! 1. Lines without image links never produce extra lines
//! 2. Each image link is embedded exactly once, right after its source line
//! 3. The watermark never lets a line be scanned twice

use slirc_richtext::segment::{resolve_line, Segment};
use slirc_richtext::{FormatConfig, Line, Style, StyledSpan, Window};

fn enabled_window() -> Window {
    Window::new(&FormatConfig {
        embed_images: true,
        ..FormatConfig::default()
    })
}

fn link_line(url: &str) -> Line {
    Line::new(vec![
        StyledSpan::plain("see "),
        StyledSpan::new(url, [Style::Link { url: url.to_string() }]),
    ])
}

fn images(line: &Line) -> Vec<String> {
    resolve_line(line)
        .into_iter()
        .filter_map(|r| match r.segment {
            Segment::Image(url) => Some(url),
            _ => None,
        })
        .collect()
}

#[test]
fn test_no_images_no_growth() {
    let mut window = enabled_window();
    window.append([
        Line::parse("hello"),
        link_line("https://example.com/page.html"),
        Line::parse("\x02bold\x02 https://example.com/plain.png"),
    ]);
    assert_eq!(window.run_pending(), 0);
    assert_eq!(window.transcript().len(), 3);
}

#[test]
fn test_single_image_embedded_once() {
    let mut window = enabled_window();
    window.append([link_line("https://example.com/cat.png")]);
    window.run_pending();

    let transcript = window.transcript();
    assert_eq!(transcript.len(), 2);
    let image_line = transcript.get(1).unwrap();
    assert_eq!(image_line.spans.len(), 1);
    assert_eq!(images(image_line), vec!["https://example.com/cat.png"]);

    // Nothing further happens on later turns.
    assert_eq!(window.run_pending(), 0);
    assert_eq!(window.transcript().len(), 2);
}

#[test]
fn test_batch_images_follow_their_sources() {
    let mut window = enabled_window();
    window.append([
        link_line("https://example.com/one.jpg"),
        link_line("https://example.com/two.JPEG"),
    ]);
    assert_eq!(window.run_pending(), 2);

    let transcript = window.transcript();
    assert_eq!(transcript.len(), 4);
    assert!(images(transcript.get(0).unwrap()).is_empty());
    assert_eq!(
        images(transcript.get(1).unwrap()),
        vec!["https://example.com/one.jpg"]
    );
    assert!(images(transcript.get(2).unwrap()).is_empty());
    assert_eq!(
        images(transcript.get(3).unwrap()),
        vec!["https://example.com/two.JPEG"]
    );
}

#[test]
fn test_earlier_lines_not_rescanned() {
    let mut window = enabled_window();
    window.append([link_line("https://example.com/a.png")]);
    window.run_pending();
    assert_eq!(window.watermark(), 2);

    window.append([Line::parse("plain follow-up")]);
    assert_eq!(window.run_pending(), 0);
    assert_eq!(window.transcript().len(), 3);
    assert_eq!(window.watermark(), 3);
}

#[test]
fn test_multiple_images_in_one_line() {
    let mut window = enabled_window();
    window.push_message(
        "\x17https://example.com/a.png\x17 vs \x17https://example.com/b.jpg\x17",
    );
    window.run_pending();

    let transcript = window.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(
        images(transcript.get(1).unwrap()),
        vec!["https://example.com/a.png", "https://example.com/b.jpg"]
    );
}

#[test]
fn test_disabled_embeds_nothing() {
    let mut window = Window::new(&FormatConfig::default());
    window.append([link_line("https://example.com/cat.png")]);
    assert_eq!(window.run_pending(), 0);
    assert_eq!(window.transcript().len(), 1);
    assert_eq!(window.watermark(), 0);
}

#[test]
fn test_watermark_monotonic() {
    let mut window = enabled_window();
    let mut last = window.watermark();
    for i in 0..20 {
        if i % 3 == 0 {
            window.append([link_line(&format!("https://example.com/{}.png", i))]);
        } else {
            window.append([Line::parse("chatter")]);
        }
        if i % 2 == 0 {
            window.run_pending();
        }
        assert!(window.watermark() >= last);
        last = window.watermark();
    }
    window.run_pending();

    assert_eq!(window.watermark(), window.transcript().len());
    let embedded: usize = window
        .transcript()
        .iter()
        .map(|line| images(line).len())
        .sum();
    assert_eq!(embedded, 7);
}

#[test]
fn test_formatted_link_embedded_once() {
    let mut window = enabled_window();
    window.push_message("\x17https://example.com/\x02cat\x02.png\x17");
    assert_eq!(window.run_pending(), 1);

    let transcript = window.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(
        images(transcript.get(1).unwrap()),
        vec!["https://example.com/cat.png"]
    );
}
