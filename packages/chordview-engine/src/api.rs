//! # Public API
//!
//! Entry points for callers that hold raw song text and want markup back.
//!
//! ## Render Functions
//!
//! - [`render()`] - Renderer A with header inference (the usual call)
//! - [`render_with_options()`] - Everything configurable through [`RenderOptions`]
//! - [`render_legacy()`] - Renderer B, Web Chord compatible markup
//! - [`render_bytes()`] - Same as `render_with_options` for undecoded input
//!
//! None of these fail: odd lines degrade to best-effort output instead of
//! losing the whole song.
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordview_engine::render;
//!
//! let song = "{title: Amazing Grace}\n{key: G}\n[G]Amazing [C]grace";
//! let html = render(song, 2, None);
//! assert!(html.contains(r#"<span class="chord">A</span>"#));
//! assert!(html.contains(r#"<span class="chord">D</span>"#));
//! ```
//!
//! ## Boundary Helpers
//!
//! ```rust
//! use chordview_engine::{is_song_file, parse_transpose};
//!
//! assert_eq!(parse_transpose(Some("+3")), 3);
//! assert_eq!(parse_transpose(Some("up")), 0);
//! assert!(is_song_file("setlist/Amazing Grace.CHO"));
//! ```

use crate::document::parse_document;
use crate::render::{RenderOptions, RendererKind};
use crate::transpose::transpose_document;
use std::path::Path;

/// File extensions treated as songs, lowercase and without the dot
pub const SONG_EXTENSIONS: [&str; 5] = ["cho", "chordpro", "pro", "onsong", "txt"];

/// Render a song with Renderer A
///
/// # Pipeline
/// 1. Infer a title/artist/key header for directive-less songs
/// 2. Classify lines
/// 3. Transpose chords by `transpose` semitones, spelling them for
///    `key_override` until the song's own `{key}` directive takes over
/// 4. Emit the HTML fragment
///
/// # Example
/// ```rust
/// use chordview_engine::render;
///
/// let html = render("Amazing Grace\nJohn Newton\nKey: F\n[F]Amazing [Bb]grace", 0, None);
/// assert!(html.contains(r#"<h1 class="title">Amazing Grace</h1>"#));
/// assert!(html.contains("Artist: John Newton · Key: F"));
/// ```
pub fn render(text: &str, transpose: i32, key_override: Option<&str>) -> String {
    render_with_options(
        text,
        &RenderOptions {
            transpose,
            key: key_override.map(str::to_string),
            ..RenderOptions::default()
        },
    )
}

/// Render a song with explicit options
///
/// ```rust
/// use chordview_engine::{render_with_options, RenderOptions, RendererKind};
///
/// let options = RenderOptions {
///     transpose: -2,
///     renderer: RendererKind::Legacy,
///     standalone: true,
///     ..RenderOptions::default()
/// };
/// let page = render_with_options("{t: Hymn}\n[A]la", &options);
/// assert!(page.starts_with("<HTML><HEAD><TITLE>Hymn</TITLE>"));
/// assert!(page.contains(">G</TD>"));
/// ```
pub fn render_with_options(text: &str, options: &RenderOptions) -> String {
    let infer_header = options.infer_header && options.renderer.infers_header();
    let mut doc = parse_document(text, infer_header);
    transpose_document(&mut doc, options.transpose, options.key.as_deref());

    let renderer = options.renderer.renderer();
    let fragment = renderer.render(&doc);
    log::debug!(
        "rendered {} lines with {} renderer ({} bytes)",
        doc.lines.len(),
        options.renderer,
        fragment.len()
    );

    if options.standalone {
        renderer.page(&doc, &fragment)
    } else {
        fragment
    }
}

/// Render a song with Renderer B
///
/// Header inference never applies to Renderer B, so plain lines render
/// exactly as the Web Chord converter would.
///
/// ```rust
/// use chordview_engine::render_legacy;
///
/// assert_eq!(render_legacy("{title: Hymn}", 0), "<H1> Hymn</H1>\n");
/// ```
pub fn render_legacy(text: &str, transpose: i32) -> String {
    render_with_options(
        text,
        &RenderOptions {
            transpose,
            renderer: RendererKind::Legacy,
            ..RenderOptions::default()
        },
    )
}

/// Render undecoded input, replacing invalid UTF-8 sequences
pub fn render_bytes(bytes: &[u8], options: &RenderOptions) -> String {
    let text = String::from_utf8_lossy(bytes);
    render_with_options(&text, options)
}

/// Parse a user-supplied semitone offset, `0` when missing or malformed
pub fn parse_transpose(value: Option<&str>) -> i32 {
    let Some(value) = value else {
        return 0;
    };
    // `i32::from_str` takes one optional `+` or `-`
    let value = value.trim();
    match value.parse::<i32>() {
        Ok(semitones) => semitones,
        Err(err) => {
            log::debug!("invalid transpose value {:?}: {}", value, err);
            0
        }
    }
}

/// Whether a path names a song file, by extension
pub fn is_song_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SONG_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transpose() {
        assert_eq!(parse_transpose(None), 0);
        assert_eq!(parse_transpose(Some("")), 0);
        assert_eq!(parse_transpose(Some(" 5 ")), 5);
        assert_eq!(parse_transpose(Some("+2")), 2);
        assert_eq!(parse_transpose(Some("-11")), -11);
        assert_eq!(parse_transpose(Some("1.5")), 0);
        assert_eq!(parse_transpose(Some("++1")), 0);
        assert_eq!(parse_transpose(Some("+-3")), 0);
        assert_eq!(parse_transpose(Some("-+3")), 0);
        assert_eq!(parse_transpose(Some("+ 3")), 0);
        assert_eq!(parse_transpose(Some("99999999999")), 0);
    }

    #[test]
    fn test_is_song_file() {
        for name in ["a.cho", "b.ChordPro", "c.pro", "d.onsong", "e.TXT", "dir/x y.cho"] {
            assert!(is_song_file(name), "{}", name);
        }
        for name in ["a.md", "cho", ".cho", "song.cho.bak", "noext"] {
            assert!(!is_song_file(name), "{}", name);
        }
    }

    #[test]
    fn test_render_bytes_replaces_invalid_utf8() {
        let html = render_bytes(b"{title: Caf\xff}\nla", &RenderOptions::default());
        assert!(html.contains("Caf\u{FFFD}"));
    }

    #[test]
    fn test_key_override_picks_spelling() {
        assert!(render("[C]la", 1, None).contains(">C#<"));
        assert!(render("[C]la", 1, Some("F")).contains(">Db<"));
        // The song's own key takes over once it appears
        assert!(render("[C]la\n{key: D}\n[C]la", 1, Some("F")).contains(">C#<"));
    }

    #[test]
    fn test_minor_key_directive_keeps_flats() {
        let html = render("{key: F}\n{key: Dm}\n[C]la", 1, None);
        assert!(html.contains(r#"<span class="chord">Db</span>"#));
        assert!(!html.contains("C#"));
    }

    #[test]
    fn test_legacy_never_infers_header() {
        let song = "Amazing Grace\nJohn Newton\nKey: G\n[G]Amazing";
        let options = RenderOptions {
            renderer: RendererKind::Legacy,
            ..RenderOptions::default()
        };
        assert!(options.infer_header);
        let html = render_with_options(song, &options);
        assert_eq!(html, render_legacy(song, 0));
        assert!(html.starts_with("<DIV class=\"lyrics\">Amazing&nbsp;Grace</DIV>\n"));
        assert!(!html.contains("<H1>"));
    }

    #[test]
    fn test_standalone_structured_page() {
        let options = RenderOptions {
            standalone: true,
            ..RenderOptions::default()
        };
        let page = render_with_options("{title: Hymn}", &options);
        assert!(page.starts_with("<!doctype html>"));
        assert!(page.contains("<title>Hymn</title>"));
    }
}
