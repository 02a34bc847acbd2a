//! # Renderers
//!
//! Turn a parsed (and already transposed) song into an HTML fragment.
//!
//! ## Sub-modules
//! - `structured` - Renderer A: a title card plus inline chord spans over lyrics,
//!   with a stack of open chorus/bridge sections
//! - `legacy` - Renderer B: the Web Chord markup (two-row tables, uppercase tags,
//!   chorus/tab class bitmask), kept byte-compatible for embedding consumers
//!
//! Both walk the same [`ParsedDocument`](crate::document::ParsedDocument) and
//! find chords with the same scanner, so they always agree on what a chord is.
//! They never call each other.
//!
//! ## Example
//! ```rust
//! use chordview_engine::{parse_document, Renderer, RendererKind};
//!
//! let doc = parse_document("{title: Hymn}\n[G]Amazing [C]grace", false);
//! let html = RendererKind::Structured.renderer().render(&doc);
//! assert!(html.contains(r#"<h1 class="title">Hymn</h1>"#));
//!
//! let legacy = RendererKind::Legacy.renderer().render(&doc);
//! assert!(legacy.starts_with("<H1> Hymn</H1>"));
//! ```

pub mod legacy;
pub mod structured;

#[cfg(test)]
mod tests;

use crate::document::ParsedDocument;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub use legacy::{LegacyMode, LegacyRenderer};
pub use structured::StructuredRenderer;

/// A markup strategy over the shared line stream
pub trait Renderer {
    /// Render the song body as an embeddable fragment
    fn render(&self, doc: &ParsedDocument) -> String;

    /// Wrap a rendered fragment into a complete standalone HTML page
    fn page(&self, doc: &ParsedDocument, fragment: &str) -> String;
}

/// Which renderer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Structured,
    Legacy,
}

impl RendererKind {
    pub fn renderer(self) -> &'static dyn Renderer {
        match self {
            RendererKind::Structured => &StructuredRenderer,
            RendererKind::Legacy => &LegacyRenderer,
        }
    }

    /// Whether leading title/artist/key lines may be promoted to metadata
    ///
    /// Renderer B prints plain lines the way Web Chord does, so it never
    /// sees an inferred header.
    pub fn infers_header(self) -> bool {
        match self {
            RendererKind::Structured => true,
            RendererKind::Legacy => false,
        }
    }
}

impl FromStr for RendererKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(RendererKind::Structured),
            "legacy" | "webchord" => Ok(RendererKind::Legacy),
            _ => Err(EngineError::UnknownRenderer(s.to_string())),
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Structured => f.write_str("structured"),
            RendererKind::Legacy => f.write_str("legacy"),
        }
    }
}

/// Everything a render call depends on besides the song text
///
/// Deserializes with defaults for missing fields, so a YAML or JSON options
/// object only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Semitones to shift every chord by
    pub transpose: i32,
    /// Key that picks sharp/flat spelling until the song names its own
    pub key: Option<String>,
    pub renderer: RendererKind,
    /// Promote title/artist/key lines of directive-less songs, Renderer A only
    pub infer_header: bool,
    /// Emit a full HTML page instead of a fragment
    pub standalone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            transpose: 0,
            key: None,
            renderer: RendererKind::default(),
            infer_header: true,
            standalone: false,
        }
    }
}

/// Escape user text for HTML output
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod options_tests {
    use super::*;

    #[test]
    fn test_renderer_kind_from_str() {
        assert_eq!("structured".parse::<RendererKind>(), Ok(RendererKind::Structured));
        assert_eq!(" Legacy ".parse::<RendererKind>(), Ok(RendererKind::Legacy));
        assert_eq!("webchord".parse::<RendererKind>(), Ok(RendererKind::Legacy));
        assert_eq!(
            "fancy".parse::<RendererKind>(),
            Err(EngineError::UnknownRenderer("fancy".to_string()))
        );
    }

    #[test]
    fn test_options_defaults_from_partial_json() {
        let options: RenderOptions = serde_json::from_str(r#"{"transpose": -3, "renderer": "legacy"}"#).unwrap();
        assert_eq!(
            options,
            RenderOptions {
                transpose: -3,
                renderer: RendererKind::Legacy,
                ..RenderOptions::default()
            }
        );
        assert!(options.infer_header);
    }

    #[test]
    fn test_only_structured_infers_header() {
        assert!(RendererKind::Structured.infers_header());
        assert!(!RendererKind::Legacy.infers_header());
    }

    #[test]
    fn test_options_reject_unknown_fields() {
        assert!(serde_json::from_str::<RenderOptions>(r#"{"transpos": 2}"#).is_err());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }
}
