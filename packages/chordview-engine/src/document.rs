//! # Document Types
//!
//! A song is parsed into an ordered list of classified lines. Nothing is
//! nested at this stage: sections, metadata and chord positions are all
//! interpreted by the renderers as they walk the list.
//!
//! ```text
//! ParsedDocument
//!   └── Vec<ClassifiedLine>
//!         ├── number: Option<usize>   (1-based source line, None if synthesized)
//!         ├── text: String            (the line as rendered, after transposition)
//!         └── kind: LineKind
//!               ├── Directive(Directive { name, kind, value })
//!               ├── SectionLabel(String)
//!               ├── Blank
//!               └── ChordLyric
//! ```
//!
//! Metadata is positional: [`ParsedDocument::metadata`] folds every
//! directive in order, so later directives win.

use crate::directive::{classify_line, Directive, DirectiveKind};
use crate::normalize::infer_header;
use serde::Serialize;

/// What a single line of a song is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LineKind {
    Directive(Directive),
    /// OnSong-style heading such as `Verse 1:`, without the colon
    SectionLabel(String),
    Blank,
    ChordLyric,
}

/// A line together with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub number: Option<usize>,
    pub text: String,
    pub kind: LineKind,
}

impl ClassifiedLine {
    pub fn new(number: usize, text: &str) -> Self {
        Self {
            number: Some(number),
            text: text.to_string(),
            kind: classify_line(text),
        }
    }

    /// A directive line that does not exist in the source
    pub fn synthetic(directive: Directive) -> Self {
        Self {
            number: None,
            text: directive.to_source(),
            kind: LineKind::Directive(directive),
        }
    }

    pub fn directive(&self) -> Option<&Directive> {
        match &self.kind {
            LineKind::Directive(directive) => Some(directive),
            _ => None,
        }
    }
}

/// Song metadata collected from directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capo: Option<String>,
}

impl Metadata {
    /// Record a metadata directive. Returns false for directives that are
    /// not metadata (sections, comments, unknown names).
    pub fn apply(&mut self, directive: &Directive) -> bool {
        let slot = match directive.kind {
            DirectiveKind::Title => &mut self.title,
            DirectiveKind::Subtitle => &mut self.subtitle,
            DirectiveKind::Artist => &mut self.artist,
            DirectiveKind::Key => &mut self.key,
            DirectiveKind::Capo => &mut self.capo,
            _ => return false,
        };
        *slot = Some(directive.value.clone());
        true
    }
}

/// A song split into classified lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub lines: Vec<ClassifiedLine>,
}

impl ParsedDocument {
    /// Metadata as of the end of the document
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::default();
        for directive in self.lines.iter().filter_map(ClassifiedLine::directive) {
            metadata.apply(directive);
        }
        metadata
    }

    /// Directives in document order
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.lines.iter().filter_map(ClassifiedLine::directive)
    }
}

/// Split a song into classified lines
///
/// With `infer_header` set, plain-text lead sheets that start without any
/// `{...}` directive get synthetic title/artist/key directives at the top
/// (see [`crate::normalize`]).
///
/// ```
/// use chordview_engine::{parse_document, LineKind};
///
/// let doc = parse_document("{title: Amazing Grace}\nVerse:\n[G]Amazing grace\n", false);
/// assert_eq!(doc.lines.len(), 3);
/// assert_eq!(doc.lines[1].kind, LineKind::SectionLabel("Verse".to_string()));
/// assert_eq!(doc.metadata().title.as_deref(), Some("Amazing Grace"));
/// ```
pub fn parse_document(text: &str, infer_header_lines: bool) -> ParsedDocument {
    let raw: Vec<&str> = text.lines().collect();

    let header = if infer_header_lines {
        infer_header(&raw)
    } else {
        None
    };

    let mut lines = Vec::with_capacity(raw.len() + 3);
    let mut consumed: &[usize] = &[];
    if let Some(header) = &header {
        log::debug!("inferred header: {:?}", header.directives);
        lines.extend(header.directives.iter().cloned().map(ClassifiedLine::synthetic));
        consumed = header.consumed.as_slice();
    }

    lines.extend(
        raw.iter()
            .enumerate()
            .filter(|(i, _)| !consumed.contains(i))
            .map(|(i, line)| ClassifiedLine::new(i + 1, line)),
    );

    ParsedDocument { lines }
}
