//! # Directive Parser
//!
//! Classifies each physical line of a song and extracts `{name: value}`
//! directives.
//!
//! ## Recognition Rules (priority order)
//! 1. `{ name : value }` (colon and value optional, name is letters and `_`) → Directive
//! 2. `Verse 1:` (a bare word/phrase ending in a colon) → SectionLabel
//! 3. empty or whitespace-only → Blank
//! 4. anything else → ChordLyric
//!
//! ## Directive Names
//! Names are case-insensitive and most have a short alias (`{t: ...}`,
//! `{soc}`). The short form `c` is shared in the wild between `capo` and
//! `comment`; here it always means **comment**, for both renderers, and
//! `capo` is only recognized spelled out.

use crate::document::LineKind;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Directive names, with aliases folded together
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Title,
    Subtitle,
    Artist,
    Key,
    Capo,
    Comment,
    CommentItalic,
    CommentBox,
    StartOfChorus,
    EndOfChorus,
    StartOfBridge,
    EndOfBridge,
    StartOfTab,
    EndOfTab,
    /// Any other name, lowercased
    Unknown(String),
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "title" | "t" => DirectiveKind::Title,
            "subtitle" | "st" => DirectiveKind::Subtitle,
            "artist" | "a" => DirectiveKind::Artist,
            "key" | "k" => DirectiveKind::Key,
            "capo" => DirectiveKind::Capo,
            "comment" | "c" => DirectiveKind::Comment,
            "comment_italic" | "ci" => DirectiveKind::CommentItalic,
            "comment_box" | "cb" => DirectiveKind::CommentBox,
            "start_of_chorus" | "soc" => DirectiveKind::StartOfChorus,
            "end_of_chorus" | "eoc" => DirectiveKind::EndOfChorus,
            "start_of_bridge" | "sob" => DirectiveKind::StartOfBridge,
            "end_of_bridge" | "eob" => DirectiveKind::EndOfBridge,
            "start_of_tab" | "sot" => DirectiveKind::StartOfTab,
            "end_of_tab" | "eot" => DirectiveKind::EndOfTab,
            _ => DirectiveKind::Unknown(name),
        }
    }

    /// Canonical long name, used when synthesizing directive text
    pub fn canonical_name(&self) -> &str {
        match self {
            DirectiveKind::Title => "title",
            DirectiveKind::Subtitle => "subtitle",
            DirectiveKind::Artist => "artist",
            DirectiveKind::Key => "key",
            DirectiveKind::Capo => "capo",
            DirectiveKind::Comment => "comment",
            DirectiveKind::CommentItalic => "comment_italic",
            DirectiveKind::CommentBox => "comment_box",
            DirectiveKind::StartOfChorus => "start_of_chorus",
            DirectiveKind::EndOfChorus => "end_of_chorus",
            DirectiveKind::StartOfBridge => "start_of_bridge",
            DirectiveKind::EndOfBridge => "end_of_bridge",
            DirectiveKind::StartOfTab => "start_of_tab",
            DirectiveKind::EndOfTab => "end_of_tab",
            DirectiveKind::Unknown(name) => name.as_str(),
        }
    }
}

/// A `{name: value}` directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// The name as written, lowercased (`t`, `title`, `x_custom`)
    pub name: String,
    pub kind: DirectiveKind,
    /// Trimmed value; empty for value-less directives like `{soc}`
    pub value: String,
}

impl Directive {
    pub fn new(kind: DirectiveKind, value: impl Into<String>) -> Self {
        Self {
            name: kind.canonical_name().to_string(),
            kind,
            value: value.into(),
        }
    }

    /// Directive source text, e.g. `{title: Amazing Grace}`
    pub fn to_source(&self) -> String {
        if self.value.is_empty() {
            format!("{{{}}}", self.name)
        } else {
            format!("{{{}: {}}}", self.name, self.value)
        }
    }
}

fn directive_regex() -> &'static Regex {
    static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE_REGEX.get_or_init(|| {
        Regex::new(r"^\{\s*([A-Za-z_]+)\s*(?::\s*(.*?))?\s*\}\s*$").expect("Invalid directive regex")
    })
}

fn section_label_regex() -> &'static Regex {
    static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
    LABEL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9 ]+:\s*$").expect("Invalid section label regex")
    })
}

/// Parse a directive line
///
/// ```
/// use chordview_engine::{parse_directive, DirectiveKind};
///
/// let directive = parse_directive("{title: Amazing Grace}").unwrap();
/// assert_eq!(directive.name, "title");
/// assert_eq!(directive.kind, DirectiveKind::Title);
/// assert_eq!(directive.value, "Amazing Grace");
///
/// assert_eq!(parse_directive("{soc}").unwrap().kind, DirectiveKind::StartOfChorus);
/// assert!(parse_directive("[G]Amazing grace").is_none());
/// ```
pub fn parse_directive(line: &str) -> Option<Directive> {
    let caps = directive_regex().captures(line)?;
    let name = caps.get(1)?.as_str().to_ascii_lowercase();
    let value = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Directive {
        kind: DirectiveKind::from_name(&name),
        name,
        value: value.to_string(),
    })
}

/// Label text of an OnSong-style heading line (`Chorus:` → `Chorus`)
pub fn parse_section_label(line: &str) -> Option<String> {
    if !section_label_regex().is_match(line) {
        return None;
    }
    Some(line.trim_end().trim_end_matches(':').trim_end().to_string())
}

/// Classify one physical line
pub fn classify_line(line: &str) -> LineKind {
    let kind = if let Some(directive) = parse_directive(line) {
        LineKind::Directive(directive)
    } else if let Some(label) = parse_section_label(line) {
        LineKind::SectionLabel(label)
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::ChordLyric
    };
    log::trace!("{:?} => {:?}", line, kind);
    kind
}
