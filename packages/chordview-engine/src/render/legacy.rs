//! Renderer B: Web Chord compatible markup
//!
//! Output matches what embedding pages styled for the old Web Chord CGI
//! expect: uppercase tags, one `<TABLE>` per chord line with the chord row
//! above the lyric row, and CSS classes picked by a chorus/tab bitmask.

use super::{escape, Renderer};
use crate::chord::chord_spans;
use crate::directive::{Directive, DirectiveKind};
use crate::document::{ClassifiedLine, LineKind, ParsedDocument};

const DEFAULT_TITLE: &str = "ChordPro song";

/// Lyric cell classes, indexed by [`LegacyMode::index`]
pub const LYRIC_CLASSES: [&str; 4] = ["lyrics", "lyrics_chorus", "lyrics_tab", "lyrics_chorus_tab"];

/// Chord cell classes, indexed by [`LegacyMode::index`]
pub const CHORD_CLASSES: [&str; 4] = ["chords", "chords_chorus", "chords_tab", "chords_chorus_tab"];

const STYLESHEET: &str = "<STYLE TYPE=\"text/css\"><!--\n\
H1 {\n\
font-family: \"Arial\", Helvetica;\n\
font-size: 24pt;\n\
}\n\
H2 {\n\
font-family: \"Arial\", Helvetica;\n\
font-size: 16pt;\n\
}\n\
.lyrics, .lyrics_chorus { font-size: 12pt; }\n\
.lyrics_tab, .lyrics_chorus_tab { font-family: \"Courier New\", Courier; font-size: 10pt; }\n\
.lyrics_chorus, .lyrics_chorus_tab, .chords_chorus, .chords_chorus_tab { font-weight: bold; }\n\
.chords, .chords_chorus, .chords_tab, .chords_chorus_tab { font-size: 10pt; color: blue; padding-right: 4pt;}\n\
.comment, .comment_italic, .comment_box { background-color: #ffbbaa; }\n\
.comment_italic { font-style: italic; }\n\
.comment_box { border: solid; }\n\
--></STYLE>\n";

/// Chorus/tab state as a two-bit mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyMode(u8);

impl LegacyMode {
    pub const CHORUS: u8 = 1;
    pub const TAB: u8 = 2;

    pub fn set(&mut self, bit: u8) {
        self.0 |= bit;
    }

    pub fn clear(&mut self, bit: u8) {
        self.0 &= !bit;
    }

    pub fn is_set(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// Index into [`LYRIC_CLASSES`] and [`CHORD_CLASSES`]
    pub fn index(self) -> usize {
        usize::from(self.0 & (Self::CHORUS | Self::TAB))
    }

    pub fn lyric_class(self) -> &'static str {
        LYRIC_CLASSES[self.index()]
    }

    pub fn chord_class(self) -> &'static str {
        CHORD_CLASSES[self.index()]
    }
}

/// Renderer B
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyRenderer;

fn cell(text: &str) -> String {
    escape(text).replace(' ', "&nbsp;")
}

/// Text between the braces of a command line
fn command_body(text: &str) -> &str {
    let text = text.trim_end();
    text.strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(text)
}

fn unsupported(text: &str) -> String {
    format!("<!--Unsupported command: {}-->\n", escape(command_body(text)))
}

/// Markup for a directive line, updating `mode` for chorus/tab markers
///
/// Values are printed as written after the first `:`, surrounding spaces
/// included.
fn render_directive(directive: &Directive, text: &str, mode: &mut LegacyMode) -> String {
    let raw = command_body(text)
        .split_once(':')
        .map_or(directive.value.as_str(), |(_, value)| value);
    let value = escape(raw);
    match directive.kind {
        DirectiveKind::Title => format!("<H1>{}</H1>\n", value),
        DirectiveKind::Artist | DirectiveKind::Subtitle => format!("<H2>{}</H2>\n", value),
        DirectiveKind::Comment => format!("<P class=\"comment\">{}</P>\n", value),
        DirectiveKind::CommentItalic => format!("<P class=\"comment_italic\">{}</P>\n", value),
        DirectiveKind::CommentBox => format!("<P class=\"comment_box\">{}</P>\n", value),
        DirectiveKind::StartOfChorus => {
            mode.set(LegacyMode::CHORUS);
            String::new()
        }
        DirectiveKind::EndOfChorus => {
            mode.clear(LegacyMode::CHORUS);
            String::new()
        }
        DirectiveKind::StartOfTab => {
            mode.set(LegacyMode::TAB);
            String::new()
        }
        DirectiveKind::EndOfTab => {
            mode.clear(LegacyMode::TAB);
            String::new()
        }
        _ => unsupported(text),
    }
}

/// Split a line into a chord row and a lyric row
///
/// The chord row starts with an empty cell so that chord `i` sits above
/// lyric cell `i + 1`.
pub fn render_line(text: &str, mode: LegacyMode) -> String {
    let mut chords = vec![""];
    let mut lyrics = Vec::new();
    let mut pos = 0;
    for span in chord_spans(text) {
        lyrics.push(&text[pos..span.start]);
        chords.push(span.body);
        pos = span.end;
    }
    lyrics.push(&text[pos..]);

    if chords.len() == 1 {
        if text.is_empty() {
            return "<BR>\n".to_string();
        }
        return format!("<DIV class=\"{}\">{}</DIV>\n", mode.lyric_class(), cell(text));
    }

    let mut out = String::from("<TABLE cellpadding=\"0\" cellspacing=\"0\"><TR>");
    for chord in &chords {
        out.push_str(&format!("<TD class=\"{}\">{}</TD>", mode.chord_class(), cell(chord)));
    }
    out.push_str("</TR><TR>");
    for lyric in &lyrics {
        out.push_str(&format!("<TD class=\"{}\">{}</TD>", mode.lyric_class(), cell(lyric)));
    }
    out.push_str("</TR></TABLE>\n");
    out
}

fn render_classified(line: &ClassifiedLine, mode: &mut LegacyMode) -> String {
    if let Some(rest) = line.text.strip_prefix('#') {
        return format!("<!--{}-->\n", escape(rest));
    }
    match &line.kind {
        LineKind::Directive(directive) => render_directive(directive, &line.text, mode),
        LineKind::ChordLyric if line.text.starts_with('{') && line.text.trim_end().ends_with('}') => {
            unsupported(&line.text)
        }
        _ => render_line(&line.text, *mode),
    }
}

/// Wrap a rendered body in the Web Chord page
pub fn standalone_page(doc: &ParsedDocument, body: &str) -> String {
    let title = doc
        .directives()
        .find(|d| d.kind == DirectiveKind::Title)
        .map_or(DEFAULT_TITLE, |d| d.value.as_str());
    format!(
        "<HTML><HEAD><TITLE>{}</TITLE>{}</HEAD><BODY>\n<!--\nConverted from ChordPro format with Web Chord\n-->\n{}</BODY></HTML>",
        escape(title),
        STYLESHEET,
        body
    )
}

impl Renderer for LegacyRenderer {
    fn render(&self, doc: &ParsedDocument) -> String {
        let mut mode = LegacyMode::default();
        doc.lines
            .iter()
            .map(|line| render_classified(line, &mut mode))
            .collect()
    }

    fn page(&self, doc: &ParsedDocument, fragment: &str) -> String {
        standalone_page(doc, fragment)
    }
}
