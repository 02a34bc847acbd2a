//! Renderer A: title card plus chord-over-lyrics lines
//!
//! Section state is a stack of open chorus/bridge blocks. An `end_of_*` with
//! nothing open is ignored and blocks still open at the end of the song are
//! closed when the fragment is assembled.

use super::{escape, Renderer};
use crate::chord::chord_spans;
use crate::directive::{Directive, DirectiveKind};
use crate::document::{LineKind, Metadata, ParsedDocument};

const DEFAULT_TITLE: &str = "Untitled";
const META_SEPARATOR: &str = " · ";

const STYLESHEET: &str = r#"
h1.title { margin: 0 0 6px 0; font-size: 28px; letter-spacing: .5px; }
.subtitle { color: #64748b; margin-bottom: 8px; }
.meta { color: #64748b; margin-bottom: 18px; font-size: 14px; }
.song-body { white-space: pre-wrap; font-family: ui-monospace, Menlo, Consolas, "Courier New", monospace; font-size: 18px; line-height: 1.9; }
.line { position: relative; }
.chord { position: relative; top: -1.15em; font-weight: 700; padding: 0 2px; }
.comment { color: #7c3aed; margin: 6px 0; font-style: italic; }
.section { border-left: 3px solid #0ea5e9; padding-left: 10px; margin: 10px 0; border-radius: 6px; }
.section.bridge { border-color: #8b5cf6; }
.section-label { margin: 14px 0 6px; font-weight: 700; color: #0284c7; text-transform: uppercase; font-size: 12px; letter-spacing: .08em; }
.spacer { height: 12px; }
"#;

/// An open block in the song body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Chorus,
    Bridge,
}

impl Section {
    fn class(self) -> &'static str {
        match self {
            Section::Chorus => "chorus",
            Section::Bridge => "bridge",
        }
    }
}

/// Renderer A
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredRenderer;

/// State carried while walking the lines of one song
#[derive(Debug, Default)]
struct SongState {
    sections: Vec<Section>,
    metadata: Metadata,
    body: String,
}

impl SongState {
    fn directive(&mut self, directive: &Directive) {
        if self.metadata.apply(directive) {
            return;
        }
        match directive.kind {
            DirectiveKind::Comment => {
                self.body.push_str(&format!(
                    r#"<div class="comment">{}</div>"#,
                    escape(&directive.value)
                ));
            }
            DirectiveKind::StartOfChorus => self.open(Section::Chorus),
            DirectiveKind::StartOfBridge => self.open(Section::Bridge),
            DirectiveKind::EndOfChorus | DirectiveKind::EndOfBridge => {
                if self.sections.pop().is_some() {
                    self.body.push_str("</div>");
                } else {
                    log::debug!("{{{}}} with no open section, ignored", directive.name);
                }
            }
            _ => log::debug!("directive '{}' not supported, dropped", directive.name),
        }
    }

    fn open(&mut self, section: Section) {
        self.body
            .push_str(&format!(r#"<div class="section {}">"#, section.class()));
        self.sections.push(section);
    }

    fn chord_line(&mut self, text: &str) {
        self.body.push_str(r#"<div class="line">"#);
        let mut pos = 0;
        for span in chord_spans(text) {
            self.body.push_str(&escape(&text[pos..span.start]));
            self.body.push_str(r#"<span class="chord">"#);
            self.body.push_str(&escape(span.body));
            self.body.push_str("</span>");
            // Keep adjacent chords from running together
            if text[span.end..].chars().next().map_or(true, char::is_whitespace) {
                self.body.push_str("&nbsp;");
            }
            pos = span.end;
        }
        self.body.push_str(&escape(&text[pos..]));
        self.body.push_str("</div>");
    }

    fn finish(mut self) -> String {
        for _ in self.sections.drain(..) {
            self.body.push_str("</div>");
        }

        let metadata = &self.metadata;
        let title = metadata.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let mut html = String::from("<div class=\"song\">\n");
        html.push_str(&format!("<h1 class=\"title\">{}</h1>\n", escape(title)));
        if let Some(subtitle) = &metadata.subtitle {
            html.push_str(&format!("<div class=\"subtitle\">{}</div>\n", escape(subtitle)));
        }
        let meta = meta_line(metadata);
        if !meta.is_empty() {
            html.push_str(&format!("<div class=\"meta\">{}</div>\n", meta));
        }
        html.push_str(&format!("<div class=\"song-body\">{}</div>\n", self.body));
        html.push_str("</div>\n");
        html
    }
}

/// "Artist: X · Key: Y · Capo: Z", escaped, only fields that are present
fn meta_line(metadata: &Metadata) -> String {
    [
        ("Artist", &metadata.artist),
        ("Key", &metadata.key),
        ("Capo", &metadata.capo),
    ]
    .iter()
    .filter_map(|(label, value)| {
        value
            .as_deref()
            .map(|value| format!("{}: {}", label, escape(value)))
    })
    .collect::<Vec<_>>()
    .join(META_SEPARATOR)
}

impl Renderer for StructuredRenderer {
    fn render(&self, doc: &ParsedDocument) -> String {
        let mut state = SongState::default();
        for line in &doc.lines {
            match &line.kind {
                LineKind::Directive(directive) => state.directive(directive),
                LineKind::SectionLabel(label) => state.body.push_str(&format!(
                    r#"<div class="section-label">{}</div>"#,
                    escape(label)
                )),
                LineKind::Blank => state.body.push_str(r#"<div class="spacer"></div>"#),
                LineKind::ChordLyric => state.chord_line(&line.text),
            }
        }
        state.finish()
    }

    fn page(&self, doc: &ParsedDocument, fragment: &str) -> String {
        let title = doc.metadata().title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape(&title),
            STYLESHEET,
            fragment
        )
    }
}
