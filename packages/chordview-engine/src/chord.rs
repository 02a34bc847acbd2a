//! Chord symbol tokenizing
//!
//! Splits chord symbols (C, Am7, Bbsus4, D/F#, etc.) into a root pitch class
//! and a verbatim suffix, and finds the bracketed `[chord]` tokens in a line.
//! The bracket scanner here is the only place chords are recognized, so the
//! transposition engine and both renderers always agree on what is a chord.

use crate::error::EngineError;
use crate::pitch::{transpose_root, AccidentalPreference, PitchClass};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// A parsed chord symbol: root pitch plus everything after it
///
/// The suffix is opaque: "m7", "add9", "sus4" are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: PitchClass,
    /// How the root was written ("Db" is flat, "C#" and "C" are sharp)
    pub spelling: AccidentalPreference,
    pub suffix: String,
}

impl ChordSymbol {
    /// Shift the root, spelling it per `prefer`; the suffix is untouched
    pub fn transposed(&self, semitones: i32, prefer: AccidentalPreference) -> String {
        format!("{}{}", transpose_root(self.root, semitones, prefer), self.suffix)
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root.name(self.spelling), self.suffix)
    }
}

/// Parse a chord symbol into root and suffix
///
/// The root is a letter A-G optionally followed by one `#` or `b`. Roots
/// outside the 12-entry tables ("Fb", "E#") are rejected.
///
/// # Examples
/// ```
/// use chordview_engine::parse_chord;
///
/// let chord = parse_chord("Bbmaj7").unwrap();
/// assert_eq!(chord.root.index(), 10);
/// assert_eq!(chord.suffix, "maj7");
///
/// assert!(parse_chord("XYZ").is_err());
/// assert!(parse_chord("Fb").is_err());
/// ```
pub fn parse_chord(raw: &str) -> Result<ChordSymbol, EngineError> {
    let text = raw.trim();
    let unrecognized = || EngineError::UnrecognizedChord {
        text: raw.to_string(),
    };

    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, 'A'..='G')) => {}
        _ => return Err(unrecognized()),
    }
    // Root is the letter plus an optional accidental
    let root_len = match chars.next() {
        Some((_, '#')) | Some((_, 'b')) => 2,
        _ => 1,
    };
    let (root_name, suffix) = text.split_at(root_len);

    let root = PitchClass::from_name(root_name).ok_or_else(unrecognized)?;
    let spelling = if root_name.ends_with('b') && root_name != "B" {
        AccidentalPreference::Flat
    } else {
        AccidentalPreference::Sharp
    };

    Ok(ChordSymbol {
        root,
        spelling,
        suffix: suffix.to_string(),
    })
}

/// One side of a chord token: either a parsed symbol or text kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordPart<'a> {
    Parsed(ChordSymbol),
    Unparsed(&'a str),
}

impl<'a> ChordPart<'a> {
    pub fn parse(text: &'a str) -> Self {
        match parse_chord(text) {
            Ok(symbol) => ChordPart::Parsed(symbol),
            Err(e) => {
                log::debug!("{}, passing through", e);
                ChordPart::Unparsed(text)
            }
        }
    }

    pub fn transposed(&self, semitones: i32, prefer: AccidentalPreference) -> Cow<'a, str> {
        match self {
            ChordPart::Parsed(symbol) => Cow::Owned(symbol.transposed(semitones, prefer)),
            ChordPart::Unparsed(text) => Cow::Borrowed(*text),
        }
    }
}

/// The body of a `[...]` token, with slash chords split into chord and bass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordToken<'a> {
    Single(ChordPart<'a>),
    Slash {
        chord: ChordPart<'a>,
        bass: ChordPart<'a>,
    },
}

impl<'a> ChordToken<'a> {
    /// Split on the first `/`; each half is tokenized on its own
    pub fn parse(body: &'a str) -> Self {
        match body.split_once('/') {
            Some((chord, bass)) => ChordToken::Slash {
                chord: ChordPart::parse(chord),
                bass: ChordPart::parse(bass),
            },
            None => ChordToken::Single(ChordPart::parse(body)),
        }
    }

    pub fn transposed(&self, semitones: i32, prefer: AccidentalPreference) -> String {
        match self {
            ChordToken::Single(part) => part.transposed(semitones, prefer).into_owned(),
            ChordToken::Slash { chord, bass } => format!(
                "{}/{}",
                chord.transposed(semitones, prefer),
                bass.transposed(semitones, prefer)
            ),
        }
    }
}

/// A `[...]` token located in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordSpan<'a> {
    /// Byte offset of the opening `[`
    pub start: usize,
    /// Byte offset just past the closing `]`
    pub end: usize,
    /// Text between the brackets
    pub body: &'a str,
}

fn chord_regex() -> &'static Regex {
    static CHORD_REGEX: OnceLock<Regex> = OnceLock::new();
    CHORD_REGEX.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("Invalid chord regex"))
}

/// Every non-empty bracketed chord token in `line`, left to right
///
/// ```
/// use chordview_engine::chord_spans;
///
/// let bodies: Vec<&str> = chord_spans("[G]Amazing [C]grace []").map(|s| s.body).collect();
/// assert_eq!(bodies, vec!["G", "C"]);
/// ```
pub fn chord_spans(line: &str) -> impl Iterator<Item = ChordSpan<'_>> + '_ {
    chord_regex().captures_iter(line).filter_map(|caps| {
        let whole = caps.get(0)?;
        let body = caps.get(1)?;
        Some(ChordSpan {
            start: whole.start(),
            end: whole.end(),
            body: body.as_str(),
        })
    })
}
