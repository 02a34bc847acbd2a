use crate::chord::{chord_spans, ChordPart, ChordToken};
use crate::directive::DirectiveKind;
use crate::document::{LineKind, ParsedDocument};
use crate::pitch::AccidentalPreference;
use std::borrow::Cow;

/// Key assumed when neither the caller nor the song names one
const DEFAULT_KEY: &str = "C";

/// Transpose a single chord symbol, leaving unparsable text untouched
///
/// ```
/// use chordview_engine::{transpose_chord, AccidentalPreference};
///
/// assert_eq!(transpose_chord("Am7", 3, AccidentalPreference::Sharp), "Cm7");
/// assert_eq!(transpose_chord("C", 1, AccidentalPreference::Flat), "Db");
/// assert_eq!(transpose_chord("N.C.", 5, AccidentalPreference::Sharp), "N.C.");
/// ```
pub fn transpose_chord(text: &str, semitones: i32, prefer: AccidentalPreference) -> String {
    ChordPart::parse(text)
        .transposed(semitones, prefer)
        .into_owned()
}

/// Rewrite every `[chord]` token in a line, keeping all other text as is
///
/// Slash chords are transposed on both sides. A zero offset returns the
/// line unchanged, byte for byte.
///
/// ```
/// use chordview_engine::{transpose_line, AccidentalPreference};
///
/// let line = "[D/F#]Amazing [XYZ]grace";
/// assert_eq!(transpose_line(line, 2, AccidentalPreference::Sharp), "[E/G#]Amazing [XYZ]grace");
/// assert_eq!(transpose_line(line, 0, AccidentalPreference::Flat), line);
/// ```
pub fn transpose_line(line: &str, semitones: i32, prefer: AccidentalPreference) -> Cow<'_, str> {
    if semitones == 0 {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut pos = 0;
    for span in chord_spans(line) {
        out.push_str(&line[pos..span.start]);
        out.push('[');
        out.push_str(&ChordToken::parse(span.body).transposed(semitones, prefer));
        out.push(']');
        pos = span.end;
    }
    if pos == 0 {
        return Cow::Borrowed(line);
    }
    out.push_str(&line[pos..]);
    Cow::Owned(out)
}

/// Transpose every chord/lyric line of a parsed document in place
///
/// The accidental preference starts from `key_override` (or C) and follows
/// each `{key: ...}` directive from the point it appears; earlier lines keep
/// the spelling that was in effect when they were reached. A key missing from
/// the key table (`Dm`, `A#`) leaves the current spelling in place.
pub fn transpose_document(doc: &mut ParsedDocument, semitones: i32, key_override: Option<&str>) {
    if semitones == 0 {
        return;
    }

    let mut prefer = AccidentalPreference::for_key(key_override.unwrap_or(DEFAULT_KEY));
    for line in &mut doc.lines {
        match &line.kind {
            LineKind::Directive(directive) if directive.kind == DirectiveKind::Key => {
                match AccidentalPreference::lookup(&directive.value) {
                    Some(preference) => {
                        prefer = preference;
                        log::trace!("key '{}' switches spelling to {:?}", directive.value, prefer);
                    }
                    None => log::trace!("key '{}' not in key table, keeping {:?}", directive.value, prefer),
                }
            }
            LineKind::ChordLyric => {
                if let Cow::Owned(text) = transpose_line(&line.text, semitones, prefer) {
                    line.text = text;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    #[test]
    fn test_transpose_line_spec_examples() {
        assert_eq!(transpose_line("[D/F#]", 2, AccidentalPreference::Sharp), "[E/G#]");
        for semitones in [-13, -1, 1, 7, 12] {
            assert_eq!(transpose_line("[XYZ]", semitones, AccidentalPreference::Flat), "[XYZ]");
        }
    }

    #[test]
    fn test_zero_offset_is_identity() {
        for line in ["", "plain words", "[Db] [ G ]x[]", "[C#m7/G#] tail", "ünïcödé [Ab]"] {
            for prefer in [AccidentalPreference::Sharp, AccidentalPreference::Flat] {
                let out = transpose_line(line, 0, prefer);
                assert!(matches!(out, Cow::Borrowed(_)));
                assert_eq!(out, line);
                assert_eq!(transpose_line(&out, 0, prefer), line);
            }
        }
    }

    #[test]
    fn test_round_trip_up_to_spelling() {
        let line = "[G]Amazing [C]grace, how [G/B]sweet the [D7]sound [Bbmaj7]";
        for semitones in [-11, -5, 1, 3, 6, 14] {
            let up = transpose_line(line, semitones, AccidentalPreference::Sharp);
            let back = transpose_line(&up, -semitones, AccidentalPreference::Sharp);
            assert_eq!(back, "[G]Amazing [C]grace, how [G/B]sweet the [D7]sound [A#maj7]");
        }
    }

    #[test]
    fn test_suffix_preserved_and_text_untouched() {
        assert_eq!(
            transpose_line("Oh [Asus4]my [Em7b5] (x2) [add9]", 1, AccidentalPreference::Flat),
            "Oh [Bbsus4]my [Fm7b5] (x2) [add9]"
        );
    }

    #[test]
    fn test_line_without_chords_is_borrowed() {
        assert!(matches!(
            transpose_line("no chords here", 4, AccidentalPreference::Sharp),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_document_follows_key_directives() {
        let mut doc = parse_document("[C]one\n{key: F}\n[C]two\n{key: Dm}\n[C]three", false);
        transpose_document(&mut doc, 1, None);
        let texts: Vec<&str> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["[C#]one", "{key: F}", "[Db]two", "{key: Dm}", "[Db]three"]);
    }

    #[test]
    fn test_unlisted_key_keeps_current_spelling() {
        let mut doc = parse_document("{key: F}
{key: A#}
[C]la
{key: E}
{key: Gm}
[C]la", false);
        transpose_document(&mut doc, 1, None);
        assert_eq!(doc.lines[2].text, "[Db]la");
        assert_eq!(doc.lines[5].text, "[C#]la");

        let mut doc = parse_document("{key: Dm}
[C]la", false);
        transpose_document(&mut doc, 1, Some("Bb"));
        assert_eq!(doc.lines[1].text, "[Db]la");
    }

    #[test]
    fn test_document_key_override_sets_initial_spelling() {
        let mut doc = parse_document("[A]la", false);
        transpose_document(&mut doc, 1, Some("Eb"));
        assert_eq!(doc.lines[0].text, "[Bb]la");
    }

    #[test]
    fn test_document_leaves_labels_and_directives_alone() {
        let mut doc = parse_document("{title: [C] in title}\nVerse 1:\n[C]la", false);
        transpose_document(&mut doc, 2, None);
        assert_eq!(doc.lines[0].text, "{title: [C] in title}");
        assert_eq!(doc.lines[1].text, "Verse 1:");
        assert_eq!(doc.lines[2].text, "[D]la");
    }
}
