//! Header inference for plain-text lead sheets
//!
//! Many song files are just lyrics with a title and artist on top and a
//! `Key: G` line somewhere below, without any ChordPro directive. When the
//! first non-blank lines of a song contain no `{...}` directive at all, this
//! pass promotes:
//!
//! - the first non-blank line to `{title: ...}`
//! - the second non-blank line to `{artist: ...}`
//! - the first `key: X` line among the next few non-blank lines to `{key: X}`
//!
//! Promoted lines leave the body; the synthetic directives go on top, in that
//! order. A title/artist candidate that holds chords, is a section heading or
//! is itself a key line stops the title/artist inference.

use crate::chord::chord_spans;
use crate::directive::{parse_section_label, Directive, DirectiveKind};
use regex::Regex;
use std::sync::OnceLock;

/// Non-blank lines checked for an existing directive
const HEADER_SCAN_LINES: usize = 5;

/// Non-blank lines after the title/artist searched for a key line
const KEY_SCAN_LINES: usize = 8;

/// Synthetic directives and the source lines they replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredHeader {
    pub directives: Vec<Directive>,
    /// 0-based indices into the source lines
    pub consumed: Vec<usize>,
}

fn key_line_regex() -> &'static Regex {
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    KEY_REGEX.get_or_init(|| Regex::new(r"(?i)^\s*key\s*:\s*(\S.*?)\s*$").expect("Invalid key line regex"))
}

/// Key name from a `Key: G` line, brackets removed (`Key: [G]` → `G`)
pub fn parse_key_line(line: &str) -> Option<String> {
    let value = key_line_regex().captures(line)?.get(1)?.as_str();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .map_or(value, str::trim);
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn looks_like_directive(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('{') && line.ends_with('}')
}

fn is_header_text(line: &str) -> bool {
    parse_key_line(line).is_none()
        && chord_spans(line).next().is_none()
        && parse_section_label(line).is_none()
}

/// Infer title/artist/key directives for a song without a directive header
///
/// Returns `None` when the song already has directives near the top or when
/// nothing could be inferred.
///
/// ```
/// use chordview_engine::normalize::infer_header;
///
/// let lines = ["Amazing Grace", "John Newton", "", "Key: G", "[G]Amazing grace"];
/// let header = infer_header(&lines).unwrap();
/// assert_eq!(header.consumed, vec![0, 1, 3]);
/// assert_eq!(header.directives[2].value, "G");
/// ```
pub fn infer_header(lines: &[&str]) -> Option<InferredHeader> {
    let non_blank: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i, *line))
        .collect();

    if non_blank
        .iter()
        .take(HEADER_SCAN_LINES)
        .any(|(_, line)| looks_like_directive(line))
    {
        return None;
    }

    let mut directives = Vec::new();
    let mut consumed = Vec::new();
    let mut next = 0;

    for kind in [DirectiveKind::Title, DirectiveKind::Artist] {
        match non_blank.get(next) {
            Some(&(i, line)) if is_header_text(line) => {
                directives.push(Directive::new(kind, line.trim()));
                consumed.push(i);
                next += 1;
            }
            _ => break,
        }
    }

    let key = non_blank
        .iter()
        .skip(next)
        .take(KEY_SCAN_LINES)
        .find_map(|&(i, line)| parse_key_line(line).map(|key| (i, key)));
    if let Some((i, key)) = key {
        directives.push(Directive::new(DirectiveKind::Key, key));
        consumed.push(i);
    }

    if directives.is_empty() {
        None
    } else {
        Some(InferredHeader { directives, consumed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(header: &InferredHeader) -> Vec<(&str, &str)> {
        header
            .directives
            .iter()
            .map(|d| (d.name.as_str(), d.value.as_str()))
            .collect()
    }

    #[test]
    fn test_title_artist_key() {
        let lines = ["", "  Amazing Grace ", "John Newton", "Verse 1:", "key: g", "[G]Amazing"];
        let header = infer_header(&lines).unwrap();
        assert_eq!(
            values(&header),
            vec![("title", "Amazing Grace"), ("artist", "John Newton"), ("key", "g")]
        );
        assert_eq!(header.consumed, vec![1, 2, 4]);
    }

    #[test]
    fn test_existing_directive_disables_inference() {
        let lines = ["Some text", "{title: Real Title}", "Key: G"];
        assert_eq!(infer_header(&lines), None);
    }

    #[test]
    fn test_directive_past_scan_window_does_not_count() {
        let lines = ["Title", "Artist", "a", "b", "c", "{comment: late}"];
        let header = infer_header(&lines).unwrap();
        assert_eq!(values(&header), vec![("title", "Title"), ("artist", "Artist")]);
    }

    #[test]
    fn test_bracketed_key() {
        assert_eq!(parse_key_line("Key: [G]"), Some("G".to_string()));
        assert_eq!(parse_key_line("KEY:Bb"), Some("Bb".to_string()));
        assert_eq!(parse_key_line("Key:"), None);
        assert_eq!(parse_key_line("Key: []"), None);
        assert_eq!(parse_key_line("Monkey: G"), None);
    }

    #[test]
    fn test_chord_line_is_not_a_title() {
        let lines = ["[G]Amazing grace, how [C]sweet", "the sound", "Key: G"];
        let header = infer_header(&lines).unwrap();
        assert_eq!(values(&header), vec![("key", "G")]);
        assert_eq!(header.consumed, vec![2]);
    }

    #[test]
    fn test_key_as_second_line_is_key_not_artist() {
        let lines = ["Amazing Grace", "Key: G", "[G]Amazing"];
        let header = infer_header(&lines).unwrap();
        assert_eq!(values(&header), vec![("title", "Amazing Grace"), ("key", "G")]);
    }

    #[test]
    fn test_key_beyond_window_is_ignored() {
        let mut lines = vec!["Title", "Artist"];
        lines.extend(std::iter::repeat("la la").take(KEY_SCAN_LINES));
        lines.push("Key: D");
        let header = infer_header(&lines).unwrap();
        assert_eq!(values(&header), vec![("title", "Title"), ("artist", "Artist")]);
    }

    #[test]
    fn test_nothing_to_infer() {
        assert_eq!(infer_header(&[]), None);
        assert_eq!(infer_header(&["", "   "]), None);
        assert_eq!(infer_header(&["Chorus:", "[G]la"]), None);
    }
}
