//! # Pitch Model
//!
//! Twelve-tone pitch classes with their canonical sharp and flat spellings,
//! and the key → accidental preference lookup used when re-spelling
//! transposed chords.
//!
//! ```text
//! index:  0  1   2  3   4  5  6   7  8   9  10  11
//! sharp:  C  C#  D  D#  E  F  F#  G  G#  A  A#  B
//! flat:   C  Db  D  Eb  E  F  Gb  G  Ab  A  Bb  B
//! ```

use serde::Serialize;
use std::fmt;

pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Keys with a known accidental preference. Anything else spells with sharps.
const KEY_PREFERENCES: &[(&str, AccidentalPreference)] = &[
    ("F", AccidentalPreference::Flat),
    ("Bb", AccidentalPreference::Flat),
    ("Eb", AccidentalPreference::Flat),
    ("Ab", AccidentalPreference::Flat),
    ("Db", AccidentalPreference::Flat),
    ("Gb", AccidentalPreference::Flat),
    ("C", AccidentalPreference::Sharp),
    ("G", AccidentalPreference::Sharp),
    ("D", AccidentalPreference::Sharp),
    ("A", AccidentalPreference::Sharp),
    ("E", AccidentalPreference::Sharp),
    ("B", AccidentalPreference::Sharp),
    ("F#", AccidentalPreference::Sharp),
    ("C#", AccidentalPreference::Sharp),
];

/// Whether re-spelled pitches use sharp or flat names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalPreference {
    #[default]
    Sharp,
    Flat,
}

impl AccidentalPreference {
    /// Look up the preference for a key name like "Bb" or "G".
    ///
    /// Exact match after trimming; minor keys, unlisted enharmonics and empty
    /// input all fall back to sharps.
    ///
    /// ```
    /// use chordview_engine::AccidentalPreference;
    ///
    /// assert_eq!(AccidentalPreference::for_key("F"), AccidentalPreference::Flat);
    /// assert_eq!(AccidentalPreference::for_key("G"), AccidentalPreference::Sharp);
    /// assert_eq!(AccidentalPreference::for_key("Dm"), AccidentalPreference::Sharp);
    /// ```
    pub fn for_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_default()
    }

    /// The preference for a key listed in the key table, `None` otherwise
    ///
    /// ```
    /// use chordview_engine::AccidentalPreference;
    ///
    /// assert_eq!(AccidentalPreference::lookup(" Eb "), Some(AccidentalPreference::Flat));
    /// assert_eq!(AccidentalPreference::lookup("Dm"), None);
    /// ```
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        KEY_PREFERENCES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, preference)| *preference)
    }

    fn names(self) -> &'static [&'static str; 12] {
        match self {
            AccidentalPreference::Sharp => &SHARP_NAMES,
            AccidentalPreference::Flat => &FLAT_NAMES,
        }
    }

    fn other(self) -> Self {
        match self {
            AccidentalPreference::Sharp => AccidentalPreference::Flat,
            AccidentalPreference::Flat => AccidentalPreference::Sharp,
        }
    }
}

/// One of the 12 semitone positions, 0 = C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Any integer semitone count, wrapped into 0..12
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Find a spelling in the sharp or flat table.
    ///
    /// A root containing a literal `b` (other than the natural "B") is looked
    /// up in the flat table first, everything else in the sharp table first;
    /// the other table is the fallback.
    pub fn from_name(name: &str) -> Option<Self> {
        let first = if name.contains('b') && name != "B" {
            AccidentalPreference::Flat
        } else {
            AccidentalPreference::Sharp
        };
        [first, first.other()].into_iter().find_map(|preference| {
            preference
                .names()
                .iter()
                .position(|n| *n == name)
                .map(|i| PitchClass(i as u8))
        })
    }

    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(i32::from(self.0) + semitones.rem_euclid(12))
    }

    pub fn name(self, preference: AccidentalPreference) -> &'static str {
        preference.names()[usize::from(self.0)]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(AccidentalPreference::Sharp))
    }
}

/// A pitch class together with the accidental style it is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpelledPitch {
    pub pitch: PitchClass,
    pub preference: AccidentalPreference,
}

impl SpelledPitch {
    pub fn name(self) -> &'static str {
        self.pitch.name(self.preference)
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shift a root by any number of semitones and spell it per `prefer`
pub fn transpose_root(
    root: PitchClass,
    semitones: i32,
    prefer: AccidentalPreference,
) -> SpelledPitch {
    SpelledPitch {
        pitch: root.transpose(semitones),
        preference: prefer,
    }
}
