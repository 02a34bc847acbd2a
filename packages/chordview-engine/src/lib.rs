//! ChordPro/OnSong rendering engine
//!
//! Songs go through a single pass: optional header inference, line
//! classification, chord transposition, then one of two renderers.
//! See [`api`] for the entry points.

pub mod api;
pub mod chord;
pub mod directive;
pub mod document;
pub mod error;
pub mod normalize;
pub mod pitch;
pub mod render;
pub mod transpose;

pub use api::{is_song_file, parse_transpose, render, render_bytes, render_legacy, render_with_options, SONG_EXTENSIONS};
pub use chord::{chord_spans, parse_chord, ChordPart, ChordSpan, ChordSymbol, ChordToken};
pub use directive::{classify_line, parse_directive, Directive, DirectiveKind};
pub use document::{parse_document, ClassifiedLine, LineKind, Metadata, ParsedDocument};
pub use error::*;
pub use pitch::{transpose_root, AccidentalPreference, PitchClass, SpelledPitch};
pub use render::{LegacyRenderer, RenderOptions, Renderer, RendererKind, StructuredRenderer};
pub use transpose::{transpose_chord, transpose_document, transpose_line};
