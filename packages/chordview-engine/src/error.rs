//! # Error Types
//!
//! This module defines the error type for the chordview engine.
//!
//! Rendering itself never fails: every malformed input degrades to best-effort
//! output. These errors exist at the edges, where a caller asks for something
//! specific and deserves to know it was not understood.
//!
//! ## Error Types
//! - `UnrecognizedChord` - A chord body whose root is not one of the 12 known spellings
//! - `UnknownRenderer` - A renderer name that is neither `structured` nor `legacy`
//!
//! ## Usage
//! ```rust
//! use chordview_engine::{parse_chord, EngineError};
//!
//! match parse_chord("H7") {
//!     Ok(chord) => println!("root {}", chord.root),
//!     Err(EngineError::UnrecognizedChord { text }) => eprintln!("not a chord: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Chord text without a valid root.
    ///
    /// Produced by the chord tokenizer. The transposition engine turns it into
    /// a pass-through of the original text, so it never reaches rendered output.
    ///
    /// # Example
    /// ```
    /// # use chordview_engine::EngineError;
    /// let err = EngineError::UnrecognizedChord { text: "XYZ".to_string() };
    /// assert_eq!(err.to_string(), "Unrecognized chord: 'XYZ'");
    /// ```
    #[error("Unrecognized chord: '{text}'")]
    UnrecognizedChord { text: String },

    /// Unknown renderer name.
    ///
    /// # Example
    /// ```
    /// # use chordview_engine::EngineError;
    /// let err = EngineError::UnknownRenderer("fancy".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Unknown renderer 'fancy' (expected 'structured' or 'legacy')"
    /// );
    /// ```
    #[error("Unknown renderer '{0}' (expected 'structured' or 'legacy')")]
    UnknownRenderer(String),
}
