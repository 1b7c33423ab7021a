//! Validation diagnostics and document location paths.
//!
//! A `Diagnostic` is one reported schema violation. The validator creates
//! them, accumulates them into a flat list, and returns the list — it never
//! throws for malformed document data. An empty list means the document is
//! valid.

use serde::{Deserialize, Serialize};

/// A single validation failure.
///
/// Diagnostics are values: created once, never mutated, compared in tests by
/// equality. `code` is stable and machine-readable (authoring tools key on
/// it); `message` is for humans and may change between releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable machine-readable identifier, e.g. `CHARACTER_ID_TAKEN`.
    pub code: String,
    /// Dotted location path, e.g. `doc.cutscene.beats.b1.actions.*`.
    pub path: String,
    /// Human-readable explanation of the violation.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic from any string-ish parts.
    pub fn new(
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Builders for the dotted location paths used in diagnostics.
///
/// Action-level paths end in a `actions.*` wildcard: the format does not
/// disambiguate which action within a beat failed. Consumers key on these
/// strings, so the granularity is part of the external contract.
pub mod paths {
    /// The document root.
    pub const DOC: &str = "doc";
    /// The top-level character list.
    pub const CHARACTERS: &str = "doc.characters";
    /// The top-level background list.
    pub const BACKGROUNDS: &str = "doc.backgrounds";
    /// The top-level sound list.
    pub const SOUNDS: &str = "doc.sounds";
    /// The cutscene object.
    pub const CUTSCENE: &str = "doc.cutscene";
    /// The beat list.
    pub const BEATS: &str = "doc.cutscene.beats";

    /// Path of one character entry.
    pub fn character(id: &str) -> String {
        format!("{CHARACTERS}.{id}")
    }

    /// Path of one background entry.
    pub fn background(id: &str) -> String {
        format!("{BACKGROUNDS}.{id}")
    }

    /// Path of one sound entry.
    pub fn sound(id: &str) -> String {
        format!("{SOUNDS}.{id}")
    }

    /// Path of one beat.
    pub fn beat(beat_id: &str) -> String {
        format!("{BEATS}.{beat_id}")
    }

    /// Wildcard path covering the actions of one beat.
    pub fn beat_actions(beat_id: &str) -> String {
        format!("{BEATS}.{beat_id}.actions.*")
    }
}
