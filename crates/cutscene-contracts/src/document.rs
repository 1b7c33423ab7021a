//! The deserialized cutscene document object model.
//!
//! Every field that the JSON format requires is still an `Option` here: the
//! loader is deliberately permissive and produces a best-effort tree from
//! whatever the author wrote. Deciding whether that tree is actually usable
//! is the schema validator's job, and reporting *every* problem at once is
//! what makes the authoring loop workable.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthoringError, AuthoringResult};

/// The root of an authored cutscene document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutsceneDoc {
    /// Document format revision. Schema version 1 is the only one defined.
    pub schema_version: Option<i64>,
    /// Cast of characters that actions may reference by id.
    pub characters: Option<Vec<CharacterDoc>>,
    /// Backgrounds that `background.set` actions may reference by id.
    pub backgrounds: Option<Vec<BackgroundDoc>>,
    /// Sounds that audio actions may reference by id.
    pub sounds: Option<Vec<SoundDoc>>,
    /// The single cutscene this document describes.
    pub cutscene: Option<Cutscene>,
}

impl CutsceneDoc {
    /// Parse a document from a JSON string.
    ///
    /// Only malformed JSON fails here. Missing fields, wrong field types, and
    /// unknown keys all parse successfully — the validator reports those.
    pub fn from_json_str(s: &str) -> AuthoringResult<Self> {
        serde_json::from_str(s).map_err(|e| AuthoringError::DocumentParse {
            reason: e.to_string(),
        })
    }

    /// Read and parse a document from a file on disk.
    pub fn from_json_file(path: &Path) -> AuthoringResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AuthoringError::DocumentRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&contents)
    }
}

/// One cast member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterDoc {
    /// Unique id actions reference this character by.
    pub id: Option<String>,
    /// Display name shown in dialogue panes.
    pub name: Option<String>,
    /// Pose name → sprite asset path. At least one pose is required.
    #[serde(default)]
    pub poses: BTreeMap<String, String>,
}

/// One background image declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundDoc {
    pub id: Option<String>,
    /// Image asset path.
    pub image: Option<String>,
}

/// One sound declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundDoc {
    pub id: Option<String>,
    /// Audio file path.
    pub file: Option<String>,
}

/// The cutscene timeline: an id and an ordered list of beats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cutscene {
    pub id: Option<String>,
    pub beats: Option<Vec<Beat>>,
}

/// One unit of the timeline: an advance rule plus an ordered action list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Beat {
    /// Unique id, also the target of `goto` and choice branches.
    pub id: Option<String>,
    /// When playback proceeds past this beat.
    pub advance: Option<Advance>,
    /// The actions performed when this beat plays. Must be non-empty.
    pub actions: Option<Vec<Action>>,
}

/// The advance rule of a beat.
///
/// `mode` selects the variant; `delay` is meaningful only for `auto_delay`
/// and `signal_key` only for `signal`. The validator enforces that exactly
/// the fields appropriate to the mode are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advance {
    /// One of `auto`, `input`, `auto_delay`, `signal`.
    pub mode: Option<String>,
    /// Milliseconds to wait before advancing (auto_delay only).
    pub delay: Option<i64>,
    /// The external signal to wait for (signal only).
    pub signal_key: Option<String>,
}

/// One typed operation within a beat.
///
/// Each action type carries a different field set, so everything except the
/// type tag and the nested action list stays in an open JSON map. The
/// per-type validators pull fields out of the map with the typed checkers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    /// The action type tag, e.g. `dialogue.show`. Selects the validator.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Child actions, present only for container types (`parallel`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    /// All remaining fields, loosely typed.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl Action {
    /// Look up a payload field, treating an explicit JSON `null` the same as
    /// an absent key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }
}
