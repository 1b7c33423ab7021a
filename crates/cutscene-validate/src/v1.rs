//! Schema validator for version 1 of the cutscene document format.
//!
//! Orchestration runs in a strict sequence:
//!
//! 1. Top-level shape checks (`DOC_NULL`, `INVALID_SCHEMA`, missing
//!    collections) — each a terminal early exit, since nothing meaningful
//!    can be validated below a missing root.
//! 2. Identifier collection over the whole document
//!    ([`ValidationContext::collect`]) — phase one, reporting duplicate ids.
//!    This must finish before any action is checked so that forward
//!    references to later beats resolve.
//! 3. Per-entity and per-beat validation — phase two, accumulating every
//!    violation without short-circuiting.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::{
    Beat, BackgroundDoc, CharacterDoc, Cutscene, CutsceneDoc, SoundDoc,
};
use tracing::debug;

use crate::context::ValidationContext;
use crate::registry;
use crate::SchemaValidator;

/// Path label for entities the author left unnamed.
const UNNAMED: &str = "?";

/// The schema-version-1 validator. Stateless; share freely across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct V1SchemaValidator;

impl SchemaValidator for V1SchemaValidator {
    fn validate(&self, doc: Option<&CutsceneDoc>) -> Vec<Diagnostic> {
        let Some(doc) = doc else {
            return vec![Diagnostic::new(
                "DOC_NULL",
                paths::DOC,
                "The json file is null or invalid",
            )];
        };

        if doc.schema_version != Some(1) {
            return vec![Diagnostic::new(
                "INVALID_SCHEMA",
                paths::DOC,
                "The schema version is invalid, should be 1",
            )];
        }

        let Some(characters) = doc.characters.as_deref() else {
            return vec![Diagnostic::new(
                "CHARACTERS_NULL",
                paths::DOC,
                "Characters are required",
            )];
        };

        let Some(backgrounds) = doc.backgrounds.as_deref() else {
            return vec![Diagnostic::new(
                "BACKGROUNDS_NULL",
                paths::DOC,
                "Backgrounds are required",
            )];
        };

        let Some(sounds) = doc.sounds.as_deref() else {
            return vec![Diagnostic::new(
                "SOUNDS_NULL",
                paths::DOC,
                "Sounds are required",
            )];
        };

        let Some(cutscene) = doc.cutscene.as_ref() else {
            return vec![Diagnostic::new(
                "CUTSCENE_NULL",
                paths::DOC,
                "Cutscene is required",
            )];
        };

        // Phase one: collect every identifier before checking anything that
        // might reference one.
        let (context, mut diags) = ValidationContext::collect(doc);

        // Phase two: entity and beat validation, everything accumulated.
        diags.extend(validate_characters(characters));
        diags.extend(validate_backgrounds(backgrounds));
        diags.extend(validate_sounds(sounds));
        diags.extend(validate_cutscene(cutscene, &context));

        debug!(diagnostics = diags.len(), "document validation complete");

        diags
    }
}

/// Characters need an id, a display name, and at least one well-formed pose.
fn validate_characters(characters: &[CharacterDoc]) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for character in characters {
        if character.id.is_none() {
            diags.push(Diagnostic::new(
                "NULL_CHARACTER_ID",
                paths::CHARACTERS,
                "Character id is null",
            ));
        }

        if character.name.is_none() {
            diags.push(Diagnostic::new(
                "NULL_CHARACTER_NAME",
                paths::CHARACTERS,
                "Character name is null",
            ));
        }

        let label = character.id.as_deref().unwrap_or(UNNAMED);
        if character.poses.is_empty() {
            diags.push(Diagnostic::new(
                "NULL_CHARACTER_EMPTY_POSES",
                paths::character(label),
                "Character must have at least 1 pose",
            ));
        } else if character
            .poses
            .iter()
            .any(|(key, value)| key.is_empty() || value.is_empty())
        {
            diags.push(Diagnostic::new(
                "EMPTY_POSE",
                paths::character(label),
                "A pose key or value is empty",
            ));
        }
    }

    diags
}

/// Backgrounds need an id and an image path.
fn validate_backgrounds(backgrounds: &[BackgroundDoc]) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for background in backgrounds {
        if background.id.is_none() {
            diags.push(Diagnostic::new(
                "NULL_BACKGROUND_ID",
                paths::BACKGROUNDS,
                "Background id is null",
            ));
        }
        if background.image.is_none() {
            diags.push(Diagnostic::new(
                "NULL_BACKGROUND_IMAGE",
                paths::BACKGROUNDS,
                "Background image address is null",
            ));
        }
    }

    diags
}

/// Sounds need an id and a file path.
fn validate_sounds(sounds: &[SoundDoc]) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for sound in sounds {
        if sound.id.is_none() {
            diags.push(Diagnostic::new(
                "NULL_SOUND_ID",
                paths::SOUNDS,
                "Sound id is null",
            ));
        }
        if sound.file.is_none() {
            diags.push(Diagnostic::new(
                "NULL_SOUND_FILE",
                paths::SOUNDS,
                "Sound file address is null",
            ));
        }
    }

    diags
}

/// The cutscene needs an id and a beat list; each beat is then validated in
/// declaration order.
fn validate_cutscene(cutscene: &Cutscene, context: &ValidationContext) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if cutscene.id.is_none() {
        diags.push(Diagnostic::new(
            "CUTSCENE_ID_NULL",
            paths::CUTSCENE,
            "Cutscene id must not be null",
        ));
    }

    let Some(beats) = cutscene.beats.as_deref() else {
        diags.push(Diagnostic::new(
            "CUTSCENE_BEATS_NULL",
            paths::CUTSCENE,
            "Beats must not be null",
        ));
        return diags;
    };

    for beat in beats {
        if beat.id.is_none() {
            diags.push(Diagnostic::new(
                "BEAT_ID_NULL",
                paths::BEATS,
                "Beats must have a valid id",
            ));
        }
    }

    for beat in beats {
        diags.extend(validate_beat(beat, context));
    }

    diags
}

/// Advance-rule and action validation for one beat.
///
/// The advance spec is a tagged variant: `mode` selects which of `delay` and
/// `signalKey` may be present. An unrecognized mode is reported as a
/// diagnostic like every other rule violation — the engine never panics on
/// document data.
fn validate_beat(beat: &Beat, context: &ValidationContext) -> Vec<Diagnostic> {
    let label = beat.id.as_deref().unwrap_or(UNNAMED);
    let beat_path = paths::beat(label);
    let mut diags = Vec::new();

    match beat.advance.as_ref() {
        None => diags.push(Diagnostic::new(
            "BEAT_ADVANCE_NULL",
            &beat_path,
            "Beat advance must not be null",
        )),
        Some(advance) => match advance.mode.as_deref() {
            None => diags.push(Diagnostic::new(
                "BEAT_ADVANCE_MODE_NULL",
                &beat_path,
                "Beat advance mode must not be null",
            )),
            Some("auto") | Some("input") => {
                if advance.delay.is_some() || advance.signal_key.is_some() {
                    diags.push(Diagnostic::new(
                        "BEAT_ADVANCE_MODE_AUTO_UNEXPECTED",
                        &beat_path,
                        "Unexpected value in auto advance",
                    ));
                }
            }
            Some("auto_delay") => {
                if advance.delay.is_none() || advance.signal_key.is_some() {
                    diags.push(Diagnostic::new(
                        "BEAT_ADVANCE_MODE_AUTO_DELAY_INVALID",
                        &beat_path,
                        "Invalid data for auto delay advance",
                    ));
                }
            }
            Some("signal") => {
                if advance.delay.is_some() || advance.signal_key.is_none() {
                    diags.push(Diagnostic::new(
                        "BEAT_ADVANCE_MODE_SIGNAL_INVALID",
                        &beat_path,
                        "Invalid data for signal advance",
                    ));
                }
            }
            Some(mode) => diags.push(Diagnostic::new(
                "BEAT_ADVANCE_MODE_INVALID",
                &beat_path,
                format!("Beat advance mode {mode} is not a valid mode"),
            )),
        },
    }

    match beat.actions.as_deref() {
        None | Some([]) => diags.push(Diagnostic::new(
            "BEAT_ACTIONS_NULL",
            &beat_path,
            "Beat actions is null or empty",
        )),
        Some(actions) => {
            for action in actions {
                diags.extend(registry::dispatch(action, label, context, 0));
            }
        }
    }

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn validate(value: serde_json::Value) -> Vec<Diagnostic> {
        let doc: CutsceneDoc = serde_json::from_value(value).unwrap();
        V1SchemaValidator.validate(Some(&doc))
    }

    fn codes(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().map(|d| d.code.as_str()).collect()
    }

    /// The smallest completely valid document.
    fn minimal_doc() -> serde_json::Value {
        json!({
            "schemaVersion": 1,
            "characters": [{"id": "hero", "name": "Hero", "poses": {"idle": "hero_idle.png"}}],
            "backgrounds": [{"id": "bg1", "image": "bg1.png"}],
            "sounds": [{"id": "s1", "file": "s1.ogg"}],
            "cutscene": {
                "id": "intro",
                "beats": [{
                    "id": "b1",
                    "advance": {"mode": "auto"},
                    "actions": [{
                        "type": "dialogue.show",
                        "characterId": "hero",
                        "text": "hi",
                        "await": true
                    }]
                }]
            }
        })
    }

    // ── Early exits ───────────────────────────────────────────────────────────

    #[test]
    fn absent_document_reports_doc_null() {
        let diags = V1SchemaValidator.validate(None);
        assert_eq!(codes(&diags), vec!["DOC_NULL"]);
        assert_eq!(diags[0].path, "doc");
    }

    #[test]
    fn wrong_schema_version_is_terminal() {
        let diags = validate(json!({"schemaVersion": 2}));
        assert_eq!(codes(&diags), vec!["INVALID_SCHEMA"]);

        let diags = validate(json!({}));
        assert_eq!(codes(&diags), vec!["INVALID_SCHEMA"]);
    }

    #[test]
    fn each_missing_collection_is_terminal_in_order() {
        let diags = validate(json!({"schemaVersion": 1}));
        assert_eq!(codes(&diags), vec!["CHARACTERS_NULL"]);

        let diags = validate(json!({"schemaVersion": 1, "characters": []}));
        assert_eq!(codes(&diags), vec!["BACKGROUNDS_NULL"]);

        let diags = validate(json!({"schemaVersion": 1, "characters": [], "backgrounds": []}));
        assert_eq!(codes(&diags), vec!["SOUNDS_NULL"]);

        let diags = validate(json!({
            "schemaVersion": 1, "characters": [], "backgrounds": [], "sounds": []
        }));
        assert_eq!(codes(&diags), vec!["CUTSCENE_NULL"]);
    }

    #[test]
    fn missing_beats_ends_cutscene_validation() {
        let mut doc = minimal_doc();
        doc["cutscene"] = json!({"id": "intro"});
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["CUTSCENE_BEATS_NULL"]);
    }

    // ── Whole-document scenarios ──────────────────────────────────────────────

    #[test]
    fn minimal_valid_document_yields_no_diagnostics() {
        assert_eq!(validate(minimal_doc()), Vec::new());
    }

    #[test]
    fn validation_is_deterministic() {
        let mut doc = minimal_doc();
        doc["characters"].as_array_mut().unwrap().push(json!({"poses": {}}));
        doc["cutscene"]["beats"]
            .as_array_mut()
            .unwrap()
            .push(json!({"id": "b1", "advance": {"mode": "auto", "delay": 5}}));

        let parsed: CutsceneDoc = serde_json::from_value(doc).unwrap();
        let first = V1SchemaValidator.validate(Some(&parsed));
        let second = V1SchemaValidator.validate(Some(&parsed));
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn sibling_character_errors_are_both_reported() {
        let mut doc = minimal_doc();
        doc["characters"] = json!([
            {"name": "No Id", "poses": {"idle": "a.png"}},
            {"id": "b", "poses": {"idle": "b.png"}}
        ]);
        // Character A is missing an id, character B a name; neither error
        // suppresses the other. The dialogue action still resolves nothing
        // because "hero" is gone.
        let diags = validate(doc);
        assert!(codes(&diags).contains(&"NULL_CHARACTER_ID"));
        assert!(codes(&diags).contains(&"NULL_CHARACTER_NAME"));
    }

    #[test]
    fn duplicate_character_id_reported_exactly_once() {
        let mut doc = minimal_doc();
        doc["characters"] = json!([
            {"id": "hero", "name": "Hero", "poses": {"idle": "a.png"}},
            {"id": "hero", "name": "Hero Again", "poses": {"idle": "b.png"}}
        ]);
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["CHARACTER_ID_TAKEN"]);
    }

    #[test]
    fn forward_goto_reference_resolves() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"] = json!([
            {
                "id": "b1",
                "advance": {"mode": "input"},
                "actions": [{"type": "goto", "cutsceneId": "current", "beatId": "b2"}]
            },
            {
                "id": "b2",
                "advance": {"mode": "auto"},
                "actions": [{"type": "dialogue.hide", "await": true}]
            }
        ]);
        assert_eq!(validate(doc), Vec::new());
    }

    #[test]
    fn dangling_background_reference_is_reported() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["actions"] = json!([{
            "type": "background.set",
            "backgroundId": "missing",
            "transition": "fade",
            "duration": 300,
            "await": true
        }]);
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["ACTION_BACKGROUND_SET_INVALID"]);
    }

    #[test]
    fn nested_parallel_with_typeless_child_reports_type_null_once() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["actions"] = json!([{
            "type": "parallel",
            "await": true,
            "actions": [{"characterId": "hero"}]
        }]);
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["ACTION_TYPE_NULL"]);
        assert_eq!(diags[0].path, "doc.cutscene.beats.b1.actions.*");
    }

    #[test]
    fn choice_missing_keys_scenario() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["actions"] = json!([{
            "type": "choice",
            "prompt": "?",
            "choices": [{"type": "x", "line": "y"}]
        }]);
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["ACTION_CHOICE_MISSING_PARAMETERS"]);
    }

    // ── Entity checks ─────────────────────────────────────────────────────────

    #[test]
    fn empty_poses_and_empty_pose_values_are_distinct_codes() {
        let mut doc = minimal_doc();
        doc["characters"] = json!([
            {"id": "hero", "name": "Hero", "poses": {}},
            {"id": "npc", "name": "Npc", "poses": {"idle": ""}}
        ]);
        let diags = validate(doc);
        assert!(codes(&diags).contains(&"NULL_CHARACTER_EMPTY_POSES"));
        assert!(codes(&diags).contains(&"EMPTY_POSE"));
        // The dialogue action's characterId still resolves.
        assert!(!codes(&diags).contains(&"ACTION_DIALOGUE_SHOW_INVALID_CID"));
    }

    #[test]
    fn background_and_sound_field_nulls_are_reported() {
        let mut doc = minimal_doc();
        doc["backgrounds"] = json!([{"id": "bg1"}]);
        doc["sounds"] = json!([{"file": "s1.ogg"}]);
        let diags = validate(doc);
        assert!(codes(&diags).contains(&"NULL_BACKGROUND_IMAGE"));
        assert!(codes(&diags).contains(&"NULL_SOUND_ID"));
    }

    // ── Advance spec ──────────────────────────────────────────────────────────

    #[test]
    fn auto_advance_with_delay_is_unexpected() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "auto", "delay": 5});
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["BEAT_ADVANCE_MODE_AUTO_UNEXPECTED"]);
        assert_eq!(diags[0].path, "doc.cutscene.beats.b1");
    }

    #[test]
    fn input_advance_with_signal_key_is_unexpected() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "input", "signalKey": "k"});
        assert_eq!(codes(&validate(doc)), vec!["BEAT_ADVANCE_MODE_AUTO_UNEXPECTED"]);
    }

    #[test]
    fn auto_delay_advance_requires_delay_and_forbids_signal_key() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "auto_delay"});
        assert_eq!(codes(&validate(doc.clone())), vec!["BEAT_ADVANCE_MODE_AUTO_DELAY_INVALID"]);

        doc["cutscene"]["beats"][0]["advance"] =
            json!({"mode": "auto_delay", "delay": 500, "signalKey": "k"});
        assert_eq!(codes(&validate(doc.clone())), vec!["BEAT_ADVANCE_MODE_AUTO_DELAY_INVALID"]);

        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "auto_delay", "delay": 500});
        assert_eq!(validate(doc), Vec::new());
    }

    #[test]
    fn signal_advance_requires_signal_key_and_forbids_delay() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "signal", "signalKey": "door"});
        assert_eq!(validate(doc.clone()), Vec::new());

        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "signal", "delay": 5});
        assert_eq!(codes(&validate(doc)), vec!["BEAT_ADVANCE_MODE_SIGNAL_INVALID"]);
    }

    #[test]
    fn unrecognized_advance_mode_is_a_diagnostic_not_a_panic() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0]["advance"] = json!({"mode": "hold"});
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["BEAT_ADVANCE_MODE_INVALID"]);
        assert!(diags[0].message.contains("hold"));
    }

    #[test]
    fn missing_advance_and_empty_actions_both_report() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0] = json!({"id": "b1", "actions": []});
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["BEAT_ADVANCE_NULL", "BEAT_ACTIONS_NULL"]);
    }

    #[test]
    fn beat_without_id_still_validates_under_placeholder_path() {
        let mut doc = minimal_doc();
        doc["cutscene"]["beats"][0] = json!({"advance": {"mode": "auto"}, "actions": []});
        let diags = validate(doc);
        assert_eq!(codes(&diags), vec!["BEAT_ID_NULL", "BEAT_ACTIONS_NULL"]);
        assert_eq!(diags[1].path, "doc.cutscene.beats.?");
    }
}
