//! Validators for the `character.enter` and `character.exit` actions.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::fields;

/// `character.enter` — bring a character sprite on stage.
///
/// `characterId` must resolve; `pose` must resolve against that character's
/// declared poses; `position` must be `left` or `right`; the shared
/// transition and await rules apply.
pub fn enter(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let mut diags = Vec::new();

    let character_id = action.field("characterId");
    let character_id_diags = fields::check_string(character_id, "characterId", &path);
    let character_id_ok = character_id_diags.is_empty();
    diags.extend(character_id_diags);

    let pose = action.field("pose");
    let pose_diags = fields::check_string(pose, "pose", &path);
    let pose_ok = pose_diags.is_empty();
    diags.extend(pose_diags);

    if character_id_ok {
        if let Some(character_id) = character_id.and_then(Value::as_str) {
            if !context.character_ids.contains(character_id) {
                diags.push(Diagnostic::new(
                    "ACTION_CHARACTER_ENTER_INVALID_CID",
                    &path,
                    format!("Character ID {character_id} does not exist"),
                ));
            }

            // The pose can only be resolved once the character is known.
            if pose_ok {
                if let Some(pose) = pose.and_then(Value::as_str) {
                    if !context.character_has_pose(character_id, pose) {
                        diags.push(Diagnostic::new(
                            "ACTION_CHARACTER_POSE_INVALID",
                            &path,
                            format!(
                                "Pose {pose} does not exist for the character {character_id}"
                            ),
                        ));
                    }
                }
            }
        }
    }

    let position = action.field("position");
    let position_diags = fields::check_string(position, "position", &path);
    let position_ok = position_diags.is_empty();
    diags.extend(position_diags);

    if position_ok {
        if let Some(position) = position.and_then(Value::as_str) {
            if position != "left" && position != "right" {
                diags.push(Diagnostic::new(
                    "ACTION_CHARACTER_POSITION_INVALID",
                    &path,
                    "Position must be either \"left\" or \"right\"",
                ));
            }
        }
    }

    diags.extend(fields::check_transition(beat_id, action));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

/// `character.exit` — remove a character sprite from stage.
///
/// `characterId` must resolve; the shared transition and await rules apply.
pub fn exit(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);

    let character_id = action.field("characterId");
    let mut diags = fields::check_string(character_id, "characterId", &path);

    if diags.is_empty() {
        if let Some(character_id) = character_id.and_then(Value::as_str) {
            if !context.character_ids.contains(character_id) {
                diags.push(Diagnostic::new(
                    "ACTION_CHARACTER_EXIT_INVALID_CID",
                    &path,
                    format!("Character ID {character_id} does not exist"),
                ));
            }
        }
    }

    diags.extend(fields::check_transition(beat_id, action));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────
