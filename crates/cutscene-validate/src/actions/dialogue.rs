//! Validators for the `dialogue.show`, `dialogue.chorus`, and
//! `dialogue.hide` actions.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::fields;

/// `dialogue.show` — one character speaks a line.
///
/// `characterId` must resolve, `text` must be a string, `await` a boolean.
pub fn show(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);

    let character_id = action.field("characterId");
    let mut diags = fields::check_string(character_id, "characterId", &path);

    if diags.is_empty() {
        if let Some(character_id) = character_id.and_then(Value::as_str) {
            if !context.character_ids.contains(character_id) {
                diags.push(Diagnostic::new(
                    "ACTION_DIALOGUE_SHOW_INVALID_CID",
                    &path,
                    format!("The character ID {character_id} does not exist"),
                ));
            }
        }
    }

    diags.extend(fields::check_string(action.field("text"), "text", &path));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

/// `dialogue.chorus` — several characters speak the same line at once.
///
/// `characterIds` must be a JSON array; each element that is a string must
/// resolve to a declared character. `text` and `await` follow the shared
/// rules.
pub fn chorus(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let mut diags = Vec::new();

    match action.field("characterIds").and_then(Value::as_array) {
        None => diags.push(Diagnostic::new(
            "DIALOGUE_CHORUS_CHARACTERIDS_INVALID",
            &path,
            "Character IDs are malformed or nonexistent",
        )),
        Some(items) => {
            for item in items {
                let Some(character_id) = item.as_str() else {
                    continue;
                };
                if !context.character_ids.contains(character_id) {
                    diags.push(Diagnostic::new(
                        "DIALOGUE_CHORUS_CHARACTERID_NONEXISTANT",
                        &path,
                        format!("The character ID {character_id} does not exist."),
                    ));
                }
            }
        }
    }

    diags.extend(fields::check_string(action.field("text"), "text", &path));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

/// `dialogue.hide` — dismiss the dialogue pane. Only `await` is checked.
pub fn hide(beat_id: &str, action: &Action, _context: &ValidationContext) -> Vec<Diagnostic> {
    fields::check_await(beat_id, action)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
