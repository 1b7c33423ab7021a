//! Validator for the `background.set` action.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::fields;

/// `background.set` — swap the backdrop.
///
/// `backgroundId` must be a string naming a declared background; the
/// `transition`/`duration` pair and `await` follow the shared rules. Both
/// the wrong-type and the dangling-reference case report
/// `ACTION_BACKGROUND_SET_INVALID` — the code is part of the external
/// contract, so the two cases are distinguished only by message.
pub fn set(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let mut diags = Vec::new();

    match action.field("backgroundId").and_then(Value::as_str) {
        None => diags.push(Diagnostic::new(
            "ACTION_BACKGROUND_SET_INVALID",
            &path,
            "Background ID must be a string",
        )),
        Some(background_id) => {
            if !context.background_ids.contains(background_id) {
                diags.push(Diagnostic::new(
                    "ACTION_BACKGROUND_SET_INVALID",
                    &path,
                    format!("Background ID {background_id} does not exist"),
                ));
            }
        }
    }

    diags.extend(fields::check_transition(beat_id, action));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────
