//! Validators for the control-flow actions: `goto`, `parallel`, `choice`.
//!
//! `parallel` and `choice` are the two places the engine recurses: children
//! of a `parallel` re-enter the dispatcher, bounded by
//! [`MAX_ACTION_DEPTH`](crate::registry::MAX_ACTION_DEPTH).

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::fields;
use crate::registry;

/// The keys every choice entry must carry.
const CHOICE_KEYS: [&str; 4] = ["type", "line", "cutsceneId", "entryBeatId"];

/// `goto` — jump to a beat, possibly in another cutscene.
///
/// `cutsceneId` and `beatId` must both be strings. Only when `cutsceneId`
/// is `"current"` is `beatId` resolved against the known beats — cross
/// cutscene targets are out of this document's scope and go unchecked.
pub fn goto(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);

    let cutscene_id = action.field("cutsceneId");
    let mut diags = fields::check_string(cutscene_id, "cutsceneId", &path);

    let target = action.field("beatId");
    let target_diags = fields::check_string(target, "beatId", &path);
    let target_ok = target_diags.is_empty();
    diags.extend(target_diags);

    if cutscene_id.and_then(Value::as_str) == Some("current") && target_ok {
        if let Some(target) = target.and_then(Value::as_str) {
            if !context.beat_ids.contains(target) {
                diags.push(Diagnostic::new(
                    "ACTION_GOTO_BEAT_ID_INVALID",
                    &path,
                    format!("Beat ID {target} is not a valid beat ID"),
                ));
            }
        }
    }

    diags
}

/// `parallel` — run every child action simultaneously.
///
/// Each child is validated through the dispatcher with the depth counter
/// bumped; `await` must be a boolean on the container itself.
pub fn parallel(
    beat_id: &str,
    action: &Action,
    context: &ValidationContext,
    depth: usize,
) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    match &action.actions {
        None => diags.push(Diagnostic::new(
            "ACTION_PARALLEL_ACTIONS_NULL",
            paths::beat_actions(beat_id),
            "Parallel must contain a list of child actions",
        )),
        Some(children) => {
            for child in children {
                diags.extend(registry::dispatch(child, beat_id, context, depth + 1));
            }
        }
    }

    diags.extend(fields::check_await(beat_id, action));

    diags
}

/// `choice` — present branching options to the player.
///
/// `prompt` must be a string and `choices` a list of string-to-string maps,
/// each carrying exactly the keys {type, line, cutsceneId, entryBeatId},
/// with `entryBeatId` resolving to a known beat.
pub fn choice(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);

    let mut diags = fields::check_string(action.field("prompt"), "prompt", &path);

    match action.field("choices").and_then(Value::as_array) {
        None => diags.push(Diagnostic::new(
            "ACTION_CHOICES_NOT_LIST",
            &path,
            "Choices must be a list",
        )),
        Some(choices) => {
            for entry in choices {
                match entry.as_object() {
                    Some(map) => diags.extend(check_choice_entry(map, &path, context)),
                    None => diags.push(Diagnostic::new(
                        "ACTION_CHOICE_MALFORMED",
                        &path,
                        "Choice is malformed",
                    )),
                }
            }
        }
    }

    diags
}

/// Validate one choice map: string values, no empty keys or values, the
/// full required key set, and a resolvable `entryBeatId`.
fn check_choice_entry(
    map: &serde_json::Map<String, Value>,
    path: &str,
    context: &ValidationContext,
) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let mut keys: Vec<&str> = Vec::with_capacity(map.len());

    for (key, value) in map {
        let Some(value) = value.as_str() else {
            diags.push(Diagnostic::new(
                "ACTION_CHOICE_MALFORMED_LINE",
                path,
                "A line in a choice is malformed (not String: String)",
            ));
            continue;
        };

        if key.is_empty() || value.is_empty() {
            diags.push(Diagnostic::new(
                "ACTION_CHOICE_EMPTY_STRING",
                path,
                "A key or value in the choice is empty",
            ));
        } else if key == "entryBeatId" && !context.beat_ids.contains(value) {
            diags.push(Diagnostic::new(
                "ACTION_CHOICE_INVALID_BEAT_ID",
                path,
                format!("The beat ID {value} does not exist"),
            ));
        }

        keys.push(key);
    }

    if !CHOICE_KEYS.iter().all(|k| keys.contains(k)) {
        diags.push(Diagnostic::new(
            "ACTION_CHOICE_MISSING_PARAMETERS",
            path,
            "A KV pair (parameter) is missing from a choice",
        ));
    }

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ctx() -> ValidationContext {
        let mut ctx = ValidationContext::default();
        ctx.character_ids.insert("hero".to_string());
        ctx.beat_ids.insert("end".to_string());
        ctx.beat_ids.insert("b1".to_string());
        ctx.beat_ids.insert("b2".to_string());
        ctx
    }

    fn action(fields: serde_json::Value) -> Action {
        serde_json::from_value(fields).unwrap()
    }

    fn codes(diags: Vec<Diagnostic>) -> Vec<String> {
        diags.into_iter().map(|d| d.code).collect()
    }

    // ── goto ──────────────────────────────────────────────────────────────────

    #[test]
    fn goto_to_a_known_beat_passes() {
        let a = action(json!({"cutsceneId": "current", "beatId": "b2"}));
        assert!(goto("b1", &a, &ctx()).is_empty());
    }

    #[test]
    fn goto_to_the_synthetic_end_beat_passes() {
        let a = action(json!({"cutsceneId": "current", "beatId": "end"}));
        assert!(goto("b1", &a, &ctx()).is_empty());
    }

    #[test]
    fn goto_dangling_beat_in_current_cutscene_is_reported() {
        let a = action(json!({"cutsceneId": "current", "beatId": "nowhere"}));
        assert_eq!(codes(goto("b1", &a, &ctx())), vec!["ACTION_GOTO_BEAT_ID_INVALID"]);
    }

    #[test]
    fn goto_cross_cutscene_target_is_not_resolved() {
        let a = action(json!({"cutsceneId": "chapter2", "beatId": "nowhere"}));
        assert!(goto("b1", &a, &ctx()).is_empty());
    }

    #[test]
    fn goto_missing_fields_both_report() {
        let a = action(json!({}));
        assert_eq!(
            codes(goto("b1", &a, &ctx())),
            vec!["ACTION_CUTSCENEID_NULL", "ACTION_BEATID_NULL"]
        );
    }

    // ── parallel ──────────────────────────────────────────────────────────────

    #[test]
    fn parallel_validates_every_child() {
        let a = action(json!({
            "await": true,
            "actions": [
                {"type": "dialogue.hide", "await": true},
                {"type": "dialogue.show", "characterId": "ghost", "text": "x", "await": true}
            ]
        }));
        assert_eq!(
            codes(parallel("b1", &a, &ctx(), 0)),
            vec!["ACTION_DIALOGUE_SHOW_INVALID_CID"]
        );
    }

    #[test]
    fn parallel_child_without_type_reports_type_null_once() {
        let a = action(json!({"await": true, "actions": [{"await": true}]}));
        let diags = parallel("b1", &a, &ctx(), 0);
        assert_eq!(codes(diags.clone()), vec!["ACTION_TYPE_NULL"]);
        assert_eq!(diags[0].path, "doc.cutscene.beats.b1.actions.*");
    }

    #[test]
    fn parallel_without_children_is_reported() {
        let a = action(json!({"await": true}));
        assert_eq!(codes(parallel("b1", &a, &ctx(), 0)), vec!["ACTION_PARALLEL_ACTIONS_NULL"]);
    }

    // ── choice ────────────────────────────────────────────────────────────────

    fn full_choice(entry_beat: &str) -> serde_json::Value {
        json!({
            "type": "button",
            "line": "Go left",
            "cutsceneId": "current",
            "entryBeatId": entry_beat
        })
    }

    #[test]
    fn valid_choice_passes() {
        let a = action(json!({"prompt": "Which way?", "choices": [full_choice("b2")]}));
        assert!(choice("b1", &a, &ctx()).is_empty());
    }

    #[test]
    fn choice_missing_keys_is_reported() {
        let a = action(json!({"prompt": "?", "choices": [{"type": "x", "line": "y"}]}));
        assert_eq!(codes(choice("b1", &a, &ctx())), vec!["ACTION_CHOICE_MISSING_PARAMETERS"]);
    }

    #[test]
    fn choice_dangling_entry_beat_is_reported() {
        let a = action(json!({"prompt": "?", "choices": [full_choice("nowhere")]}));
        assert_eq!(codes(choice("b1", &a, &ctx())), vec!["ACTION_CHOICE_INVALID_BEAT_ID"]);
    }

    #[test]
    fn choice_empty_value_is_reported() {
        let a = action(json!({
            "prompt": "?",
            "choices": [{"type": "", "line": "y", "cutsceneId": "current", "entryBeatId": "b2"}]
        }));
        assert_eq!(codes(choice("b1", &a, &ctx())), vec!["ACTION_CHOICE_EMPTY_STRING"]);
    }

    #[test]
    fn choice_non_string_value_is_malformed_line() {
        let a = action(json!({
            "prompt": "?",
            "choices": [{"type": "x", "line": 5, "cutsceneId": "current", "entryBeatId": "b2"}]
        }));
        // The non-string "line" entry is reported and its key is not counted,
        // so the required key set is also incomplete.
        assert_eq!(
            codes(choice("b1", &a, &ctx())),
            vec!["ACTION_CHOICE_MALFORMED_LINE", "ACTION_CHOICE_MISSING_PARAMETERS"]
        );
    }

    #[test]
    fn choice_non_map_entry_is_malformed() {
        let a = action(json!({"prompt": "?", "choices": ["left"]}));
        assert_eq!(codes(choice("b1", &a, &ctx())), vec!["ACTION_CHOICE_MALFORMED"]);
    }

    #[test]
    fn choices_not_a_list_is_reported() {
        let a = action(json!({"prompt": "?", "choices": "left-or-right"}));
        assert_eq!(codes(choice("b1", &a, &ctx())), vec!["ACTION_CHOICES_NOT_LIST"]);
    }
}
