//! Typed checkers for loosely-typed action payload fields.
//!
//! Every checker is a pure function from a raw JSON value to zero or more
//! diagnostics. They are the shared vocabulary all action validators build
//! on: type checks (`check_string`, `check_integer`, …), the inclusive range
//! check, and the composite `transition` / `await` / `soundId` checks that
//! several action types share.
//!
//! Diagnostic codes follow the `ACTION_<KEY>_NULL` / `ACTION_<KEY>_NOT_<TYPE>`
//! convention, with `<KEY>` the uppercased field key.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use cutscene_contracts::transition::Transition;
use serde_json::Value;

use crate::context::ValidationContext;

fn null_code(key: &str) -> String {
    format!("ACTION_{}_NULL", key.to_uppercase())
}

fn type_code(key: &str, ty: &str) -> String {
    format!("ACTION_{}_NOT_{}", key.to_uppercase(), ty)
}

/// The field must be present and a JSON string.
pub fn check_string(value: Option<&Value>, key: &str, path: &str) -> Vec<Diagnostic> {
    match value {
        None => vec![Diagnostic::new(
            null_code(key),
            path,
            format!("{key} cannot be null"),
        )],
        Some(v) if !v.is_string() => vec![Diagnostic::new(
            type_code(key, "STRING"),
            path,
            format!("{key} must be a string"),
        )],
        Some(_) => Vec::new(),
    }
}

/// The field must be present and an integer.
///
/// A JSON number counts as an integer only when it is exactly representable
/// as `i64`; `1.5` (and any float literal) is rejected.
pub fn check_integer(value: Option<&Value>, key: &str, path: &str) -> Vec<Diagnostic> {
    match value {
        None => vec![Diagnostic::new(
            null_code(key),
            path,
            format!("{key} cannot be null"),
        )],
        Some(v) if v.as_i64().is_none() => vec![Diagnostic::new(
            type_code(key, "INTEGER"),
            path,
            format!("{key} must be an integer"),
        )],
        Some(_) => Vec::new(),
    }
}

/// The field must be present and numeric.
///
/// Any JSON number passes: an integer literal is a valid float value.
pub fn check_float(value: Option<&Value>, key: &str, path: &str) -> Vec<Diagnostic> {
    match value {
        None => vec![Diagnostic::new(
            null_code(key),
            path,
            format!("{key} cannot be null"),
        )],
        Some(v) if v.as_f64().is_none() => vec![Diagnostic::new(
            type_code(key, "FLOAT"),
            path,
            format!("{key} must be a float"),
        )],
        Some(_) => Vec::new(),
    }
}

/// The field must be present and a JSON boolean.
pub fn check_boolean(value: Option<&Value>, key: &str, path: &str) -> Vec<Diagnostic> {
    match value {
        None => vec![Diagnostic::new(
            null_code(key),
            path,
            format!("{key} cannot be null"),
        )],
        Some(v) if !v.is_boolean() => vec![Diagnostic::new(
            type_code(key, "BOOLEAN"),
            path,
            format!("{key} must be a boolean"),
        )],
        Some(_) => Vec::new(),
    }
}

/// The number must lie within the inclusive range `[min, max]`.
///
/// The value is assumed to already be known numeric — pair with
/// `check_float` / `check_integer`, or use `check_float_in_range`.
pub fn check_range(number: f64, min: f64, max: f64, path: &str) -> Vec<Diagnostic> {
    if number < min {
        return vec![Diagnostic::new(
            "NUMBER_TOO_SMALL",
            path,
            format!("The number {number} is smaller than the minimum value {min}"),
        )];
    }
    if number > max {
        return vec![Diagnostic::new(
            "NUMBER_TOO_LARGE",
            path,
            format!("The number {number} is larger than the maximum value {max}"),
        )];
    }
    Vec::new()
}

/// Composite: the field must be numeric, and when it is, in `[min, max]`.
///
/// The range check only runs after the type check passed, so one bad field
/// produces one diagnostic, not a cascade.
pub fn check_float_in_range(
    value: Option<&Value>,
    key: &str,
    path: &str,
    min: f64,
    max: f64,
) -> Vec<Diagnostic> {
    let mut diags = check_float(value, key, path);
    if diags.is_empty() {
        if let Some(number) = value.and_then(Value::as_f64) {
            diags.extend(check_range(number, min, max, path));
        }
    }
    diags
}

/// Composite `transition` + `duration` check shared by the actions that
/// animate sprites.
///
/// `transition` must be a string naming a [`Transition`]; `duration` must be
/// an integer strictly greater than zero.
pub fn check_transition(beat_id: &str, action: &Action) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let mut diags = Vec::new();

    let transition = action.field("transition");
    let transition_diags = check_string(transition, "transition", &path);
    let transition_ok = transition_diags.is_empty();
    diags.extend(transition_diags);

    if transition_ok {
        if let Some(name) = transition.and_then(Value::as_str) {
            if Transition::parse(name).is_none() {
                diags.push(Diagnostic::new(
                    "ACTION_TRANSITION_INVALID",
                    &path,
                    format!(
                        "Transition must be any of: {}",
                        Transition::NAMES.join(", ")
                    ),
                ));
            }
        }
    }

    let duration = action.field("duration");
    let duration_diags = check_integer(duration, "duration", &path);
    let duration_ok = duration_diags.is_empty();
    diags.extend(duration_diags);

    if duration_ok {
        if let Some(ms) = duration.and_then(Value::as_i64) {
            if ms <= 0 {
                diags.push(Diagnostic::new(
                    "ACTION_DURATION_INVALID",
                    &path,
                    "Duration must be greater than 0",
                ));
            }
        }
    }

    diags
}

/// The `await` flag shared by nearly every action type must be a boolean.
pub fn check_await(beat_id: &str, action: &Action) -> Vec<Diagnostic> {
    check_boolean(action.field("await"), "await", &paths::beat_actions(beat_id))
}

/// The `soundId` field must be a string naming a declared sound.
pub fn check_sound_id(
    action: &Action,
    context: &ValidationContext,
    path: &str,
) -> Vec<Diagnostic> {
    let value = action.field("soundId");
    let mut diags = check_string(value, "soundId", path);

    if diags.is_empty() {
        if let Some(sound_id) = value.and_then(Value::as_str) {
            if !context.sound_ids.contains(sound_id) {
                diags.push(Diagnostic::new(
                    "ACTION_AUDIO_PLAY_INVALID_SOUND_ID",
                    path,
                    format!("Sound ID {sound_id} does not exist"),
                ));
            }
        }
    }

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────
