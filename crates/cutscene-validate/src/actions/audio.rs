//! Validators for the `audio.play`, `audio.set`, and `audio.stop` actions.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use serde_json::Value;

use crate::context::ValidationContext;
use crate::fields;

/// `audio.play` — start a sound on the `sfx` or `music` bus.
///
/// Per-bus field rules:
/// - `sfx`: `volume` in [0, 1], `pitch` in [0, ∞), `pan` in [-1, 1]
/// - `music`: `loop` boolean, `volume` in [0, 1]
///
/// `soundId` must name a declared sound; `await` must be a boolean.
pub fn play(beat_id: &str, action: &Action, context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let bus = action.field("bus");

    let mut diags = fields::check_string(bus, "bus", &path);

    match bus.and_then(Value::as_str) {
        Some("sfx") => {
            diags.extend(fields::check_float_in_range(
                action.field("volume"),
                "volume",
                &path,
                0.0,
                1.0,
            ));
            diags.extend(fields::check_float_in_range(
                action.field("pitch"),
                "pitch",
                &path,
                0.0,
                f64::INFINITY,
            ));
            diags.extend(fields::check_float_in_range(
                action.field("pan"),
                "pan",
                &path,
                -1.0,
                1.0,
            ));
        }
        Some("music") => {
            diags.extend(fields::check_boolean(action.field("loop"), "loop", &path));
            diags.extend(fields::check_float_in_range(
                action.field("volume"),
                "volume",
                &path,
                0.0,
                1.0,
            ));
        }
        Some(_) => diags.push(Diagnostic::new(
            "ACTION_AUDIO_PLAY_INVALID_BUS",
            &path,
            "Bus value must be either \"sfx\" or \"music\"",
        )),
        // Absent or non-string bus is already reported by check_string; the
        // per-bus fields cannot be checked without knowing the bus.
        None => {}
    }

    diags.extend(fields::check_sound_id(action, context, &path));
    diags.extend(fields::check_await(beat_id, action));

    diags
}

/// `audio.set` — adjust the music bus volume.
///
/// `bus` must equal `"music"`; `volume` must be in [0, 1].
pub fn set(beat_id: &str, action: &Action, _context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let bus = action.field("bus");

    let mut diags = fields::check_string(bus, "bus", &path);

    match bus.and_then(Value::as_str) {
        Some("music") => diags.extend(fields::check_float_in_range(
            action.field("volume"),
            "volume",
            &path,
            0.0,
            1.0,
        )),
        Some(_) => diags.push(Diagnostic::new(
            "ACTION_AUDIO_SET_BUS_INVALID",
            &path,
            "Bus for audio set must be only \"music\"",
        )),
        None => {}
    }

    diags
}

/// `audio.stop` — stop the music bus with an optional fade.
///
/// `bus` must equal `"music"`; `fadeMs` must be an integer ≥ 0; `await`
/// must be a boolean.
pub fn stop(beat_id: &str, action: &Action, _context: &ValidationContext) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);
    let bus = action.field("bus");

    let mut diags = fields::check_string(bus, "bus", &path);

    if let Some(bus) = bus.and_then(Value::as_str) {
        if bus != "music" {
            diags.push(Diagnostic::new(
                "ACTION_AUDIO_STOP_BUS_INVALID",
                &path,
                "Bus for audio stop must be only \"music\"",
            ));
        }
    }

    let fade = action.field("fadeMs");
    let fade_diags = fields::check_integer(fade, "fadeMs", &path);
    let fade_ok = fade_diags.is_empty();
    diags.extend(fade_diags);

    if fade_ok {
        if let Some(ms) = fade.and_then(Value::as_i64) {
            if ms < 0 {
                diags.push(Diagnostic::new(
                    "ACTION_AUDIO_STOP_FADE_INVALID",
                    &path,
                    "FadeMs must be greater or equal to 0",
                ));
            }
        }
    }

    diags.extend(fields::check_await(beat_id, action));

    diags
}

// ── Tests ─────────────────────────────────────────────────────────────────────
