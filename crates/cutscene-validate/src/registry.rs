//! Action type dispatch.
//!
//! The action type set is closed at schema version 1, so dispatch is an
//! exhaustive `match` over [`ActionKind`] rather than a string-keyed map of
//! trait objects — adding a kind without wiring its validator is a compile
//! error. New schema versions extend the enum.

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::Action;
use tracing::debug;

use crate::actions;
use crate::context::ValidationContext;

/// Maximum nesting depth for container actions (`parallel` inside
/// `parallel`, …). Documents are authored by hand; anything deeper than
/// this is malformed input, and the guard keeps recursion bounded.
pub const MAX_ACTION_DEPTH: usize = 16;

/// Every action type defined by schema version 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    AudioPlay,
    AudioSet,
    AudioStop,
    BackgroundSet,
    CharacterEnter,
    CharacterExit,
    DialogueShow,
    DialogueChorus,
    DialogueHide,
    Goto,
    Parallel,
    Choice,
}

impl ActionKind {
    /// Map a document type tag to its kind. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "audio.play" => Some(Self::AudioPlay),
            "audio.set" => Some(Self::AudioSet),
            "audio.stop" => Some(Self::AudioStop),
            "background.set" => Some(Self::BackgroundSet),
            "character.enter" => Some(Self::CharacterEnter),
            "character.exit" => Some(Self::CharacterExit),
            "dialogue.show" => Some(Self::DialogueShow),
            "dialogue.chorus" => Some(Self::DialogueChorus),
            "dialogue.hide" => Some(Self::DialogueHide),
            "goto" => Some(Self::Goto),
            "parallel" => Some(Self::Parallel),
            "choice" => Some(Self::Choice),
            _ => None,
        }
    }
}

/// Validate one action by dispatching on its type tag.
///
/// Reports `ACTION_TYPE_NULL` for a missing tag and `ACTION_TYPE_INVALID`
/// for an unknown one; otherwise the matching validator's diagnostics are
/// returned unchanged. `depth` is 0 at the beat level and incremented each
/// time a container action recurses.
pub fn dispatch(
    action: &Action,
    beat_id: &str,
    context: &ValidationContext,
    depth: usize,
) -> Vec<Diagnostic> {
    let path = paths::beat_actions(beat_id);

    if depth > MAX_ACTION_DEPTH {
        return vec![Diagnostic::new(
            "ACTION_NESTING_TOO_DEEP",
            path,
            format!("Actions are nested deeper than the supported {MAX_ACTION_DEPTH} levels"),
        )];
    }

    let Some(tag) = action.kind.as_deref() else {
        return vec![Diagnostic::new(
            "ACTION_TYPE_NULL",
            path,
            "Action type must be a string and not null",
        )];
    };

    let Some(kind) = ActionKind::from_tag(tag) else {
        return vec![Diagnostic::new(
            "ACTION_TYPE_INVALID",
            path,
            format!("Action {tag} is not a valid action"),
        )];
    };

    debug!(beat_id, tag, depth, "validating action");

    match kind {
        ActionKind::AudioPlay => actions::audio::play(beat_id, action, context),
        ActionKind::AudioSet => actions::audio::set(beat_id, action, context),
        ActionKind::AudioStop => actions::audio::stop(beat_id, action, context),
        ActionKind::BackgroundSet => actions::background::set(beat_id, action, context),
        ActionKind::CharacterEnter => actions::character::enter(beat_id, action, context),
        ActionKind::CharacterExit => actions::character::exit(beat_id, action, context),
        ActionKind::DialogueShow => actions::dialogue::show(beat_id, action, context),
        ActionKind::DialogueChorus => actions::dialogue::chorus(beat_id, action, context),
        ActionKind::DialogueHide => actions::dialogue::hide(beat_id, action, context),
        ActionKind::Goto => actions::flow::goto(beat_id, action, context),
        ActionKind::Parallel => actions::flow::parallel(beat_id, action, context, depth),
        ActionKind::Choice => actions::flow::choice(beat_id, action, context),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
