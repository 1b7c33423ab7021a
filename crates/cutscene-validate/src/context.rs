//! The identifier snapshot cross-reference checks resolve against.
//!
//! Built once per validation run by a single linear pass over the whole
//! document, *before* any per-action validation. Actions may reference beats
//! declared later in document order (`goto`, choice branches), so the
//! collection pass must finish first — interleaving collection with checking
//! would break forward references.

use std::collections::{HashMap, HashSet};

use cutscene_contracts::diagnostic::{paths, Diagnostic};
use cutscene_contracts::document::CutsceneDoc;
use tracing::debug;

/// The id of the synthetic terminal beat every cutscene can jump to.
///
/// It is always a known beat id, and a declared beat may not shadow it.
pub const END_BEAT_ID: &str = "end";

/// Read-only snapshot of every identifier declared in a document.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub character_ids: HashSet<String>,
    pub background_ids: HashSet<String>,
    pub sound_ids: HashSet<String>,
    /// Declared beat ids plus the synthetic [`END_BEAT_ID`].
    pub beat_ids: HashSet<String>,
    /// Character id → the pose names that character declares.
    pub character_poses: HashMap<String, HashSet<String>>,
}

impl ValidationContext {
    /// Collect every identifier in `doc`, reporting duplicates as it goes.
    ///
    /// Duplicate detection lives here rather than in the per-entity
    /// validation because it is a property of the collection pass: the first
    /// occurrence of an id wins, and each later occurrence produces exactly
    /// one `*_TAKEN` / `BEAT_ID_EXISTS` diagnostic.
    pub fn collect(doc: &CutsceneDoc) -> (Self, Vec<Diagnostic>) {
        let mut ctx = Self::default();
        let mut diags = Vec::new();

        ctx.beat_ids.insert(END_BEAT_ID.to_string());

        for character in doc.characters.iter().flatten() {
            let Some(id) = character.id.as_deref() else {
                continue;
            };
            if !ctx.character_ids.insert(id.to_string()) {
                diags.push(Diagnostic::new(
                    "CHARACTER_ID_TAKEN",
                    paths::character(id),
                    "Character IDs must be unique",
                ));
            } else if !character.poses.is_empty() {
                ctx.character_poses.insert(
                    id.to_string(),
                    character.poses.keys().cloned().collect(),
                );
            }
        }

        for background in doc.backgrounds.iter().flatten() {
            let Some(id) = background.id.as_deref() else {
                continue;
            };
            if !ctx.background_ids.insert(id.to_string()) {
                diags.push(Diagnostic::new(
                    "BACKGROUND_ID_TAKEN",
                    paths::background(id),
                    "Background IDs must be unique",
                ));
            }
        }

        for sound in doc.sounds.iter().flatten() {
            let Some(id) = sound.id.as_deref() else {
                continue;
            };
            if !ctx.sound_ids.insert(id.to_string()) {
                diags.push(Diagnostic::new(
                    "SOUND_ID_TAKEN",
                    paths::sound(id),
                    "Sound IDs must be unique",
                ));
            }
        }

        let beats = doc.cutscene.as_ref().and_then(|c| c.beats.as_ref());
        for beat in beats.into_iter().flatten() {
            let Some(id) = beat.id.as_deref() else {
                continue;
            };
            // The synthetic "end" id is pre-seeded, so declaring a beat named
            // "end" collides here exactly like any other duplicate.
            if !ctx.beat_ids.insert(id.to_string()) {
                diags.push(Diagnostic::new(
                    "BEAT_ID_EXISTS",
                    paths::beat(id),
                    format!("The beat id {id} already exists"),
                ));
            }
        }

        debug!(
            characters = ctx.character_ids.len(),
            backgrounds = ctx.background_ids.len(),
            sounds = ctx.sound_ids.len(),
            beats = ctx.beat_ids.len(),
            duplicates = diags.len(),
            "identifier collection complete"
        );

        (ctx, diags)
    }

    /// True when `character_id` declares `pose`.
    ///
    /// A character with an unknown id or no recorded poses has nothing to
    /// check against — the caller reports those conditions separately.
    pub fn character_has_pose(&self, character_id: &str, pose: &str) -> bool {
        match self.character_poses.get(character_id) {
            Some(poses) => poses.contains(pose),
            None => true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
