//! Visual transitions applied to character sprites and backgrounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The transition styles a `background.set`, `character.enter`, or
/// `character.exit` action may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Fade in or out over the action's duration.
    Fade,
    /// Slide into or out of frame (character sprites only).
    Slide,
    /// Pop the sprite in or out with a short scale animation.
    Pop,
    /// Replace in place with no animation.
    Replace,
}

impl Transition {
    /// The JSON names of every transition, in declaration order.
    ///
    /// Used both for membership checks and for building the "must be any of"
    /// diagnostic message.
    pub const NAMES: [&'static str; 4] = ["fade", "slide", "pop", "replace"];

    /// Parse a JSON transition name. Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "pop" => Some(Self::Pop),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Pop => "pop",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}
