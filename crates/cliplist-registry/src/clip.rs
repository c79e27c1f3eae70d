use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ident::Identifier;

pub const DEFAULT_VOLUME: f32 = 1.0;
pub const DEFAULT_PITCH: f32 = 1.0;

/// Playback parameters attached to one registry entry. Owned by the
/// presentation layer; the registry file stays the source of truth for
/// which names exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub name: Identifier,
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

impl Clip {
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            source: None,
            volume: DEFAULT_VOLUME,
            pitch: DEFAULT_PITCH,
        }
    }
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_pitch() -> f32 {
    DEFAULT_PITCH
}

/// Reconciles a previous clip list against the current registry order:
/// one clip per declared name, keeping saved parameters for names that
/// survive, defaulting new ones and dropping clips whose name is gone.
pub fn refresh_clips(previous: &[Clip], names: &[Identifier]) -> Vec<Clip> {
    names
        .iter()
        .map(|name| {
            previous
                .iter()
                .find(|clip| &clip.name == name)
                .cloned()
                .unwrap_or_else(|| Clip::new(name.clone()))
        })
        .collect()
}
