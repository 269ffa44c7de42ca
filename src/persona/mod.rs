// src/persona/mod.rs
// Persona overlays for the companion's two conversational surfaces.

pub mod companion;
pub mod listener;

pub use companion::COMPANION_PERSONA_PROMPT;
pub use listener::LISTENER_PERSONA_PROMPT;

/// Persona overlays define how the companion speaks on each surface.
/// Companion is the text-chat therapist; Listener is the shorter,
/// voice-friendly variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaOverlay {
    Companion,
    Listener,
}

impl PersonaOverlay {
    /// Returns the instruction block for this persona overlay.
    pub fn prompt(&self) -> &'static str {
        match self {
            PersonaOverlay::Companion => COMPANION_PERSONA_PROMPT,
            PersonaOverlay::Listener => LISTENER_PERSONA_PROMPT,
        }
    }
}

impl std::fmt::Display for PersonaOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PersonaOverlay::Companion => "companion",
                PersonaOverlay::Listener => "listener",
            }
        )
    }
}

impl std::str::FromStr for PersonaOverlay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "companion" => Ok(PersonaOverlay::Companion),
            "listener" => Ok(PersonaOverlay::Listener),
            _ => Err(()),
        }
    }
}
