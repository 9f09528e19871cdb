use serde::{Deserialize, Serialize};

use crate::media::VideoSource;

/// Whether the video feed is running or frozen for annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Live,
    /// Frozen for annotation. The gate never leaves this state on its own.
    Paused,
}

/// Result of a pause request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    /// The gate moved from live to paused.
    Paused,
    /// The gate was already paused; nothing changed.
    AlreadyPaused,
    /// The source has no stream or has ended, so the gate stays live.
    SourceUnavailable,
}

/// Gate deciding whether pointer clicks become points.
#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    state: PlaybackState,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Points are accepted only on a paused frame.
    pub fn can_accept_point(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Pauses the source and closes the gate over the frozen frame.
    pub fn pause(&mut self, source: &mut dyn VideoSource) -> PauseOutcome {
        if self.state == PlaybackState::Paused {
            return PauseOutcome::AlreadyPaused;
        }
        if !source.is_available() || source.is_ended() {
            return PauseOutcome::SourceUnavailable;
        }

        source.pause();
        self.state = PlaybackState::Paused;
        PauseOutcome::Paused
    }
}
