//! The annotation session owns every piece of mutable state and wires it to
//! the host collaborators.
//!
//! All mutations happen through the methods below, one event at a time. Any
//! change to the point ledger recomputes its angles and then hands a fresh
//! [`OverlayFrame`] to the renderer before the method returns.

use serde::{Deserialize, Serialize};

use crate::{
    capture::{CaptureController, CaptureState},
    config::AppConfig,
    geometry::Point,
    ledger::PointLedger,
    media::{MediaLibrary, VideoSource},
    overlay::{OverlayFrame, OverlayRenderer},
    playback::{PauseOutcome, PlaybackGate, PlaybackState},
    AnnotatorError, Result,
};

/// Discrete input delivered to the session by the UI or a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Click { x: f64, y: f64 },
    Pause,
    Reset,
    StartRecording,
    StopRecording,
    Chunk { bytes: Vec<u8> },
    PlayRecording,
    DiscardRecording,
}

/// What a successfully handled event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    PointAdded { index: usize },
    /// The click arrived while the feed was live.
    PointIgnored,
    Pause(PauseOutcome),
    Reset,
    RecordingStarted,
    RecordingStopped,
    ChunkStored,
    /// An empty chunk was dropped.
    ChunkSkipped,
    RecordingDiscarded,
    /// URL of the loaded recording, or `None` when nothing was recorded.
    PlaybackLoaded(Option<String>),
}

/// Which user actions are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub start_recording: bool,
    pub stop_recording: bool,
    pub play_recording: bool,
    pub discard_recording: bool,
    pub pause: bool,
    pub reset: bool,
}

#[derive(Debug)]
pub struct AnnotationSession<V, R> {
    config: AppConfig,
    video: V,
    renderer: R,
    ledger: PointLedger,
    gate: PlaybackGate,
    capture: CaptureController,
    library: MediaLibrary,
    now_playing: Option<String>,
}

impl<V: VideoSource, R: OverlayRenderer> AnnotationSession<V, R> {
    pub fn new(config: AppConfig, video: V, renderer: R) -> Self {
        let capture = CaptureController::new(config.capture.clone());
        Self {
            config,
            video,
            renderer,
            ledger: PointLedger::new(),
            gate: PlaybackGate::new(),
            capture,
            library: MediaLibrary::new(),
            now_playing: None,
        }
    }

    /// Dispatches a single event to the matching operation.
    pub fn handle(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        match event {
            SessionEvent::Click { x, y } => Ok(match self.add_point(Point::new(x, y)) {
                Some(index) => EventOutcome::PointAdded { index },
                None => EventOutcome::PointIgnored,
            }),
            SessionEvent::Pause => self.pause().map(EventOutcome::Pause),
            SessionEvent::Reset => {
                self.reset_points();
                Ok(EventOutcome::Reset)
            }
            SessionEvent::StartRecording => {
                self.start_recording().map(|_| EventOutcome::RecordingStarted)
            }
            SessionEvent::StopRecording => {
                self.stop_recording().map(|_| EventOutcome::RecordingStopped)
            }
            SessionEvent::Chunk { bytes } => self.push_chunk(bytes).map(|stored| {
                if stored {
                    EventOutcome::ChunkStored
                } else {
                    EventOutcome::ChunkSkipped
                }
            }),
            SessionEvent::PlayRecording => self.play_recording().map(EventOutcome::PlaybackLoaded),
            SessionEvent::DiscardRecording => {
                self.discard_recording().map(|_| EventOutcome::RecordingDiscarded)
            }
        }
    }

    /// Places a point on the paused frame. Returns its index, or `None` when
    /// the feed is still live.
    pub fn add_point(&mut self, point: Point) -> Option<usize> {
        if !self.gate.can_accept_point() {
            tracing::debug!(x = point.x, y = point.y, "ignoring click on live feed");
            return None;
        }

        self.ledger.push(point);
        let index = self.ledger.len() - 1;
        tracing::debug!(index, x = point.x, y = point.y, "point added");
        self.notify_renderer();
        Some(index)
    }

    /// Clears every point and angle. Always permitted.
    pub fn reset_points(&mut self) {
        self.ledger.reset();
        tracing::debug!("points reset");
        self.notify_renderer();
    }

    /// Freezes the video for annotation. Disabled while recording.
    pub fn pause(&mut self) -> Result<PauseOutcome> {
        if self.capture.is_recording() {
            return Err(self.reject(AnnotatorError::transition("recording", "pause playback")));
        }

        let outcome = self.gate.pause(&mut self.video);
        tracing::debug!(?outcome, "pause requested");
        Ok(outcome)
    }

    pub fn start_recording(&mut self) -> Result<()> {
        let source_active = self.video.is_available();
        self.capture
            .start(source_active)
            .map_err(|err| self.reject(err))
    }

    pub fn stop_recording(&mut self) -> Result<()> {
        self.capture.stop().map_err(|err| self.reject(err))
    }

    /// Stores a chunk pushed by the capture collaborator. Returns `false`
    /// when an empty chunk was skipped.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> Result<bool> {
        self.capture.push_chunk(chunk).map_err(|err| self.reject(err))
    }

    /// Drops every recorded chunk so the next playback has nothing to load.
    /// A clip already handed to the video source keeps playing.
    pub fn discard_recording(&mut self) -> Result<()> {
        self.capture.clear().map_err(|err| self.reject(err))?;
        tracing::debug!("recorded chunks discarded");
        Ok(())
    }

    /// Assembles the recorded chunks and loads them into the video source.
    ///
    /// Returns the playback URL, or `None` if nothing has been recorded. The
    /// previously loaded recording, if any, is revoked.
    pub fn play_recording(&mut self) -> Result<Option<String>> {
        if self.capture.is_recording() {
            return Err(self.reject(AnnotatorError::transition("recording", "play a recording")));
        }

        let Some(media) = self.capture.assemble()? else {
            tracing::debug!("no recorded chunks to play");
            return Ok(None);
        };

        if let Some(previous) = self.now_playing.take() {
            self.library.revoke(&previous);
        }

        let bytes = media.len();
        let url = self.library.register(media);
        if let Some(media) = self.library.resolve(&url) {
            self.video.load_recording(&url, media);
        }
        tracing::info!(%url, bytes, "loaded recording for playback");
        self.now_playing = Some(url.clone());
        Ok(Some(url))
    }

    pub fn controls(&self) -> ControlState {
        let recording = self.capture.is_recording();
        ControlState {
            start_recording: !recording,
            stop_recording: recording,
            play_recording: !recording,
            discard_recording: !recording,
            pause: !recording,
            reset: true,
        }
    }

    /// Current overlay, identical to the last frame handed to the renderer.
    pub fn overlay(&self) -> OverlayFrame {
        OverlayFrame::project(&self.ledger, &self.config.overlay)
    }

    pub fn ledger(&self) -> &PointLedger {
        &self.ledger
    }

    pub fn points(&self) -> &[Point] {
        self.ledger.points()
    }

    pub fn angles(&self) -> &[f64] {
        self.ledger.angles()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.gate.state()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn capture(&self) -> &CaptureController {
        &self.capture
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn notify_renderer(&mut self) {
        let frame = self.overlay();
        self.renderer.render(&frame);
    }

    fn reject(&self, err: AnnotatorError) -> AnnotatorError {
        tracing::warn!(error = %err, "action rejected");
        err
    }
}
