use serde::{Deserialize, Serialize};

use crate::{
    config::{CaptureConfig, ChunkRetention},
    media::RecordedMedia,
    AnnotatorError, Result,
};

/// Whether recorded media is currently being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
}

impl CaptureState {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

/// Collects the encoded chunks pushed by the media capture collaborator
/// between `start` and `stop`.
///
/// Out-of-order transitions and stray chunks are rejected with an error and
/// leave the controller untouched.
#[derive(Debug, Default)]
pub struct CaptureController {
    settings: CaptureConfig,
    state: CaptureState,
    chunks: Vec<Vec<u8>>,
}

impl CaptureController {
    pub fn new(settings: CaptureConfig) -> Self {
        Self {
            settings,
            state: CaptureState::Idle,
            chunks: Vec::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    pub fn settings(&self) -> &CaptureConfig {
        &self.settings
    }

    /// Chunks captured so far, in arrival order.
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Begins a recording. `source_active` reports whether the host has a
    /// stream to record from.
    pub fn start(&mut self, source_active: bool) -> Result<()> {
        if self.is_recording() {
            return Err(AnnotatorError::transition(
                self.state.label(),
                "start recording",
            ));
        }
        if !source_active {
            return Err(AnnotatorError::NoMediaSource);
        }

        if self.settings.retention == ChunkRetention::ResetOnStart {
            self.chunks.clear();
        }
        self.state = CaptureState::Recording;
        tracing::debug!(retained = self.chunks.len(), "recording started");
        Ok(())
    }

    /// Ends the recording and freezes the chunk sequence for assembly.
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_recording() {
            return Err(AnnotatorError::transition(
                self.state.label(),
                "stop recording",
            ));
        }

        self.state = CaptureState::Idle;
        tracing::debug!(chunks = self.chunks.len(), "recording stopped");
        Ok(())
    }

    /// Accepts a chunk from the capture collaborator. Returns `false` when
    /// the chunk was empty and dropped.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> Result<bool> {
        if !self.is_recording() {
            return Err(AnnotatorError::UnexpectedChunk { len: chunk.len() });
        }
        if chunk.is_empty() && self.settings.skip_empty_chunks {
            tracing::trace!("skipping empty chunk");
            return Ok(false);
        }

        tracing::trace!(len = chunk.len(), "chunk received");
        self.chunks.push(chunk);
        Ok(true)
    }

    /// Assembles the frozen chunk sequence into a playable blob.
    ///
    /// Returns `None` when nothing has been recorded yet.
    pub fn assemble(&self) -> Result<Option<RecordedMedia>> {
        if self.is_recording() {
            return Err(AnnotatorError::transition(
                self.state.label(),
                "assemble a recording",
            ));
        }
        if self.chunks.is_empty() {
            return Ok(None);
        }

        Ok(Some(RecordedMedia::assemble(
            self.settings.mime_type.clone(),
            &self.chunks,
        )))
    }

    /// Drops every stored chunk. Only allowed while idle.
    pub fn clear(&mut self) -> Result<()> {
        if self.is_recording() {
            return Err(AnnotatorError::transition(
                self.state.label(),
                "clear recorded chunks",
            ));
        }
        self.chunks.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(retention: ChunkRetention) -> CaptureController {
        CaptureController::new(CaptureConfig {
            retention,
            ..Default::default()
        })
    }

    #[test]
    fn records_chunks_between_start_and_stop() {
        let mut capture = CaptureController::default();
        capture.start(true).unwrap();
        capture.push_chunk(vec![1, 2]).unwrap();
        capture.push_chunk(vec![3]).unwrap();
        capture.stop().unwrap();

        assert_eq!(capture.state(), CaptureState::Idle);
        let media = capture.assemble().unwrap().unwrap();
        assert_eq!(media.bytes, vec![1, 2, 3]);
        assert_eq!(media.mime_type, "video/webm");
    }

    #[test]
    fn double_start_is_rejected() {
        let mut capture = CaptureController::default();
        capture.start(true).unwrap();
        capture.push_chunk(vec![9]).unwrap();

        let err = capture.start(true).unwrap_err();
        assert!(matches!(err, AnnotatorError::InvalidStateTransition { .. }));
        assert!(capture.is_recording());
        assert_eq!(capture.chunks(), &[vec![9]]);
    }

    #[test]
    fn stop_while_idle_is_rejected() {
        let mut capture = CaptureController::default();
        let err = capture.stop().unwrap_err();
        assert!(matches!(
            err,
            AnnotatorError::InvalidStateTransition { state: "idle", .. }
        ));
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[test]
    fn chunk_while_idle_is_rejected() {
        let mut capture = CaptureController::default();
        let err = capture.push_chunk(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, AnnotatorError::UnexpectedChunk { len: 3 }));
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.chunks().is_empty());
    }

    #[test]
    fn start_requires_active_source() {
        let mut capture = CaptureController::default();
        let err = capture.start(false).unwrap_err();
        assert!(matches!(err, AnnotatorError::NoMediaSource));
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[test]
    fn empty_chunks_are_skipped_by_default() {
        let mut capture = CaptureController::default();
        capture.start(true).unwrap();
        assert!(!capture.push_chunk(Vec::new()).unwrap());
        assert!(capture.push_chunk(vec![1]).unwrap());
        assert_eq!(capture.chunks(), &[vec![1]]);

        let mut keep_all = CaptureController::new(CaptureConfig {
            skip_empty_chunks: false,
            ..Default::default()
        });
        keep_all.start(true).unwrap();
        assert!(keep_all.push_chunk(Vec::new()).unwrap());
        assert_eq!(keep_all.chunks().len(), 1);
    }

    #[test]
    fn reset_on_start_discards_previous_recording() {
        let mut capture = controller(ChunkRetention::ResetOnStart);
        capture.start(true).unwrap();
        capture.push_chunk(vec![1]).unwrap();
        capture.stop().unwrap();

        capture.start(true).unwrap();
        capture.push_chunk(vec![2]).unwrap();
        capture.stop().unwrap();

        assert_eq!(capture.assemble().unwrap().unwrap().bytes, vec![2]);
    }

    #[test]
    fn accumulate_keeps_previous_recording() {
        let mut capture = controller(ChunkRetention::Accumulate);
        capture.start(true).unwrap();
        capture.push_chunk(vec![1]).unwrap();
        capture.stop().unwrap();

        capture.start(true).unwrap();
        capture.push_chunk(vec![2]).unwrap();
        capture.stop().unwrap();

        assert_eq!(capture.assemble().unwrap().unwrap().bytes, vec![1, 2]);
    }

    #[test]
    fn nothing_to_assemble_before_recording() {
        let capture = CaptureController::default();
        assert!(capture.assemble().unwrap().is_none());
    }

    #[test]
    fn assembling_or_clearing_mid_recording_is_rejected() {
        let mut capture = CaptureController::default();
        capture.start(true).unwrap();
        capture.push_chunk(vec![4]).unwrap();

        assert!(capture.assemble().is_err());
        assert!(capture.clear().is_err());
        assert_eq!(capture.chunks().len(), 1);

        capture.stop().unwrap();
        capture.clear().unwrap();
        assert!(capture.chunks().is_empty());
    }
}
