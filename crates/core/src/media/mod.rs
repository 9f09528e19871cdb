//! Seams towards the host platform's media layer.
//!
//! The core never acquires frames or encodes video itself. It talks to a
//! [`VideoSource`] and stores assembled recordings in a [`MediaLibrary`] so
//! that the video source can dereference them by URL.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// URL scheme prefix handed out for assembled recordings.
pub const RECORDING_URL_PREFIX: &str = "media://recording/";

/// The element showing the live feed or a recorded clip.
pub trait VideoSource {
    /// Whether the source currently holds a stream that can be captured.
    fn is_available(&self) -> bool;

    /// Whether playback has stopped or reached its end.
    fn is_ended(&self) -> bool;

    /// Freezes the current frame.
    fn pause(&mut self);

    /// Replaces the live stream with a recorded clip and starts playing it
    /// with user controls enabled.
    fn load_recording(&mut self, url: &str, media: &RecordedMedia);
}

/// A single playable blob assembled from recorded chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMedia {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl RecordedMedia {
    /// Concatenates chunks in arrival order.
    pub fn assemble(mime_type: impl Into<String>, chunks: &[Vec<u8>]) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: chunks.concat(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Registry of assembled recordings addressable by URL.
#[derive(Debug, Default)]
pub struct MediaLibrary {
    entries: BTreeMap<u64, RecordedMedia>,
    next_id: u64,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the media and returns the URL it can be resolved under.
    pub fn register(&mut self, media: RecordedMedia) -> String {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, media);
        format!("{RECORDING_URL_PREFIX}{id}")
    }

    pub fn resolve(&self, url: &str) -> Option<&RecordedMedia> {
        let id = url.strip_prefix(RECORDING_URL_PREFIX)?.parse::<u64>().ok()?;
        self.entries.get(&id)
    }

    /// Drops a registered recording, returning it if it was present.
    pub fn revoke(&mut self, url: &str) -> Option<RecordedMedia> {
        let id = url.strip_prefix(RECORDING_URL_PREFIX)?.parse::<u64>().ok()?;
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
