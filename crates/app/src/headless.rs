use angle_annotator_core::{OverlayFrame, OverlayRenderer, RecordedMedia, VideoSource};

/// Stand-in for a camera-backed video element.
#[derive(Debug)]
pub struct HeadlessVideo {
    has_stream: bool,
    paused: bool,
    now_playing: Option<String>,
}

impl HeadlessVideo {
    pub fn new(has_stream: bool) -> Self {
        Self {
            has_stream,
            paused: false,
            now_playing: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }
}

impl VideoSource for HeadlessVideo {
    fn is_available(&self) -> bool {
        self.has_stream || self.now_playing.is_some()
    }

    fn is_ended(&self) -> bool {
        false
    }

    fn pause(&mut self) {
        self.paused = true;
        tracing::info!("video paused");
    }

    fn load_recording(&mut self, url: &str, media: &RecordedMedia) {
        tracing::info!(url, mime = %media.mime_type, bytes = media.len(), "playing recording");
        self.now_playing = Some(url.to_string());
        self.paused = false;
    }
}

/// Renderer that reports each overlay through the log.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: usize,
}

impl LogRenderer {
    pub fn frames_rendered(&self) -> usize {
        self.frames
    }
}

impl OverlayRenderer for LogRenderer {
    fn render(&mut self, frame: &OverlayFrame) {
        self.frames += 1;
        let labels: Vec<&str> = frame.labels.iter().map(|label| label.text.as_str()).collect();
        tracing::info!(
            markers = frame.markers.len(),
            segments = frame.segments.len(),
            ?labels,
            "overlay updated"
        );
    }
}
