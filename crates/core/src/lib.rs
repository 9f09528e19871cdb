//! Core library for the Angle Annotator application.
//!
//! A user pauses a live video feed, clicks an ordered sequence of points on
//! the frozen frame and sees the interior angles of the resulting polyline.
//! This crate holds every piece of state behind that interaction: the point
//! ledger and its derived angles, the playback gate that decides when clicks
//! count, and the capture controller that accumulates recorded media. Frame
//! acquisition, encoding and drawing stay with the host and are reached
//! through the traits in [`media`] and [`overlay`].

pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ledger;
pub mod media;
pub mod overlay;
pub mod playback;
pub mod session;

pub use capture::{CaptureController, CaptureState};
pub use config::{AppConfig, CaptureConfig, ChunkRetention, OverlayConfig};
pub use error::{AnnotatorError, Result};
pub use geometry::{angle_at, polyline_angles, Point};
pub use ledger::PointLedger;
pub use media::{MediaLibrary, RecordedMedia, VideoSource};
pub use overlay::{AngleLabel, Marker, OverlayFrame, OverlayRenderer, Segment};
pub use playback::{PauseOutcome, PlaybackGate, PlaybackState};
pub use session::{AnnotationSession, ControlState, EventOutcome, SessionEvent};
