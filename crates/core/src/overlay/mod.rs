use serde::{Deserialize, Serialize};

use crate::{config::OverlayConfig, geometry::Point, ledger::PointLedger};

/// Consumer of overlay frames. Implementations draw markers, segments and
/// labels on top of the video surface.
pub trait OverlayRenderer {
    fn render(&mut self, frame: &OverlayFrame);
}

/// Square marker drawn over a placed point; `origin` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub index: usize,
    pub origin: Point,
    pub size: f64,
}

/// Line between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Degree label anchored next to the vertex it measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleLabel {
    pub vertex: usize,
    pub anchor: Point,
    pub degrees: f64,
    pub text: String,
}

/// Everything a renderer needs to draw the current measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
    pub labels: Vec<AngleLabel>,
}

impl OverlayFrame {
    /// Projects the ledger into drawable primitives.
    pub fn project(ledger: &PointLedger, config: &OverlayConfig) -> Self {
        let points = ledger.points();
        let radius = config.marker_radius;

        let markers = points
            .iter()
            .enumerate()
            .map(|(index, point)| Marker {
                index,
                origin: point.offset(-radius, -radius),
                size: radius * 2.0,
            })
            .collect();

        let segments = points
            .windows(2)
            .map(|pair| Segment {
                from: pair[0],
                to: pair[1],
            })
            .collect();

        let labels = ledger
            .vertex_angles()
            .enumerate()
            .map(|(i, (vertex, degrees))| AngleLabel {
                vertex: i + 1,
                anchor: vertex.offset(config.label_offset, config.label_offset),
                degrees,
                text: format_degrees(degrees, config.label_precision),
            })
            .collect();

        Self {
            markers,
            segments,
            labels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Formats an angle the way labels show it, e.g. `90.00°`.
pub fn format_degrees(degrees: f64, precision: usize) -> String {
    format!("{degrees:.precision$}°")
}
