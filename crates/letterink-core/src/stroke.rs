//! Stroke builder: accumulates one in-progress ink stroke per draw gesture.

use crate::blocks::{SerializableColor, Stroke};
use kurbo::Point;

/// State of the builder: `Idle -> Building -> Idle` per draw gesture.
#[derive(Debug, Clone, Default)]
enum BuilderState {
    #[default]
    Idle,
    Building(Stroke),
}

/// Builds one stroke at a time from mapped pointer samples.
///
/// Points arrive already in surface-local space and are appended raw, with
/// no deduplication or smoothing, so capture density stays in parity with
/// eraser hit-testing. The in-progress stroke is transient; it reaches the
/// document only through [`finish`](StrokeBuilder::finish).
#[derive(Debug, Clone, Default)]
pub struct StrokeBuilder {
    state: BuilderState,
}

impl StrokeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new stroke, capturing the current ink settings. Any stroke
    /// still in progress is discarded.
    pub fn begin(&mut self, color: SerializableColor, thickness: f64) {
        if matches!(self.state, BuilderState::Building(_)) {
            log::warn!("stroke begin while building, discarding previous stroke");
        }
        self.state = BuilderState::Building(Stroke::new(color, thickness));
    }

    /// Append a local-space sample point. A sample before `begin` is a
    /// defensive no-op.
    pub fn push(&mut self, point: Point) {
        match &mut self.state {
            BuilderState::Building(stroke) => stroke.points.push(point),
            BuilderState::Idle => log::warn!("stroke sample before begin, ignored"),
        }
    }

    /// End the gesture. Returns the stroke if at least one point was
    /// recorded (a pure tap with no mapped samples yields nothing); the
    /// transient state is discarded either way.
    pub fn finish(&mut self) -> Option<Stroke> {
        match std::mem::take(&mut self.state) {
            BuilderState::Building(stroke) if !stroke.is_empty() => Some(stroke),
            _ => None,
        }
    }

    /// Discard the in-progress stroke without committing anything.
    pub fn cancel(&mut self) {
        self.state = BuilderState::Idle;
    }

    pub fn is_building(&self) -> bool {
        matches!(self.state, BuilderState::Building(_))
    }
}
