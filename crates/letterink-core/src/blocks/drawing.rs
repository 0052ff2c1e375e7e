//! Drawing block: a surface-local collection of finalized ink strokes.

use super::{BlockId, SerializableColor};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// A finalized freehand ink stroke.
///
/// Points are in the local coordinate space of the drawing surface that owns
/// the stroke and are appended in temporal order, never reordered. Geometry
/// is immutable once the stroke lands in a [`DrawingBlock`]; erasing removes
/// whole strokes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Ink color.
    pub color: SerializableColor,
    /// Stroke width in local-space pixels.
    pub thickness: f64,
    /// Sample points in capture order.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create an empty stroke with the given ink settings.
    pub fn new(color: SerializableColor, thickness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            color,
            thickness,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Renderer-facing polyline path. Zero- and one-point strokes produce a
    /// degenerate path and must still render without error.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(first) = self.points.first() {
            path.move_to(*first);
            for point in self.points.iter().skip(1) {
                path.line_to(*point);
            }
        }
        path
    }

    /// Check whether any sample point lies within `radius` of `point`
    /// (Euclidean distance).
    pub fn any_point_within(&self, point: Point, radius: f64) -> bool {
        let radius_sq = radius * radius;
        self.points.iter().any(|p| {
            let dx = p.x - point.x;
            let dy = p.y - point.y;
            dx * dx + dy * dy < radius_sq
        })
    }
}

/// A drawing block holding zero or more finalized strokes.
///
/// The stroke list is only ever appended-to (finalized stroke) or filtered
/// (erase); the in-progress stroke lives in the stroke builder, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingBlock {
    pub id: BlockId,
    pub strokes: Vec<Stroke>,
}

impl DrawingBlock {
    /// Create a new empty drawing block.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            strokes: Vec::new(),
        }
    }

    pub fn append_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Bounding box of all stroke points, in surface-local coordinates.
    pub fn bounds(&self) -> Rect {
        let mut points = self.strokes.iter().flat_map(|s| s.points.iter());
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };

        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;
        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }
}

impl Default for DrawingBlock {
    fn default() -> Self {
        Self::new()
    }
}
