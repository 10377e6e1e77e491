//! Cubic bezier strokes stored as `control, anchor, control` triplets.
//!
//! Every on-curve anchor is surrounded by its two handles, so a stroke with `k` anchors
//! holds `3k` points. Consecutive triplets form cubic segments; a closed stroke adds a
//! segment from the last anchor back to the first.

use kurbo::{CubicBez, ParamCurve, ParamCurveArclen, ParamCurveNearest};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{LayerModeError, LayerModeResult};

/// Maximum number of midpoint subdivisions per segment.
pub const MAX_SUBDIVISION_DEPTH: u32 = 10;

/// Handle length of a quarter circle approximated by one cubic, relative to the radius.
const CIRCLE_MAGIC: f64 = 4.0 * (std::f64::consts::SQRT_2 - 1.0) / 3.0;

/// Role of a stored point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorKind {
    /// On-curve point.
    Anchor,
    /// Off-curve handle.
    Control,
}

/// A stored stroke point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Whether the point lies on the curve.
    pub kind: AnchorKind,
    /// Position.
    pub position: Point,
}

impl Anchor {
    fn anchor(position: Point) -> Self {
        Self {
            kind: AnchorKind::Anchor,
            position,
        }
    }

    fn control(position: Point) -> Self {
        Self {
            kind: AnchorKind::Control,
            position,
        }
    }
}

/// Closest point of a stroke to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeNearest {
    /// Index into [`BezierStroke::segments`].
    pub segment: usize,
    /// Curve parameter within the segment.
    pub t: f64,
    /// Position on the stroke.
    pub point: Point,
    /// Distance from the query point.
    pub distance: f64,
}

/// An open or closed cubic bezier stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierStroke {
    anchors: Vec<Anchor>,
    closed: bool,
}

impl BezierStroke {
    /// Stroke consisting of a single anchor at `start` with collapsed handles.
    pub fn new_moveto(start: Point) -> Self {
        Self {
            anchors: vec![
                Anchor::control(start),
                Anchor::anchor(start),
                Anchor::control(start),
            ],
            closed: false,
        }
    }

    /// Closed four-segment approximation of an ellipse rotated by `angle` radians.
    pub fn new_ellipse(center: Point, radius_x: f64, radius_y: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = Vec2::new(radius_x * cos, -radius_x * sin);
        let dy = Vec2::new(radius_y * sin, radius_y * cos);

        let start = center + dx;
        let mut stroke = Self::new_moveto(start);
        stroke.anchors[0].position = start - dy * CIRCLE_MAGIC;

        let quarter = |from: Point, to_offset: Vec2, from_handle: Vec2, to_handle: Vec2| {
            let end = center + to_offset;
            (from + from_handle * CIRCLE_MAGIC, end + to_handle * CIRCLE_MAGIC, end)
        };
        let mut from = start;
        for (to_offset, from_handle, to_handle) in [(dy, dy, dx), (-dx, -dx, dy), (-dy, -dy, -dx)] {
            let (c1, c2, end) = quarter(from, to_offset, from_handle, to_handle);
            stroke.push_cubic(c1, c2, end);
            from = end;
        }
        if let Some(last) = stroke.anchors.last_mut() {
            last.position = from + dx * CIRCLE_MAGIC;
        }
        stroke.closed = true;
        stroke
    }

    /// Stored points in `control, anchor, control` order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Whether the stroke returns to its first anchor.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self, what: &str) -> LayerModeResult<()> {
        if self.closed {
            return Err(LayerModeError::geometry(format!(
                "cannot {what}: stroke is closed"
            )));
        }
        Ok(())
    }

    fn push_cubic(&mut self, control1: Point, control2: Point, end: Point) {
        if let Some(last) = self.anchors.last_mut() {
            last.position = control1;
        }
        self.anchors.extend([
            Anchor::control(control2),
            Anchor::anchor(end),
            Anchor::control(end),
        ]);
    }

    /// Straight segment to `end`.
    pub fn line_to(&mut self, end: Point) -> LayerModeResult<()> {
        self.check_open("add a line")?;
        self.anchors.extend([
            Anchor::control(end),
            Anchor::anchor(end),
            Anchor::control(end),
        ]);
        Ok(())
    }

    /// Quadratic segment through `control` to `end`, stored as the equivalent cubic.
    pub fn conic_to(&mut self, control: Point, end: Point) -> LayerModeResult<()> {
        self.check_open("add a conic")?;
        let n = self.anchors.len();
        if n < 2 {
            return Err(LayerModeError::geometry("conic needs a start anchor"));
        }
        let start = self.anchors[n - 2].position;
        let c1 = start.lerp(control, 2.0 / 3.0);
        let c2 = end.lerp(control, 2.0 / 3.0);
        self.push_cubic(c1, c2, end);
        Ok(())
    }

    /// Cubic segment with handles `control1`, `control2` to `end`.
    pub fn cubic_to(
        &mut self,
        control1: Point,
        control2: Point,
        end: Point,
    ) -> LayerModeResult<()> {
        self.check_open("add a cubic")?;
        self.push_cubic(control1, control2, end);
        Ok(())
    }

    /// Close the stroke.
    ///
    /// A final straight segment that only returns to the start point is folded into
    /// the closing segment.
    pub fn close(&mut self) {
        let n = self.anchors.len();
        if n > 3 {
            let head = self.anchors[0].position;
            let redundant = self.anchors[1].position == head
                && head == self.anchors[n - 1].position
                && self.anchors[n - 1].position == self.anchors[n - 2].position;
            if redundant {
                self.anchors.truncate(n - 2);
                if let Some(control) = self.anchors.pop() {
                    self.anchors[0] = control;
                }
            }
        }
        self.closed = true;
    }

    /// Reverse the direction; closed strokes keep their first anchor.
    pub fn reverse(&mut self) {
        self.anchors.reverse();
        if self.closed && self.anchors.len() >= 3 {
            self.anchors.rotate_right(3);
        }
    }

    fn segment_points(&self) -> Vec<[Point; 4]> {
        let mut segments = Vec::new();
        let Some(first) = self.anchors.iter().position(|a| a.kind == AnchorKind::Anchor) else {
            return segments;
        };

        let mut current = [Point::ZERO; 4];
        let mut count = 0;
        for anchor in &self.anchors[first..] {
            current[count] = anchor.position;
            count += 1;
            if count == 4 {
                segments.push(current);
                current[0] = current[3];
                count = 1;
            }
        }

        if self.closed {
            while count < 3 {
                current[count] = self.anchors[0].position;
                count += 1;
            }
            if let Some(second) = self.anchors.get(1) {
                current[3] = second.position;
            }
            segments.push(current);
        }
        segments
    }

    /// Cubic segments in stroke order.
    pub fn segments(&self) -> Vec<CubicBez> {
        self.segment_points()
            .into_iter()
            .map(|[p0, p1, p2, p3]| CubicBez::new(p0, p1, p2, p3))
            .collect()
    }

    /// Polyline approximation within `precision`, plus the closed flag.
    ///
    /// `None` when the stroke has no complete segment.
    pub fn interpolate(&self, precision: f64) -> Option<(Vec<Point>, bool)> {
        let segments = self.segments();
        let last = segments.last()?.p3;
        let mut points = Vec::new();
        for segment in &segments {
            interpolate_bezier(segment, precision, &mut points);
        }
        points.push(last);
        Some((points, self.closed))
    }

    /// Arc length of the whole stroke.
    pub fn length(&self, accuracy: f64) -> f64 {
        self.segments().iter().map(|s| s.arclen(accuracy)).sum()
    }

    /// Point of the stroke closest to `p`.
    pub fn nearest_point(&self, p: Point, accuracy: f64) -> Option<StrokeNearest> {
        self.segments()
            .iter()
            .enumerate()
            .map(|(segment, curve)| {
                let nearest = curve.nearest(p, accuracy);
                StrokeNearest {
                    segment,
                    t: nearest.t,
                    point: curve.eval(nearest.t),
                    distance: nearest.distance_sq.sqrt(),
                }
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn is_straight(segment: &CubicBez, precision: f64) -> bool {
    let ideal1 = segment.p0.lerp(segment.p3, 1.0 / 3.0);
    let ideal2 = segment.p0.lerp(segment.p3, 2.0 / 3.0);
    manhattan(segment.p1, ideal1) < precision && manhattan(segment.p2, ideal2) < precision
}

fn subdivide_into(segment: &CubicBez, precision: f64, depth: u32, out: &mut Vec<Point>) {
    let (first, second) = segment.subdivide();
    for half in [first, second] {
        if depth > 1 && !is_straight(&half, precision) {
            subdivide_into(&half, precision, depth - 1, out);
        } else {
            out.extend([half.p0, half.p1, half.p2]);
        }
    }
}

/// Append a polyline approximation of `segment` to `out`, excluding its end point.
///
/// The segment is halved repeatedly; a half whose handles lie within `precision`
/// (Manhattan distance) of the thirds of its chord is emitted as its start point and
/// two handles.
pub fn interpolate_bezier(segment: &CubicBez, precision: f64, out: &mut Vec<Point>) {
    subdivide_into(segment, precision, MAX_SUBDIVISION_DEPTH, out);
}

#[cfg(test)]
#[path = "../../tests/unit/path/bezier.rs"]
mod tests;
