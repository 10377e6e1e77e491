//! Editable cage: a closed polygon of source points and their deformed destinations.
//!
//! Every mutating call leaves `edge_scaling_factor` and `edge_normal` consistent with the
//! current (displaced) positions.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect, Roi, Vec2};
use crate::foundation::error::{LayerModeError, LayerModeResult};

/// What a drag of the selected points edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CageMode {
    /// Edit the cage itself: source and destination move together.
    #[default]
    CageChange,
    /// Deform the image: only destinations move.
    Deform,
}

/// One cage vertex and the derived data of the edge starting at it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CagePoint {
    /// Position on the undeformed cage.
    pub src_point: Point,
    /// Position on the deformed cage.
    pub dest_point: Point,
    /// Destination edge length over source edge length.
    pub edge_scaling_factor: f64,
    /// Unit normal of the destination edge.
    pub edge_normal: Vec2,
    /// Whether the point takes part in drags.
    pub selected: bool,
}

impl CagePoint {
    fn at(p: Point) -> Self {
        Self {
            src_point: p,
            dest_point: p,
            edge_scaling_factor: 1.0,
            edge_normal: Vec2::ZERO,
            selected: false,
        }
    }
}

/// Cage polygon plus the pending displacement of its selected points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CageConfig {
    points: Vec<CagePoint>,
    mode: CageMode,
    displacement: Vec2,
}

impl CageConfig {
    /// Empty cage edited in `mode`.
    pub fn new(mode: CageMode) -> Self {
        Self {
            points: Vec::new(),
            mode,
            displacement: Vec2::ZERO,
        }
    }

    /// Current editing mode.
    pub fn mode(&self) -> CageMode {
        self.mode
    }

    /// Switch editing mode; a pending displacement is dropped.
    pub fn set_mode(&mut self, mode: CageMode) {
        self.mode = mode;
        self.reset_displacement();
    }

    /// Stored points, without the pending displacement.
    pub fn points(&self) -> &[CagePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the cage has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pending displacement of the selected points.
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Source position of point `i`, including the pending displacement.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn src_position(&self, i: usize) -> Point {
        let point = &self.points[i];
        if point.selected && self.mode == CageMode::CageChange {
            point.src_point + self.displacement
        } else {
            point.src_point
        }
    }

    /// Destination position of point `i`, including the pending displacement.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn dest_position(&self, i: usize) -> Point {
        let point = &self.points[i];
        if point.selected {
            point.dest_point + self.displacement
        } else {
            point.dest_point
        }
    }

    /// Append a point at `p`.
    pub fn add_point(&mut self, p: Point) {
        self.points.push(CagePoint::at(p));
        self.recompute();
    }

    /// Insert a point at `p` before position `index` (`index == len` appends).
    pub fn insert_point(&mut self, index: usize, p: Point) -> LayerModeResult<()> {
        if index > self.points.len() {
            return Err(LayerModeError::geometry(format!(
                "cannot insert cage point at {index}: cage has {} points",
                self.points.len()
            )));
        }
        self.points.insert(index, CagePoint::at(p));
        self.recompute();
        Ok(())
    }

    /// Remove the most recently added point, if any.
    pub fn remove_last_point(&mut self) {
        self.points.pop();
        self.recompute();
    }

    /// Remove every selected point.
    pub fn remove_selected_points(&mut self) {
        self.points.retain(|p| !p.selected);
        self.recompute();
    }

    /// Reverse the point order.
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.recompute();
    }

    /// Reverse the point order when the source polygon has a positive shoelace sum.
    ///
    /// Returns `true` when the cage was reversed.
    pub fn reverse_if_needed(&mut self) -> bool {
        let n = self.points.len();
        let sum: f64 = (0..n)
            .map(|i| {
                let p1 = self.points[i].src_point;
                let p2 = self.points[(i + 1) % n].src_point;
                p1.x * p2.y - p2.x * p1.y
            })
            .sum();
        if sum > 0.0 {
            self.reverse();
            true
        } else {
            false
        }
    }

    fn check_index(&self, index: usize) -> LayerModeResult<()> {
        if index >= self.points.len() {
            return Err(LayerModeError::geometry(format!(
                "cage point {index} out of range ({} points)",
                self.points.len()
            )));
        }
        Ok(())
    }

    /// Select point `index` alone.
    pub fn select_point(&mut self, index: usize) -> LayerModeResult<()> {
        self.check_index(index)?;
        for (i, p) in self.points.iter_mut().enumerate() {
            p.selected = i == index;
        }
        self.recompute();
        Ok(())
    }

    /// Flip the selection of point `index`.
    pub fn toggle_selection(&mut self, index: usize) -> LayerModeResult<()> {
        self.check_index(index)?;
        self.points[index].selected = !self.points[index].selected;
        self.recompute();
        Ok(())
    }

    /// Select exactly the points inside `area`.
    ///
    /// Source positions are tested in [`CageMode::CageChange`], destinations otherwise.
    pub fn select_area(&mut self, area: Rect) {
        self.deselect_all();
        self.select_add_area(area);
    }

    /// Add the points inside `area` to the selection.
    pub fn select_add_area(&mut self, area: Rect) {
        let mode = self.mode;
        for p in &mut self.points {
            let pos = match mode {
                CageMode::CageChange => p.src_point,
                CageMode::Deform => p.dest_point,
            };
            if area.contains(pos) {
                p.selected = true;
            }
        }
        self.recompute();
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        for p in &mut self.points {
            p.selected = false;
        }
        self.recompute();
    }

    /// Set the pending displacement of the selected points.
    ///
    /// Destinations always move; sources move too in [`CageMode::CageChange`].
    pub fn add_displacement(&mut self, displacement: Vec2) {
        self.displacement = displacement;
        self.recompute();
    }

    /// Apply the pending displacement to the stored points and clear it.
    pub fn commit_displacement(&mut self) {
        let d = self.displacement;
        let mode = self.mode;
        for p in self.points.iter_mut().filter(|p| p.selected) {
            if mode == CageMode::CageChange {
                p.src_point += d;
            }
            p.dest_point += d;
        }
        self.reset_displacement();
    }

    /// Drop the pending displacement.
    pub fn reset_displacement(&mut self) {
        self.displacement = Vec2::ZERO;
        self.recompute();
    }

    /// Integer extent of the source polygon; empty for an empty cage.
    pub fn bounding_box(&self) -> Roi {
        if self.points.is_empty() {
            return Roi::default();
        }
        let bounds = (0..self.points.len())
            .map(|i| self.src_position(i))
            .fold(Rect::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN), |r, p| {
                Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y))
            });
        Roi::from_edges(
            bounds.x0.floor() as i32,
            bounds.y0.floor() as i32,
            bounds.x1.ceil() as i32,
            bounds.y1.ceil() as i32,
        )
        .unwrap_or_default()
    }

    /// Even-odd test of `p` against the source polygon.
    pub fn point_inside(&self, p: Point) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let p1 = self.src_position(i);
            let p2 = self.src_position(j);
            let straddles = (p1.y <= p.y && p.y < p2.y) || (p2.y <= p.y && p.y < p1.y);
            if straddles && p.x < (p2.x - p1.x) * (p.y - p1.y) / (p2.y - p1.y) + p1.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn recompute(&mut self) {
        let n = self.points.len();
        for i in 0..n {
            let next = (i + 1) % n;
            let src_edge = self.src_position(next) - self.src_position(i);
            let dest_edge = self.dest_position(next) - self.dest_position(i);

            let src_len = src_edge.hypot();
            let dest_len = dest_edge.hypot();
            let point = &mut self.points[i];
            point.edge_scaling_factor = if src_len > 0.0 { dest_len / src_len } else { 1.0 };
            point.edge_normal = if dest_len > 0.0 {
                Vec2::new(dest_edge.y, -dest_edge.x) / dest_len
            } else {
                Vec2::ZERO
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cage/config.rs"]
mod tests;
