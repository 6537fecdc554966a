//! Pure path geometry consumed by the renderer.
//!
//! Kept separate from [`crate::render`] so stroke smoothing and grid layout
//! can be tested without a browser.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use crate::consts::MAX_GRID_LINES;
use crate::transform::Point;

/// One drawing command in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    /// Filled dot for a stroke with a single sample.
    Dot(Point),
}

/// Midpoint-smoothed path through a freehand stroke.
///
/// The first point is a move-to. Each interior point `p[i]` becomes the
/// control point of a quadratic curve ending at `mid(p[i], p[i+1])`. The last
/// point is reached with a straight line. A single point yields a dot and an
/// empty stroke yields nothing.
#[must_use]
pub fn stroke_path(points: &[Point]) -> Vec<PathCmd> {
    match points {
        [] => Vec::new(),
        [only] => vec![PathCmd::Dot(*only)],
        [first, .., last] => {
            let mut cmds = Vec::with_capacity(points.len() + 1);
            cmds.push(PathCmd::MoveTo(*first));
            for pair in points[1..].windows(2) {
                cmds.push(PathCmd::QuadTo { ctrl: pair[0], to: pair[0].midpoint(pair[1]) });
            }
            cmds.push(PathCmd::LineTo(*last));
            cmds
        }
    }
}

/// A straight grid line in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Vertical then horizontal lines every `spacing` units across `[-extent, extent]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_lines(spacing: f64, extent: f64) -> Vec<GridLine> {
    if !(spacing > 0.0 && extent >= 0.0 && grid_line_count(spacing, extent) <= MAX_GRID_LINES as f64) {
        return Vec::new();
    }
    let steps = grid_steps(spacing, extent);
    let mut lines = Vec::with_capacity(steps.len() * 2);
    for &v in &steps {
        lines.push(GridLine { from: Point::new(v, -extent), to: Point::new(v, extent) });
    }
    for &v in &steps {
        lines.push(GridLine { from: Point::new(-extent, v), to: Point::new(extent, v) });
    }
    lines
}

/// Lines per axis for a grid of `spacing` over `[-extent, extent]`.
/// Infinite or NaN for inputs that can't be drawn.
#[must_use]
pub fn grid_line_count(spacing: f64, extent: f64) -> f64 {
    ((2.0 * extent) / spacing).floor() + 1.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn grid_steps(spacing: f64, extent: f64) -> Vec<f64> {
    let count = ((2.0 * extent) / spacing).floor() as i64;
    (0..=count).map(|i| -extent + spacing * i as f64).collect()
}
