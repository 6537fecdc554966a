#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::element::{Element, PencilElement, RectElement};
use crate::transform::Point;

/// Axis-aligned bounds with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Normalize a box given by an origin and a signed size.
    #[must_use]
    pub fn from_signed(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x.min(x + width),
            min_y: y.min(y + height),
            max_x: x.max(x + width),
            max_y: y.max(y + height),
        }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow by `pad` on every side.
    #[must_use]
    pub fn inflate(self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

#[must_use]
pub fn rect_bounds(rect: &RectElement) -> Bounds {
    Bounds::from_signed(rect.x, rect.y, rect.width, rect.height)
}

/// Bounds of a stroke's points, or `None` for an empty stroke.
#[must_use]
pub fn points_bounds(pencil: &PencilElement) -> Option<Bounds> {
    let first = pencil.points.first()?;
    let init = Bounds { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
    Some(pencil.points.iter().fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x),
        min_y: b.min_y.min(p.y),
        max_x: b.max_x.max(p.x),
        max_y: b.max_y.max(p.y),
    }))
}

/// Find the topmost selectable element under `world_pt`.
///
/// Elements are scanned from the top of the z-order down. Only rectangles
/// are selectable; strokes and text never match.
#[must_use]
pub fn hit_test(world_pt: Point, elements: &[Element]) -> Option<&Element> {
    elements.iter().rev().find(|el| match el {
        Element::Rect(rect) => rect_bounds(rect).contains(world_pt),
        Element::Pencil(_) | Element::Text(_) => false,
    })
}
