//! Element model: the drawable objects on the canvas and sparse updates to them.
//!
//! Elements are a tagged union over rectangles, freehand strokes and text
//! labels. The serialized form is internally tagged on `"type"` with camelCase
//! field names so boards saved by earlier versions of the app load unchanged.
//! Style fields are optional; renderers fall back to configured defaults.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::Point;

/// Unique identifier for an element. Allocated by the element store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned rectangle. `width`/`height` are signed: the sign records the
/// drag direction used to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Freehand stroke through world-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PencilElement {
    pub id: ElementId,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// Text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// A drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rect(RectElement),
    Pencil(PencilElement),
    Text(TextElement),
}

/// The element variant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Rect,
    Pencil,
    Text,
}

impl Element {
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Rect(r) => r.id,
            Self::Pencil(p) => p.id,
            Self::Text(t) => t.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Rect(_) => ElementKind::Rect,
            Self::Pencil(_) => ElementKind::Pencil,
            Self::Text(_) => ElementKind::Text,
        }
    }

    /// The color override, if one is set.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Rect(r) => r.color.as_deref(),
            Self::Pencil(p) => p.color.as_deref(),
            Self::Text(t) => t.color.as_deref(),
        }
    }

    /// Top-left anchor for elements that have one. Strokes have none.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        match self {
            Self::Rect(r) => Some(Point::new(r.x, r.y)),
            Self::Text(t) => Some(Point::new(t.x, t.y)),
            Self::Pencil(_) => None,
        }
    }

    /// Whether every coordinate is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Rect(r) => [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()),
            Self::Pencil(p) => p.points.iter().all(|pt| pt.x.is_finite() && pt.y.is_finite()),
            Self::Text(t) => t.x.is_finite() && t.y.is_finite(),
        }
    }

    /// Merge `patch` into this element. Fields that don't apply to the
    /// element's type are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        match self {
            Self::Rect(r) => {
                if let Some(x) = patch.x {
                    r.x = x;
                }
                if let Some(y) = patch.y {
                    r.y = y;
                }
                if let Some(w) = patch.width {
                    r.width = w;
                }
                if let Some(h) = patch.height {
                    r.height = h;
                }
                if let Some(ref c) = patch.color {
                    r.color = Some(c.clone());
                }
            }
            Self::Pencil(p) => {
                if let Some(ref c) = patch.color {
                    p.color = Some(c.clone());
                }
                if let Some(w) = patch.stroke_width {
                    p.stroke_width = Some(w);
                }
            }
            Self::Text(t) => {
                if let Some(x) = patch.x {
                    t.x = x;
                }
                if let Some(y) = patch.y {
                    t.y = y;
                }
                if let Some(ref c) = patch.color {
                    t.color = Some(c.clone());
                }
                if let Some(ref text) = patch.text {
                    t.text.clone_from(text);
                }
                if let Some(size) = patch.font_size {
                    t.font_size = Some(size);
                }
            }
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ElementPatch {
    /// Patch that moves an element's origin.
    #[must_use]
    pub fn position(origin: Point) -> Self {
        Self { x: Some(origin.x), y: Some(origin.y), ..Default::default() }
    }

    /// Patch that sets an element's color.
    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self { color: Some(color.into()), ..Default::default() }
    }

    /// Patch that sets a stroke's width.
    #[must_use]
    pub fn stroke_width(width: f64) -> Self {
        Self { stroke_width: Some(width), ..Default::default() }
    }
}
