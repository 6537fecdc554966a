#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Convert a screen-space point to world coordinates for the given scale and offset.
#[must_use]
pub fn to_world(screen: Point, scale: f64, offset: Point) -> Point {
    Point {
        x: (screen.x - offset.x) / scale,
        y: (screen.y - offset.y) / scale,
    }
}

/// Project a world-space point to the screen. Exact inverse of [`to_world`].
#[must_use]
pub fn to_screen(world: Point, scale: f64, offset: Point) -> Point {
    Point {
        x: world.x * scale + offset.x,
        y: world.y * scale + offset.y,
    }
}

/// Pan/zoom state for the infinite canvas.
///
/// `offset` is where the world origin projects to, in screen pixels.
/// `scale` is the zoom factor and is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self { scale: 1.0, offset: Point::default() }
    }
}

impl Transform {
    #[must_use]
    pub fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        to_world(screen, self.scale, self.offset)
    }

    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        to_screen(world, self.scale, self.offset)
    }

    /// Convert a screen-space distance (pixels) to a world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Move the view so that `anchor` (screen position minus offset at gesture start)
    /// follows the pointer.
    pub fn pan_to(&mut self, screen: Point, anchor: Point) {
        self.offset = screen.sub(anchor);
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Zoom by `exp(intensity * direction)` keeping the world point under
    /// `cursor` fixed on screen.
    ///
    /// The resulting scale is clamped to `[min_scale, max_scale]`; the offset is
    /// recomputed from the clamped value so the anchor still holds.
    pub fn zoom_at(&mut self, cursor: Point, direction: f64, intensity: f64, min_scale: f64, max_scale: f64) {
        let world = self.to_world(cursor);
        let next = (self.scale * (intensity * direction).exp()).clamp(min_scale, max_scale);
        self.scale = next;
        self.offset = Point {
            x: cursor.x - world.x * next,
            y: cursor.y - world.y * next,
        };
    }
}
