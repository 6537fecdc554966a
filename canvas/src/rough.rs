//! Hand-drawn line generation for the sketchy rectangle style.
//!
//! Each line is a jittered cubic bezier sampled into a polyline. The
//! generator is seeded per element, so an element wobbles the same way on
//! every frame instead of shimmering.

#[cfg(test)]
#[path = "rough_test.rs"]
mod rough_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{ROUGH_CURVE_STEPS, ROUGH_MAX_OFFSET};
use crate::element::ElementId;
use crate::hit::Bounds;
use crate::transform::Point;

/// Tunables for [`RoughGenerator`].
#[derive(Debug, Clone, Copy)]
pub struct RoughOptions {
    /// Multiplier on every random offset. Zero draws straight lines.
    pub roughness: f64,
    /// How far the middle of a line bows away from the straight path.
    pub bowing: f64,
    /// Largest endpoint jitter in world units.
    pub max_offset: f64,
    /// Samples per bezier segment.
    pub curve_steps: u32,
    /// Draw every edge twice with independent jitter.
    pub multi_stroke: bool,
}

impl Default for RoughOptions {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            max_offset: ROUGH_MAX_OFFSET,
            curve_steps: ROUGH_CURVE_STEPS,
            multi_stroke: true,
        }
    }
}

pub struct RoughGenerator {
    rng: StdRng,
    options: RoughOptions,
}

impl RoughGenerator {
    #[must_use]
    pub fn new(seed: u64, options: RoughOptions) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), options }
    }

    /// Generator whose output is stable for one element.
    #[must_use]
    pub fn for_element(id: ElementId) -> Self {
        Self::new(id.0, RoughOptions::default())
    }

    fn random(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn offset(&mut self, min: f64, max: f64, gain: f64) -> f64 {
        self.options.roughness * gain * (self.random() * (max - min) + min)
    }

    fn offset_sym(&mut self, x: f64, gain: f64) -> f64 {
        self.offset(-x, x, gain)
    }

    /// A wobbly polyline from `start` to `end`.
    ///
    /// Returns `curve_steps + 1` points. Endpoints stay within `max_offset`
    /// of the inputs; short lines get proportionally less jitter.
    pub fn rough_line(&mut self, start: Point, end: Point) -> Vec<Point> {
        let length_sq = (end.x - start.x).powi(2) + (end.y - start.y).powi(2);
        let length = length_sq.sqrt();

        // Long lines would look frantic at full roughness.
        let gain = if length < 200.0 {
            1.0
        } else if length > 500.0 {
            0.4
        } else {
            -0.001_666_8 * length + 1.233_334
        };

        let mut offset = self.options.max_offset;
        if offset * offset * 100.0 > length_sq {
            offset = length / 10.0;
        }

        let diverge = 0.2 + self.random() * 0.2;
        let bow = self.options.bowing * self.options.max_offset / 200.0;
        let mut mid_x = bow * (end.y - start.y);
        let mut mid_y = bow * (start.x - end.x);
        mid_x += self.offset_sym(mid_x, gain);
        mid_y += self.offset_sym(mid_y, gain);

        let p0 = Point::new(start.x + self.offset_sym(offset, gain), start.y + self.offset_sym(offset, gain));
        let cp1 = Point::new(
            mid_x + start.x + (end.x - start.x) * diverge + self.offset_sym(offset, gain),
            mid_y + start.y + (end.y - start.y) * diverge + self.offset_sym(offset, gain),
        );
        let cp2 = Point::new(
            mid_x + start.x + 2.0 * (end.x - start.x) * diverge + self.offset_sym(offset, gain),
            mid_y + start.y + 2.0 * (end.y - start.y) * diverge + self.offset_sym(offset, gain),
        );
        let p3 = Point::new(end.x + self.offset_sym(offset, gain), end.y + self.offset_sym(offset, gain));

        let mut points = Vec::with_capacity(self.options.curve_steps as usize + 1);
        points.push(p0);
        points.extend(bezier(p0, cp1, cp2, p3, self.options.curve_steps));
        points
    }

    /// Outline strokes for an axis-aligned box, clockwise from the top-left.
    ///
    /// Each edge is drawn once, or twice when `multi_stroke` is set.
    pub fn rough_rect(&mut self, bounds: Bounds) -> Vec<Vec<Point>> {
        let corners = [
            Point::new(bounds.min_x, bounds.min_y),
            Point::new(bounds.max_x, bounds.min_y),
            Point::new(bounds.max_x, bounds.max_y),
            Point::new(bounds.min_x, bounds.max_y),
        ];
        let passes = if self.options.multi_stroke { 2 } else { 1 };
        let mut lines = Vec::with_capacity(corners.len() * passes);
        for (i, &start) in corners.iter().enumerate() {
            let end = corners[(i + 1) % corners.len()];
            for _ in 0..passes {
                lines.push(self.rough_line(start, end));
            }
        }
        lines
    }
}

/// Sample a cubic bezier at `steps` evenly spaced `t` in `(0, 1]`.
fn bezier(p0: Point, p1: Point, p2: Point, p3: Point, steps: u32) -> Vec<Point> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            let u = 1.0 - t;
            let a = u * u * u;
            let b = 3.0 * u * u * t;
            let c = 3.0 * u * t * t;
            let d = t * t * t;
            Point::new(
                a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                a * p0.y + b * p1.y + c * p2.y + d * p3.y,
            )
        })
        .collect()
}
