#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementId, TextElement};

fn rect(id: u64, x: f64, y: f64, width: f64, height: f64) -> Element {
    Element::Rect(RectElement { id: ElementId(id), x, y, width, height, color: None })
}

fn pencil(id: u64, points: &[(f64, f64)]) -> Element {
    Element::Pencil(PencilElement {
        id: ElementId(id),
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color: None,
        stroke_width: None,
    })
}

fn text(id: u64, x: f64, y: f64) -> Element {
    Element::Text(TextElement { id: ElementId(id), x, y, text: "label".into(), color: None, font_size: None })
}

fn hit_id(pt: Point, elements: &[Element]) -> Option<u64> {
    hit_test(pt, elements).map(|el| el.id().0)
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_from_positive_size() {
    let b = Bounds::from_signed(10.0, 20.0, 30.0, 40.0);
    assert_eq!(b, Bounds { min_x: 10.0, min_y: 20.0, max_x: 40.0, max_y: 60.0 });
    assert_eq!(b.width(), 30.0);
    assert_eq!(b.height(), 40.0);
}

#[test]
fn bounds_from_negative_size_normalizes() {
    let b = Bounds::from_signed(40.0, 60.0, -30.0, -40.0);
    assert_eq!(b, Bounds { min_x: 10.0, min_y: 20.0, max_x: 40.0, max_y: 60.0 });
}

#[test]
fn bounds_contains_is_inclusive() {
    let b = Bounds::from_signed(0.0, 0.0, 10.0, 10.0);
    assert!(b.contains(Point::new(0.0, 0.0)));
    assert!(b.contains(Point::new(10.0, 10.0)));
    assert!(!b.contains(Point::new(10.001, 5.0)));
}

#[test]
fn bounds_inflate() {
    let b = Bounds::from_signed(0.0, 0.0, 10.0, 10.0).inflate(2.0);
    assert_eq!(b, Bounds { min_x: -2.0, min_y: -2.0, max_x: 12.0, max_y: 12.0 });
}

#[test]
fn points_bounds_covers_all_points() {
    let Element::Pencil(p) = pencil(1, &[(5.0, 5.0), (-3.0, 8.0), (2.0, -1.0)]) else {
        panic!("expected pencil");
    };
    assert_eq!(points_bounds(&p), Some(Bounds { min_x: -3.0, min_y: -1.0, max_x: 5.0, max_y: 8.0 }));
}

#[test]
fn points_bounds_empty_stroke_is_none() {
    let Element::Pencil(p) = pencil(1, &[]) else {
        panic!("expected pencil");
    };
    assert!(points_bounds(&p).is_none());
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_inside_rect() {
    let elements = vec![rect(1, 100.0, 100.0, 50.0, 50.0)];
    assert_eq!(hit_id(Point::new(110.0, 110.0), &elements), Some(1));
}

#[test]
fn miss_outside_rect() {
    let elements = vec![rect(1, 100.0, 100.0, 50.0, 50.0)];
    assert_eq!(hit_id(Point::new(99.0, 110.0), &elements), None);
}

#[test]
fn empty_collection_misses() {
    assert_eq!(hit_id(Point::new(0.0, 0.0), &[]), None);
}

#[test]
fn topmost_overlapping_rect_wins() {
    let elements = vec![rect(1, 0.0, 0.0, 100.0, 100.0), rect(2, 50.0, 50.0, 100.0, 100.0)];
    assert_eq!(hit_id(Point::new(75.0, 75.0), &elements), Some(2));
    // Outside B but inside A.
    assert_eq!(hit_id(Point::new(10.0, 10.0), &elements), Some(1));
}

#[test]
fn negative_size_hits_like_normalized_box() {
    let normalized = vec![rect(1, 10.0, 20.0, 30.0, 40.0)];
    let dragged_up_left = vec![rect(1, 40.0, 60.0, -30.0, -40.0)];
    let samples = [
        Point::new(10.0, 20.0),
        Point::new(25.0, 40.0),
        Point::new(40.0, 60.0),
        Point::new(9.0, 40.0),
        Point::new(25.0, 61.0),
    ];
    for p in samples {
        assert_eq!(hit_id(p, &normalized), hit_id(p, &dragged_up_left), "sample {p:?}");
    }
}

#[test]
fn zero_size_rect_hits_only_its_point() {
    let elements = vec![rect(1, 5.0, 5.0, 0.0, 0.0)];
    assert_eq!(hit_id(Point::new(5.0, 5.0), &elements), Some(1));
    assert_eq!(hit_id(Point::new(5.1, 5.0), &elements), None);
}

#[test]
fn strokes_and_text_are_never_hit() {
    let elements = vec![pencil(1, &[(0.0, 0.0), (10.0, 10.0)]), text(2, 0.0, 0.0)];
    assert_eq!(hit_id(Point::new(0.0, 0.0), &elements), None);
    assert_eq!(hit_id(Point::new(5.0, 5.0), &elements), None);
}

#[test]
fn stroke_on_top_does_not_shadow_rect_below() {
    let elements = vec![rect(1, 0.0, 0.0, 10.0, 10.0), pencil(2, &[(5.0, 5.0)])];
    assert_eq!(hit_id(Point::new(5.0, 5.0), &elements), Some(1));
}
